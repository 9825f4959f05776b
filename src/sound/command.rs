//! External player program
//!
//! Hands the audio file to a system player such as `afplay` or `ffplay`
//! with its output discarded.

use std::path::Path;
use std::process::{Command, Stdio};

use super::{AudioError, AudioPlayer};

/// Player used when none is configured
#[cfg(target_os = "macos")]
pub const DEFAULT_PLAYER_COMMAND: &str = "afplay";
#[cfg(not(target_os = "macos"))]
pub const DEFAULT_PLAYER_COMMAND: &str = "ffplay -nodisp -autoexit -loglevel quiet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlayer {
    program: String,
    args: Vec<String>,
}

impl CommandPlayer {
    /// Split a whitespace-separated command line; the audio path is
    /// appended as the last argument.
    pub fn from_command_line(command: &str) -> Self {
        let mut parts = command.split_whitespace().map(str::to_string);
        Self {
            program: parts.next().unwrap_or_default(),
            args: parts.collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Default for CommandPlayer {
    fn default() -> Self {
        Self::from_command_line(DEFAULT_PLAYER_COMMAND)
    }
}

impl AudioPlayer for CommandPlayer {
    fn name(&self) -> &'static str {
        "command"
    }

    fn play(&mut self, path: &Path, started: &dyn Fn()) -> Result<(), AudioError> {
        if self.program.is_empty() {
            return Err(AudioError::EmptyCommand);
        }

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| AudioError::Command {
                program: self.program.clone(),
                source,
            })?;
        started();

        let status = child.wait().map_err(|source| AudioError::Command {
            program: self.program.clone(),
            source,
        })?;
        if !status.success() {
            return Err(AudioError::CommandFailed {
                program: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_command_line() {
        let player = CommandPlayer::from_command_line("ffplay -nodisp  -autoexit");
        assert_eq!(player.program(), "ffplay");
        assert_eq!(player.args(), &["-nodisp".to_string(), "-autoexit".to_string()]);
    }

    #[test]
    fn test_empty_command() {
        let mut player = CommandPlayer::from_command_line("   ");
        let err = player.play(Path::new("a.wav"), &|| {}).unwrap_err();
        assert!(matches!(err, AudioError::EmptyCommand));
    }

    #[test]
    fn test_missing_program() {
        let mut player = CommandPlayer::from_command_line("definitely-not-a-player-binary");
        let err = player.play(Path::new("a.wav"), &|| {}).unwrap_err();
        assert!(matches!(err, AudioError::Command { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_program_with_path() {
        let mut player = CommandPlayer::from_command_line("test -n");
        let started = std::cell::Cell::new(false);
        player.play(Path::new("episode.wav"), &|| started.set(true)).unwrap();
        assert!(started.get());
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit() {
        let mut player = CommandPlayer::from_command_line("false");
        let err = player.play(Path::new("a.wav"), &|| {}).unwrap_err();
        assert!(matches!(err, AudioError::CommandFailed { .. }));
    }
}
