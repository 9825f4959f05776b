use crate::config::{load_config, parse_episode, parse_volume, Options, Settings};
use crate::logging::LogLevel;
use crate::sound::AudioBackend;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Terminal Symphony - type out a podcast transcript in sync with its audio
#[derive(Parser, Debug, Default)]
#[command(name = "terminal-symphony")]
#[command(version)]
#[command(about = "Play a podcast and type its transcript into the terminal in sync", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the podcast audio file
    #[arg(long, alias = "podcast_audio_path", value_name = "FILE")]
    pub podcast_audio_path: Option<PathBuf>,

    /// Path to the transcript CSV file
    #[arg(long, alias = "transcript_csv_path", value_name = "FILE")]
    pub transcript_csv_path: Option<PathBuf>,

    /// Log file path (appended to)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level (error, warning, info, debug)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Result video path reported at completion
    #[arg(long, value_name = "FILE")]
    pub output_video_path: Option<PathBuf>,

    /// Episode number shown in the prompt
    #[arg(long, value_name = "NUMBER")]
    pub episode: Option<String>,

    /// Show name shown in the prompt
    #[arg(long, value_name = "NAME")]
    pub show_name: Option<String>,

    /// Audio backend (rodio, command, none)
    #[arg(long, value_name = "BACKEND")]
    pub audio_backend: Option<String>,

    /// External player command line for the command backend
    #[arg(long, value_name = "COMMAND")]
    pub player_command: Option<String>,

    /// Playback volume for the rodio backend (0.0 to 1.0)
    #[arg(long, value_name = "VOLUME")]
    pub volume: Option<String>,

    /// Disable double-width text
    #[arg(long)]
    pub no_large_font: bool,

    /// Seed for typing jitter
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

impl Cli {
    /// Load the config file if one was given, merge the command line over
    /// it, and resolve the result
    pub fn resolve(&self) -> Result<Settings> {
        let options = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => Options::default(),
        };

        let options = self.merge_into_options(options)?;
        Ok(options.resolve()?)
    }

    /// Merge CLI arguments into the options struct.
    ///
    /// The two input paths are taken from the command line only when no
    /// config file was given; a config file is authoritative for them.
    pub fn merge_into_options(&self, mut opts: Options) -> Result<Options> {
        if self.config.is_none() {
            if let Some(ref path) = self.podcast_audio_path {
                opts.podcast_audio_path = Some(path.clone());
            }
            if let Some(ref path) = self.transcript_csv_path {
                opts.transcript_csv_path = Some(path.clone());
            }
        }

        if let Some(ref log_file) = self.log_file {
            opts.log_file = Some(log_file.clone());
        }

        if let Some(ref level) = self.log_level {
            opts.log_level = Some(Self::parse_log_level(level)?);
        }

        if let Some(ref path) = self.output_video_path {
            opts.output_video_path = Some(path.clone());
        }

        if let Some(ref episode) = self.episode {
            opts.episode = Some(parse_episode(episode).context("Invalid episode number")?);
        }

        if let Some(ref show) = self.show_name {
            opts.show_name = Some(show.clone());
        }

        if let Some(ref backend) = self.audio_backend {
            opts.audio_backend = Some(Self::parse_audio_backend(backend)?);
        }

        if let Some(ref command) = self.player_command {
            opts.player_command = Some(command.clone());
            if self.audio_backend.is_none() {
                opts.audio_backend = Some(AudioBackend::Command);
            }
        }

        if let Some(ref volume) = self.volume {
            opts.volume = Some(parse_volume(volume).context("Invalid volume")?);
        }

        if self.no_large_font {
            opts.large_font = Some(false);
        }

        if self.seed.is_some() {
            opts.seed = self.seed;
        }

        Ok(opts)
    }

    fn parse_log_level(s: &str) -> Result<LogLevel> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => anyhow::bail!(
                "Invalid log level: {}. Valid options: error, warning, info, debug",
                s
            ),
        }
    }

    fn parse_audio_backend(s: &str) -> Result<AudioBackend> {
        match s.to_lowercase().as_str() {
            "rodio" => Ok(AudioBackend::Rodio),
            "command" | "external" => Ok(AudioBackend::Command),
            "none" | "off" => Ok(AudioBackend::None),
            _ => anyhow::bail!(
                "Invalid audio backend: {}. Valid options: rodio, command, none",
                s
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use std::io::Write;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(Cli::parse_log_level("debug").unwrap(), LogLevel::Debug);
        assert_eq!(Cli::parse_log_level("WARN").unwrap(), LogLevel::Warning);
        assert!(Cli::parse_log_level("verbose").is_err());
    }

    #[test]
    fn test_parse_audio_backend() {
        assert_eq!(Cli::parse_audio_backend("rodio").unwrap(), AudioBackend::Rodio);
        assert_eq!(Cli::parse_audio_backend("NONE").unwrap(), AudioBackend::None);
        assert_eq!(
            Cli::parse_audio_backend("external").unwrap(),
            AudioBackend::Command
        );
        assert!(Cli::parse_audio_backend("alsa").is_err());
    }

    #[test]
    fn test_parse_from_args() {
        let cli = Cli::try_parse_from([
            "terminal-symphony",
            "--podcast_audio_path",
            "ep.mp3",
            "--transcript-csv-path",
            "ep.csv",
            "--seed",
            "9",
        ])
        .unwrap();

        assert_eq!(cli.podcast_audio_path, Some(PathBuf::from("ep.mp3")));
        assert_eq!(cli.transcript_csv_path, Some(PathBuf::from("ep.csv")));
        assert_eq!(cli.seed, Some(9));
    }

    #[test]
    fn test_resolve_from_parameters() {
        let cli = Cli {
            podcast_audio_path: Some("ep.mp3".into()),
            transcript_csv_path: Some("ep.csv".into()),
            episode: Some("42".to_string()),
            no_large_font: true,
            ..Default::default()
        };

        let settings = cli.resolve().unwrap();
        assert_eq!(settings.podcast_audio_path, PathBuf::from("ep.mp3"));
        assert_eq!(settings.prompt.episode, 42);
        assert!(!settings.large_font);
    }

    #[test]
    fn test_resolve_requires_inputs() {
        let cli = Cli {
            podcast_audio_path: Some("ep.mp3".into()),
            ..Default::default()
        };

        let err = cli.resolve().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MissingInputs(_))
        ));
    }

    #[test]
    fn test_config_file_wins_for_paths() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[Settings]\npodcast_audio_path = file.mp3\ntranscript_csv_path = file.csv"
        )
        .unwrap();

        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            podcast_audio_path: Some("cli.mp3".into()),
            show_name: Some("Override".to_string()),
            ..Default::default()
        };

        let settings = cli.resolve().unwrap();
        assert_eq!(settings.podcast_audio_path, PathBuf::from("file.mp3"));
        assert_eq!(settings.transcript_csv_path, PathBuf::from("file.csv"));
        assert_eq!(settings.prompt.show_name, "Override");
    }

    #[test]
    fn test_missing_config_file_is_fatal() {
        let cli = Cli {
            config: Some("/nonexistent/symphony.ini".into()),
            podcast_audio_path: Some("ep.mp3".into()),
            transcript_csv_path: Some("ep.csv".into()),
            ..Default::default()
        };
        assert!(cli.resolve().is_err());
    }

    #[test]
    fn test_player_command_selects_command_backend() {
        let cli = Cli {
            player_command: Some("afplay".to_string()),
            ..Default::default()
        };
        let opts = cli.merge_into_options(Options::default()).unwrap();
        assert_eq!(opts.audio_backend, Some(AudioBackend::Command));
        assert_eq!(opts.player_command.as_deref(), Some("afplay"));
    }

    #[test]
    fn test_volume_overrides_file() {
        let opts = Options {
            volume: Some(0.2),
            ..Default::default()
        };
        let cli = Cli::try_parse_from(["terminal-symphony", "--volume", "0.9"]).unwrap();
        let opts = cli.merge_into_options(opts).unwrap();
        assert_eq!(opts.volume, Some(0.9));

        let cli = Cli::try_parse_from(["terminal-symphony", "--volume", "3"]).unwrap();
        assert!(cli.merge_into_options(Options::default()).is_err());
    }

    #[test]
    fn test_invalid_episode() {
        let cli = Cli {
            episode: Some("x".to_string()),
            ..Default::default()
        };
        assert!(cli.merge_into_options(Options::default()).is_err());
    }
}
