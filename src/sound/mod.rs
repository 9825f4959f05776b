//! Podcast audio playback
//!
//! Audio plays on its own thread from start to finish. The scheduler never
//! waits on it; the only contract is that playback starts at about the
//! same moment the clock epoch is captured. A one-shot start signal lets
//! the caller narrow that gap when it wants to.

pub mod command;
pub mod null;
pub mod rodio_audio;

pub use command::CommandPlayer;
pub use null::NullPlayer;
pub use rodio_audio::RodioPlayer;

use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError};

/// Name given to the playback thread
pub const AUDIO_THREAD_NAME: &str = "audio";

/// Error type for audio playback
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Failed to open audio file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open audio output: {0}")]
    Device(#[from] rodio::StreamError),

    #[error("Failed to create audio sink: {0}")]
    Sink(#[from] rodio::PlayError),

    #[error("Failed to decode audio: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),

    #[error("Failed to run audio player {program:?}: {source}")]
    Command {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Audio player {program:?} exited with {status}")]
    CommandFailed { program: String, status: ExitStatus },

    #[error("Audio player command is empty")]
    EmptyCommand,

    #[error("Failed to spawn audio thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Audio thread panicked")]
    Panicked,
}

/// Which player to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioBackend {
    /// Decode and play in-process
    #[default]
    Rodio,
    /// Hand the file to an external player program
    Command,
    /// No audio
    None,
}

/// Something that can play an audio file to completion
pub trait AudioPlayer: Send {
    fn name(&self) -> &'static str;

    /// Play `path`, blocking until playback ends.
    ///
    /// `started` must be called once audio is actually being output.
    fn play(&mut self, path: &Path, started: &dyn Fn()) -> Result<(), AudioError>;
}

/// Build the player for a backend.
///
/// `volume` applies to the rodio backend only; an external player keeps
/// its own volume.
pub fn create_player(
    backend: AudioBackend,
    command: &str,
    volume: Option<f32>,
) -> Box<dyn AudioPlayer> {
    match backend {
        AudioBackend::Rodio => match volume {
            Some(volume) => Box::new(RodioPlayer::with_volume(volume)),
            None => Box::new(RodioPlayer::new()),
        },
        AudioBackend::Command => Box::new(CommandPlayer::from_command_line(command)),
        AudioBackend::None => Box::new(NullPlayer),
    }
}

/// Handle to a playback thread
pub struct AudioHandle {
    started: Receiver<()>,
    thread: JoinHandle<Result<(), AudioError>>,
}

/// Start playing `path` on a background thread
pub fn spawn_playback(
    mut player: Box<dyn AudioPlayer>,
    path: PathBuf,
) -> Result<AudioHandle, AudioError> {
    let (started_tx, started_rx) = channel::bounded(1);

    let thread = thread::Builder::new()
        .name(AUDIO_THREAD_NAME.to_string())
        .spawn(move || {
            let name = player.name();
            tracing::info!("Audio ({}): playing {}", name, path.display());

            let notify = || {
                let _ = started_tx.try_send(());
            };
            let result = player.play(&path, &notify);

            match &result {
                Ok(()) => tracing::info!("Audio ({}): playback finished", name),
                Err(e) => tracing::error!("Audio ({}): {}", name, e),
            }
            result
        })
        .map_err(AudioError::Spawn)?;

    Ok(AudioHandle {
        started: started_rx,
        thread,
    })
}

impl AudioHandle {
    /// Wait up to `timeout` for playback to begin.
    ///
    /// Returns false on timeout or if the player failed before starting.
    pub fn wait_started(&self, timeout: Duration) -> bool {
        match self.started.recv_timeout(timeout) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!("Audio did not start within {:?}", timeout);
                false
            }
            Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Wait for playback to end
    pub fn join(self) -> Result<(), AudioError> {
        self.thread.join().map_err(|_| AudioError::Panicked)?
    }
}
