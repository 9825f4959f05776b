// Terminal Symphony library
// Transcript playback synchronized to podcast audio

pub mod cli;
pub mod config;
pub mod logging;
pub mod playback;
pub mod propfile;
pub mod sound;
pub mod terminal;
pub mod time;
pub mod transcript;

pub use cli::Cli;
pub use config::{Options, Settings};
pub use logging::LogLevel;
pub use playback::{CancellationToken, EntryScheduler};
pub use time::{Clock, EpochClock};
pub use transcript::{Transcript, TranscriptEntry};
