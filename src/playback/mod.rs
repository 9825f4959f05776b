//! Transcript playback synchronized to the audio epoch
//!
//! # Architecture
//!
//! - [`EntryScheduler`] walks the transcript in order, gating each entry on
//!   the clock: wait for its start, render it, wait out its window.
//! - [`TypingRenderer`] paces the characters of one entry across its window.
//! - [`show_code`] renders an optional code callout and pauses.
//! - [`CancellationToken`] stops the scheduler at entry boundaries and is
//!   raised by the scheduler itself once playback ends.
//!
//! Audio runs on its own thread and is never consulted; the only shared
//! state is the clock epoch.

pub mod callout;
pub mod cancel;
pub mod scheduler;
pub mod typing;

pub use callout::{show_code, EXECUTION_PAUSE};
pub use cancel::CancellationToken;
pub use scheduler::{EntryScheduler, EntryTiming, PlaybackReport};
pub use typing::{char_interval, TypingRenderer, MAX_CHAR_INTERVAL};

/// Error type for playback
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("Failed to write to terminal: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type for playback
pub type PlaybackResult<T> = Result<T, PlaybackError>;
