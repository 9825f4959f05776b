//! Transcript model and loading
//!
//! A transcript is an ordered list of timed dialogue entries. Offsets are in
//! seconds from the synchronization epoch; entries are presented in the
//! order they were supplied and are never re-sorted.

pub mod entry;
pub mod loader;
pub mod timecode;

pub use entry::{Transcript, TranscriptEntry, UNKNOWN_SPEAKER};
pub use loader::{load_transcript, parse_transcript, TranscriptError};
pub use timecode::{parse_timecode, TimecodeError};
