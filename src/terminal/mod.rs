//! Styled terminal output
//!
//! All drawing goes through [`Screen`], which queues crossterm commands onto
//! any `io::Write`. Standard output is the only contended resource and only
//! the scheduler writes to it, so no locking is needed.

pub mod screen;
pub mod style;

pub use screen::{PromptConfig, Screen};
pub use style::{parse_color, Palette, SpeakerStyle};
