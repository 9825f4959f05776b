//! Silent player
//!
//! Used when audio is disabled. Timing is unaffected because the scheduler
//! runs on its own clock.

use std::path::Path;

use super::{AudioError, AudioPlayer};

#[derive(Debug, Default, Clone, Copy)]
pub struct NullPlayer;

impl AudioPlayer for NullPlayer {
    fn name(&self) -> &'static str {
        "none"
    }

    fn play(&mut self, _path: &Path, started: &dyn Fn()) -> Result<(), AudioError> {
        started();
        Ok(())
    }
}
