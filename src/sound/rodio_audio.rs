//! Rodio-based playback
//!
//! rodio's `OutputStream` is not `Send`, so it is opened inside `play`,
//! which runs on the dedicated audio thread, and dropped there when the
//! sink drains.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::{AudioError, AudioPlayer};

#[derive(Debug, Default)]
pub struct RodioPlayer {
    volume: Option<f32>,
}

impl RodioPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play at a fixed volume, clamped to 0.0..=1.0
    pub fn with_volume(volume: f32) -> Self {
        Self {
            volume: Some(volume.clamp(0.0, 1.0)),
        }
    }
}

impl AudioPlayer for RodioPlayer {
    fn name(&self) -> &'static str {
        "rodio"
    }

    fn play(&mut self, path: &Path, started: &dyn Fn()) -> Result<(), AudioError> {
        let file = File::open(path).map_err(|source| AudioError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file))?;
        match source.total_duration() {
            Some(length) => tracing::debug!("Audio length {:.1}s", length.as_secs_f64()),
            None => tracing::debug!("Audio length unknown"),
        }

        let (_stream, stream_handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&stream_handle)?;
        if let Some(volume) = self.volume {
            sink.set_volume(volume);
        }

        sink.append(source);
        started();
        sink.sleep_until_end();
        Ok(())
    }
}
