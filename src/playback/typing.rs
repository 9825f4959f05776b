//! Character-by-character typing within an entry's window

use std::io::{self, Write};
use std::time::Duration;

use rand::Rng;

use crate::terminal::{Screen, SpeakerStyle};
use crate::time::{seconds, Clock};

/// Slowest allowed typing speed, per character
pub const MAX_CHAR_INTERVAL: Duration = Duration::from_millis(50);

/// Bounds of the random multiplier applied to each pause
pub const JITTER_MIN: f64 = 0.8;
pub const JITTER_MAX: f64 = 1.2;

/// How far typing may run behind its nominal schedule, in intervals
const SCHEDULE_SLACK: f64 = JITTER_MAX - 1.0;

/// Base per-character interval for `char_count` characters in `duration`.
///
/// Never slower than [`MAX_CHAR_INTERVAL`]; long text in a short window
/// speeds up to fit.
pub fn char_interval(char_count: usize, duration: Duration) -> Duration {
    let per_char = duration.div_f64(char_count.max(1) as f64);
    per_char.min(MAX_CHAR_INTERVAL)
}

/// Paces dialogue onto the screen with human-looking jitter
#[derive(Debug)]
pub struct TypingRenderer<R: Rng> {
    rng: R,
}

impl<R: Rng> TypingRenderer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// `base` scaled by a uniform multiplier in `[JITTER_MIN, JITTER_MAX]`
    pub fn jittered(&mut self, base: Duration) -> Duration {
        base.mul_f64(self.rng.gen_range(JITTER_MIN..=JITTER_MAX))
    }

    /// Type `text` so that it finishes in roughly `duration`.
    ///
    /// Each character is followed by a jittered pause of one base interval.
    /// A pause is cut short when typing would fall more than
    /// `SCHEDULE_SLACK` intervals behind `i * base`, so jitter never
    /// accumulates and the last character lands inside the window. A zero
    /// duration types everything without pausing.
    pub fn type_text<C, W>(
        &mut self,
        clock: &C,
        screen: &mut Screen<W>,
        text: &str,
        style: SpeakerStyle,
        duration: Duration,
    ) -> io::Result<()>
    where
        C: Clock + ?Sized,
        W: Write,
    {
        let base = char_interval(text.chars().count(), duration);
        let base_secs = base.as_secs_f64();
        let started = clock.elapsed();

        for (index, ch) in text.chars().enumerate() {
            screen.type_char(ch, style)?;

            if base.is_zero() {
                continue;
            }

            let behind = clock.elapsed() - started;
            let allowed = (index as f64 + 1.0 + SCHEDULE_SLACK) * base_secs - behind;
            let pause = self.jittered(base).min(seconds(allowed));
            clock.sleep(pause);
        }

        Ok(())
    }
}
