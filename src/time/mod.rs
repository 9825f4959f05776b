//! Clock reference for playback synchronization
//!
//! Every offset in a transcript is measured from a single epoch captured
//! right as audio playback starts. The [`Clock`] trait also owns the sleep
//! primitive, so the scheduler and renderers can be driven by a
//! [`ManualClock`] in tests and by the real [`EpochClock`] at runtime.

pub mod epoch;
pub mod manual_clock;

pub use epoch::EpochClock;
pub use manual_clock::ManualClock;

use std::time::Duration;

/// Upper bound on a single wait-loop sleep
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Lower bound on a single wait-loop sleep
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// A monotonic time source measured from a fixed epoch
pub trait Clock {
    /// Seconds elapsed since the epoch
    fn elapsed(&self) -> f64;

    /// Block for `duration`
    fn sleep(&self, duration: Duration);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn elapsed(&self) -> f64 {
        (**self).elapsed()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Convert a span in seconds into a sleepable duration.
///
/// Negative, NaN and overflowing spans map to zero.
pub fn seconds(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
    } else {
        Duration::ZERO
    }
}

/// Length of the next sleep while waiting for `remaining` seconds
pub fn poll_step(remaining: f64) -> Duration {
    seconds(remaining).clamp(MIN_POLL_INTERVAL, POLL_INTERVAL)
}
