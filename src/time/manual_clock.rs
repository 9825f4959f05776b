//! Simulated clock for deterministic timing tests

use std::time::Duration;

use parking_lot::Mutex;

use super::Clock;

/// A clock that only moves when slept on or advanced explicitly
///
/// Sleeping advances virtual time by exactly the requested duration and
/// returns immediately.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Duration>,
    slept: Mutex<Duration>,
}

impl ManualClock {
    /// Create a clock at elapsed time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock that has already run for `secs` seconds
    pub fn at(secs: f64) -> Self {
        let clock = Self::new();
        clock.advance(super::seconds(secs));
        clock
    }

    /// Move virtual time forward without counting it as sleep
    pub fn advance(&self, duration: Duration) {
        *self.now.lock() += duration;
    }

    /// Total time spent in [`Clock::sleep`]
    pub fn total_slept(&self) -> Duration {
        *self.slept.lock()
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> f64 {
        self.now.lock().as_secs_f64()
    }

    fn sleep(&self, duration: Duration) {
        *self.now.lock() += duration;
        *self.slept.lock() += duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let clock = ManualClock::new();
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.total_slept(), Duration::ZERO);
    }

    #[test]
    fn test_sleep_advances_time() {
        let clock = ManualClock::new();
        clock.sleep(Duration::from_millis(1500));
        assert!((clock.elapsed() - 1.5).abs() < 1e-9);
        assert_eq!(clock.total_slept(), Duration::from_millis(1500));
    }

    #[test]
    fn test_advance_is_not_sleep() {
        let clock = ManualClock::at(3.0);
        assert!((clock.elapsed() - 3.0).abs() < 1e-9);
        assert_eq!(clock.total_slept(), Duration::ZERO);
    }
}
