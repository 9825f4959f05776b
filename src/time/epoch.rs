//! Wall-clock epoch shared by the scheduler and the audio player

use std::thread;
use std::time::{Duration, Instant};

use super::Clock;

/// Monotonic clock anchored at the moment playback started
///
/// Captured once per run and never reset. Copies share the same epoch.
#[derive(Debug, Clone, Copy)]
pub struct EpochClock {
    epoch: Instant,
}

impl EpochClock {
    /// Capture the synchronization epoch now
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    /// The captured epoch
    pub fn epoch(&self) -> Instant {
        self.epoch
    }
}

impl Clock for EpochClock {
    fn elapsed(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_is_monotonic() {
        let clock = EpochClock::start();
        let first = clock.elapsed();
        clock.sleep(Duration::from_millis(2));
        let second = clock.elapsed();
        assert!(first >= 0.0);
        assert!(second >= first + 0.002);
    }

    #[test]
    fn test_copies_share_epoch() {
        let clock = EpochClock::start();
        let copy = clock;
        assert_eq!(clock.epoch(), copy.epoch());
    }
}
