use std::time::Instant;

use uom::si::{f64::Time, time::second};

/// A monotonic wall-clock tick source.
///
/// `now` must be non-decreasing across calls. The contract is documented
/// rather than checked; a clock that runs backwards hands the integrator a
/// negative elapsed time, which is outside its domain.
pub trait Clock {
    fn now(&mut self) -> Time;
}

/// A [`Clock`] backed by [`std::time::Instant`].
#[derive(Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&mut self) -> Time {
        Time::new::<second>(self.origin.elapsed().as_secs_f64())
    }
}

/// A hand-driven [`Clock`] for tests and scripted playback.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Time,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn starting_at(now: Time) -> Self {
        Self { now }
    }

    /// Moves the clock forward by `dt`.
    pub fn tick(&mut self, dt: Time) {
        self.now += dt;
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> Time {
        self.now
    }
}
