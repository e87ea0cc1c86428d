//! Absolute-time periodic delay (delay-until).
//!
//! Each wake is scheduled relative to the previous deadline rather than to
//! when the task finished its work, so the period does not drift. If a
//! deadline has already passed the missed periods are skipped.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct PeriodicTimer {
    period: Duration,
    next: Instant,
}

impl PeriodicTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Sleep until the next deadline, then arm the one after it.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            self.next = now + self.period;
        }
    }

    /// Re-anchor the schedule one period from now.
    pub fn reset(&mut self) {
        self.next = Instant::now() + self.period;
    }
}
