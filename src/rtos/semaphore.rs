//! Binary semaphore built on an interrupt-safe `embassy-sync` signal.
//!
//! At most one pending give is remembered; further gives before a take
//! collapse into it.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

pub struct BinarySemaphore {
    signal: Signal<CriticalSectionRawMutex, ()>,
}

impl Default for BinarySemaphore {
    fn default() -> Self {
        Self::new()
    }
}

impl BinarySemaphore {
    /// Create an empty (taken) semaphore.
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Make the semaphore available.
    pub fn give(&self) {
        self.signal.signal(());
    }

    /// Interrupt-side give. Never blocks.
    ///
    /// Returns `true` when the semaphore transitioned from empty to
    /// available, i.e. a blocked taker may now run.
    pub fn give_from_isr(&self) -> bool {
        let was_available = self.signal.signaled();
        self.signal.signal(());
        !was_available
    }

    /// Block until available, then take it.
    pub fn take(&self) {
        futures_lite::future::block_on(self.signal.wait());
    }

    /// Take without blocking. Returns `false` when nothing was pending.
    pub fn try_take(&self) -> bool {
        self.signal.try_take().is_some()
    }

    /// Whether a give is pending.
    pub fn is_available(&self) -> bool {
        self.signal.signaled()
    }

    /// Discard any pending give.
    pub fn reset(&self) {
        self.signal.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn gives_collapse_into_one() {
        let s = BinarySemaphore::new();
        s.give();
        s.give();
        assert!(s.try_take());
        assert!(!s.try_take());
    }

    #[test]
    fn isr_give_reports_transition() {
        let s = BinarySemaphore::new();
        assert!(s.give_from_isr());
        assert!(!s.give_from_isr());
        s.reset();
        assert!(!s.is_available());
    }

    #[test]
    fn take_blocks_until_given() {
        let s = Arc::new(BinarySemaphore::new());
        let taker = {
            let s = Arc::clone(&s);
            thread::spawn(move || s.take())
        };
        thread::sleep(Duration::from_millis(20));
        assert!(!taker.is_finished());
        s.give_from_isr();
        taker.join().unwrap();
        assert!(!s.is_available());
    }
}
