//! Shared event bitset with blocking multi-bit waits.
//!
//! Producers OR bits in; a consumer blocks until any (or all) of a mask
//! is set, optionally clearing the masked bits atomically on wake.

use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// How a waiter is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitMode {
    /// Wake when any masked bit is set.
    Any,
    /// Wake only when every masked bit is set.
    All,
}

#[derive(Default)]
pub struct EventGroup {
    bits: Mutex<u32>,
    changed: Condvar,
}

impl EventGroup {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, u32> {
        // Bits are plain integers; a panicked holder cannot leave them torn.
        self.bits.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// OR `mask` into the group and wake all waiters. Returns the new value.
    pub fn set_bits(&self, mask: u32) -> u32 {
        let mut bits = self.lock();
        *bits |= mask;
        self.changed.notify_all();
        *bits
    }

    /// Event-source variant of [`set_bits`](Self::set_bits).
    ///
    /// Returns `true` when `mask` set at least one bit that was clear, i.e.
    /// a waiter on those bits may have become runnable.
    ///
    /// This takes a std `Mutex` and must not run in a hardware interrupt.
    /// GPIO ISRs only bump atomics in `drivers::button`; the main task's
    /// `ButtonRelay` forwards those edges here.
    pub fn set_bits_from_isr(&self, mask: u32) -> bool {
        let mut bits = self.lock();
        let before = *bits;
        *bits |= mask;
        self.changed.notify_all();
        before & mask != mask
    }

    /// Clear `mask`, returning the value before clearing.
    pub fn clear_bits(&self, mask: u32) -> u32 {
        let mut bits = self.lock();
        let before = *bits;
        *bits &= !mask;
        before
    }

    /// Current value without blocking.
    pub fn bits(&self) -> u32 {
        *self.lock()
    }

    /// Block until the wait condition on `mask` holds or `timeout` expires.
    ///
    /// Returns the full bit value observed at wake, before any clearing.
    /// On timeout the returned value does not satisfy the condition and
    /// nothing is cleared.
    pub fn wait_bits(
        &self,
        mask: u32,
        clear_on_exit: bool,
        mode: WaitMode,
        timeout: Option<Duration>,
    ) -> u32 {
        let satisfied = |bits: u32| match mode {
            WaitMode::Any => bits & mask != 0,
            WaitMode::All => bits & mask == mask,
        };

        let deadline = timeout.map(|t| Instant::now() + t);
        let mut bits = self.lock();
        while !satisfied(*bits) {
            match deadline {
                None => {
                    bits = self
                        .changed
                        .wait(bits)
                        .unwrap_or_else(std::sync::PoisonError::into_inner);
                }
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return *bits;
                    }
                    bits = self
                        .changed
                        .wait_timeout(bits, deadline - now)
                        .unwrap_or_else(std::sync::PoisonError::into_inner)
                        .0;
                }
            }
        }

        let observed = *bits;
        if clear_on_exit {
            *bits &= !mask;
        }
        observed
    }
}
