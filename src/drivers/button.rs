//! Level-select push-buttons.
//!
//! ## Hardware
//!
//! Active-low momentary switches with external pull-ups, one per seat.
//! GPIO fires on the falling edge. There is no debounce: every edge is
//! one level step.
//!
//! ## ISR hand-off
//!
//! The GPIO ISR only bumps a per-zone atomic edge counter. A relay task
//! polls the counters and forwards each new edge into the event group via
//! [`InputHandling::on_button_edge`](crate::tasks::input::InputHandling::on_button_edge),
//! so the interrupt never touches a lock.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::zone::{PerZone, Zone};

/// Edges seen per zone since boot. Written by the ISR, read by the relay.
static EDGE_COUNT: PerZone<AtomicU32> = PerZone::new(AtomicU32::new(0), AtomicU32::new(0));

/// ISR handler, register on each button GPIO falling edge.
/// Safe to call from interrupt context (lock-free atomic add).
pub fn button_isr_handler(zone: Zone) {
    EDGE_COUNT[zone].fetch_add(1, Ordering::Release);
}

/// Converts ISR edge counters into discrete per-zone edge counts.
#[derive(Debug, Default)]
pub struct ButtonRelay {
    seen: PerZone<u32>,
}

impl ButtonRelay {
    /// Start from the current counters so edges before boot are ignored.
    pub fn new() -> Self {
        Self {
            seen: PerZone::from_fn(|z| EDGE_COUNT[z].load(Ordering::Acquire)),
        }
    }

    /// Edges that arrived since the previous poll, per zone.
    pub fn poll(&mut self) -> PerZone<u32> {
        PerZone::from_fn(|z| {
            let now = EDGE_COUNT[z].load(Ordering::Acquire);
            let fresh = now.wrapping_sub(self.seen[z]);
            self.seen[z] = now;
            fresh
        })
    }
}
