//! Per-zone intensity broadcast.
//!
//! Intensity control (and the fault handler) publish once; every consumer
//! receives its own copy:
//!
//! ```text
//!                       ┌──▶ actuation  [3]  blocking (back-pressure)
//!   publish(intensity) ─┼──▶ reporting  [3]  latest-wins
//!                       └──▶ heartbeat  [3]  latest-wins
//! ```
//!
//! Only the actuation path applies back-pressure. The observers evict their
//! oldest entry on overflow so a slow observer never stalls the producer.

use super::intensity::Intensity;
use crate::rtos::Mailbox;

/// Depth of every subscriber mailbox.
pub const BUS_DEPTH: usize = 3;

#[derive(Default)]
pub struct IntensityBus {
    actuation: Mailbox<Intensity, BUS_DEPTH>,
    reporting: Mailbox<Intensity, BUS_DEPTH>,
    heartbeat: Mailbox<Intensity, BUS_DEPTH>,
}

impl IntensityBus {
    pub const fn new() -> Self {
        Self {
            actuation: Mailbox::new(),
            reporting: Mailbox::new(),
            heartbeat: Mailbox::new(),
        }
    }

    /// Deliver `intensity` to all subscribers.
    ///
    /// Blocks while the actuation mailbox is full.
    pub fn publish(&self, intensity: Intensity) {
        self.reporting.send_overwrite(intensity);
        self.heartbeat.send_overwrite(intensity);
        self.actuation.send(intensity);
    }

    pub fn actuation(&self) -> &Mailbox<Intensity, BUS_DEPTH> {
        &self.actuation
    }

    pub fn reporting(&self) -> &Mailbox<Intensity, BUS_DEPTH> {
        &self.reporting
    }

    pub fn heartbeat(&self) -> &Mailbox<Intensity, BUS_DEPTH> {
        &self.heartbeat
    }
}
