//! Diagnostics arbitration.
//!
//! One task multiplexes fault events and heartbeats onto storage:
//!
//! ```text
//!   wait_bits(FAULT_MASK, clear all on wake, ≤500 ms)
//!     ├─ any bit ──▶ first in priority order ──▶ fault log + zone mailbox
//!     └─ timeout ──▶ latest intensity per zone ─▶ snapshot slot
//! ```
//!
//! A wake clears every monitored bit, so a second fault raised in the same
//! window is dropped without a record. Consumers rely on this coalescing;
//! do not "fix" it here.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{info, warn};

use crate::app::ports::{StoragePort, TickSource};
use crate::control::IntensityBus;
use crate::diagnostics::{
    DiagEvent, DiagnosticsRecord, FaultLog, HeartbeatSnapshot, ZoneRecord, write_snapshot,
};
use crate::events::FAULT_MASK;
use crate::rtos::{EventGroup, Mailbox, WaitMode};
use crate::zone::{PerZone, Zone};

/// Depth of each zone's diagnostics mailbox.
pub const DIAG_MAILBOX_DEPTH: usize = 10;

pub type DiagMailbox = Mailbox<DiagnosticsRecord, DIAG_MAILBOX_DEPTH>;

/// Last heartbeat record per zone, shared with inspectors.
pub type LastState = Arc<Mutex<PerZone<Option<ZoneRecord>>>>;

/// What one arbitration cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagOutcome {
    Fault(DiagnosticsRecord),
    Heartbeat(HeartbeatSnapshot),
}

pub struct DiagnosticsArbiter {
    events: Arc<EventGroup>,
    buses: PerZone<Arc<IntensityBus>>,
    mailboxes: PerZone<Arc<DiagMailbox>>,
    storage: Box<dyn StoragePort>,
    clock: Arc<dyn TickSource>,
    log: FaultLog,
    wait: Duration,
    last_state: LastState,
}

impl DiagnosticsArbiter {
    pub fn new(
        events: Arc<EventGroup>,
        buses: PerZone<Arc<IntensityBus>>,
        mailboxes: PerZone<Arc<DiagMailbox>>,
        storage: Box<dyn StoragePort>,
        clock: Arc<dyn TickSource>,
        wait: Duration,
    ) -> Self {
        let mut log = FaultLog::new();
        log.init(storage.as_ref());
        info!("Diagnostics: fault log resumes at slot {}", log.write_index());
        Self {
            events,
            buses,
            mailboxes,
            storage,
            clock,
            log,
            wait,
            last_state: Arc::new(Mutex::new(PerZone::new(None, None))),
        }
    }

    /// Shared handle to the per-zone last-known state.
    pub fn last_state_handle(&self) -> LastState {
        self.last_state.clone()
    }

    /// Last heartbeat record seen for `zone`.
    pub fn last_state(&self, zone: Zone) -> Option<ZoneRecord> {
        lock_state(&self.last_state)[zone]
    }

    pub fn fault_log(&self) -> &FaultLog {
        &self.log
    }

    pub fn storage(&self) -> &dyn StoragePort {
        self.storage.as_ref()
    }

    /// Wait for fault bits or the timeout and handle exactly one branch.
    pub fn run_cycle(&mut self) -> DiagOutcome {
        let bits = self
            .events
            .wait_bits(FAULT_MASK, true, WaitMode::Any, Some(self.wait));

        match DiagEvent::first_set(bits) {
            Some(event) => DiagOutcome::Fault(self.record_fault(event)),
            None => DiagOutcome::Heartbeat(self.heartbeat()),
        }
    }

    fn record_fault(&mut self, event: DiagEvent) -> DiagnosticsRecord {
        let record = DiagnosticsRecord::new(event, self.clock.monotonic_ticks());
        info!("Diagnostics: {} at tick {}", record.message(), record.timestamp);

        if let Err(e) = self.log.append(self.storage.as_mut(), &record) {
            warn!("Diagnostics: fault log append failed: {}", e);
        }
        if !self.mailboxes[event.zone()].try_send(record) {
            warn!("Diagnostics: {} mailbox full, record dropped", event.zone());
        }
        record
    }

    fn heartbeat(&mut self) -> HeartbeatSnapshot {
        let driver = self.buses.driver.heartbeat().recv_latest();
        let passenger = self.buses.passenger.heartbeat().recv_latest();
        let snapshot = HeartbeatSnapshot {
            driver,
            passenger,
            timestamp: self.clock.monotonic_ticks(),
        };

        if let Err(e) = write_snapshot(self.storage.as_mut(), &snapshot) {
            warn!("Diagnostics: snapshot write failed: {}", e);
        }

        let mut last = lock_state(&self.last_state);
        for zone in Zone::ALL {
            last[zone] = Some(ZoneRecord {
                intensity: snapshot.intensity(zone),
                timestamp: snapshot.timestamp,
            });
        }
        snapshot
    }

    pub fn run(mut self) {
        loop {
            self.run_cycle();
        }
    }
}

pub(crate) fn lock_state(
    state: &Mutex<PerZone<Option<ZoneRecord>>>,
) -> MutexGuard<'_, PerZone<Option<ZoneRecord>>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
