//! Persistent diagnostics: the fault log and the heartbeat snapshot.
//!
//! Two regions live in the "diag" NVS namespace:
//!
//! ```text
//!   f0 … f15   fault log ring, oldest overwritten    (append)
//!   f_idx      next ring slot to write
//!   hb         heartbeat snapshot, single slot       (overwrite)
//! ```
//!
//! Records are postcard-encoded. A fault record stores the event kind, not
//! its text, so decoding hands back the same `&'static str` message.

use serde::{Deserialize, Serialize};

use crate::app::ports::{StorageError, StoragePort};
use crate::control::Intensity;
use crate::error::OutOfRange;
use crate::events::EventBit;
use crate::zone::Zone;

pub const FAULT_LOG_SLOTS: usize = 16;
const DIAG_NAMESPACE: &str = "diag";
const FAULT_INDEX_KEY: &str = "f_idx";
const SNAPSHOT_KEY: &str = "hb";
const RECORD_BUF: usize = 32;

// ───────────────────────────────────────────────────────────────
// Diagnostic events
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagEvent {
    DriverOver,
    DriverUnder,
    PassengerOver,
    PassengerUnder,
}

impl DiagEvent {
    /// Arbitration order: the first set bit in this order wins a wake.
    pub const PRIORITY: [DiagEvent; 4] = [
        DiagEvent::DriverOver,
        DiagEvent::DriverUnder,
        DiagEvent::PassengerOver,
        DiagEvent::PassengerUnder,
    ];

    pub const fn message(self) -> &'static str {
        match self {
            Self::DriverOver => "Driver Over 40",
            Self::DriverUnder => "Driver Below 5",
            Self::PassengerOver => "Passenger Over 40",
            Self::PassengerUnder => "Passenger Below 5",
        }
    }

    pub const fn bit(self) -> EventBit {
        match self {
            Self::DriverOver => EventBit::DriverOver,
            Self::DriverUnder => EventBit::DriverUnder,
            Self::PassengerOver => EventBit::PassengerOver,
            Self::PassengerUnder => EventBit::PassengerUnder,
        }
    }

    pub const fn zone(self) -> Zone {
        match self {
            Self::DriverOver | Self::DriverUnder => Zone::Driver,
            Self::PassengerOver | Self::PassengerUnder => Zone::Passenger,
        }
    }

    pub const fn kind(self) -> OutOfRange {
        match self {
            Self::DriverOver | Self::PassengerOver => OutOfRange::Over,
            Self::DriverUnder | Self::PassengerUnder => OutOfRange::Under,
        }
    }

    /// Highest-priority event whose bit is set in `bits`.
    pub fn first_set(bits: u32) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|e| bits & e.bit().mask() != 0)
    }
}

// ───────────────────────────────────────────────────────────────
// Records
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsRecord {
    pub event: DiagEvent,
    /// Monotonic ticks at the time the event was arbitrated.
    pub timestamp: u32,
}

impl DiagnosticsRecord {
    pub fn new(event: DiagEvent, timestamp: u32) -> Self {
        Self { event, timestamp }
    }

    pub fn message(&self) -> &'static str {
        self.event.message()
    }
}

/// Last intensity observed for one zone by a heartbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub intensity: Intensity,
    pub timestamp: u32,
}

/// Contents of the heartbeat slot: one intensity per zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatSnapshot {
    pub driver: Intensity,
    pub passenger: Intensity,
    pub timestamp: u32,
}

impl HeartbeatSnapshot {
    pub fn intensity(&self, zone: Zone) -> Intensity {
        match zone {
            Zone::Driver => self.driver,
            Zone::Passenger => self.passenger,
        }
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StorageError> {
    postcard::to_allocvec(value).map_err(|_| StorageError::Corrupted)
}

// ───────────────────────────────────────────────────────────────
// Fault log ring
// ───────────────────────────────────────────────────────────────

/// NVS-backed ring buffer of fault records.
#[derive(Debug, Default)]
pub struct FaultLog {
    write_index: usize,
}

impl FaultLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the write index from NVS, or default to 0.
    pub fn init(&mut self, nvs: &dyn StoragePort) {
        let mut buf = [0u8; 4];
        if let Ok(4) = nvs.read(DIAG_NAMESPACE, FAULT_INDEX_KEY, &mut buf) {
            self.write_index = u32::from_le_bytes(buf) as usize % FAULT_LOG_SLOTS;
        }
    }

    /// Slot the next append will overwrite.
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Write a record into the next slot and advance the index.
    pub fn append(
        &mut self,
        nvs: &mut dyn StoragePort,
        record: &DiagnosticsRecord,
    ) -> Result<(), StorageError> {
        let bytes = encode(record)?;
        nvs.write(DIAG_NAMESPACE, &Self::slot_key(self.write_index), &bytes)?;

        self.write_index = (self.write_index + 1) % FAULT_LOG_SLOTS;
        let idx_bytes = (self.write_index as u32).to_le_bytes();
        nvs.write(DIAG_NAMESPACE, FAULT_INDEX_KEY, &idx_bytes)
    }

    /// Read one slot back.
    pub fn read_slot(
        &self,
        nvs: &dyn StoragePort,
        slot: usize,
    ) -> Result<DiagnosticsRecord, StorageError> {
        let mut buf = [0u8; RECORD_BUF];
        let len = nvs.read(DIAG_NAMESPACE, &Self::slot_key(slot % FAULT_LOG_SLOTS), &mut buf)?;
        postcard::from_bytes(&buf[..len]).map_err(|_| StorageError::Corrupted)
    }

    /// All stored records, oldest first.
    pub fn read_all(&self, nvs: &dyn StoragePort) -> heapless::Vec<DiagnosticsRecord, FAULT_LOG_SLOTS> {
        let mut records = heapless::Vec::new();
        for i in 0..FAULT_LOG_SLOTS {
            let slot = (self.write_index + i) % FAULT_LOG_SLOTS;
            if let Ok(record) = self.read_slot(nvs, slot) {
                let _ = records.push(record);
            }
        }
        records
    }

    /// Most recently appended record.
    pub fn latest(&self, nvs: &dyn StoragePort) -> Option<DiagnosticsRecord> {
        let slot = (self.write_index + FAULT_LOG_SLOTS - 1) % FAULT_LOG_SLOTS;
        self.read_slot(nvs, slot).ok()
    }

    /// Erase all records and reset the index.
    pub fn clear(&mut self, nvs: &mut dyn StoragePort) -> Result<(), StorageError> {
        for i in 0..FAULT_LOG_SLOTS {
            nvs.delete(DIAG_NAMESPACE, &Self::slot_key(i))?;
        }
        nvs.delete(DIAG_NAMESPACE, FAULT_INDEX_KEY)?;
        self.write_index = 0;
        Ok(())
    }

    pub fn count(&self, nvs: &dyn StoragePort) -> usize {
        (0..FAULT_LOG_SLOTS)
            .filter(|i| nvs.exists(DIAG_NAMESPACE, &Self::slot_key(*i)))
            .count()
    }

    fn slot_key(index: usize) -> heapless::String<8> {
        let mut s = heapless::String::new();
        let _ = core::fmt::Write::write_fmt(&mut s, format_args!("f{}", index));
        s
    }
}

// ───────────────────────────────────────────────────────────────
// Heartbeat snapshot slot
// ───────────────────────────────────────────────────────────────

/// Overwrite the single heartbeat slot.
pub fn write_snapshot(
    nvs: &mut dyn StoragePort,
    snapshot: &HeartbeatSnapshot,
) -> Result<(), StorageError> {
    let bytes = encode(snapshot)?;
    nvs.write(DIAG_NAMESPACE, SNAPSHOT_KEY, &bytes)
}

/// Read the heartbeat slot. `NotFound` before the first heartbeat.
pub fn read_snapshot(nvs: &dyn StoragePort) -> Result<HeartbeatSnapshot, StorageError> {
    let mut buf = [0u8; RECORD_BUF];
    let len = nvs.read(DIAG_NAMESPACE, SNAPSHOT_KEY, &mut buf)?;
    postcard::from_bytes(&buf[..len]).map_err(|_| StorageError::Corrupted)
}
