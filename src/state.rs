//! Shared per-zone state.
//!
//! ```text
//! ┌──────────────────────── ZoneState ─────────────────────────┐
//! │  level        std Mutex         Input (w) · Control (r)    │
//! │  temperature  critical section  Ingestion ISR (w)          │
//! │                                 Control · Fault · Report(r)│
//! │  fault_sem    binary semaphore  Ingestion ISR → Fault task │
//! │  control      task gate         Fault task → Control task  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every field is private; each accessor takes the primitive that guards
//! it. When both are needed, the level mutex is taken first and the
//! temperature critical section nested inside it.

use core::cell::Cell;
use std::sync::{Mutex, MutexGuard, PoisonError};

use embassy_sync::blocking_mutex::Mutex as CsMutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::control::HeatingLevel;
use crate::rtos::{BinarySemaphore, TaskGate};
use crate::zone::Zone;

#[derive(Debug, Default)]
struct LevelState {
    presses: u8,
    level: HeatingLevel,
}

pub struct ZoneState {
    zone: Zone,
    level: Mutex<LevelState>,
    temperature: CsMutex<CriticalSectionRawMutex, Cell<u16>>,
    fault_sem: BinarySemaphore,
    control: TaskGate,
}

impl ZoneState {
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            level: Mutex::new(LevelState::default()),
            temperature: CsMutex::new(Cell::new(0)),
            fault_sem: BinarySemaphore::new(),
            control: TaskGate::new(),
        }
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    fn lock_level(&self) -> MutexGuard<'_, LevelState> {
        self.level.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Temperature (critical section) ───────────────────────

    /// Store a converted sample. Never blocks; safe from interrupt context.
    pub fn store_temperature(&self, celsius: u16) {
        self.temperature.lock(|t| t.set(celsius));
    }

    pub fn temperature(&self) -> u16 {
        self.temperature.lock(Cell::get)
    }

    // ── Requested level (mutex) ──────────────────────────────

    pub fn level(&self) -> HeatingLevel {
        self.lock_level().level
    }

    /// Advance the press counter by one and return the new level.
    pub fn advance_level(&self) -> HeatingLevel {
        let mut state = self.lock_level();
        state.presses = (state.presses + 1) % HeatingLevel::COUNT;
        state.level = HeatingLevel::from_presses(state.presses);
        state.level
    }

    /// Read level and temperature together under both guards, in order.
    pub fn with_level_and_temperature<R>(&self, f: impl FnOnce(HeatingLevel, u16) -> R) -> R {
        let state = self.lock_level();
        self.temperature.lock(|t| f(state.level, t.get()))
    }

    // ── Fault signalling ─────────────────────────────────────

    pub fn fault_semaphore(&self) -> &BinarySemaphore {
        &self.fault_sem
    }

    pub fn control_gate(&self) -> &TaskGate {
        &self.control
    }

    /// True while intensity control is held suspended by the fault handler.
    pub fn fault_active(&self) -> bool {
        self.control.is_suspended()
    }
}
