//! Mock adapters for integration tests.
//!
//! Every mock is cheap to clone and shares its state between clones, so a
//! test keeps one copy for assertions while the system owns another.

use seatheater::app::ports::{StorageError, StoragePort, TextSink, TickSource, ZonePort};
use seatheater::control::ActuatorPattern;
use seatheater::sensors::TemperatureScale;
use seatheater::zone::Zone;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// ── MockZone ──────────────────────────────────────────────────

/// Seat hardware with an injectable thermistor and recorded outputs.
pub struct MockZone {
    zone: Zone,
    raw: AtomicU16,
    indicator: AtomicBool,
    patterns: Mutex<Vec<ActuatorPattern>>,
}

#[allow(dead_code)]
impl MockZone {
    pub fn new(zone: Zone, celsius: u16) -> Self {
        Self {
            zone,
            raw: AtomicU16::new(TemperatureScale::default().raw_for(celsius)),
            indicator: AtomicBool::new(false),
            patterns: Mutex::new(Vec::new()),
        }
    }

    pub fn set_celsius(&self, celsius: u16) {
        self.raw
            .store(TemperatureScale::default().raw_for(celsius), Ordering::SeqCst);
    }

    pub fn indicator_lit(&self) -> bool {
        self.indicator.load(Ordering::SeqCst)
    }

    pub fn last_pattern(&self) -> Option<ActuatorPattern> {
        self.patterns.lock().unwrap().last().copied()
    }

    /// Patterns applied since the previous call.
    pub fn take_patterns(&self) -> Vec<ActuatorPattern> {
        std::mem::take(&mut *self.patterns.lock().unwrap())
    }
}

impl ZonePort for MockZone {
    fn zone(&self) -> Zone {
        self.zone
    }

    fn start_conversion(&self) -> Option<u16> {
        Some(self.raw.load(Ordering::SeqCst))
    }

    fn set_fault_indicator(&self, on: bool) {
        self.indicator.store(on, Ordering::SeqCst);
    }

    fn set_actuator_pattern(&self, pattern: ActuatorPattern) {
        self.patterns.lock().unwrap().push(pattern);
    }
}

// ── MockStorage ───────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockStorage {
    data: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_writes: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with `IoError`.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn key_count(&self) -> usize {
        self.data.lock().unwrap().len()
    }
}

impl StoragePort for MockStorage {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let composite = format!("{namespace}::{key}");
        match self.data.lock().unwrap().get(&composite) {
            Some(data) => {
                let len = data.len().min(buf.len());
                buf[..len].copy_from_slice(&data[..len]);
                Ok(len)
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::IoError);
        }
        let composite = format!("{namespace}::{key}");
        self.data.lock().unwrap().insert(composite, data.to_vec());
        Ok(())
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        let composite = format!("{namespace}::{key}");
        self.data.lock().unwrap().remove(&composite);
        Ok(())
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        let composite = format!("{namespace}::{key}");
        self.data.lock().unwrap().contains_key(&composite)
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingSink(Arc<Mutex<String>>);

#[allow(dead_code)]
impl RecordingSink {
    pub fn text(&self) -> String {
        self.0.lock().unwrap().clone()
    }
}

impl TextSink for RecordingSink {
    fn write_text(&mut self, text: &str) {
        self.0.lock().unwrap().push_str(text);
    }
}

// ── MockClock ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockClock(AtomicU32);

#[allow(dead_code)]
impl MockClock {
    pub fn at(ticks: u32) -> Self {
        Self(AtomicU32::new(ticks))
    }

    pub fn advance(&self, ticks: u32) {
        self.0.fetch_add(ticks, Ordering::SeqCst);
    }
}

impl TickSource for MockClock {
    fn monotonic_ticks(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }
}

// ── Helpers ───────────────────────────────────────────────────

/// Poll `cond` every few milliseconds until it holds or `timeout` passes.
#[allow(dead_code)]
pub fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    cond()
}
