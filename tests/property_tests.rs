//! Property tests for the controller's pure rules.
//!
//! Runs on host (x86_64) only; proptest is not available for ESP32 targets.
//! On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use proptest::prelude::*;
use seatheater::app::ports::{StorageError, StoragePort};
use seatheater::control::{ActuatorPattern, HeatingLevel, Intensity};
use seatheater::diagnostics::{DiagEvent, DiagnosticsRecord, FAULT_LOG_SLOTS, FaultLog};
use seatheater::safety::RangeLimits;
use seatheater::sensors::TemperatureScale;
use seatheater::state::ZoneState;
use seatheater::zone::Zone;
use std::collections::HashMap;

fn level_strategy() -> impl Strategy<Value = HeatingLevel> {
    prop_oneof![
        Just(HeatingLevel::Off),
        Just(HeatingLevel::Low),
        Just(HeatingLevel::Med),
        Just(HeatingLevel::High),
    ]
}

// ── Intensity rule ────────────────────────────────────────────

proptest! {
    /// The tier rule holds for every level and every temperature the
    /// sensor can report, equality boundaries included.
    #[test]
    fn intensity_rule_matches_thresholds(level in level_strategy(), t in 0u16..=50) {
        let target = u32::from(level.celsius());
        let t32 = u32::from(t);
        let expected = if t32 + 10 <= target {
            Intensity::High
        } else if t32 + 5 <= target {
            Intensity::Med
        } else if t32 + 2 <= target {
            Intensity::Low
        } else {
            Intensity::NoIntensity
        };
        prop_assert_eq!(Intensity::compute(level, t), expected);
    }

    /// Control never produces the error sentinel.
    #[test]
    fn compute_never_reports_error(level in level_strategy(), t in any::<u16>()) {
        prop_assert_ne!(Intensity::compute(level, t), Intensity::ErrorNoIntensity);
    }

    /// Heating never drives both stages unless the gap is at least 10 °C.
    #[test]
    fn full_pattern_needs_wide_gap(level in level_strategy(), t in 0u16..=50) {
        if Intensity::compute(level, t).pattern() == ActuatorPattern::High {
            prop_assert!(t + 10 <= level.celsius());
        }
    }
}

#[test]
fn intensity_boundaries_at_level_30() {
    let med = HeatingLevel::Med;
    assert_eq!(Intensity::compute(med, 20), Intensity::High);
    assert_eq!(Intensity::compute(med, 21), Intensity::Med);
    assert_eq!(Intensity::compute(med, 25), Intensity::Med);
    assert_eq!(Intensity::compute(med, 26), Intensity::Low);
    assert_eq!(Intensity::compute(med, 28), Intensity::Low);
    assert_eq!(Intensity::compute(med, 29), Intensity::NoIntensity);
}

// ── Level cycling ─────────────────────────────────────────────

proptest! {
    /// After n presses the level is the n-th step of Off→Low→Med→High.
    #[test]
    fn presses_cycle_modulo_four(n in 0usize..64) {
        let zone = ZoneState::new(Zone::Driver);
        for _ in 0..n {
            zone.advance_level();
        }
        prop_assert_eq!(zone.level(), HeatingLevel::from_presses((n % 4) as u8));
    }
}

// ── Sensor scaling and range ──────────────────────────────────

proptest! {
    /// Scaling is monotonic and never exceeds the sensor span.
    #[test]
    fn scale_is_monotonic(a in 0u16..=4095, b in 0u16..=4095) {
        let s = TemperatureScale::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(s.to_celsius(lo) <= s.to_celsius(hi));
        prop_assert!(s.to_celsius(hi) <= 45);
    }

    /// Exactly one of in-range / classified holds for every temperature.
    #[test]
    fn classification_partitions_temperatures(t in 0u16..=60) {
        let limits = RangeLimits::default();
        prop_assert_ne!(limits.in_range(t), limits.classify(t).is_some());
    }
}

// ── Fault log bounds ──────────────────────────────────────────

#[derive(Default)]
struct MapStorage(HashMap<String, Vec<u8>>);

impl StoragePort for MapStorage {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let data = self
            .0
            .get(&format!("{namespace}::{key}"))
            .ok_or(StorageError::NotFound)?;
        let len = data.len().min(buf.len());
        buf[..len].copy_from_slice(&data[..len]);
        Ok(len)
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.0.insert(format!("{namespace}::{key}"), data.to_vec());
        Ok(())
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.0.remove(&format!("{namespace}::{key}"));
        Ok(())
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.0.contains_key(&format!("{namespace}::{key}"))
    }
}

proptest! {
    /// The ring never holds more than its slot count, and always returns
    /// the most recent appends, oldest first.
    #[test]
    fn fault_log_keeps_newest(stamps in proptest::collection::vec(any::<u32>(), 0..50)) {
        let mut nvs = MapStorage::default();
        let mut log = FaultLog::new();
        for (i, ts) in stamps.iter().enumerate() {
            let event = DiagEvent::PRIORITY[i % DiagEvent::PRIORITY.len()];
            log.append(&mut nvs, &DiagnosticsRecord::new(event, *ts)).unwrap();
        }

        let kept = stamps.len().min(FAULT_LOG_SLOTS);
        prop_assert_eq!(log.count(&nvs), kept);

        let read: Vec<u32> = log.read_all(&nvs).iter().map(|r| r.timestamp).collect();
        prop_assert_eq!(read, stamps[stamps.len() - kept..].to_vec());

        if let Some(last) = stamps.last() {
            prop_assert_eq!(log.latest(&nvs).map(|r| r.timestamp), Some(*last));
        }
    }
}
