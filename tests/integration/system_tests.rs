//! Task-set wiring: buttons, reporting and heartbeats on a running system.

use super::mock_hw::{MockClock, MockStorage, MockZone, RecordingSink, wait_until};
use seatheater::app::ports::ZonePort;
use seatheater::app::service::SeatHeaterSystem;
use seatheater::config::SystemConfig;
use seatheater::control::{HeatingLevel, Intensity};
use seatheater::error::Error;
use seatheater::zone::{PerZone, Zone};
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(3);

fn fast_config() -> SystemConfig {
    SystemConfig {
        sample_period_ms: 20,
        control_period_ms: 10,
        actuation_period_ms: 10,
        fault_poll_ms: 10,
        diagnostics_wait_ms: 30,
        report_period_ms: 50,
        ..Default::default()
    }
}

fn ports(zones: &PerZone<Arc<MockZone>>) -> PerZone<Arc<dyn ZonePort>> {
    PerZone::new(zones.driver.clone(), zones.passenger.clone())
}

#[test]
fn starts_every_task() {
    let zones = PerZone::from_fn(|z| Arc::new(MockZone::new(z, 22)));
    let handle = SeatHeaterSystem::new(fast_config())
        .start(
            ports(&zones),
            MockStorage::new(),
            Arc::new(MockClock::default()),
            Box::new(RecordingSink::default()),
        )
        .unwrap();
    assert_eq!(handle.task_count(), 11);
    assert!(wait_until(TIMEOUT, || handle.temperature(Zone::Driver) == 22));
}

#[test]
fn crossed_ports_are_rejected() {
    let zones = PerZone::from_fn(|z| Arc::new(MockZone::new(z, 22)));
    let crossed: PerZone<Arc<dyn ZonePort>> =
        PerZone::new(zones.passenger.clone(), zones.driver.clone());
    let result = SeatHeaterSystem::new(fast_config()).start(
        crossed,
        MockStorage::new(),
        Arc::new(MockClock::default()),
        Box::new(RecordingSink::default()),
    );
    assert!(matches!(result, Err(Error::Init(_))));
}

#[test]
fn four_presses_wrap_to_off() {
    let zones = PerZone::from_fn(|z| Arc::new(MockZone::new(z, 22)));
    let handle = SeatHeaterSystem::new(fast_config())
        .start(
            ports(&zones),
            MockStorage::new(),
            Arc::new(MockClock::default()),
            Box::new(RecordingSink::default()),
        )
        .unwrap();

    let expected = [
        HeatingLevel::Low,
        HeatingLevel::Med,
        HeatingLevel::High,
        HeatingLevel::Off,
    ];
    for level in expected {
        handle.press_button(Zone::Passenger);
        assert!(wait_until(TIMEOUT, || handle.level(Zone::Passenger) == level));
    }
    assert_eq!(handle.level(Zone::Driver), HeatingLevel::Off);
}

#[test]
fn report_reaches_the_sink() {
    let zones = PerZone::from_fn(|z| Arc::new(MockZone::new(z, 10)));
    let sink = RecordingSink::default();
    let handle = SeatHeaterSystem::new(fast_config())
        .start(
            ports(&zones),
            MockStorage::new(),
            Arc::new(MockClock::default()),
            Box::new(sink.clone()),
        )
        .unwrap();

    handle.press_button(Zone::Driver);
    handle.press_button(Zone::Passenger);
    assert!(wait_until(TIMEOUT, || {
        sink.text().contains(
            "Driver:\r\nCurrent Temperature = 10 Degree\r\n\
             Required Heating Level = 20 Degree\r\n\
             The Heater is Working with HIGH Intensity",
        )
    }));
    assert!(sink.text().contains("Passenger:\r\n"));
}

#[test]
fn heartbeat_persists_snapshot() {
    let zones = PerZone::from_fn(|z| Arc::new(MockZone::new(z, 25)));
    let storage = MockStorage::new();
    let handle = SeatHeaterSystem::new(fast_config())
        .start(
            ports(&zones),
            storage.clone(),
            Arc::new(MockClock::at(42)),
            Box::new(RecordingSink::default()),
        )
        .unwrap();

    assert!(wait_until(TIMEOUT, || handle.snapshot().is_ok()));
    let snapshot = handle.snapshot().unwrap();
    assert_eq!(snapshot.driver, Intensity::NoIntensity);
    assert_eq!(snapshot.passenger, Intensity::NoIntensity);
    assert_eq!(snapshot.timestamp, 42);

    assert!(wait_until(TIMEOUT, || handle.last_state(Zone::Driver).is_some()));
    let last = handle.last_state(Zone::Driver).unwrap();
    assert_eq!(last.timestamp, 42);
    assert!(handle.fault_records().is_empty());
}
