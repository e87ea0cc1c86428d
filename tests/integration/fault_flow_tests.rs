//! End-to-end fault episodes on a running task set.
//!
//! Periods are shortened so an episode completes in well under a second;
//! every wait has a generous timeout.

use super::mock_hw::{MockClock, MockStorage, MockZone, RecordingSink, wait_until};
use seatheater::app::ports::ZonePort;
use seatheater::app::service::{SeatHeaterSystem, SystemHandle};
use seatheater::config::SystemConfig;
use seatheater::control::{ActuatorPattern, HeatingLevel};
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

struct Bench {
    handle: SystemHandle,
    zones: PerZone<Arc<MockZone>>,
}

fn bench(celsius: u16) -> Bench {
    let zones = PerZone::from_fn(|z| Arc::new(MockZone::new(z, celsius)));
    let ports: PerZone<Arc<dyn ZonePort>> =
        PerZone::new(zones.driver.clone(), zones.passenger.clone());
    let handle = SeatHeaterSystem::new(fast_config())
        .start(
            ports,
            MockStorage::new(),
            Arc::new(MockClock::at(500)),
            Box::new(RecordingSink::default()),
        )
        .unwrap();
    Bench { handle, zones }
}

fn press_to(handle: &SystemHandle, zone: Zone, level: HeatingLevel) {
    while handle.level(zone) != level {
        let before = handle.level(zone);
        handle.press_button(zone);
        assert!(wait_until(TIMEOUT, || handle.level(zone) != before));
    }
}

#[test]
fn under_range_episode_suspends_and_recovers() {
    let b = bench(25);
    let driver = &b.zones.driver;

    press_to(&b.handle, Zone::Driver, HeatingLevel::High);
    assert!(wait_until(TIMEOUT, || driver.last_pattern() == Some(ActuatorPattern::High)));

    // Inject 3 °C.
    driver.set_celsius(3);
    assert!(wait_until(TIMEOUT, || driver.indicator_lit()));
    assert!(wait_until(TIMEOUT, || b.handle.fault_active(Zone::Driver)));

    // Let queued control output drain, then watch a window of the episode.
    std::thread::sleep(Duration::from_millis(100));
    driver.take_patterns();
    std::thread::sleep(Duration::from_millis(200));
    let during = driver.take_patterns();
    assert!(!during.is_empty());
    assert!(
        during.iter().all(|p| *p == ActuatorPattern::Off),
        "control output leaked into the episode: {during:?}"
    );
    assert!(b.handle.fault_active(Zone::Driver));

    assert!(wait_until(TIMEOUT, || b.handle.fault_records().len() == 1));

    // Back to 25 °C.
    driver.set_celsius(25);
    assert!(wait_until(TIMEOUT, || !driver.indicator_lit()));
    assert!(wait_until(TIMEOUT, || !b.handle.fault_active(Zone::Driver)));
    assert!(wait_until(TIMEOUT, || driver.last_pattern() == Some(ActuatorPattern::High)));

    let records = b.handle.fault_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message(), "Driver Below 5");
    assert_eq!(records[0].timestamp, 500);
}

#[test]
fn fault_in_one_zone_leaves_the_other_running() {
    let b = bench(20);
    press_to(&b.handle, Zone::Passenger, HeatingLevel::Med);
    press_to(&b.handle, Zone::Driver, HeatingLevel::Low);

    b.zones.passenger.set_celsius(44);
    assert!(wait_until(TIMEOUT, || b.zones.passenger.indicator_lit()));
    assert!(wait_until(TIMEOUT, || b.handle.fault_records().len() == 1));
    assert_eq!(b.handle.fault_records()[0].message(), "Passenger Over 40");

    // Driver: level 20 °C at 20 °C → no intensity, and keeps being driven.
    b.zones.driver.take_patterns();
    assert!(wait_until(TIMEOUT, || !b.zones.driver.take_patterns().is_empty()));
    assert!(!b.handle.fault_active(Zone::Driver));
    assert!(!b.zones.driver.indicator_lit());
}

#[test]
fn long_episode_records_once() {
    let b = bench(25);
    b.zones.driver.set_celsius(45);
    assert!(wait_until(TIMEOUT, || b.handle.fault_records().len() == 1));

    // Many poll periods and samples later there is still one record.
    std::thread::sleep(Duration::from_millis(300));
    assert_eq!(b.handle.fault_records().len(), 1);

    // A second episode produces a second record.
    b.zones.driver.set_celsius(25);
    assert!(wait_until(TIMEOUT, || !b.handle.fault_active(Zone::Driver)));
    b.zones.driver.set_celsius(1);
    assert!(wait_until(TIMEOUT, || b.handle.fault_records().len() == 2));

    let records = b.handle.fault_records();
    assert_eq!(records[0].message(), "Driver Over 40");
    assert_eq!(records[1].message(), "Driver Below 5");
}
