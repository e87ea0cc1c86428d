//! Diagnostics arbitration against mock storage, one cycle at a time.

use super::mock_hw::{MockClock, MockStorage};
use seatheater::control::{Intensity, IntensityBus};
use seatheater::diagnostics::{
    DiagEvent, DiagnosticsRecord, FAULT_LOG_SLOTS, FaultLog, read_snapshot,
};
use seatheater::events::{EventBit, FAULT_MASK};
use seatheater::rtos::EventGroup;
use seatheater::tasks::{DiagMailbox, DiagOutcome, DiagnosticsArbiter};
use seatheater::zone::{PerZone, Zone};
use std::sync::Arc;
use std::time::Duration;

struct Rig {
    arbiter: DiagnosticsArbiter,
    events: Arc<EventGroup>,
    buses: PerZone<Arc<IntensityBus>>,
    mailboxes: PerZone<Arc<DiagMailbox>>,
    storage: MockStorage,
    clock: Arc<MockClock>,
}

fn rig_with(storage: MockStorage) -> Rig {
    let events = Arc::new(EventGroup::new());
    let buses = PerZone::from_fn(|_| Arc::new(IntensityBus::new()));
    let mailboxes = PerZone::from_fn(|_| Arc::new(DiagMailbox::new()));
    let clock = Arc::new(MockClock::at(100));
    let arbiter = DiagnosticsArbiter::new(
        events.clone(),
        buses.clone(),
        mailboxes.clone(),
        Box::new(storage.clone()),
        clock.clone(),
        Duration::from_millis(25),
    );
    Rig {
        arbiter,
        events,
        buses,
        mailboxes,
        storage,
        clock,
    }
}

fn rig() -> Rig {
    rig_with(MockStorage::new())
}

fn log_of(storage: &MockStorage) -> Vec<DiagnosticsRecord> {
    let mut log = FaultLog::new();
    log.init(storage);
    log.read_all(storage).into_iter().collect()
}

#[test]
fn concurrent_over_faults_coalesce_into_one_record() {
    let mut r = rig();
    r.events
        .set_bits(EventBit::DriverOver.mask() | EventBit::PassengerOver.mask());

    let outcome = r.arbiter.run_cycle();
    assert_eq!(
        outcome,
        DiagOutcome::Fault(DiagnosticsRecord::new(DiagEvent::DriverOver, 100))
    );
    assert_eq!(r.events.bits() & FAULT_MASK, 0);

    let records = log_of(&r.storage);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message(), "Driver Over 40");
    assert!(r.mailboxes.passenger.is_empty());
    assert_eq!(r.mailboxes.driver.len(), 1);
}

#[test]
fn priority_order_picks_driver_under_before_passenger() {
    let mut r = rig();
    r.events
        .set_bits(EventBit::PassengerOver.mask() | EventBit::DriverUnder.mask());
    match r.arbiter.run_cycle() {
        DiagOutcome::Fault(record) => assert_eq!(record.event, DiagEvent::DriverUnder),
        other => panic!("expected fault, got {other:?}"),
    }
}

#[test]
fn fault_wake_never_takes_heartbeat() {
    let mut r = rig();
    r.buses.driver.publish(Intensity::Med);
    r.buses.passenger.publish(Intensity::Low);
    r.events.set_bits(EventBit::PassengerUnder.mask());

    assert!(matches!(r.arbiter.run_cycle(), DiagOutcome::Fault(_)));
    assert!(read_snapshot(&r.storage).is_err());
    assert_eq!(r.arbiter.last_state(Zone::Passenger), None);

    // The next quiet wake is the heartbeat.
    r.clock.advance(50);
    match r.arbiter.run_cycle() {
        DiagOutcome::Heartbeat(snapshot) => {
            assert_eq!(snapshot.driver, Intensity::Med);
            assert_eq!(snapshot.passenger, Intensity::Low);
            assert_eq!(snapshot.timestamp, 150);
        }
        other => panic!("expected heartbeat, got {other:?}"),
    }
    assert_eq!(read_snapshot(&r.storage).unwrap().timestamp, 150);
}

#[test]
fn snapshot_slot_is_overwritten() {
    let mut r = rig();
    r.buses.driver.publish(Intensity::Low);
    r.buses.passenger.publish(Intensity::Low);
    r.arbiter.run_cycle();
    let keys = r.storage.key_count();

    r.buses.driver.publish(Intensity::High);
    r.buses.passenger.publish(Intensity::ErrorNoIntensity);
    r.arbiter.run_cycle();

    assert_eq!(r.storage.key_count(), keys);
    let snapshot = read_snapshot(&r.storage).unwrap();
    assert_eq!(snapshot.intensity(Zone::Driver), Intensity::High);
    assert_eq!(snapshot.intensity(Zone::Passenger), Intensity::ErrorNoIntensity);
}

#[test]
fn ring_keeps_newest_sixteen() {
    let mut r = rig();
    for i in 0..(FAULT_LOG_SLOTS as u32 + 4) {
        r.clock.advance(1);
        let bit = if i % 2 == 0 {
            EventBit::DriverOver
        } else {
            EventBit::PassengerUnder
        };
        r.events.set_bits(bit.mask());
        r.arbiter.run_cycle();
    }

    let records = log_of(&r.storage);
    assert_eq!(records.len(), FAULT_LOG_SLOTS);
    // Oldest four were overwritten: timestamps 105..=120 remain, in order.
    let stamps: Vec<u32> = records.iter().map(|rec| rec.timestamp).collect();
    assert_eq!(stamps, (105..=120).collect::<Vec<u32>>());
}

#[test]
fn restart_resumes_ring_position() {
    let storage = MockStorage::new();
    {
        let mut r = rig_with(storage.clone());
        for _ in 0..3 {
            r.events.set_bits(EventBit::DriverUnder.mask());
            r.arbiter.run_cycle();
        }
    }

    let mut r = rig_with(storage.clone());
    assert_eq!(r.arbiter.fault_log().write_index(), 3);
    r.events.set_bits(EventBit::PassengerOver.mask());
    r.arbiter.run_cycle();

    let records = log_of(&storage);
    assert_eq!(records.len(), 4);
    assert_eq!(records[3].event, DiagEvent::PassengerOver);
}

#[test]
fn storage_failure_does_not_stop_arbitration() {
    let storage = MockStorage::new();
    storage.fail_writes(true);
    let mut r = rig_with(storage);

    r.events.set_bits(EventBit::DriverOver.mask());
    assert!(matches!(r.arbiter.run_cycle(), DiagOutcome::Fault(_)));
    // Not persisted, but still delivered to the zone's mailbox.
    assert!(log_of(&r.storage).is_empty());
    assert_eq!(r.mailboxes.driver.len(), 1);

    r.buses.driver.publish(Intensity::Low);
    r.buses.passenger.publish(Intensity::Low);
    assert!(matches!(r.arbiter.run_cycle(), DiagOutcome::Heartbeat(_)));
    assert!(r.arbiter.last_state(Zone::Driver).is_some());
}
