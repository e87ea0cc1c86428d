//! Periodic status report on the text sink.
//!
//! Once per period, for each seat:
//!
//! ```text
//! Driver:
//! Current Temperature = 25 Degree
//! Required Heating Level = 30 Degree
//! The Heater is Working with LOW Intensity
//!
//! **************************************
//! ```
//!
//! followed by one `Fault: <message> at tick <n>` line per diagnostics
//! record queued since the previous report.

use std::sync::Arc;
use std::time::Duration;

use crate::app::ports::TextSink;
use crate::control::{Intensity, IntensityBus};
use crate::rtos::PeriodicTimer;
use crate::state::ZoneState;
use crate::tasks::diagnostics::DiagMailbox;
use crate::zone::{PerZone, Zone};

const SEPARATOR: &str = " \r\n\n**************************************\r\n\n";

pub struct Reporting {
    zones: PerZone<Arc<ZoneState>>,
    buses: PerZone<Arc<IntensityBus>>,
    mailboxes: PerZone<Arc<DiagMailbox>>,
    sink: Box<dyn TextSink>,
    period: Duration,
}

impl Reporting {
    pub fn new(
        zones: PerZone<Arc<ZoneState>>,
        buses: PerZone<Arc<IntensityBus>>,
        mailboxes: PerZone<Arc<DiagMailbox>>,
        sink: Box<dyn TextSink>,
        period: Duration,
    ) -> Self {
        Self {
            zones,
            buses,
            mailboxes,
            sink,
            period,
        }
    }

    /// Block for the newest intensity of both zones and emit one report.
    pub fn report_once(&mut self) -> PerZone<Intensity> {
        let intensities = PerZone::from_fn(|z| self.buses[z].reporting().recv_latest());
        for zone in Zone::ALL {
            self.write_zone(zone, intensities[zone]);
        }
        for zone in Zone::ALL {
            while let Some(record) = self.mailboxes[zone].try_recv() {
                self.sink.write_text("Fault: ");
                self.sink.write_text(record.message());
                self.sink.write_text(" at tick ");
                self.sink.write_integer(i64::from(record.timestamp));
                self.sink.write_line("");
            }
        }
        intensities
    }

    fn write_zone(&mut self, zone: Zone, intensity: Intensity) {
        let state = &self.zones[zone];
        let sink = self.sink.as_mut();
        sink.write_text(zone.name());
        sink.write_text(":\r\nCurrent Temperature = ");
        sink.write_integer(i64::from(state.temperature()));
        sink.write_text(" Degree\r\nRequired Heating Level = ");
        sink.write_integer(i64::from(state.level().celsius()));
        sink.write_text(" Degree\r\nThe Heater is Working with ");
        sink.write_text(intensity.description());
        sink.write_text(SEPARATOR);
    }

    pub fn run(mut self) {
        let mut timer = PeriodicTimer::new(self.period);
        loop {
            timer.wait();
            self.report_once();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagEvent, DiagnosticsRecord};
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<String>>);

    impl TextSink for Capture {
        fn write_text(&mut self, text: &str) {
            self.0.lock().unwrap().push_str(text);
        }
    }

    #[test]
    fn report_matches_console_format() {
        let zones = PerZone::from_fn(|z| Arc::new(ZoneState::new(z)));
        let buses = PerZone::from_fn(|_| Arc::new(IntensityBus::new()));
        let mailboxes = PerZone::from_fn(|_| Arc::new(DiagMailbox::new()));
        let capture = Capture::default();
        let mut reporting = Reporting::new(
            zones.clone(),
            buses.clone(),
            mailboxes.clone(),
            Box::new(capture.clone()),
            Duration::from_secs(1),
        );

        zones.driver.store_temperature(25);
        zones.driver.advance_level();
        zones.driver.advance_level();
        zones.passenger.store_temperature(3);
        buses.driver.publish(Intensity::NoIntensity);
        buses.driver.publish(Intensity::Low);
        buses.passenger.publish(Intensity::ErrorNoIntensity);
        mailboxes
            .passenger
            .try_send(DiagnosticsRecord::new(DiagEvent::PassengerUnder, 77));

        let seen = reporting.report_once();
        assert_eq!(seen.driver, Intensity::Low);

        let text = capture.0.lock().unwrap().clone();
        assert_eq!(
            text,
            "Driver:\r\nCurrent Temperature = 25 Degree\r\n\
             Required Heating Level = 30 Degree\r\n\
             The Heater is Working with LOW Intensity \r\n\n\
             **************************************\r\n\n\
             Passenger:\r\nCurrent Temperature = 3 Degree\r\n\
             Required Heating Level = 0 Degree\r\n\
             The Heater is Working with NO Intensity Because of Out of Range Error \r\n\n\
             **************************************\r\n\n\
             Fault: Passenger Below 5 at tick 77\r\n"
        );
        assert!(mailboxes.passenger.is_empty());
    }
}
