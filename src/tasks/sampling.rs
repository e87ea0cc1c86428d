//! Per-zone conversion trigger.

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::app::ports::ZonePort;
use crate::rtos::PeriodicTimer;
use crate::sensors::SensorIngestion;

pub struct SensorSampling {
    port: Arc<dyn ZonePort>,
    ingestion: Arc<SensorIngestion>,
    period: Duration,
}

impl SensorSampling {
    pub fn new(port: Arc<dyn ZonePort>, ingestion: Arc<SensorIngestion>, period: Duration) -> Self {
        Self {
            port,
            ingestion,
            period,
        }
    }

    /// Start one conversion. Synchronous results go straight to ingestion.
    ///
    /// Returns `true` when the sample woke the zone's fault handler.
    pub fn sample(&self) -> bool {
        match self.port.start_conversion() {
            Some(raw) => {
                debug!("{}: raw sample {}", self.port.zone(), raw);
                self.ingestion.on_conversion_complete(self.port.zone(), raw)
            }
            None => false,
        }
    }

    pub fn run(self) {
        let mut timer = PeriodicTimer::new(self.period);
        loop {
            self.sample();
            timer.wait();
        }
    }
}
