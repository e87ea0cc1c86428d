//! Per-zone heater actuation.

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::app::ports::ZonePort;
use crate::control::{Intensity, IntensityBus};
use crate::rtos::PeriodicTimer;

pub struct Actuation {
    port: Arc<dyn ZonePort>,
    bus: Arc<IntensityBus>,
    period: Duration,
}

impl Actuation {
    pub fn new(port: Arc<dyn ZonePort>, bus: Arc<IntensityBus>, period: Duration) -> Self {
        Self { port, bus, period }
    }

    /// Block for the next intensity and drive the heater stages with it.
    pub fn apply_next(&self) -> Intensity {
        let intensity = self.bus.actuation().recv();
        let pattern = intensity.pattern();
        debug!("{}: {} -> {:02b}", self.port.zone(), intensity, pattern.bits());
        self.port.set_actuator_pattern(pattern);
        intensity
    }

    pub fn run(self) {
        let mut timer = PeriodicTimer::new(self.period);
        loop {
            self.apply_next();
            timer.wait();
        }
    }
}
