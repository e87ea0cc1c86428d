//! Per-zone intensity control.
//!
//! Every cycle runs inside the zone's control gate, so once the fault
//! handler's `suspend` returns no further intensity is published until it
//! resumes the zone.

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::control::{Intensity, IntensityBus};
use crate::rtos::PeriodicTimer;
use crate::state::ZoneState;

pub struct IntensityControl {
    state: Arc<ZoneState>,
    bus: Arc<IntensityBus>,
    period: Duration,
}

impl IntensityControl {
    pub fn new(state: Arc<ZoneState>, bus: Arc<IntensityBus>, period: Duration) -> Self {
        Self { state, bus, period }
    }

    /// Park while suspended, then compute and publish one intensity.
    pub fn cycle(&self) -> Intensity {
        let _cycle = self.state.control_gate().enter();
        self.compute_and_publish()
    }

    /// Run one cycle unless the zone is suspended.
    pub fn try_cycle(&self) -> Option<Intensity> {
        let _cycle = self.state.control_gate().try_enter()?;
        Some(self.compute_and_publish())
    }

    fn compute_and_publish(&self) -> Intensity {
        let intensity = self.state.with_level_and_temperature(Intensity::compute);
        debug!("{}: intensity {}", self.state.zone(), intensity);
        self.bus.publish(intensity);
        intensity
    }

    pub fn run(self) {
        let mut timer = PeriodicTimer::new(self.period);
        loop {
            self.cycle();
            timer.wait();
        }
    }
}
