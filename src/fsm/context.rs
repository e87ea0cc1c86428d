//! Context threaded through every fault handler state function.
//!
//! One `FaultContext` exists per zone. Apart from the latch, everything in
//! it is a shared handle: the zone's state, its hardware port, its
//! intensity bus and the system event group.

use std::sync::Arc;

use crate::app::ports::ZonePort;
use crate::control::IntensityBus;
use crate::rtos::EventGroup;
use crate::safety::RangeLimits;
use crate::state::ZoneState;
use crate::zone::Zone;

pub struct FaultContext {
    pub zone: Zone,
    pub state: Arc<ZoneState>,
    pub port: Arc<dyn ZonePort>,
    pub bus: Arc<IntensityBus>,
    pub events: Arc<EventGroup>,
    pub limits: RangeLimits,

    /// Set on the first ErrorActive iteration of an episode, cleared on
    /// recovery. Guarantees one diagnostic event per episode.
    pub fault_latched: bool,
    /// Ticks spent in the current state (maintained by the engine).
    pub ticks_in_state: u64,
}

impl FaultContext {
    pub fn new(
        state: Arc<ZoneState>,
        port: Arc<dyn ZonePort>,
        bus: Arc<IntensityBus>,
        events: Arc<EventGroup>,
        limits: RangeLimits,
    ) -> Self {
        Self {
            zone: state.zone(),
            state,
            port,
            bus,
            events,
            limits,
            fault_latched: false,
            ticks_in_state: 0,
        }
    }
}
