//! Conversion-complete handling.
//!
//! Called once per finished conversion. With the oneshot ADC on target the
//! sampling task calls it right after `adc1_read`; an asynchronous driver may
//! call it from its completion callback instead. The routine is O(1), never
//! blocks, and only posts to primitives:
//!
//! ```text
//! raw ──scale──▶ critical section { zone.temperature = t }
//!                 └── t outside window ──give_from_isr──▶ fault semaphore
//! ```
//!
//! The returned flag tells the platform whether a higher-priority task was
//! made runnable so it can yield on interrupt exit.

use std::sync::Arc;

use crate::safety::RangeLimits;
use crate::sensors::temperature::TemperatureScale;
use crate::state::ZoneState;
use crate::zone::{PerZone, Zone};

pub struct SensorIngestion {
    zones: PerZone<Arc<ZoneState>>,
    scale: TemperatureScale,
    limits: RangeLimits,
}

impl SensorIngestion {
    pub fn new(zones: PerZone<Arc<ZoneState>>, scale: TemperatureScale, limits: RangeLimits) -> Self {
        Self { zones, scale, limits }
    }

    /// Publish a completed conversion for `zone`.
    ///
    /// Returns `true` when the fault handler was woken.
    pub fn on_conversion_complete(&self, zone: Zone, raw: u16) -> bool {
        let state = &self.zones[zone];
        let celsius = self.scale.to_celsius(raw);
        state.store_temperature(celsius);

        if self.limits.in_range(celsius) {
            false
        } else {
            state.fault_semaphore().give_from_isr()
        }
    }
}
