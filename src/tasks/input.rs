//! Level-select button handling.
//!
//! Edge interrupts only raise the zone's button bit. The input task wakes on
//! either bit, clears what woke it and steps each pressed zone's level once.

use std::sync::Arc;

use log::info;

use crate::events::{BUTTON_MASK, EventBit};
use crate::rtos::{EventGroup, WaitMode};
use crate::state::ZoneState;
use crate::zone::{PerZone, Zone};

#[derive(Clone)]
pub struct InputHandling {
    events: Arc<EventGroup>,
    zones: PerZone<Arc<ZoneState>>,
}

impl InputHandling {
    pub fn new(events: Arc<EventGroup>, zones: PerZone<Arc<ZoneState>>) -> Self {
        Self { events, zones }
    }

    /// Button edge entry point, called by the main task's relay.
    ///
    /// Returns `true` when the zone's bit was not already pending.
    pub fn on_button_edge(&self, zone: Zone) -> bool {
        self.events.set_bits_from_isr(EventBit::button(zone).mask())
    }

    /// Apply whatever button bits are pending, without waiting.
    pub fn poll(&self) -> u32 {
        let bits = self.events.clear_bits(BUTTON_MASK) & BUTTON_MASK;
        self.apply(bits);
        bits
    }

    /// Block for at least one button bit, then apply all that are set.
    pub fn handle_next(&self) -> u32 {
        let bits = self.events.wait_bits(BUTTON_MASK, true, WaitMode::Any, None) & BUTTON_MASK;
        self.apply(bits);
        bits
    }

    fn apply(&self, bits: u32) {
        for zone in Zone::ALL {
            if bits & EventBit::button(zone).mask() != 0 {
                let level = self.zones[zone].advance_level();
                info!("{}: heating level -> {:?} ({}°C)", zone, level, level.celsius());
            }
        }
    }

    pub fn run(self) {
        loop {
            self.handle_next();
        }
    }
}
