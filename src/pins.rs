//! GPIO / peripheral pin assignments for the seat heater board.
//!
//! Single source of truth, every driver references this module rather than
//! hard-coding pin numbers.

use crate::zone::{PerZone, Zone};

/// Pins belonging to one heated seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonePins {
    /// ADC1 channel wired to the seat thermistor divider.
    pub temp_adc_channel: u32,
    /// Heater stage A output (pattern bit 0).
    pub heater_a_gpio: i32,
    /// Heater stage B output (pattern bit 1).
    pub heater_b_gpio: i32,
    /// Fault indicator LED (active HIGH).
    pub fault_led_gpio: i32,
    /// Level select push-button (active LOW, external pull-up).
    pub button_gpio: i32,
}

// ---------------------------------------------------------------------------
// Driver seat
// ---------------------------------------------------------------------------

pub const DRIVER: ZonePins = ZonePins {
    temp_adc_channel: 0, // ADC1_CH0 = GPIO 1
    heater_a_gpio: 10,
    heater_b_gpio: 11,
    fault_led_gpio: 12,
    button_gpio: 38,
};

// ---------------------------------------------------------------------------
// Passenger seat
// ---------------------------------------------------------------------------

pub const PASSENGER: ZonePins = ZonePins {
    temp_adc_channel: 1, // ADC1_CH1 = GPIO 2
    heater_a_gpio: 13,
    heater_b_gpio: 14,
    fault_led_gpio: 21,
    button_gpio: 39,
};

pub const ZONES: PerZone<ZonePins> = PerZone::new(DRIVER, PASSENGER);

pub const fn for_zone(zone: Zone) -> ZonePins {
    match zone {
        Zone::Driver => DRIVER,
        Zone::Passenger => PASSENGER,
    }
}
