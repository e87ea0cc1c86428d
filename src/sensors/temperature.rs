//! Seat thermistor scaling.
//!
//! The conditioning circuit maps 0–45 °C linearly onto the full 12-bit ADC
//! range, so conversion is a single integer scale with truncation.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: raw counts come from a per-sensor atomic for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use crate::config::SystemConfig;
use crate::zone::Zone;

/// Raw-to-Celsius scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureScale {
    full_scale: u16,
    span_c: u16,
}

impl TemperatureScale {
    pub const fn new(full_scale: u16, span_c: u16) -> Self {
        Self { full_scale, span_c }
    }

    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(config.adc_full_scale, config.sensor_span_c)
    }

    /// `raw * span / full_scale`, truncating. Widened to avoid overflow.
    pub const fn to_celsius(&self, raw: u16) -> u16 {
        if self.full_scale == 0 {
            return 0;
        }
        (raw as u32 * self.span_c as u32 / self.full_scale as u32) as u16
    }

    /// Smallest raw count that converts to at least `celsius`.
    pub const fn raw_for(&self, celsius: u16) -> u16 {
        if self.span_c == 0 {
            return 0;
        }
        let num = celsius as u32 * self.full_scale as u32;
        num.div_ceil(self.span_c as u32) as u16
    }
}

impl Default for TemperatureScale {
    fn default() -> Self {
        Self::new(4095, 45)
    }
}

// ── Oneshot sampling ─────────────────────────────────────────

/// One seat thermistor on an ADC1 channel.
pub struct TemperatureSensor {
    zone: Zone,
    adc_channel: u32,
    #[cfg(not(target_os = "espidf"))]
    sim_raw: AtomicU16,
}

impl TemperatureSensor {
    pub fn new(zone: Zone, adc_channel: u32) -> Self {
        Self {
            zone,
            adc_channel,
            // Mid-scale (22 °C) until a test injects something else.
            #[cfg(not(target_os = "espidf"))]
            sim_raw: AtomicU16::new(2048),
        }
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn adc_channel(&self) -> u32 {
        self.adc_channel
    }

    /// Run one conversion and return the raw count.
    #[cfg(target_os = "espidf")]
    pub fn read_raw(&self) -> Option<u16> {
        crate::drivers::hw_init::adc1_read(self.adc_channel)
    }

    /// Run one conversion and return the raw count.
    #[cfg(not(target_os = "espidf"))]
    pub fn read_raw(&self) -> Option<u16> {
        Some(self.sim_raw.load(Ordering::Relaxed))
    }

    /// Set the count the next simulated conversion returns.
    #[cfg(not(target_os = "espidf"))]
    pub fn inject_raw(&self, raw: u16) {
        self.sim_raw.store(raw, Ordering::Relaxed);
    }
}
