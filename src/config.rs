//! System configuration parameters
//!
//! All timing and threshold parameters for the seat heater controller.
//! Values can be overridden via NVS (non-volatile storage).

use core::time::Duration;

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Task periods ---
    /// Sensor conversion trigger period (milliseconds)
    pub sample_period_ms: u32,
    /// Intensity control period (milliseconds)
    pub control_period_ms: u32,
    /// Heater actuation period (milliseconds)
    pub actuation_period_ms: u32,
    /// Fault handler re-poll period while a fault is active (milliseconds)
    pub fault_poll_ms: u32,
    /// Diagnostics wait before falling back to a heartbeat (milliseconds)
    pub diagnostics_wait_ms: u32,
    /// Status report period (milliseconds)
    pub report_period_ms: u32,

    // --- Sensor plausibility ---
    /// Readings strictly below this are a sensor fault (Celsius)
    pub under_limit_c: u16,
    /// Readings strictly above this are a sensor fault (Celsius)
    pub over_limit_c: u16,

    // --- ADC scaling ---
    /// Full-scale raw ADC count
    pub adc_full_scale: u16,
    /// Temperature span represented by full scale (Celsius)
    pub sensor_span_c: u16,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Periods
            sample_period_ms: 500,
            control_period_ms: 200,
            actuation_period_ms: 200,
            fault_poll_ms: 200,
            diagnostics_wait_ms: 500,
            report_period_ms: 1000,

            // Plausibility window
            under_limit_c: 5,
            over_limit_c: 40,

            // 12-bit ADC over 0..45 C
            adc_full_scale: 4095,
            sensor_span_c: 45,
        }
    }
}

impl SystemConfig {
    pub fn sample_period(&self) -> Duration {
        Duration::from_millis(u64::from(self.sample_period_ms))
    }

    pub fn control_period(&self) -> Duration {
        Duration::from_millis(u64::from(self.control_period_ms))
    }

    pub fn actuation_period(&self) -> Duration {
        Duration::from_millis(u64::from(self.actuation_period_ms))
    }

    pub fn fault_poll_period(&self) -> Duration {
        Duration::from_millis(u64::from(self.fault_poll_ms))
    }

    pub fn diagnostics_wait(&self) -> Duration {
        Duration::from_millis(u64::from(self.diagnostics_wait_ms))
    }

    pub fn report_period(&self) -> Duration {
        Duration::from_millis(u64::from(self.report_period_ms))
    }
}
