//! Seat temperature plausibility window.
//!
//! A reading outside `[under_limit_c, over_limit_c]` means the thermistor
//! is open, shorted, or the seat is somewhere heating must not continue.
//! The window is inclusive: both limits themselves are healthy readings.

use crate::config::SystemConfig;
use crate::error::OutOfRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeLimits {
    pub under_c: u16,
    pub over_c: u16,
}

impl RangeLimits {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            under_c: config.under_limit_c,
            over_c: config.over_limit_c,
        }
    }

    /// `None` when `celsius` is inside the window.
    pub const fn classify(&self, celsius: u16) -> Option<OutOfRange> {
        if celsius < self.under_c {
            Some(OutOfRange::Under)
        } else if celsius > self.over_c {
            Some(OutOfRange::Over)
        } else {
            None
        }
    }

    pub const fn in_range(&self, celsius: u16) -> bool {
        self.classify(celsius).is_none()
    }
}

impl Default for RangeLimits {
    fn default() -> Self {
        Self::from_config(&SystemConfig::default())
    }
}
