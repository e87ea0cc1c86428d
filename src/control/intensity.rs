//! Tiered heating intensity.
//!
//! The requested level is a target seat temperature in Celsius. The gap
//! between target and current temperature picks one of three heater tiers:
//!
//! ```text
//!   gap = level - t
//!   gap >= 10  → High   (pattern 11)
//!   gap >=  5  → Med    (pattern 10)
//!   gap >=  2  → Low    (pattern 01)
//!   otherwise  → None   (pattern 00)
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Requested level
// ---------------------------------------------------------------------------

/// User-selected heating level. The discriminant is the target in Celsius.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u16)]
pub enum HeatingLevel {
    #[default]
    Off = 0,
    Low = 20,
    Med = 30,
    High = 40,
}

impl HeatingLevel {
    /// Number of distinct levels in the press cycle.
    pub const COUNT: u8 = 4;

    /// Map a press counter (taken modulo 4) to a level.
    pub const fn from_presses(presses: u8) -> Self {
        match presses % Self::COUNT {
            0 => Self::Off,
            1 => Self::Low,
            2 => Self::Med,
            _ => Self::High,
        }
    }

    pub const fn celsius(self) -> u16 {
        self as u16
    }
}

// ---------------------------------------------------------------------------
// Intensity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intensity {
    /// Seat is warm enough (or heating is off).
    NoIntensity,
    /// Heating withheld because the zone's sensor is out of range.
    ErrorNoIntensity,
    Low,
    Med,
    High,
}

impl Intensity {
    /// Tier selection for a level target and current temperature.
    ///
    /// Uses widened arithmetic so extreme temperatures cannot overflow.
    pub const fn compute(level: HeatingLevel, celsius: u16) -> Self {
        let target = level.celsius() as u32;
        let t = celsius as u32;
        if t + 10 <= target {
            Self::High
        } else if t + 5 <= target {
            Self::Med
        } else if t + 2 <= target {
            Self::Low
        } else {
            Self::NoIntensity
        }
    }

    pub const fn pattern(self) -> ActuatorPattern {
        match self {
            Self::NoIntensity | Self::ErrorNoIntensity => ActuatorPattern::Off,
            Self::Low => ActuatorPattern::Low,
            Self::Med => ActuatorPattern::Med,
            Self::High => ActuatorPattern::High,
        }
    }

    /// Status text used in the periodic report.
    pub const fn description(self) -> &'static str {
        match self {
            Self::ErrorNoIntensity => "NO Intensity Because of Out of Range Error",
            Self::NoIntensity => "NO Intensity",
            Self::Low => "LOW Intensity",
            Self::Med => "MEDIUM Intensity",
            Self::High => "HIGH Intensity",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

// ---------------------------------------------------------------------------
// Actuator pattern
// ---------------------------------------------------------------------------

/// Two-bit heater drive pattern: bit 0 = stage A, bit 1 = stage B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ActuatorPattern {
    Off = 0b00,
    Low = 0b01,
    Med = 0b10,
    High = 0b11,
}

impl ActuatorPattern {
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub const fn stage_a(self) -> bool {
        self.bits() & 0b01 != 0
    }

    pub const fn stage_b(self) -> bool {
        self.bits() & 0b10 != 0
    }
}
