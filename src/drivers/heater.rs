//! Two-stage seat heater driver.
//!
//! Each seat has two heater stages switched by logic-level MOSFETs. The
//! two-bit [`ActuatorPattern`] maps straight onto them:
//!
//! | Pattern | Stage A | Stage B |
//! |---------|---------|---------|
//! | `00`    | off     | off     |
//! | `01`    | on      | off     |
//! | `10`    | off     | on      |
//! | `11`    | on      | on      |

use embedded_hal::digital::{OutputPin, PinState};

use crate::control::ActuatorPattern;
use crate::error::{ActuatorError, Result};

pub struct HeaterDriver<A, B> {
    stage_a: A,
    stage_b: B,
    pattern: ActuatorPattern,
}

impl<A: OutputPin, B: OutputPin> HeaterDriver<A, B> {
    /// Take ownership of both stage pins and switch them off.
    pub fn new(stage_a: A, stage_b: B) -> Result<Self> {
        let mut heater = Self {
            stage_a,
            stage_b,
            pattern: ActuatorPattern::Off,
        };
        heater.apply(ActuatorPattern::Off)?;
        Ok(heater)
    }

    pub fn apply(&mut self, pattern: ActuatorPattern) -> Result<()> {
        self.stage_a
            .set_state(PinState::from(pattern.stage_a()))
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.stage_b
            .set_state(PinState::from(pattern.stage_b()))
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.pattern = pattern;
        Ok(())
    }

    /// Last pattern successfully applied.
    pub fn pattern(&self) -> ActuatorPattern {
        self.pattern
    }
}
