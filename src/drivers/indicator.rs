//! Per-seat fault indicator LED.

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::{ActuatorError, Result};

pub struct FaultIndicator<P> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> FaultIndicator<P> {
    pub fn new(pin: P) -> Result<Self> {
        let mut led = Self { pin, lit: true };
        led.set(false)?;
        Ok(led)
    }

    pub fn set(&mut self, on: bool) -> Result<()> {
        self.pin
            .set_state(PinState::from(on))
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.lit = on;
        Ok(())
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}
