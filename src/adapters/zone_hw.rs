//! Zone hardware adapter: one seat's thermistor, heater stages and fault
//! LED behind [`ZonePort`].
//!
//! The adapter is generic over the three output pins so the same code
//! drives `esp-idf-hal` GPIOs on target and [`SimPin`]s on the host.
//! Output drivers sit behind mutexes because the fault and actuation tasks
//! share one instance.

use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use embedded_hal::digital::{ErrorType, OutputPin};
use log::warn;

use crate::app::ports::ZonePort;
use crate::control::ActuatorPattern;
use crate::drivers::heater::HeaterDriver;
use crate::drivers::indicator::FaultIndicator;
use crate::error::Result;
use crate::sensors::TemperatureSensor;
use crate::zone::Zone;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct ZoneHardware<A, B, L> {
    zone: Zone,
    sensor: TemperatureSensor,
    heater: Mutex<HeaterDriver<A, B>>,
    indicator: Mutex<FaultIndicator<L>>,
}

impl<A, B, L> ZoneHardware<A, B, L>
where
    A: OutputPin,
    B: OutputPin,
    L: OutputPin,
{
    /// Take the seat's pins; heater and LED start off.
    pub fn new(sensor: TemperatureSensor, stage_a: A, stage_b: B, led: L) -> Result<Self> {
        Ok(Self {
            zone: sensor.zone(),
            sensor,
            heater: Mutex::new(HeaterDriver::new(stage_a, stage_b)?),
            indicator: Mutex::new(FaultIndicator::new(led)?),
        })
    }

    pub fn sensor(&self) -> &TemperatureSensor {
        &self.sensor
    }

    /// Pattern currently applied to the heater stages.
    pub fn pattern(&self) -> ActuatorPattern {
        lock(&self.heater).pattern()
    }

    pub fn indicator_lit(&self) -> bool {
        lock(&self.indicator).is_lit()
    }
}

impl<A, B, L> ZonePort for ZoneHardware<A, B, L>
where
    A: OutputPin + Send,
    B: OutputPin + Send,
    L: OutputPin + Send,
{
    fn zone(&self) -> Zone {
        self.zone
    }

    fn start_conversion(&self) -> Option<u16> {
        let raw = self.sensor.read_raw();
        if raw.is_none() {
            warn!("{}: ADC conversion failed, sample skipped", self.zone);
        }
        raw
    }

    fn set_fault_indicator(&self, on: bool) {
        if let Err(e) = lock(&self.indicator).set(on) {
            warn!("{}: fault LED write failed: {}", self.zone, e);
        }
    }

    fn set_actuator_pattern(&self, pattern: ActuatorPattern) {
        if let Err(e) = lock(&self.heater).apply(pattern) {
            warn!("{}: heater write failed: {}", self.zone, e);
        }
    }
}

// ── Host simulation ───────────────────────────────────────────

/// Output pin that records its level in a shared flag.
#[derive(Debug, Clone, Default)]
pub struct SimPin(Arc<AtomicBool>);

impl SimPin {
    pub fn is_high(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl ErrorType for SimPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.0.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.0.store(true, Ordering::SeqCst);
        Ok(())
    }
}

pub type SimZone = ZoneHardware<SimPin, SimPin, SimPin>;

impl SimZone {
    /// A seat with simulated pins on the zone's usual ADC channel.
    pub fn simulated(zone: Zone) -> Result<Self> {
        let pins = crate::pins::for_zone(zone);
        Self::new(
            TemperatureSensor::new(zone, pins.temp_adc_channel),
            SimPin::default(),
            SimPin::default(),
            SimPin::default(),
        )
    }
}

// ── ESP-IDF ───────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub type EspOutput = esp_idf_hal::gpio::PinDriver<
    'static,
    esp_idf_hal::gpio::AnyOutputPin,
    esp_idf_hal::gpio::Output,
>;

#[cfg(target_os = "espidf")]
pub type EspZone = ZoneHardware<EspOutput, EspOutput, EspOutput>;

#[cfg(target_os = "espidf")]
impl EspZone {
    /// Claim the seat's GPIOs from the HAL by number.
    ///
    /// # Safety
    /// The caller must not hand the same GPIO numbers to any other driver.
    pub unsafe fn claim(zone: Zone) -> Result<Self> {
        use crate::error::{ActuatorError, Error};
        use esp_idf_hal::gpio::{AnyOutputPin, PinDriver};

        let pins = crate::pins::for_zone(zone);
        let out = |gpio: i32| -> Result<EspOutput> {
            // SAFETY: exclusivity of the pin number is the caller's contract.
            let pin = unsafe { AnyOutputPin::new(gpio) };
            PinDriver::output(pin).map_err(|_| Error::Actuator(ActuatorError::GpioWriteFailed))
        };
        Self::new(
            TemperatureSensor::new(zone, pins.temp_adc_channel),
            out(pins.heater_a_gpio)?,
            out(pins.heater_b_gpio)?,
            out(pins.fault_led_gpio)?,
        )
    }
}
