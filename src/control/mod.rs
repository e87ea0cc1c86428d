//! Heating control: tier selection and the per-zone intensity bus.

pub mod bus;
pub mod intensity;

pub use bus::IntensityBus;
pub use intensity::{ActuatorPattern, HeatingLevel, Intensity};
