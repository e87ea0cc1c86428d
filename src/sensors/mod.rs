//! Sensor subsystem: thermistor scaling and the conversion-complete path.
//!
//! Samples flow one way: the sampling task starts a conversion through the
//! zone port, the completion lands in [`SensorIngestion`], and from there
//! into [`ZoneState`](crate::state::ZoneState).

pub mod ingestion;
pub mod temperature;

pub use ingestion::SensorIngestion;
pub use temperature::{TemperatureScale, TemperatureSensor};
