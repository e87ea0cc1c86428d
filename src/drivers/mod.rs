//! Heater and indicator drivers, button ISR hand-off, hardware
//! initialisation and task spawning helpers.

pub mod button;
pub mod heater;
pub mod hw_init;
pub mod indicator;
pub mod task_pin;
