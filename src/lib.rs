//! SeatHeater firmware library.
//!
//! Exposes the controller core for integration testing and host
//! simulation. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod fsm;
pub mod pins;
pub mod rtos;
pub mod safety;
pub mod sensors;
pub mod state;
pub mod tasks;
pub mod zone;

// Hardware-facing layers; real implementations sit behind cfg attributes.
pub mod adapters;
pub mod drivers;
