//! Application core: port traits and system assembly.
//!
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`]; [`service`] wires the shared state, primitives and tasks
//! together behind those ports.

pub mod ports;
pub mod service;
