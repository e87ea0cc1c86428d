//! The controller's task set.
//!
//! ```text
//! ┌──────────────┬──────┬────────────────────────────────────────────┐
//! │ Task         │ Prio │ Wakes on                                   │
//! ├──────────────┼──────┼────────────────────────────────────────────┤
//! │ input        │  5   │ button bits in the event group             │
//! │ fault ×2     │  5   │ zone fault semaphore, then 200 ms polls    │
//! │ diagnostics  │  4   │ fault bits or 500 ms timeout               │
//! │ sampling ×2  │  3   │ 500 ms period                              │
//! │ actuation ×2 │  2   │ zone actuation mailbox, 200 ms period      │
//! │ reporting    │  2   │ 1 s period                                 │
//! │ control ×2   │  1   │ 200 ms period, parked while zone faulted   │
//! └──────────────┴──────┴────────────────────────────────────────────┘
//! ```
//!
//! Every task exposes a single-cycle method used by tests and a `run`
//! loop that never returns.

pub mod actuation;
pub mod control;
pub mod diagnostics;
pub mod fault;
pub mod input;
pub mod reporting;
pub mod sampling;

pub use actuation::Actuation;
pub use control::IntensityControl;
pub use diagnostics::{DiagMailbox, DiagOutcome, DiagnosticsArbiter};
pub use fault::FaultHandler;
pub use input::InputHandling;
pub use reporting::Reporting;
pub use sampling::SensorSampling;
