//! Real-time synchronization primitives.
//!
//! Thin, typed wrappers giving the task set the primitives a preemptive
//! RTOS offers: an event bitset, a binary semaphore, bounded mailboxes,
//! task suspension and absolute-time periodic delays.
//!
//! ```text
//!   ISR ──give_from_isr──▶ BinarySemaphore ──take──▶ fault task
//!   ISR ──set_bits_from_isr──▶ EventGroup ──wait_bits──▶ input / diagnostics
//!   task ──send──▶ Mailbox<T, N> ──recv──▶ task
//!   fault task ──suspend/resume──▶ TaskGate ──enter──▶ control task
//! ```
//!
//! On ESP-IDF, `std::thread` is FreeRTOS tasks and `Condvar`/`Mutex` are
//! pthread objects backed by FreeRTOS, so the same code runs on target and
//! on the host.

pub mod event_group;
pub mod gate;
pub mod mailbox;
pub mod semaphore;
pub mod timer;

pub use event_group::{EventGroup, WaitMode};
pub use gate::{CycleGuard, TaskGate};
pub use mailbox::Mailbox;
pub use semaphore::BinarySemaphore;
pub use timer::PeriodicTimer;
