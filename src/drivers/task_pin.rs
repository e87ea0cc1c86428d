//! Priority-aware task spawning.
//!
//! Wraps `esp_pthread_set_cfg()` so that `std::thread::spawn` creates a
//! FreeRTOS task with an explicit priority, stack size and core affinity.
//! On non-ESP targets, falls back to a plain named thread.
//!
//! # ESP-IDF Threading Model
//!
//! ESP-IDF implements `std::thread` via pthreads, which are thin wrappers
//! around FreeRTOS tasks. `esp_pthread_set_cfg()` sets thread-local
//! configuration that applies to the *next* `pthread_create()` call from
//! the calling thread. This means the config→spawn pair must not be
//! interleaved with other thread creation on the same thread.
//!
//! All controller tasks are pinned to the APP core so that the relative
//! priorities below decide who runs, exactly as on a single-core part.

use crate::error::{Error, Result};

/// CPU core identifiers for the ESP32-S3 Xtensa LX7 dual-core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Core {
    /// Core 0 (PRO_CPU): protocol stacks.
    Pro = 0,
    /// Core 1 (APP_CPU): controller tasks.
    App = 1,
}

/// Static description of one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSpec {
    /// Null-terminated FreeRTOS task name (e.g. `"fault-drv\0"`).
    pub name: &'static str,
    pub priority: u8,
    pub stack_kb: usize,
}

// ── Priority table (higher runs first) ───────────────────────

pub const PRIO_INPUT: u8 = 5;
pub const PRIO_FAULT: u8 = 5;
pub const PRIO_DIAGNOSTICS: u8 = 4;
pub const PRIO_SAMPLING: u8 = 3;
pub const PRIO_ACTUATION: u8 = 2;
pub const PRIO_REPORTING: u8 = 2;
pub const PRIO_CONTROL: u8 = 1;

impl TaskSpec {
    pub const fn new(name: &'static str, priority: u8, stack_kb: usize) -> Self {
        Self {
            name,
            priority,
            stack_kb,
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.name.trim_end_matches('\0')
    }
}

/// Spawn a task pinned to `core` with the priority and stack in `spec`.
#[cfg(target_os = "espidf")]
pub fn spawn_task(
    core: Core,
    spec: TaskSpec,
    f: impl FnOnce() + Send + 'static,
) -> Result<std::thread::JoinHandle<()>> {
    // SAFETY: the config is copied by esp_pthread_set_cfg and applies only
    // to the next pthread_create on this thread, which happens below.
    unsafe {
        let mut cfg = esp_idf_sys::esp_create_default_pthread_config();
        cfg.pin_to_core = core as i32;
        cfg.prio = spec.priority as i32;
        cfg.stack_size = (spec.stack_kb * 1024) as i32;
        cfg.thread_name = spec.name.as_ptr() as *const _;
        let ret = esp_idf_sys::esp_pthread_set_cfg(&cfg);
        if ret != esp_idf_sys::ESP_OK as i32 {
            log::error!("esp_pthread_set_cfg failed for '{}': {}", spec.display_name(), ret);
            return Err(Error::Init("esp_pthread_set_cfg failed"));
        }
    }

    log::info!(
        "Spawning '{}' on {:?} (pri={}, stack={}KB)",
        spec.display_name(),
        core,
        spec.priority,
        spec.stack_kb
    );

    std::thread::Builder::new()
        .name(spec.display_name().into())
        .spawn(f)
        .map_err(|_| Error::Init("task creation failed"))
}

/// Host threads format and log far more than the target tasks do.
#[cfg(not(target_os = "espidf"))]
const HOST_MIN_STACK: usize = 64 * 1024;

/// Simulation fallback, ignores core affinity and priority.
#[cfg(not(target_os = "espidf"))]
pub fn spawn_task(
    _core: Core,
    spec: TaskSpec,
    f: impl FnOnce() + Send + 'static,
) -> Result<std::thread::JoinHandle<()>> {
    log::debug!(
        "Spawning '{}' (sim, pri={} ignored, stack={}KB)",
        spec.display_name(),
        spec.priority,
        spec.stack_kb
    );

    std::thread::Builder::new()
        .name(spec.display_name().into())
        .stack_size((spec.stack_kb * 1024).max(HOST_MIN_STACK))
        .spawn(f)
        .map_err(|_| Error::Init("task creation failed"))
}
