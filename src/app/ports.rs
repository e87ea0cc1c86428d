//! Port traits: the boundary between the controller and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ tasks (domain)
//! ```
//!
//! Driven adapters (zone hardware, clock, text output, storage) implement
//! these traits. Tasks receive them as trait objects, so the controller core
//! never touches hardware directly and runs unchanged against mocks.
//!
//! - **ConfigPort** implementations MUST validate before persisting.
//! - All port errors are typed, callers must handle every variant explicitly.

use crate::config::SystemConfig;
use crate::control::ActuatorPattern;
use crate::zone::Zone;

// ───────────────────────────────────────────────────────────────
// Zone hardware port (driven adapter: domain ↔ one seat)
// ───────────────────────────────────────────────────────────────

/// Everything the controller needs from one seat's hardware.
///
/// One instance exists per zone; the same task code drives either seat
/// through this capability. Methods take `&self` because the sampling,
/// fault and actuation tasks share one instance.
pub trait ZonePort: Send + Sync {
    /// Which seat this instance drives.
    fn zone(&self) -> Zone;

    /// Kick one temperature conversion.
    ///
    /// Hardware that converts synchronously returns the raw count. `None`
    /// means no sample is ready now: hardware with a completion interrupt
    /// delivers it later to [`SensorIngestion`](crate::sensors::SensorIngestion),
    /// and a failed conversion simply skips this period.
    fn start_conversion(&self) -> Option<u16>;

    /// Switch the seat's fault indicator.
    fn set_fault_indicator(&self, on: bool);

    /// Drive the two heater stages.
    fn set_actuator_pattern(&self, pattern: ActuatorPattern);
}

// ───────────────────────────────────────────────────────────────
// Tick source port (driven adapter: clock → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic tick counter used to timestamp diagnostics records.
pub trait TickSource: Send + Sync {
    /// Ticks since boot. Wraps at `u32::MAX`.
    fn monotonic_ticks(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Text sink port (driven adapter: domain → serial console)
// ───────────────────────────────────────────────────────────────

/// Line-oriented human readable output.
pub trait TextSink: Send {
    fn write_text(&mut self, text: &str);

    fn write_integer(&mut self, value: i64) {
        let mut s: heapless::String<24> = heapless::String::new();
        let _ = core::fmt::Write::write_fmt(&mut s, format_args!("{}", value));
        self.write_text(&s);
    }

    fn write_line(&mut self, text: &str) {
        self.write_text(text);
        self.write_text("\r\n");
    }
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate config values before persisting.
/// Invalid ranges are rejected with [`ConfigError::ValidationFailed`],
/// not silently clamped.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`SystemConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ NVS / flash)
// ───────────────────────────────────────────────────────────────

/// Persistent key-value storage for the fault log, the heartbeat
/// snapshot and configuration.
///
/// - Keys are namespaced to prevent collisions between subsystems.
/// - Write operations MUST be atomic, no partial writes on power loss.
///   The ESP-IDF NVS API guarantees this natively; in-memory simulation
///   achieves it trivially.
pub trait StoragePort: Send {
    /// Read a value.  Returns the number of bytes written to `buf`.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Delete a key.  Returns `Ok(())` even if the key didn't exist.
    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError>;

    /// Check whether a key exists without reading it.
    fn exists(&self, namespace: &str, key: &str) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed integrity / deserialization check.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Underlying storage is full.
    StorageFull,
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Storage partition is full.
    Full,
    /// Generic I/O error.
    IoError,
    /// Stored bytes could not be encoded or decoded.
    Corrupted,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::StorageFull => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
            Self::Corrupted => write!(f, "corrupted record"),
        }
    }
}
