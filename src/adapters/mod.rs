//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter     | Implements     | Connects to                         |
//! |-------------|----------------|-------------------------------------|
//! | `zone_hw`   | ZonePort       | ADC1 oneshot, heater/LED GPIOs, sim |
//! | `log_sink`  | TextSink       | Serial log output                   |
//! | `nvs`       | ConfigPort     | NVS / in-memory store               |
//! |             | StoragePort    |                                     |
//! | `time`      | TickSource     | ESP32 system timer                  |

pub mod log_sink;
pub mod nvs;
pub mod time;
pub mod zone_hw;
