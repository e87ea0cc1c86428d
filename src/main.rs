//! SeatHeater Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  EspZone ×2        LogTextSink   NvsAdapter      Esp32Time     │
//! │  (ZonePort)        (TextSink)    (Config+NVS)    (TickSource)  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │          SeatHeaterSystem (11 tasks, APP core)         │    │
//! │  │  input · fault · diagnostics · sampling · actuation    │    │
//! │  │  reporting · intensity control                         │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Main task: button edge relay (GPIO ISR counters → events)     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::{error, info, warn};

use seatheater::adapters::log_sink::LogTextSink;
use seatheater::adapters::nvs::NvsAdapter;
use seatheater::adapters::time::Esp32TimeAdapter;
use seatheater::adapters::zone_hw::EspZone;
use seatheater::app::ports::{ConfigPort, ZonePort};
use seatheater::app::service::SeatHeaterSystem;
use seatheater::config::SystemConfig;
use seatheater::drivers::button::ButtonRelay;
use seatheater::drivers::hw_init;
use seatheater::error::Error;
use seatheater::zone::{PerZone, Zone};

/// How often the main task forwards button edges.
const RELAY_PERIOD: Duration = Duration::from_millis(10);

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SeatHeater v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    hw_init::init_peripherals().map_err(Error::from)?;
    if let Err(e) = hw_init::init_isr_service() {
        error!("ISR service init failed: {} — buttons disabled", e);
    }

    // ── 3. Load config from NVS (or defaults) ─────────────────
    let nvs = match NvsAdapter::new() {
        Ok(n) => n,
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults and no persistence", e);
            NvsAdapter::default()
        }
    };
    let config = match nvs.load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("NVS config load failed ({}), using defaults", e);
            SystemConfig::default()
        }
    };
    info!("Config: {:?}", config);

    // ── 4. Zone hardware ──────────────────────────────────────
    // SAFETY: pins.rs assigns each GPIO to exactly one seat and nothing
    // else claims them.
    let driver = unsafe { EspZone::claim(Zone::Driver) }?;
    let passenger = unsafe { EspZone::claim(Zone::Passenger) }?;
    let ports: PerZone<Arc<dyn ZonePort>> = PerZone::new(Arc::new(driver), Arc::new(passenger));

    // ── 5. Start the task set ─────────────────────────────────
    let handle = SeatHeaterSystem::new(config).start(
        ports,
        nvs,
        Arc::new(Esp32TimeAdapter::new()),
        Box::new(LogTextSink::new()),
    )?;
    info!("System ready ({} tasks). Relaying button edges.", handle.task_count());

    // ── 6. Button relay loop ──────────────────────────────────
    let mut relay = ButtonRelay::new();
    loop {
        let edges = relay.poll();
        for zone in Zone::ALL {
            for _ in 0..edges[zone] {
                handle.press_button(zone);
            }
        }
        std::thread::sleep(RELAY_PERIOD);
    }
}
