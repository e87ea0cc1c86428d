//! Application service: assembles the shared objects and starts the task
//! set.
//!
//! ```text
//!  ZonePort ×2 ─┐                         ┌─▶ SystemHandle
//!  StoragePort ─┼─▶ SeatHeaterSystem ─────┤    (buttons · samples · inspection)
//!  TickSource  ─┤    ZoneState ×2         └─▶ 11 tasks, pinned to APP core
//!  TextSink    ─┘    IntensityBus ×2 · EventGroup · DiagMailbox ×2
//! ```
//!
//! All I/O flows through port traits, so the full task set runs unchanged
//! against mock adapters on the host.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use log::info;

use crate::config::SystemConfig;
use crate::control::{HeatingLevel, IntensityBus};
use crate::diagnostics::{
    DiagnosticsRecord, FAULT_LOG_SLOTS, FaultLog, HeartbeatSnapshot, ZoneRecord, read_snapshot,
};
use crate::drivers::task_pin::{
    Core, PRIO_ACTUATION, PRIO_CONTROL, PRIO_DIAGNOSTICS, PRIO_FAULT, PRIO_INPUT, PRIO_REPORTING,
    PRIO_SAMPLING, TaskSpec, spawn_task,
};
use crate::error::{Error, Result};
use crate::fsm::context::FaultContext;
use crate::rtos::EventGroup;
use crate::safety::RangeLimits;
use crate::sensors::{SensorIngestion, TemperatureScale};
use crate::state::ZoneState;
use crate::tasks::diagnostics::{LastState, lock_state};
use crate::tasks::{
    Actuation, DiagMailbox, DiagnosticsArbiter, FaultHandler, InputHandling, IntensityControl,
    Reporting, SensorSampling,
};
use crate::zone::{PerZone, Zone};

use super::ports::{StorageError, StoragePort, TextSink, TickSource, ZonePort};

// ───────────────────────────────────────────────────────────────
// Task table
// ───────────────────────────────────────────────────────────────

/// Input, diagnostics, reporting, plus fault, sampling, actuation and
/// control for each zone.
pub const TASK_COUNT: usize = 11;

const INPUT_TASK: TaskSpec = TaskSpec::new("input\0", PRIO_INPUT, 4);
const DIAG_TASK: TaskSpec = TaskSpec::new("diag\0", PRIO_DIAGNOSTICS, 8);
const REPORT_TASK: TaskSpec = TaskSpec::new("report\0", PRIO_REPORTING, 6);

const fn fault_task(zone: Zone) -> TaskSpec {
    match zone {
        Zone::Driver => TaskSpec::new("fault-drv\0", PRIO_FAULT, 4),
        Zone::Passenger => TaskSpec::new("fault-pas\0", PRIO_FAULT, 4),
    }
}

const fn sample_task(zone: Zone) -> TaskSpec {
    match zone {
        Zone::Driver => TaskSpec::new("sample-drv\0", PRIO_SAMPLING, 4),
        Zone::Passenger => TaskSpec::new("sample-pas\0", PRIO_SAMPLING, 4),
    }
}

const fn actuation_task(zone: Zone) -> TaskSpec {
    match zone {
        Zone::Driver => TaskSpec::new("act-drv\0", PRIO_ACTUATION, 4),
        Zone::Passenger => TaskSpec::new("act-pas\0", PRIO_ACTUATION, 4),
    }
}

const fn control_task(zone: Zone) -> TaskSpec {
    match zone {
        Zone::Driver => TaskSpec::new("ctl-drv\0", PRIO_CONTROL, 4),
        Zone::Passenger => TaskSpec::new("ctl-pas\0", PRIO_CONTROL, 4),
    }
}

// ───────────────────────────────────────────────────────────────
// SeatHeaterSystem
// ───────────────────────────────────────────────────────────────

/// Shared objects for both zones, built before any task exists.
pub struct SeatHeaterSystem {
    config: SystemConfig,
    limits: RangeLimits,
    zones: PerZone<Arc<ZoneState>>,
    buses: PerZone<Arc<IntensityBus>>,
    mailboxes: PerZone<Arc<DiagMailbox>>,
    events: Arc<EventGroup>,
    ingestion: Arc<SensorIngestion>,
    input: InputHandling,
}

impl SeatHeaterSystem {
    pub fn new(config: SystemConfig) -> Self {
        let limits = RangeLimits::from_config(&config);
        let zones = PerZone::from_fn(|z| Arc::new(ZoneState::new(z)));
        let events = Arc::new(EventGroup::new());
        let ingestion = Arc::new(SensorIngestion::new(
            zones.clone(),
            TemperatureScale::from_config(&config),
            limits,
        ));
        Self {
            config,
            limits,
            input: InputHandling::new(events.clone(), zones.clone()),
            buses: PerZone::from_fn(|_| Arc::new(IntensityBus::new())),
            mailboxes: PerZone::from_fn(|_| Arc::new(DiagMailbox::new())),
            zones,
            events,
            ingestion,
        }
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Spawn every task and hand back the control surface.
    ///
    /// `storage` is cloned: one copy goes to the diagnostics task, the
    /// other stays with the handle for read-back.
    pub fn start<S>(
        self,
        ports: PerZone<Arc<dyn ZonePort>>,
        storage: S,
        clock: Arc<dyn TickSource>,
        sink: Box<dyn TextSink>,
    ) -> Result<SystemHandle>
    where
        S: StoragePort + Clone + 'static,
    {
        for (zone, port) in ports.iter() {
            if port.zone() != zone {
                return Err(Error::Init("zone port wired to the wrong seat"));
            }
        }

        let cfg = &self.config;
        let mut tasks = Vec::with_capacity(TASK_COUNT);

        let input = self.input.clone();
        tasks.push(spawn_task(Core::App, INPUT_TASK, move || input.run())?);

        for zone in Zone::ALL {
            let ctx = FaultContext::new(
                self.zones[zone].clone(),
                ports[zone].clone(),
                self.buses[zone].clone(),
                self.events.clone(),
                self.limits,
            );
            let handler = FaultHandler::new(ctx, cfg.fault_poll_period());
            tasks.push(spawn_task(Core::App, fault_task(zone), move || handler.run())?);
        }

        let arbiter = DiagnosticsArbiter::new(
            self.events.clone(),
            self.buses.clone(),
            self.mailboxes.clone(),
            Box::new(storage.clone()),
            clock,
            cfg.diagnostics_wait(),
        );
        let last_state = arbiter.last_state_handle();
        tasks.push(spawn_task(Core::App, DIAG_TASK, move || arbiter.run())?);

        for zone in Zone::ALL {
            let sampling =
                SensorSampling::new(ports[zone].clone(), self.ingestion.clone(), cfg.sample_period());
            tasks.push(spawn_task(Core::App, sample_task(zone), move || sampling.run())?);

            let actuation =
                Actuation::new(ports[zone].clone(), self.buses[zone].clone(), cfg.actuation_period());
            tasks.push(spawn_task(Core::App, actuation_task(zone), move || actuation.run())?);
        }

        let reporting = Reporting::new(
            self.zones.clone(),
            self.buses.clone(),
            self.mailboxes.clone(),
            sink,
            cfg.report_period(),
        );
        tasks.push(spawn_task(Core::App, REPORT_TASK, move || reporting.run())?);

        for zone in Zone::ALL {
            let control = IntensityControl::new(
                self.zones[zone].clone(),
                self.buses[zone].clone(),
                cfg.control_period(),
            );
            tasks.push(spawn_task(Core::App, control_task(zone), move || control.run())?);
        }

        info!("SeatHeaterSystem: {} tasks running", tasks.len());

        Ok(SystemHandle {
            zones: self.zones,
            input: self.input,
            ingestion: self.ingestion,
            storage: Mutex::new(Box::new(storage) as Box<dyn StoragePort>),
            last_state,
            tasks,
        })
    }
}

// ───────────────────────────────────────────────────────────────
// SystemHandle
// ───────────────────────────────────────────────────────────────

/// Entry points and read-only inspection of a running system.
pub struct SystemHandle {
    zones: PerZone<Arc<ZoneState>>,
    input: InputHandling,
    ingestion: Arc<SensorIngestion>,
    storage: Mutex<Box<dyn StoragePort>>,
    last_state: LastState,
    tasks: Vec<JoinHandle<()>>,
}

impl SystemHandle {
    /// Button edge for `zone`. Same path the relayed GPIO edges take.
    pub fn press_button(&self, zone: Zone) -> bool {
        self.input.on_button_edge(zone)
    }

    /// Deliver a finished conversion. Same path the sampling task takes.
    pub fn on_conversion_complete(&self, zone: Zone, raw: u16) -> bool {
        self.ingestion.on_conversion_complete(zone, raw)
    }

    pub fn input(&self) -> &InputHandling {
        &self.input
    }

    pub fn ingestion(&self) -> Arc<SensorIngestion> {
        self.ingestion.clone()
    }

    pub fn level(&self, zone: Zone) -> HeatingLevel {
        self.zones[zone].level()
    }

    pub fn temperature(&self, zone: Zone) -> u16 {
        self.zones[zone].temperature()
    }

    pub fn fault_active(&self, zone: Zone) -> bool {
        self.zones[zone].fault_active()
    }

    pub fn last_state(&self, zone: Zone) -> Option<ZoneRecord> {
        lock_state(&self.last_state)[zone]
    }

    /// Persisted fault records, oldest first.
    pub fn fault_records(&self) -> heapless::Vec<DiagnosticsRecord, FAULT_LOG_SLOTS> {
        let storage = self.storage();
        let mut log = FaultLog::new();
        log.init(&**storage);
        log.read_all(&**storage)
    }

    pub fn snapshot(&self) -> core::result::Result<HeartbeatSnapshot, StorageError> {
        read_snapshot(&**self.storage())
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    fn storage(&self) -> MutexGuard<'_, Box<dyn StoragePort>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
