//! Fault handler state functions and table builder.
//!
//! ```text
//!  NORMAL ──[fault semaphore]──▶ ERROR_ACTIVE ──┐
//!    ▲                                 │  ▲     │ [still out of range,
//!    │                                 │  └─────┘  re-poll next period]
//!    └────────[5 <= t <= 40]───────────┘
//! ```
//!
//! Every ERROR_ACTIVE iteration suspends intensity control, forces
//! `ErrorNoIntensity` onto the zone's bus and lights the indicator. The
//! first iteration of an episode also raises one Under/Over event bit.

use log::{error, info, warn};

use super::context::FaultContext;
use super::{StateDescriptor, StateId};
use crate::control::Intensity;
use crate::events::EventBit;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once per zone at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Normal
        StateDescriptor {
            id: StateId::Normal,
            name: "Normal",
            on_enter: None,
            on_exit: None,
            on_update: normal_update,
        },
        // Index 1: ErrorActive
        StateDescriptor {
            id: StateId::ErrorActive,
            name: "ErrorActive",
            on_enter: Some(error_enter),
            on_exit: Some(error_exit),
            on_update: error_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  NORMAL state
// ═══════════════════════════════════════════════════════════════════════════

fn normal_update(ctx: &mut FaultContext) -> Option<StateId> {
    // Blocks until sensor ingestion reports an out-of-range sample.
    ctx.state.fault_semaphore().take();
    Some(StateId::ErrorActive)
}

// ═══════════════════════════════════════════════════════════════════════════
//  ERROR_ACTIVE state
// ═══════════════════════════════════════════════════════════════════════════

fn error_enter(ctx: &mut FaultContext) {
    warn!(
        "{}: sensor out of range at {}°C, withholding heat",
        ctx.zone,
        ctx.state.temperature()
    );
}

fn error_update(ctx: &mut FaultContext) -> Option<StateId> {
    ctx.state.control_gate().suspend();
    ctx.bus.publish(Intensity::ErrorNoIntensity);
    ctx.port.set_fault_indicator(true);

    // Gives posted so far are covered by the read below. Anything posted
    // after it stays pending and sends Normal straight back here.
    ctx.state.fault_semaphore().try_take();
    let celsius = ctx.state.temperature();

    if !ctx.fault_latched {
        if let Some(kind) = ctx.limits.classify(celsius) {
            ctx.events.set_bits(EventBit::fault(ctx.zone, kind).mask());
            error!("{}: sensor fault {} ({}°C)", ctx.zone, kind, celsius);
        }
        ctx.fault_latched = true;
    }

    if ctx.limits.in_range(celsius) {
        Some(StateId::Normal)
    } else {
        None
    }
}

fn error_exit(ctx: &mut FaultContext) {
    ctx.state.control_gate().resume();
    ctx.port.set_fault_indicator(false);
    ctx.fault_latched = false;
    info!(
        "{}: sensor back in range ({}°C) after {} polls, control resumed",
        ctx.zone,
        ctx.state.temperature(),
        ctx.ticks_in_state
    );
}
