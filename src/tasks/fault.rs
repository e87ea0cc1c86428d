//! Per-zone fault handler task.
//!
//! Drives the [`Fsm`] built from [`build_state_table`]. In Normal the
//! update blocks on the zone's fault semaphore; in ErrorActive the task
//! re-polls on an absolute 200 ms period. The first ErrorActive iteration
//! runs immediately after the transition.

use std::time::Duration;

use crate::fsm::context::FaultContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::rtos::PeriodicTimer;
use crate::zone::Zone;

pub struct FaultHandler {
    fsm: Fsm,
    ctx: FaultContext,
    timer: PeriodicTimer,
}

impl FaultHandler {
    pub fn new(mut ctx: FaultContext, poll_period: Duration) -> Self {
        let mut fsm = Fsm::new(build_state_table(), StateId::Normal);
        fsm.start(&mut ctx);
        Self {
            fsm,
            ctx,
            timer: PeriodicTimer::new(poll_period),
        }
    }

    pub fn zone(&self) -> Zone {
        self.ctx.zone
    }

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn context(&self) -> &FaultContext {
        &self.ctx
    }

    /// Run one state update. Blocks in Normal until a fault is posted.
    ///
    /// Returns `true` when the caller should wait one poll period before
    /// the next step.
    pub fn step(&mut self) -> bool {
        let before = self.fsm.current_state();
        self.fsm.tick(&mut self.ctx);
        match (before, self.fsm.current_state()) {
            (StateId::Normal, StateId::ErrorActive) => {
                self.timer.reset();
                false
            }
            (StateId::ErrorActive, StateId::ErrorActive) => true,
            _ => false,
        }
    }

    pub fn run(mut self) {
        loop {
            if self.step() {
                self.timer.wait();
            }
        }
    }
}
