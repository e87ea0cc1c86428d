//! Suspend/resume control over another task's work cycles.
//!
//! The controlled task wraps each cycle in [`TaskGate::enter`]; the
//! controlling task calls [`suspend`](TaskGate::suspend) and
//! [`resume`](TaskGate::resume). Once `suspend` returns, the controlled task
//! is parked before its next cycle and no cycle is in flight.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct GateState {
    suspended: bool,
    in_cycle: bool,
}

#[derive(Debug, Default)]
pub struct TaskGate {
    state: Mutex<GateState>,
    changed: Condvar,
}

/// Held by the controlled task for the duration of one cycle.
pub struct CycleGuard<'a> {
    gate: &'a TaskGate,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.gate.lock().in_cycle = false;
        self.gate.changed.notify_all();
    }
}

impl TaskGate {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Park while suspended, then mark a cycle as running.
    pub fn enter(&self) -> CycleGuard<'_> {
        let mut state = self.lock();
        while state.suspended {
            state = self
                .changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        state.in_cycle = true;
        CycleGuard { gate: self }
    }

    /// Start a cycle only if not suspended.
    pub fn try_enter(&self) -> Option<CycleGuard<'_>> {
        let mut state = self.lock();
        if state.suspended {
            return None;
        }
        state.in_cycle = true;
        Some(CycleGuard { gate: self })
    }

    /// Suspend the controlled task. Idempotent.
    ///
    /// Waits for an in-flight cycle to finish before returning. Returns
    /// `true` if this call changed the state.
    pub fn suspend(&self) -> bool {
        let mut state = self.lock();
        let changed = !state.suspended;
        state.suspended = true;
        while state.in_cycle {
            state = self
                .changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        changed
    }

    /// Let the controlled task run again. Idempotent.
    pub fn resume(&self) -> bool {
        let mut state = self.lock();
        let changed = state.suspended;
        state.suspended = false;
        self.changed.notify_all();
        changed
    }

    pub fn is_suspended(&self) -> bool {
        self.lock().suspended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn suspend_and_resume_are_idempotent() {
        let g = TaskGate::new();
        assert!(g.suspend());
        assert!(!g.suspend());
        assert!(g.is_suspended());
        assert!(g.resume());
        assert!(!g.resume());
    }

    #[test]
    fn try_enter_refused_while_suspended() {
        let g = TaskGate::new();
        g.suspend();
        assert!(g.try_enter().is_none());
        g.resume();
        assert!(g.try_enter().is_some());
    }

    #[test]
    fn suspend_waits_for_in_flight_cycle() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let g = Arc::new(TaskGate::new());
        let work_done = Arc::new(AtomicBool::new(false));
        let guard_held = {
            let g = Arc::clone(&g);
            let work_done = Arc::clone(&work_done);
            thread::spawn(move || {
                let _cycle = g.enter();
                thread::sleep(Duration::from_millis(50));
                work_done.store(true, Ordering::SeqCst);
            })
        };
        thread::sleep(Duration::from_millis(10));
        g.suspend();
        assert!(work_done.load(Ordering::SeqCst));
        guard_held.join().unwrap();
    }

    #[test]
    fn enter_parks_until_resume() {
        let g = Arc::new(TaskGate::new());
        g.suspend();
        let worker = {
            let g = Arc::clone(&g);
            thread::spawn(move || drop(g.enter()))
        };
        thread::sleep(Duration::from_millis(20));
        assert!(!worker.is_finished());
        g.resume();
        worker.join().unwrap();
    }
}
