//! Cooperative run control: pause, resume, and one-way stop.
//!
//! Control flows through a `tokio::sync::watch` channel so the engine can
//! await state changes while paused instead of sleep-polling. The user-facing
//! side holds a [`RunControl`]; the engine holds the receiver and observes
//! the latest state at chunk boundaries.

use std::sync::Arc;

use tokio::sync::watch;

/// Latest control state for a run. `stopped` is latched — once set it can
/// never be cleared, and a stop also clears `paused` so a paused run can
/// terminate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub paused: bool,
    pub stopped: bool,
}

/// User-facing handle for controlling an in-flight import run.
#[derive(Debug, Clone)]
pub struct RunControl {
    tx: Arc<watch::Sender<ControlState>>,
}

impl RunControl {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ControlState::default());
        Self { tx: Arc::new(tx) }
    }

    /// Returns a receiver for the engine (or any observer) to watch.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ControlState> {
        self.tx.subscribe()
    }

    /// Suspends chunk dispatch. No effect after a stop.
    pub fn pause(&self) {
        self.tx.send_if_modified(|state| {
            if state.stopped || state.paused {
                return false;
            }
            state.paused = true;
            true
        });
    }

    /// Resumes a paused run. No effect after a stop.
    pub fn resume(&self) {
        self.tx.send_if_modified(|state| {
            if state.stopped || !state.paused {
                return false;
            }
            state.paused = false;
            true
        });
    }

    /// Requests a stop. One-way: later calls to `pause`/`resume` are ignored.
    /// The chunk currently in flight still completes.
    pub fn stop(&self) {
        self.tx.send_if_modified(|state| {
            if state.stopped {
                return false;
            }
            state.stopped = true;
            state.paused = false;
            true
        });
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.tx.borrow().paused
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.tx.borrow().stopped
    }
}

impl Default for RunControl {
    fn default() -> Self {
        Self::new()
    }
}
