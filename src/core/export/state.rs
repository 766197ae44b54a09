//! Orchestrator state and the busy flag
//!
//! The state is published on a `tokio::sync::watch` channel so a host can
//! disable its export triggers while an export runs. Only a [`BusyGuard`]
//! moves the state away from [`ExportState::Idle`], and dropping the guard
//! always moves it back.

use std::fmt;
use tokio::sync::watch;

/// Lifecycle state of an orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportState {
    /// Ready to accept an export
    #[default]
    Idle,
    /// Assembling rows from a paginated source
    Resolving,
    /// Projecting, encoding and delivering
    Encoding,
}

impl ExportState {
    /// Whether an export is in flight
    pub fn is_busy(&self) -> bool {
        !matches!(self, ExportState::Idle)
    }
}

impl fmt::Display for ExportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExportState::Idle => "idle",
            ExportState::Resolving => "resolving",
            ExportState::Encoding => "encoding",
        };
        f.write_str(label)
    }
}

/// Shared busy flag of one orchestrator
#[derive(Debug)]
pub struct BusyFlag {
    state: watch::Sender<ExportState>,
}

impl BusyFlag {
    /// Creates an idle flag
    pub fn new() -> Self {
        let (state, _) = watch::channel(ExportState::Idle);
        Self { state }
    }

    /// Current state
    pub fn current(&self) -> ExportState {
        *self.state.borrow()
    }

    /// Receiver that observes every state change
    pub fn subscribe(&self) -> watch::Receiver<ExportState> {
        self.state.subscribe()
    }

    /// Moves `Idle -> Resolving` atomically
    ///
    /// Returns `None` without touching the state if an export is in flight.
    pub fn try_acquire(&self) -> Option<BusyGuard<'_>> {
        let acquired = self.state.send_if_modified(|state| {
            if state.is_busy() {
                false
            } else {
                *state = ExportState::Resolving;
                true
            }
        });
        acquired.then_some(BusyGuard { flag: self })
    }
}

impl Default for BusyFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the busy flag for the duration of one export
#[derive(Debug)]
pub struct BusyGuard<'a> {
    flag: &'a BusyFlag,
}

impl BusyGuard<'_> {
    /// Advances to the next busy state
    pub fn advance(&self, next: ExportState) {
        self.flag.state.send_replace(next);
    }

    /// State held by this guard
    pub fn state(&self) -> ExportState {
        self.flag.current()
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.state.send_replace(ExportState::Idle);
    }
}
