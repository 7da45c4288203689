//! Scan state management.
//!
//! One watch-channel store holds the advisory scanning flag, the latest
//! report, and the history mirror. The server owns history; locally it only
//! ever changes by wholesale replacement or a full clear.

use std::sync::Arc;

use tokio::sync::watch;
use veriscan_model::ScanReport;

/// Observable scan state.
#[derive(Debug, Clone, Default)]
pub struct ScannerState {
    /// Whether a scan call is in flight. Advisory: consumers use it to
    /// grey out a button, not as a mutual-exclusion lock.
    pub scanning: bool,
    /// Latest completed report, replaced wholesale by each success
    pub report: Option<ScanReport>,
    /// Read-through mirror of the server-held history
    pub history: Vec<ScanReport>,
}

/// Thread-safe scan state store using a watch channel.
#[derive(Clone, Debug)]
pub struct ScannerStore {
    sender: Arc<watch::Sender<ScannerState>>,
    receiver: watch::Receiver<ScannerState>,
}

impl ScannerStore {
    /// Create an idle, empty store.
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(ScannerState::default());
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Get the current scan state.
    pub fn current(&self) -> ScannerState {
        self.receiver.borrow().clone()
    }

    /// Access state without cloning.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ScannerState) -> R,
    {
        f(&self.receiver.borrow())
    }

    /// Subscribe to scan state changes.
    pub fn subscribe(&self) -> watch::Receiver<ScannerState> {
        self.receiver.clone()
    }

    /// Whether a scan call is in flight.
    pub fn is_scanning(&self) -> bool {
        self.receiver.borrow().scanning
    }

    /// Latest completed report.
    pub fn report(&self) -> Option<ScanReport> {
        self.receiver.borrow().report.clone()
    }

    /// Current history mirror.
    pub fn history(&self) -> Vec<ScanReport> {
        self.receiver.borrow().history.clone()
    }

    pub(crate) fn set_scanning(&self, scanning: bool) {
        self.sender.send_modify(|state| state.scanning = scanning);
    }

    pub(crate) fn store_report(&self, report: ScanReport) {
        self.sender.send_modify(|state| state.report = Some(report));
    }

    pub(crate) fn replace_history(&self, entries: Vec<ScanReport>) {
        self.sender.send_modify(|state| state.history = entries);
    }

    pub(crate) fn clear_history(&self) {
        self.sender.send_modify(|state| state.history.clear());
    }
}

impl Default for ScannerStore {
    fn default() -> Self {
        Self::new()
    }
}
