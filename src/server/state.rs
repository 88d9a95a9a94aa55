//! Shared application state for the HTTP surface

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tera::Tera;

use crate::auth::AuthProvider;
use crate::diagnostic::DiagnosticRunner;
use crate::notify::NotificationQueue;
use crate::storage::PortalStorage;

/// Single-field state machine for the diagnostic surface:
/// `idle -> running -> idle`. At most one run may be in flight; a second
/// trigger while running is rejected by the caller, not by the store.
#[derive(Default)]
pub struct RunState {
    running: AtomicBool,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transition idle -> running. Returns false when already running.
    pub fn try_begin(&self) -> bool {
        self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Transition running -> idle
    pub fn finish(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn PortalStorage>,
    pub auth: Arc<dyn AuthProvider>,
    pub notifications: Arc<NotificationQueue>,
    pub runner: Arc<DiagnosticRunner>,
    pub run_state: Arc<RunState>,
    pub templates: Arc<Tera>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_state_rejects_reentrant_begin() {
        let state = RunState::new();
        assert!(!state.is_running());
        assert!(state.try_begin());
        assert!(state.is_running());
        assert!(!state.try_begin());

        state.finish();
        assert!(!state.is_running());
        assert!(state.try_begin());
    }
}
