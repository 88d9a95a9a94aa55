//! Diagnostic workflow simulation
//!
//! The dashboard's "Run Diagnostic Checklist" action: a fixed ten-step
//! trace written to the log store at a configurable pacing interval,
//! followed by resolution of the first active connectivity event.

pub mod runner;
pub mod steps;

use thiserror::Error;
use uuid::Uuid;

use crate::storage::StorageError;

pub use runner::{DiagnosticRunner, RunOutcome, DEFAULT_STEP_DELAY};
pub use steps::{DiagnosticStep, DIAGNOSTIC_STEPS};

/// Failures during a diagnostic run. The run aborts on the first storage
/// failure; rows already inserted are left in place.
#[derive(Error, Debug)]
pub enum DiagnosticError {
    #[error("failed to clear previous logs: {0}")]
    Clear(StorageError),

    #[error("step {step} failed: {source}")]
    Step {
        step: u32,
        #[source]
        source: StorageError,
    },

    #[error("failed to resolve event {id}: {source}")]
    Resolve {
        id: Uuid,
        #[source]
        source: StorageError,
    },
}
