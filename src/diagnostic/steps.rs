//! The scripted diagnostic checklist
//!
//! The ten steps below are the fixed trace the demo renders as a
//! workflow execution log. Their literal content is part of the demo's
//! contract and must not be reordered or reworded.

use crate::storage::NewLogEntry;

/// One scripted step of the diagnostic checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticStep {
    pub step_number: u32,
    pub component: &'static str,
    pub action: &'static str,
    pub details: &'static str,
}

impl DiagnosticStep {
    /// Convert to the insertable log entry form
    pub fn to_log_entry(self) -> NewLogEntry {
        NewLogEntry {
            step_number: self.step_number,
            component: self.component.to_string(),
            action: self.action.to_string(),
            details: self.details.to_string(),
        }
    }
}

/// The fixed ten-step connectivity checklist, in execution order
pub const DIAGNOSTIC_STEPS: [DiagnosticStep; 10] = [
    DiagnosticStep {
        step_number: 1,
        component: "Sakram Core",
        action: "Task Request Created",
        details: "Admin requests network connectivity check for localhost",
    },
    DiagnosticStep {
        step_number: 2,
        component: "Task Request Queue (TRQ)",
        action: "Task Queued",
        details: "Network connectivity task added to TRQ",
    },
    DiagnosticStep {
        step_number: 3,
        component: "SPIL",
        action: "Task Picked Up",
        details: "SPIL picks up task request from TRQ",
    },
    DiagnosticStep {
        step_number: 4,
        component: "SPIL",
        action: "Plugin Request Sent",
        details: "SPIL sends plugin execution request to Ansible",
    },
    DiagnosticStep {
        step_number: 5,
        component: "Ansible",
        action: "Plugin Execution Started",
        details: "Ansible receives and starts plugin execution",
    },
    DiagnosticStep {
        step_number: 6,
        component: "Network Plugin",
        action: "Command Executed",
        details: "Plugin executes 'ping localhost' command",
    },
    DiagnosticStep {
        step_number: 7,
        component: "Network Plugin",
        action: "Result Received",
        details: "Ping command successful - localhost is reachable",
    },
    DiagnosticStep {
        step_number: 8,
        component: "Ansible",
        action: "Result Returned",
        details: "Ansible returns plugin execution result to SPIL",
    },
    DiagnosticStep {
        step_number: 9,
        component: "SPIL",
        action: "Response Queued",
        details: "SPIL puts response on Plugin Results Queue (PRQ)",
    },
    DiagnosticStep {
        step_number: 10,
        component: "Sakram Core",
        action: "Result Processed",
        details: "Sakram Core picks up result from PRQ and updates event status",
    },
];
