//! Type definitions for the storage abstraction layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a system event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Active,
    Resolved,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventStatus::Active => write!(f, "active"),
            EventStatus::Resolved => write!(f, "resolved"),
        }
    }
}

/// A persisted security/system condition with a lifecycle status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemEvent {
    pub id: Uuid,
    pub event_type: String,
    pub status: EventStatus,
    pub description: String,
    pub severity: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl SystemEvent {
    /// True for the events the diagnostic runner is allowed to resolve
    pub fn is_active_connectivity(&self) -> bool {
        self.event_type == "connectivity" && self.status == EventStatus::Active
    }
}

/// Fields supplied by the caller when creating an event; the store
/// assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSystemEvent {
    pub event_type: String,
    pub status: EventStatus,
    pub description: String,
    pub severity: String,
}

/// One step of a workflow execution trace, ordered by step number
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub step_number: u32,
    pub component: String,
    pub action: String,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

/// Fields supplied by the caller when appending a log entry; the store
/// assigns `id` and `timestamp` at insertion time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLogEntry {
    pub step_number: u32,
    pub component: String,
    pub action: String,
    pub details: String,
}

/// Health status reported by a storage backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub backend: String,
    pub checked_at: DateTime<Utc>,
}
