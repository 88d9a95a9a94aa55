//! Core trait definitions for the storage abstraction layer

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::StorageResult;
use super::types::*;

/// Unified storage interface bundling the record stores the portal uses
#[async_trait]
pub trait PortalStorage: Send + Sync {
    /// Get the event storage implementation
    fn event_store(&self) -> &dyn EventStore;

    /// Get the workflow log storage implementation
    fn log_store(&self) -> &dyn LogStore;

    /// Check the health of the storage backend
    async fn health_check(&self) -> StorageResult<HealthStatus>;
}

/// System event storage operations
#[async_trait]
pub trait EventStore: Send + Sync {
    /// List all events, newest first (ordered by `created_at` descending)
    async fn list(&self) -> StorageResult<Vec<SystemEvent>>;

    /// Insert an event; the store assigns `id` and `created_at`
    async fn insert(&self, event: NewSystemEvent) -> StorageResult<SystemEvent>;

    /// Transition an event to resolved, recording the resolution time.
    /// Fails with `NotFound` if no event has the given id.
    async fn resolve(&self, id: Uuid, resolved_at: DateTime<Utc>) -> StorageResult<()>;
}

/// Workflow trace storage operations
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Delete all log entries (a global reset, not filtered by session)
    async fn clear(&self) -> StorageResult<()>;

    /// Append one entry; the store assigns `id` and `timestamp`
    async fn append(&self, entry: NewLogEntry) -> StorageResult<LogEntry>;

    /// List all entries ordered by `step_number` ascending
    async fn list(&self) -> StorageResult<Vec<LogEntry>>;
}
