//! In-memory storage backend, the default for the demo deployment and
//! for tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::storage::{
    error::{StorageError, StorageResult},
    traits::*,
    types::*,
};

/// In-memory storage backend
#[derive(Default)]
pub struct MemoryBackend {
    events: Arc<RwLock<Vec<SystemEvent>>>,
    logs: Arc<RwLock<Vec<LogEntry>>>,
}

impl MemoryBackend {
    /// Create an empty memory backend
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for MemoryBackend {
    async fn list(&self) -> StorageResult<Vec<SystemEvent>> {
        let events = self.events.read().await;
        let mut out = events.clone();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn insert(&self, event: NewSystemEvent) -> StorageResult<SystemEvent> {
        let event = SystemEvent {
            id: Uuid::new_v4(),
            event_type: event.event_type,
            status: event.status,
            description: event.description,
            severity: event.severity,
            created_at: Utc::now(),
            resolved_at: None,
        };
        self.events.write().await.push(event.clone());
        Ok(event)
    }

    async fn resolve(&self, id: Uuid, resolved_at: DateTime<Utc>) -> StorageResult<()> {
        let mut events = self.events.write().await;
        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StorageError::not_found(format!("event {id}")))?;
        event.status = EventStatus::Resolved;
        event.resolved_at = Some(resolved_at);
        Ok(())
    }
}

#[async_trait]
impl LogStore for MemoryBackend {
    async fn clear(&self) -> StorageResult<()> {
        self.logs.write().await.clear();
        Ok(())
    }

    async fn append(&self, entry: NewLogEntry) -> StorageResult<LogEntry> {
        let entry = LogEntry {
            id: Uuid::new_v4(),
            step_number: entry.step_number,
            component: entry.component,
            action: entry.action,
            details: entry.details,
            timestamp: Utc::now(),
        };
        self.logs.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn list(&self) -> StorageResult<Vec<LogEntry>> {
        let logs = self.logs.read().await;
        let mut out = logs.clone();
        out.sort_by_key(|l| l.step_number);
        Ok(out)
    }
}

#[async_trait]
impl PortalStorage for MemoryBackend {
    fn event_store(&self) -> &dyn EventStore {
        self
    }

    fn log_store(&self) -> &dyn LogStore {
        self
    }

    async fn health_check(&self) -> StorageResult<HealthStatus> {
        Ok(HealthStatus {
            healthy: true,
            backend: "memory".to_string(),
            checked_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connectivity_event() -> NewSystemEvent {
        NewSystemEvent {
            event_type: "connectivity".to_string(),
            status: EventStatus::Active,
            description: "Connection to localhost down".to_string(),
            severity: "high".to_string(),
        }
    }

    #[tokio::test]
    async fn events_list_newest_first() {
        let backend = MemoryBackend::new();
        let first = backend.insert(connectivity_event()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = backend.insert(connectivity_event()).await.unwrap();

        let listed = EventStore::list(&backend).await.unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn resolve_sets_status_and_timestamp() {
        let backend = MemoryBackend::new();
        let event = backend.insert(connectivity_event()).await.unwrap();

        let resolved_at = Utc::now();
        backend.resolve(event.id, resolved_at).await.unwrap();

        let listed = EventStore::list(&backend).await.unwrap();
        assert_eq!(listed[0].status, EventStatus::Resolved);
        assert_eq!(listed[0].resolved_at, Some(resolved_at));
    }

    #[tokio::test]
    async fn resolve_unknown_id_is_not_found() {
        let backend = MemoryBackend::new();
        let err = backend.resolve(Uuid::new_v4(), Utc::now()).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn logs_clear_append_list_roundtrip() {
        let backend = MemoryBackend::new();
        for step in [3u32, 1, 2] {
            backend
                .append(NewLogEntry {
                    step_number: step,
                    component: "Sakram Core".to_string(),
                    action: "Task Request Created".to_string(),
                    details: format!("step {step}"),
                })
                .await
                .unwrap();
        }

        let listed = LogStore::list(&backend).await.unwrap();
        let steps: Vec<u32> = listed.iter().map(|l| l.step_number).collect();
        assert_eq!(steps, vec![1, 2, 3]);

        backend.clear().await.unwrap();
        assert!(LogStore::list(&backend).await.unwrap().is_empty());
    }
}
