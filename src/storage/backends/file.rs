//! File-based storage backend implementation
//!
//! Records are kept as pretty-printed JSON files under a base directory
//! (`events.json`, `logs.json`) so the demo dataset survives restarts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::storage::{
    error::{StorageError, StorageResult},
    traits::*,
    types::*,
};

const EVENTS_FILE: &str = "events.json";
const LOGS_FILE: &str = "logs.json";

/// File-based storage backend
pub struct FileBackend {
    base_dir: PathBuf,
    // Serializes read-modify-write cycles on the JSON files
    write_guard: Mutex<()>,
}

impl FileBackend {
    /// Create a new file backend rooted at `base_dir`
    pub async fn new(base_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).await.map_err(StorageError::Io)?;
        Ok(Self {
            base_dir,
            write_guard: Mutex::new(()),
        })
    }

    fn path(&self, file: &str) -> PathBuf {
        self.base_dir.join(file)
    }

    /// Read a JSON collection, treating a missing file as empty
    async fn read_collection<T: DeserializeOwned>(&self, path: &Path) -> StorageResult<Vec<T>> {
        match fs::read_to_string(path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    /// Write a JSON collection atomically via a temp file rename
    async fn write_collection<T: Serialize>(&self, path: &Path, data: &[T]) -> StorageResult<()> {
        let content = serde_json::to_string_pretty(data)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).await.map_err(StorageError::Io)?;
        fs::rename(&tmp, path).await.map_err(StorageError::Io)?;
        Ok(())
    }
}

#[async_trait]
impl EventStore for FileBackend {
    async fn list(&self) -> StorageResult<Vec<SystemEvent>> {
        let mut events: Vec<SystemEvent> =
            self.read_collection(&self.path(EVENTS_FILE)).await?;
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(events)
    }

    async fn insert(&self, event: NewSystemEvent) -> StorageResult<SystemEvent> {
        let _guard = self.write_guard.lock().await;
        let path = self.path(EVENTS_FILE);
        let mut events: Vec<SystemEvent> = self.read_collection(&path).await?;
        let event = SystemEvent {
            id: Uuid::new_v4(),
            event_type: event.event_type,
            status: event.status,
            description: event.description,
            severity: event.severity,
            created_at: Utc::now(),
            resolved_at: None,
        };
        events.push(event.clone());
        self.write_collection(&path, &events).await?;
        Ok(event)
    }

    async fn resolve(&self, id: Uuid, resolved_at: DateTime<Utc>) -> StorageResult<()> {
        let _guard = self.write_guard.lock().await;
        let path = self.path(EVENTS_FILE);
        let mut events: Vec<SystemEvent> = self.read_collection(&path).await?;
        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StorageError::not_found(format!("event {id}")))?;
        event.status = EventStatus::Resolved;
        event.resolved_at = Some(resolved_at);
        self.write_collection(&path, &events).await
    }
}

#[async_trait]
impl LogStore for FileBackend {
    async fn clear(&self) -> StorageResult<()> {
        let _guard = self.write_guard.lock().await;
        self.write_collection::<LogEntry>(&self.path(LOGS_FILE), &[])
            .await
    }

    async fn append(&self, entry: NewLogEntry) -> StorageResult<LogEntry> {
        let _guard = self.write_guard.lock().await;
        let path = self.path(LOGS_FILE);
        let mut logs: Vec<LogEntry> = self.read_collection(&path).await?;
        let entry = LogEntry {
            id: Uuid::new_v4(),
            step_number: entry.step_number,
            component: entry.component,
            action: entry.action,
            details: entry.details,
            timestamp: Utc::now(),
        };
        logs.push(entry.clone());
        self.write_collection(&path, &logs).await?;
        Ok(entry)
    }

    async fn list(&self) -> StorageResult<Vec<LogEntry>> {
        let mut logs: Vec<LogEntry> = self.read_collection(&self.path(LOGS_FILE)).await?;
        logs.sort_by_key(|l| l.step_number);
        Ok(logs)
    }
}

#[async_trait]
impl PortalStorage for FileBackend {
    fn event_store(&self) -> &dyn EventStore {
        self
    }

    fn log_store(&self) -> &dyn LogStore {
        self
    }

    async fn health_check(&self) -> StorageResult<HealthStatus> {
        let healthy = fs::metadata(&self.base_dir).await.is_ok();
        Ok(HealthStatus {
            healthy,
            backend: "file".to_string(),
            checked_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn events_survive_reopen() {
        let dir = TempDir::new().unwrap();

        let backend = FileBackend::new(dir.path()).await.unwrap();
        let event = backend
            .insert(NewSystemEvent {
                event_type: "connectivity".to_string(),
                status: EventStatus::Active,
                description: "Connection to localhost down".to_string(),
                severity: "high".to_string(),
            })
            .await
            .unwrap();

        let reopened = FileBackend::new(dir.path()).await.unwrap();
        let events = EventStore::list(&reopened).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, event.id);
        assert_eq!(events[0].status, EventStatus::Active);
    }

    #[tokio::test]
    async fn logs_survive_reopen() {
        let dir = TempDir::new().unwrap();

        let backend = FileBackend::new(dir.path()).await.unwrap();
        for step in [2u32, 1] {
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

        let reopened = FileBackend::new(dir.path()).await.unwrap();
        let logs = LogStore::list(&reopened).await.unwrap();
        let steps: Vec<u32> = logs.iter().map(|l| l.step_number).collect();
        assert_eq!(steps, vec![1, 2]);
        assert_eq!(logs[0].details, "step 1");
    }

    #[tokio::test]
    async fn missing_files_read_as_empty() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path()).await.unwrap();
        assert!(EventStore::list(&backend).await.unwrap().is_empty());
        assert!(LogStore::list(&backend).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clear_empties_the_log_file() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path()).await.unwrap();

        backend
            .append(NewLogEntry {
                step_number: 1,
                component: "Sakram Core".to_string(),
                action: "Task Request Created".to_string(),
                details: "seed".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(LogStore::list(&backend).await.unwrap().len(), 1);

        backend.clear().await.unwrap();
        assert!(LogStore::list(&backend).await.unwrap().is_empty());
    }
}
