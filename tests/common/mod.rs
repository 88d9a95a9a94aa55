//! Shared helpers for integration tests

use std::sync::Arc;
use std::time::Duration;

use sakram_portal::diagnostic::DiagnosticRunner;
use sakram_portal::notify::NotificationQueue;
use sakram_portal::storage::{
    EventStatus, MemoryBackend, NewSystemEvent, PortalStorage, SystemEvent,
};

/// A memory-backed runner with a drainable notification queue
pub fn test_runner(
    storage: Arc<dyn PortalStorage>,
) -> (DiagnosticRunner, Arc<NotificationQueue>) {
    let queue = Arc::new(NotificationQueue::new());
    let runner = DiagnosticRunner::new(storage, queue.clone(), Duration::from_millis(300));
    (runner, queue)
}

pub fn memory_storage() -> Arc<dyn PortalStorage> {
    Arc::new(MemoryBackend::new())
}

pub async fn seed_active_connectivity(storage: &dyn PortalStorage) -> SystemEvent {
    storage
        .event_store()
        .insert(NewSystemEvent {
            event_type: "connectivity".to_string(),
            status: EventStatus::Active,
            description: "Connection to localhost down".to_string(),
            severity: "high".to_string(),
        })
        .await
        .unwrap()
}
