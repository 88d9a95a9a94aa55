//! Demo dataset
//!
//! The portal demonstrates the diagnostic workflow against a known
//! starting state: one active connectivity event the checklist can
//! resolve, plus a couple of background events for the dashboard lists.

use tracing::info;

use crate::storage::{EventStatus, NewSystemEvent, PortalStorage, StorageResult, SystemEvent};

/// Insert the demo events into `storage`, returning them newest first
pub async fn seed_demo_data(storage: &dyn PortalStorage) -> StorageResult<Vec<SystemEvent>> {
    let events = [
        NewSystemEvent {
            event_type: "audit".to_string(),
            status: EventStatus::Resolved,
            description: "Quarterly firewall rule audit completed".to_string(),
            severity: "low".to_string(),
        },
        NewSystemEvent {
            event_type: "intrusion".to_string(),
            status: EventStatus::Active,
            description: "Repeated failed login attempts from unknown host".to_string(),
            severity: "medium".to_string(),
        },
        NewSystemEvent {
            event_type: "connectivity".to_string(),
            status: EventStatus::Active,
            description: "Connection to localhost down".to_string(),
            severity: "high".to_string(),
        },
    ];

    for event in events {
        storage.event_store().insert(event).await?;
    }

    let seeded = storage.event_store().list().await?;
    info!("Seeded {} demo events", seeded.len());
    Ok(seeded)
}
