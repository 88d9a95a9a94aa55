//! Storage abstraction layer
//!
//! The portal treats its record store as an opaque append/query service:
//! system events and workflow log entries live behind the traits in
//! [`traits`], with in-memory and file-backed implementations selected
//! through [`config::StorageConfig`].

pub mod backends;
pub mod config;
pub mod error;
pub mod factory;
pub mod traits;
pub mod types;

pub use backends::{FileBackend, MemoryBackend};
pub use config::{BackendKind, StorageConfig};
pub use error::{StorageError, StorageResult};
pub use factory::create_storage;
pub use traits::{EventStore, LogStore, PortalStorage};
pub use types::{
    EventStatus, HealthStatus, LogEntry, NewLogEntry, NewSystemEvent, SystemEvent,
};
