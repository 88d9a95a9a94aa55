//! Backend construction from configuration

use std::sync::Arc;
use tracing::info;

use super::backends::{FileBackend, MemoryBackend};
use super::config::{BackendKind, StorageConfig};
use super::error::{StorageError, StorageResult};
use super::traits::PortalStorage;

/// Construct the storage backend described by `config`
pub async fn create_storage(config: &StorageConfig) -> StorageResult<Arc<dyn PortalStorage>> {
    match config.backend {
        BackendKind::Memory => {
            info!("Using in-memory storage backend");
            Ok(Arc::new(MemoryBackend::new()))
        }
        BackendKind::File => {
            let dir = config.data_dir().ok_or_else(|| {
                StorageError::configuration("No data directory available for file storage")
            })?;
            info!("Using file storage backend at {}", dir.display());
            Ok(Arc::new(FileBackend::new(dir).await?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_config_builds_memory_backend() {
        let storage = create_storage(&StorageConfig::default()).await.unwrap();
        let health = storage.health_check().await.unwrap();
        assert!(health.healthy);
        assert_eq!(health.backend, "memory");
    }

    #[tokio::test]
    async fn file_config_builds_file_backend() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = StorageConfig {
            backend: BackendKind::File,
            path: Some(dir.path().to_path_buf()),
        };
        let storage = create_storage(&config).await.unwrap();
        let health = storage.health_check().await.unwrap();
        assert!(health.healthy);
        assert_eq!(health.backend, "file");
    }
}
