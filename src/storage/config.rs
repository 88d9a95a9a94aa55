//! Storage backend configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which backend to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Memory,
    File,
}

/// Storage section of the portal configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Backend selection, `memory` by default
    #[serde(default)]
    pub backend: BackendKind,

    /// Data directory for the file backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the data directory for the file backend, falling back to
    /// a `sakram` folder under the platform data dir.
    pub fn data_dir(&self) -> Option<PathBuf> {
        match &self.path {
            Some(path) => Some(path.clone()),
            None => dirs::data_dir().map(|d| d.join("sakram")),
        }
    }
}
