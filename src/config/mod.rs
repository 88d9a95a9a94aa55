//! Portal configuration
//!
//! Loaded from a TOML file (`sakram.toml` next to the working directory,
//! or the platform config dir), then overridden by `SAKRAM_*`
//! environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

use crate::diagnostic::DEFAULT_STEP_DELAY;
use crate::error::{Error, Result};
use crate::storage::StorageConfig;

/// HTTP server section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Diagnostics section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Pacing delay between checklist steps, e.g. "300ms"
    #[serde(default = "default_step_delay", with = "humantime_serde")]
    pub step_delay: Duration,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            step_delay: default_step_delay(),
        }
    }
}

fn default_step_delay() -> Duration {
    DEFAULT_STEP_DELAY
}

/// Top-level portal configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PortalConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl PortalConfig {
    /// Load configuration: explicit path, else the first existing default
    /// location, else built-in defaults. Environment overrides apply last.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path).await?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path).await?,
                None => Self::default(),
            },
        };
        config.merge_env_vars(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    async fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path).await?;
        Ok(toml::from_str(&content)?)
    }

    /// First existing candidate among `./sakram.toml` and the platform
    /// config dir
    fn default_path() -> Option<PathBuf> {
        let local = PathBuf::from("sakram.toml");
        if local.exists() {
            return Some(local);
        }
        dirs::config_dir().map(|d| d.join("sakram").join("sakram.toml"))
    }

    /// Apply `SAKRAM_*` overrides. The lookup is injected so tests do not
    /// touch the process environment.
    pub fn merge_env_vars(&mut self, get: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(port) = get("SAKRAM_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| Error::Config(format!("Invalid SAKRAM_PORT: {port}")))?;
        }
        if let Some(path) = get("SAKRAM_STORAGE_PATH") {
            self.storage.backend = crate::storage::BackendKind::File;
            self.storage.path = Some(PathBuf::from(path));
        }
        if let Some(delay) = get("SAKRAM_STEP_DELAY") {
            self.diagnostics.step_delay = humantime::parse_duration(&delay)
                .map_err(|e| Error::Config(format!("Invalid SAKRAM_STEP_DELAY: {e}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::BackendKind;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_sensible() {
        let config = PortalConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, BackendKind::Memory);
        assert_eq!(config.diagnostics.step_delay, Duration::from_millis(300));
    }

    #[tokio::test]
    async fn loads_toml_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sakram.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9090

[storage]
backend = "file"
path = "/tmp/sakram-data"

[diagnostics]
step_delay = "50ms"
"#,
        )
        .unwrap();

        let config = PortalConfig::load(Some(&path)).await.unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.storage.backend, BackendKind::File);
        assert_eq!(config.diagnostics.step_delay, Duration::from_millis(50));
    }

    #[test]
    fn env_vars_override_file_values() {
        let mut vars = HashMap::new();
        vars.insert("SAKRAM_PORT".to_string(), "3000".to_string());
        vars.insert("SAKRAM_STEP_DELAY".to_string(), "10ms".to_string());

        let mut config = PortalConfig::default();
        config.merge_env_vars(|key| vars.get(key).cloned()).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.diagnostics.step_delay, Duration::from_millis(10));
    }

    #[test]
    fn invalid_port_override_is_a_config_error() {
        let mut config = PortalConfig::default();
        let err = config
            .merge_env_vars(|key| (key == "SAKRAM_PORT").then(|| "not-a-port".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
