// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Admission Configuration Types
//
// Defines the configuration schema of an admission backend instance:
// - Kubernetes-style manifest format (apiVersion/kind/metadata/spec)
// - Storage backend selection (in-memory or PostgreSQL)
// - Proposition limits
// - Event bus and observability settings

use crate::domain::shared::repository::{PostgresConfig, StorageBackend};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const API_VERSION: &str = "admission/v1";
pub const KIND: &str = "AdmissionConfig";

/// Top-level Kubernetes-style admission configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionConfigManifest {
    /// API version (must be "admission/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "AdmissionConfig")
    pub kind: String,

    pub metadata: ManifestMetadata,

    pub spec: AdmissionConfigSpec,
}

/// Manifest metadata (Kubernetes-style)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// Human-readable instance name
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

/// Content under spec:
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdmissionConfigSpec {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub propositions: PropositionsConfig,

    #[serde(default)]
    pub event_bus: EventBusConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observability: Option<ObservabilityConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackendKind {
    InMemory,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: StorageBackendKind,

    /// Connection string, required for the postgres backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropositionsConfig {
    /// Maximum number of propositions a candidate may have in progress per context
    #[serde(default = "default_max_en_cours")]
    pub max_en_cours: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventBusConfig {
    /// Broadcast channel capacity
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "trace")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format ("json" or "text")
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_backend() -> StorageBackendKind {
    StorageBackendKind::InMemory
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    10
}

fn default_max_en_cours() -> usize {
    5
}

fn default_capacity() -> usize {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            database_url: None,
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
        }
    }
}

impl Default for PropositionsConfig {
    fn default() -> Self {
        Self {
            max_en_cours: default_max_en_cours(),
        }
    }
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for AdmissionConfigManifest {
    fn default() -> Self {
        let hostname = hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "admission".to_string());

        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ManifestMetadata {
                name: hostname,
                version: Some("1.0.0".to_string()),
                labels: None,
            },
            spec: AdmissionConfigSpec::default(),
        }
    }
}

impl AdmissionConfigManifest {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. ADMISSION_CONFIG_PATH environment variable
    /// 2. ./admission-config.yaml (working directory)
    /// 3. ~/.admission/config.yaml (user home)
    /// 4. /etc/admission/config.yaml (system)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("ADMISSION_CONFIG_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./admission-config.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".admission").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        let system_config = PathBuf::from("/etc/admission/config.yaml");
        if system_config.exists() {
            return Some(system_config);
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit CLI path fails if missing or invalid
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load config at {:?}: {}", path, e))?;
            config.apply_env_overrides();
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(config_path)?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::warn!("No configuration file found in standard locations. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("ADMISSION_DATABASE_URL") {
            tracing::info!("Environment override: ADMISSION_DATABASE_URL");
            self.spec.storage.database_url = Some(url);
        }

        if let Ok(val) = std::env::var("ADMISSION_STORAGE_BACKEND") {
            match val.to_lowercase().as_str() {
                "in_memory" | "memory" => {
                    self.spec.storage.backend = StorageBackendKind::InMemory
                }
                "postgres" | "postgresql" => {
                    self.spec.storage.backend = StorageBackendKind::Postgres
                }
                _ => {
                    tracing::warn!(
                        "Invalid value for ADMISSION_STORAGE_BACKEND: '{}'. \
                         Expected in_memory/postgres. Ignoring.",
                        val
                    );
                }
            }
        }

        if let Ok(val) = std::env::var("ADMISSION_MAX_PROPOSITIONS") {
            match val.parse::<usize>() {
                Ok(max) => {
                    tracing::info!("Environment override: ADMISSION_MAX_PROPOSITIONS={}", max);
                    self.spec.propositions.max_en_cours = max;
                }
                Err(_) => {
                    tracing::warn!(
                        "Invalid value for ADMISSION_MAX_PROPOSITIONS: '{}'. Ignoring.",
                        val
                    );
                }
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!("Invalid apiVersion: '{}'. Must be '{}'", self.api_version, API_VERSION);
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.metadata.name.is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        if self.spec.storage.backend == StorageBackendKind::Postgres
            && self.spec.storage.database_url.as_deref().unwrap_or("").is_empty()
        {
            anyhow::bail!("spec.storage.database_url is required for the postgres backend");
        }

        if self.spec.storage.max_connections == 0 {
            anyhow::bail!("spec.storage.max_connections must be at least 1");
        }

        if self.spec.propositions.max_en_cours == 0 {
            anyhow::bail!("spec.propositions.max_en_cours must be at least 1");
        }

        if self.spec.event_bus.capacity == 0 {
            anyhow::bail!("spec.event_bus.capacity must be at least 1");
        }

        if let Some(logging) = self.logging() {
            if !matches!(logging.format.as_str(), "json" | "text") {
                anyhow::bail!(
                    "Invalid logging format: '{}'. Must be 'json' or 'text'",
                    logging.format
                );
            }
        }

        Ok(())
    }

    pub fn logging(&self) -> Option<&LoggingConfig> {
        self.spec.observability.as_ref().and_then(|o| o.logging.as_ref())
    }

    /// Storage backend the repositories are built for.
    pub fn storage_backend(&self) -> StorageBackend {
        match self.spec.storage.backend {
            StorageBackendKind::InMemory => StorageBackend::InMemory,
            StorageBackendKind::Postgres => StorageBackend::PostgreSQL(PostgresConfig {
                connection_string: self.spec.storage.database_url.clone().unwrap_or_default(),
                max_connections: self.spec.storage.max_connections,
                acquire_timeout_secs: self.spec.storage.acquire_timeout_secs,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest() {
        let manifest = AdmissionConfigManifest::default();
        assert_eq!(manifest.api_version, "admission/v1");
        assert_eq!(manifest.kind, "AdmissionConfig");
        assert!(!manifest.metadata.name.is_empty());
        assert_eq!(manifest.spec.propositions.max_en_cours, 5);
        assert_eq!(manifest.spec.event_bus.capacity, 1000);
        assert!(matches!(manifest.storage_backend(), StorageBackend::InMemory));
    }

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let yaml = r#"
apiVersion: admission/v1
kind: AdmissionConfig
metadata:
  name: test
spec:
  storage:
    backend: postgres
    database_url: postgres://localhost/admission
"#;
        let manifest = AdmissionConfigManifest::from_yaml_str(yaml).unwrap();

        assert!(manifest.validate().is_ok());
        assert_eq!(manifest.spec.storage.max_connections, 5);
        match manifest.storage_backend() {
            StorageBackend::PostgreSQL(config) => {
                assert_eq!(config.connection_string, "postgres://localhost/admission");
            }
            StorageBackend::InMemory => panic!("expected postgres"),
        }
    }

    #[test]
    fn test_validation() {
        let mut manifest = AdmissionConfigManifest::default();
        assert!(manifest.validate().is_ok());

        manifest.kind = "NodeConfig".to_string();
        assert!(manifest.validate().is_err());
        manifest.kind = KIND.to_string();

        manifest.spec.storage.backend = StorageBackendKind::Postgres;
        assert!(manifest.validate().is_err());
        manifest.spec.storage.database_url = Some("postgres://db/admission".to_string());
        assert!(manifest.validate().is_ok());

        manifest.spec.observability = Some(ObservabilityConfig {
            logging: Some(LoggingConfig {
                level: "debug".to_string(),
                format: "xml".to_string(),
            }),
        });
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_yaml_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admission-config.yaml");
        let mut manifest = AdmissionConfigManifest::default();
        manifest.spec.propositions.max_en_cours = 2;

        manifest.to_yaml_file(&path).unwrap();
        let relu = AdmissionConfigManifest::from_yaml_file(&path).unwrap();

        assert_eq!(relu.spec.propositions.max_en_cours, 2);
    }
}
