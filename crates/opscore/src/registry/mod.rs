//! JSON-file backed registry of trained model metadata.
//!
//! The registry is a flat map keyed by `{name}_{version}`, persisted as
//! pretty-printed JSON so it can be inspected and edited by hand. Every
//! mutation saves the whole file; the expected entry count is small.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("registry file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("registry file is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Descriptive fields supplied when registering a model version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub metrics: BTreeMap<String, Value>,
}

/// One registered model version as persisted in the registry file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    pub version: String,
    #[serde(flatten)]
    pub metadata: ModelMetadata,
    pub registered_at: DateTime<Utc>,
}

pub struct ModelRegistry {
    path: PathBuf,
    entries: BTreeMap<String, ModelEntry>,
}

impl ModelRegistry {
    /// Load the registry from `path`, starting empty when the file does not
    /// exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, entries })
    }

    /// Register a model version, overwriting any previous entry with the
    /// same name and version, and persist the registry.
    pub fn register(
        &mut self,
        name: &str,
        version: &str,
        metadata: ModelMetadata,
    ) -> Result<ModelEntry, RegistryError> {
        let entry = ModelEntry {
            name: name.to_string(),
            version: version.to_string(),
            metadata,
            registered_at: Utc::now(),
        };
        self.entries
            .insert(Self::key(name, version), entry.clone());
        self.save()?;
        Ok(entry)
    }

    pub fn get(&self, name: &str, version: &str) -> Option<&ModelEntry> {
        self.entries.get(&Self::key(name, version))
    }

    pub fn list(&self) -> Vec<&ModelEntry> {
        self.entries.values().collect()
    }

    fn key(name: &str, version: &str) -> String {
        format!("{name}_{version}")
    }

    fn save(&self) -> Result<(), RegistryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
