//! Registry index types
//!
//! Helm-compatible `index.yaml`, reduced to the fields needed to locate a
//! chart archive. Unknown fields are ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{RepoError, Result};

/// Registry index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryIndex {
    /// API version
    #[serde(default)]
    pub api_version: String,

    /// Chart versions by chart name, in index order
    #[serde(default)]
    pub entries: HashMap<String, Vec<ChartEntry>>,
}

impl RegistryIndex {
    /// Parse index from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| RepoError::IndexParseError {
            url: String::new(),
            message: e.to_string(),
        })
    }

    /// Parse index from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let yaml = std::str::from_utf8(bytes).map_err(|e| RepoError::IndexParseError {
            url: String::new(),
            message: format!("Invalid UTF-8: {}", e),
        })?;
        Self::from_yaml(yaml)
    }

    /// Get all versions of a chart
    pub fn get(&self, name: &str) -> Option<&[ChartEntry]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Get the first entry of a chart whose version is exactly `version`
    pub fn get_version(&self, name: &str, version: &str) -> Option<&ChartEntry> {
        self.entries
            .get(name)?
            .iter()
            .find(|e| e.version == version)
    }
}

/// Chart version entry in the index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartEntry {
    /// API version
    #[serde(default)]
    pub api_version: String,

    /// Application version
    #[serde(default)]
    pub app_version: String,

    /// Chart name
    #[serde(default)]
    pub name: String,

    /// Chart version
    #[serde(default)]
    pub version: String,

    /// URLs to download the chart archive
    #[serde(default)]
    pub urls: Vec<String>,
}
