//! Values handed to the templating engine
//!
//! Values are schema-less: any YAML mapping, sequence or scalar (including
//! tagged nodes) is accepted and re-emitted as-is when the values file is
//! written for the engine.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value as YamlValue};
use std::path::Path;

use crate::error::Result;

/// Values container backed by a generic YAML tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values(pub YamlValue);

impl Default for Values {
    fn default() -> Self {
        Self::new()
    }
}

impl Values {
    /// Create empty values
    pub fn new() -> Self {
        Self(YamlValue::Mapping(Mapping::new()))
    }

    /// Load values from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse values from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: YamlValue = serde_yaml::from_str(yaml)?;
        Ok(Self(value))
    }

    /// Serialize to the YAML document written for the engine
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.0)?)
    }

    /// Get a value by dotted path (e.g., "image.tag")
    pub fn get(&self, path: &str) -> Option<&YamlValue> {
        path.split('.').try_fold(&self.0, |current, key| current.get(key))
    }

    /// Get the inner YAML value
    pub fn inner(&self) -> &YamlValue {
        &self.0
    }

    /// Convert to YAML value
    pub fn into_inner(self) -> YamlValue {
        self.0
    }

    /// Check if values are empty
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            YamlValue::Mapping(map) => map.is_empty(),
            YamlValue::Null => true,
            _ => false,
        }
    }
}

impl From<YamlValue> for Values {
    fn from(value: YamlValue) -> Self {
        Self(value)
    }
}
