//! Generator configuration
//!
//! The configuration file names the chart to render and how to render it:
//!
//! ```yaml
//! registry: https://charts.example.com
//! chart: nginx
//! version: 15.0.0
//! name: web
//! namespace: frontend
//! args:
//!   - --include-crds
//! values:
//!   replicaCount: 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoreError, Result};
use crate::values::Values;

/// Input of a single generator run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Base URL of the chart registry (the directory holding `index.yaml`)
    pub registry: String,

    /// Chart name as listed in the registry index
    pub chart: String,

    /// Exact chart version
    pub version: String,

    /// Release name passed to the engine
    pub name: String,

    /// Target namespace for the rendered resources
    pub namespace: String,

    /// Extra engine arguments, appended after the generated ones
    #[serde(default)]
    pub args: Vec<String>,

    /// Values handed to the engine
    #[serde(default)]
    pub values: Values,
}

impl GeneratorConfig {
    /// Load a config from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse a config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Reject configs with empty required fields
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("registry", &self.registry),
            ("chart", &self.chart),
            ("version", &self.version),
            ("name", &self.name),
            ("namespace", &self.namespace),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CoreError::MissingField {
                    field: field.to_string(),
                });
            }
        }

        Ok(())
    }
}
