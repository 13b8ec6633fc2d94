//! Kustomization output
//!
//! The resource list produced by a generator run. Resource paths keep the
//! order in which they were discovered and are relative to the directory the
//! rendered chart was copied into.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// API version written in serialized kustomizations
pub const KUSTOMIZE_API_VERSION: &str = "kustomize.config.k8s.io/v1beta1";

/// Kind written in serialized kustomizations
pub const KUSTOMIZATION_KIND: &str = "Kustomization";

/// Conventional file name for a serialized kustomization
pub const KUSTOMIZATION_FILE: &str = "kustomization.yaml";

/// Namespaced resource list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kustomization {
    /// Namespace applied to every resource
    pub namespace: String,

    /// Forward-slash paths relative to the destination root
    #[serde(default)]
    pub resources: Vec<String>,
}

/// On-disk document: the resource list plus the kustomize header
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Document<'a> {
    api_version: &'static str,
    kind: &'static str,
    #[serde(flatten)]
    kustomization: &'a Kustomization,
}

impl Kustomization {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            resources: Vec::new(),
        }
    }

    fn document(&self) -> Document<'_> {
        Document {
            api_version: KUSTOMIZE_API_VERSION,
            kind: KUSTOMIZATION_KIND,
            kustomization: self,
        }
    }

    /// Serialize as a kustomize YAML document
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.document()).map_err(|e| CoreError::Serialize {
            message: e.to_string(),
        })
    }

    /// Serialize as a pretty-printed JSON document
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.document()).map_err(|e| CoreError::Serialize {
            message: e.to_string(),
        })
    }
}
