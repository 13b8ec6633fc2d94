//! Kustomization assembly

use std::path::Path;

use kustogen_core::{CoreError, FileSystem, Kustomization};

/// Copies a rendered chart to its destination and builds the resource list
pub struct KustomizationBuilder<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> KustomizationBuilder<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Copy `rendered_root` into `destination` and return the kustomization
    ///
    /// `resources` are kept in the given order. The copy is not rolled back on
    /// failure.
    pub fn build(
        &self,
        namespace: &str,
        resources: Vec<String>,
        rendered_root: &Path,
        destination: &Path,
    ) -> Result<Kustomization, CoreError> {
        self.fs
            .copy_tree(rendered_root, destination)
            .map_err(|source| CoreError::Copy {
                from: rendered_root.to_path_buf(),
                to: destination.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            from = %rendered_root.display(),
            to = %destination.display(),
            "copied rendered chart"
        );

        Ok(Kustomization {
            namespace: namespace.to_string(),
            resources,
        })
    }
}
