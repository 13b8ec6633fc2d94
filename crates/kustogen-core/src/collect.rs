//! Manifest discovery
//!
//! Walks a rendered output tree and keeps the files accepted by a
//! [`ManifestFilter`]. Results are root-relative paths with forward-slash
//! separators, in the order the walk produced them.

use regex::Regex;
use std::path::Path;

use crate::error::{CoreError, Result};
use crate::fs::FileSystem;

/// Pattern matching YAML manifests
pub const MANIFEST_PATTERN: &str = r"\.ya?ml$";

/// Include/exclude rules for manifest discovery
///
/// A path is selected when it matches at least one include pattern and no
/// exclude pattern. Patterns are matched against the root-relative path.
#[derive(Debug, Clone)]
pub struct ManifestFilter {
    includes: Vec<Regex>,
    excludes: Vec<Regex>,
}

impl ManifestFilter {
    /// Compile include and exclude patterns
    pub fn new<I, E>(includes: I, excludes: E) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Ok(Self {
            includes: compile_all(includes)?,
            excludes: compile_all(excludes)?,
        })
    }

    /// Filter selecting `.yaml` and `.yml` files
    pub fn manifests() -> Self {
        Self {
            includes: vec![Regex::new(MANIFEST_PATTERN).expect("manifest pattern is valid")],
            excludes: Vec::new(),
        }
    }

    /// Check a root-relative path against the rules
    pub fn is_match(&self, path: &str) -> bool {
        self.includes.iter().any(|re| re.is_match(path))
            && !self.excludes.iter().any(|re| re.is_match(path))
    }
}

impl Default for ManifestFilter {
    fn default() -> Self {
        Self::manifests()
    }
}

fn compile_all<I>(patterns: I) -> Result<Vec<Regex>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|pattern| {
            let pattern = pattern.as_ref();
            Regex::new(pattern).map_err(|e| CoreError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
        })
        .collect()
}

/// Convert a path below `root` to a forward-slash relative path
///
/// Paths that are not valid UTF-8 have no faithful resource name and are skipped.
fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
    if parts.is_none() {
        tracing::warn!(path = %path.display(), "skipping file with non UTF-8 name");
    }
    parts.map(|parts| parts.join("/"))
}

/// Collect the files below `root` accepted by `filter`
///
/// Nothing is returned if the walk fails part-way.
pub fn collect(fs: &dyn FileSystem, root: &Path, filter: &ManifestFilter) -> Result<Vec<String>> {
    let files = fs.list_files(root).map_err(|source| CoreError::List {
        root: root.to_path_buf(),
        source,
    })?;

    let selected: Vec<String> = files
        .iter()
        .filter_map(|file| relative_slash_path(root, file))
        .filter(|relative| filter.is_match(relative))
        .collect();

    tracing::debug!(
        root = %root.display(),
        scanned = files.len(),
        selected = selected.len(),
        "collected manifests"
    );

    Ok(selected)
}
