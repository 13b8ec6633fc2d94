//! Chart URL resolution

use crate::error::{RepoError, Result};
use crate::fetch::IndexFetcher;
use crate::index::{ChartEntry, RegistryIndex};

/// A chart version located in a registry index
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedChart {
    /// Absolute download URL of the chart archive
    pub url: String,
    /// The matched index entry
    pub entry: ChartEntry,
}

/// Resolves chart references to download URLs
///
/// The index is fetched on every call; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct ChartResolver<F> {
    fetcher: F,
}

impl<F: IndexFetcher> ChartResolver<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Resolve a chart version to the absolute URL of its archive
    pub fn resolve(&self, registry: &str, chart: &str, version: &str) -> Result<String> {
        self.resolve_entry(registry, chart, version)
            .map(|resolved| resolved.url)
    }

    /// Resolve a chart version, returning the matched entry with the URL
    pub fn resolve_entry(&self, registry: &str, chart: &str, version: &str) -> Result<ResolvedChart> {
        let url = index_url(registry);
        tracing::debug!(%url, chart, version, "fetching registry index");

        let body = self.fetcher.fetch(&url)?;
        let index = RegistryIndex::from_bytes(&body).map_err(|e| match e {
            RepoError::IndexParseError { message, .. } => RepoError::IndexParseError {
                url: url.clone(),
                message,
            },
            other => other,
        })?;

        select_entry(&index, registry, chart, version)
    }
}

/// Pick the entry for `chart`/`version` from a parsed index and resolve its URL
fn select_entry(
    index: &RegistryIndex,
    registry: &str,
    chart: &str,
    version: &str,
) -> Result<ResolvedChart> {
    let versions = index.get(chart).ok_or_else(|| RepoError::ChartNotFound {
        chart: chart.to_string(),
    })?;

    let entry = versions
        .iter()
        .find(|e| e.version == version)
        .ok_or_else(|| RepoError::VersionNotFound {
            chart: chart.to_string(),
            version: version.to_string(),
            available: if versions.is_empty() {
                "none".to_string()
            } else {
                versions
                    .iter()
                    .map(|e| e.version.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            },
        })?;

    let url = match entry.urls.as_slice() {
        [] => {
            return Err(RepoError::UrlMissing {
                chart: chart.to_string(),
                version: version.to_string(),
            });
        }
        [url] => join_registry_url(registry, url),
        urls => {
            return Err(RepoError::AmbiguousUrl {
                chart: chart.to_string(),
                version: version.to_string(),
                urls: urls.to_vec(),
            });
        }
    };

    tracing::debug!(chart, version, %url, "resolved chart");

    Ok(ResolvedChart {
        url,
        entry: entry.clone(),
    })
}

/// URL of the index document of a registry
pub fn index_url(registry: &str) -> String {
    format!("{}/index.yaml", registry.trim_end_matches('/'))
}

/// Resolve a chart URL from the index against the registry base
///
/// Absolute `http://` and `https://` URLs are returned unchanged.
pub fn join_registry_url(registry: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!(
            "{}/{}",
            registry.trim_end_matches('/'),
            url.trim_start_matches('/')
        )
    }
}
