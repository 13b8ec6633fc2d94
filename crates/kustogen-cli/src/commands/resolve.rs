//! Resolve command - print the archive URL of a chart version

use kustogen_helm::GenerateError;
use kustogen_repo::{ChartResolver, HttpIndexFetcher};

use crate::error::Result;

pub fn run(registry: &str, chart: &str, version: &str) -> Result<()> {
    let fetcher = HttpIndexFetcher::new().map_err(GenerateError::from)?;
    let resolved = ChartResolver::new(fetcher)
        .resolve_entry(registry, chart, version)
        .map_err(GenerateError::from)?;

    tracing::debug!(
        app_version = %resolved.entry.app_version,
        api_version = %resolved.entry.api_version,
        "matched index entry"
    );

    println!("{}", resolved.url);
    Ok(())
}
