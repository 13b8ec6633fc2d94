//! Helm generator pipeline

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use kustogen_core::{FileSystem, GeneratorConfig, Kustomization, LocalFs, ManifestFilter, collect};
use kustogen_repo::{ChartResolver, HttpIndexFetcher, IndexFetcher};

use crate::builder::KustomizationBuilder;
use crate::error::GenerateError;
use crate::process::{ProcessRunner, SystemRunner};
use crate::renderer::TemplateRenderer;

/// Generates a kustomization from a Helm chart
///
/// Every call to [`generate`](HelmGenerator::generate) is independent: the
/// index is fetched again and fresh temporary paths are used, so one
/// generator may serve concurrent calls from several threads.
pub struct HelmGenerator<F, R, S> {
    resolver: ChartResolver<F>,
    renderer: TemplateRenderer<R>,
    fs: S,
    filter: ManifestFilter,
}

impl HelmGenerator<HttpIndexFetcher, SystemRunner, LocalFs> {
    /// Generator using HTTP, the local `helm` binary and the local filesystem
    pub fn system() -> Result<Self, GenerateError> {
        Ok(Self::new(HttpIndexFetcher::new()?, SystemRunner, LocalFs))
    }
}

impl<F, R, S> HelmGenerator<F, R, S>
where
    F: IndexFetcher,
    R: ProcessRunner,
    S: FileSystem,
{
    pub fn new(fetcher: F, runner: R, fs: S) -> Self {
        Self {
            resolver: ChartResolver::new(fetcher),
            renderer: TemplateRenderer::new(runner),
            fs,
            filter: ManifestFilter::manifests(),
        }
    }

    /// Use a different engine executable name or path
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.renderer = self.renderer.with_executable(executable);
        self
    }

    /// Look the engine up in these directories instead of `PATH`
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.renderer = self.renderer.with_search_path(search_path);
        self
    }

    /// Create temporary files under this directory
    pub fn with_temp_root(mut self, temp_root: impl Into<PathBuf>) -> Self {
        self.renderer = self.renderer.with_temp_root(temp_root);
        self
    }

    /// Select rendered files with a custom filter
    pub fn with_filter(mut self, filter: ManifestFilter) -> Self {
        self.filter = filter;
        self
    }

    /// The chart resolver used by this generator
    pub fn resolver(&self) -> &ChartResolver<F> {
        &self.resolver
    }

    /// Render the configured chart into `destination` and list its manifests
    pub fn generate(
        &self,
        config: &GeneratorConfig,
        destination: &Path,
    ) -> Result<Kustomization, GenerateError> {
        config.validate().map_err(GenerateError::Config)?;

        let url = self
            .resolver
            .resolve(&config.registry, &config.chart, &config.version)?;

        let rendered = self.renderer.render(config, &url)?;
        let root = rendered.root();

        let resources = collect(&self.fs, &root, &self.filter).map_err(GenerateError::Collect)?;

        let kustomization = KustomizationBuilder::new(&self.fs)
            .build(&config.namespace, resources, &root, destination)
            .map_err(GenerateError::Copy)?;

        tracing::info!(
            chart = %config.chart,
            version = %config.version,
            resources = kustomization.resources.len(),
            destination = %destination.display(),
            "generated kustomization"
        );

        Ok(kustomization)
    }
}
