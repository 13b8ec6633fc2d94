//! Chart rendering through `helm template`

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use kustogen_core::GeneratorConfig;
use tempfile::{Builder, NamedTempFile, TempDir};

use crate::error::RenderError;
use crate::process::{ProcessRunner, display_command, find_executable};

/// Engine executable looked up when none is configured
pub const DEFAULT_EXECUTABLE: &str = "helm";

const TEMP_PREFIX: &str = ".kustomization-generator-";

/// Rendered chart output
///
/// Owns the temporary output directory; it is deleted when this is dropped.
#[derive(Debug)]
pub struct RenderedChart {
    dir: TempDir,
    chart: String,
}

impl RenderedChart {
    /// Directory passed to the engine as `--output-dir`
    pub fn output_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Root of the rendered chart (`<output-dir>/<chart>`)
    pub fn root(&self) -> PathBuf {
        self.dir.path().join(&self.chart)
    }
}

/// Renders charts with an external templating engine
#[derive(Debug, Clone)]
pub struct TemplateRenderer<R> {
    runner: R,
    executable: String,
    search_path: Option<OsString>,
    temp_root: Option<PathBuf>,
}

impl<R: ProcessRunner> TemplateRenderer<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            executable: DEFAULT_EXECUTABLE.to_string(),
            search_path: None,
            temp_root: None,
        }
    }

    /// Use a different engine executable name or path
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Look the executable up in these directories instead of `PATH`
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    /// Create temporary files under this directory instead of the system default
    pub fn with_temp_root(mut self, temp_root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(temp_root.into());
        self
    }

    fn temp_builder(&self) -> Builder<'static, 'static> {
        let mut builder = Builder::new();
        builder.prefix(TEMP_PREFIX);
        builder
    }

    fn write_values(&self, config: &GeneratorConfig) -> Result<NamedTempFile, RenderError> {
        let values_error = |message: String| RenderError::ValuesFile { message };

        let yaml = config
            .values
            .to_yaml()
            .map_err(|e| values_error(e.to_string()))?;

        let mut builder = self.temp_builder();
        builder.suffix("-values.yaml");
        let created = match &self.temp_root {
            Some(root) => builder.tempfile_in(root),
            None => builder.tempfile(),
        };
        let mut file = created.map_err(|e| values_error(e.to_string()))?;

        file.write_all(yaml.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| values_error(e.to_string()))?;

        Ok(file)
    }

    fn create_output_dir(&self) -> Result<TempDir, RenderError> {
        let builder = self.temp_builder();
        let created = match &self.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        };
        created.map_err(|e| RenderError::OutputDir {
            message: e.to_string(),
        })
    }

    /// Render `config.chart` from `chart_url` into a fresh temporary directory
    ///
    /// The values file only lives for the duration of this call; the output
    /// directory lives as long as the returned [`RenderedChart`].
    pub fn render(&self, config: &GeneratorConfig, chart_url: &str) -> Result<RenderedChart, RenderError> {
        let values_file = self.write_values(config)?;
        let output_dir = self.create_output_dir()?;

        let program = find_executable(&self.executable, self.search_path.as_deref()).ok_or_else(
            || RenderError::ExecutableNotFound {
                name: self.executable.clone(),
            },
        )?;

        let args = template_args(config, chart_url, output_dir.path(), values_file.path());
        tracing::debug!(command = %display_command(&program, &args), "running template engine");

        let result = self
            .runner
            .run(&program, &args)
            .map_err(|source| RenderError::Spawn {
                program: program.display().to_string(),
                source,
            })?;

        if !result.success {
            return Err(RenderError::Failed {
                program: program.display().to_string(),
                code: result.code,
                output: result.output_lossy(),
            });
        }

        tracing::info!(chart = %config.chart, release = %config.name, "rendered chart");

        Ok(RenderedChart {
            dir: output_dir,
            chart: config.chart.clone(),
        })
    }
}

/// Engine arguments; the caller's extra arguments always come last
fn template_args(
    config: &GeneratorConfig,
    chart_url: &str,
    output_dir: &Path,
    values_file: &Path,
) -> Vec<String> {
    let mut args = vec![
        "template".to_string(),
        config.name.clone(),
        chart_url.to_string(),
        "--namespace".to_string(),
        config.namespace.clone(),
        "--output-dir".to_string(),
        output_dir.to_string_lossy().into_owned(),
        "--values".to_string(),
        values_file.to_string_lossy().into_owned(),
    ];
    args.extend(config.args.iter().cloned());
    args
}
