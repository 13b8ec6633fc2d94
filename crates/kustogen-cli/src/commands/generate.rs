//! Generate command - render a chart and write its kustomization

use console::style;
use kustogen_core::GeneratorConfig;
use kustogen_core::kustomization::KUSTOMIZATION_FILE;
use kustogen_helm::HelmGenerator;
use std::fs;
use std::path::Path;

use crate::OutputFormat;
use crate::error::{CliError, Result};

pub fn run(
    config_path: &Path,
    output: &Path,
    helm: &str,
    format: OutputFormat,
    stdout: bool,
) -> Result<()> {
    let config = GeneratorConfig::from_file(config_path).map_err(|source| CliError::Config {
        path: config_path.display().to_string(),
        source,
    })?;

    tracing::debug!(
        registry = %config.registry,
        chart = %config.chart,
        version = %config.version,
        "loaded generator config"
    );

    let generator = HelmGenerator::system()?.with_executable(helm);
    let kustomization = generator.generate(&config, output)?;

    let document = match format {
        OutputFormat::Yaml => kustomization.to_yaml(),
        OutputFormat::Json => kustomization.to_json(),
    }
    .map_err(CliError::Serialize)?;

    if stdout {
        print!("{}", document);
        return Ok(());
    }

    let kustomization_path = output.join(KUSTOMIZATION_FILE);
    fs::write(&kustomization_path, document).map_err(|source| CliError::Io {
        path: kustomization_path.display().to_string(),
        source,
    })?;

    for resource in &kustomization.resources {
        println!(
            "{} {}",
            style("wrote").green(),
            output.join(resource).display()
        );
    }
    println!(
        "{} {}",
        style("wrote").green(),
        kustomization_path.display()
    );

    Ok(())
}
