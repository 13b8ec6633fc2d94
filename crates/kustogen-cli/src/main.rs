//! Kustogen CLI - render Helm charts into kustomize-ready directories

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod exit_codes;

#[derive(Parser)]
#[command(name = "kustogen")]
#[command(version)]
#[command(about = "Render Helm charts into kustomize-ready resource directories", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log pipeline progress
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

/// Serialization format of the kustomization
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a chart into a directory and write its kustomization
    Generate {
        /// Generator config file
        #[arg(
            short,
            long,
            env = "KUSTOGEN_CONFIG",
            default_value = "kustomization-generator.yaml"
        )]
        config: PathBuf,

        /// Destination directory for the rendered manifests
        #[arg(short, long)]
        output: PathBuf,

        /// Helm executable name or path
        #[arg(long, env = "KUSTOGEN_HELM", default_value = "helm")]
        helm: String,

        /// Kustomization format
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,

        /// Print the kustomization instead of writing kustomization.yaml
        #[arg(long)]
        stdout: bool,
    },

    /// Print the download URL of a chart version
    Resolve {
        /// Registry base URL
        registry: String,

        /// Chart name
        chart: String,

        /// Exact chart version
        #[arg(value_name = "VERSION")]
        chart_version: String,
    },
}

fn init_logging(verbose: bool, debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if debug {
            "kustogen=debug"
        } else if verbose {
            "kustogen=info"
        } else {
            "kustogen=warn"
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    let result = match cli.command {
        Commands::Generate {
            config,
            output,
            helm,
            format,
            stdout,
        } => commands::generate::run(&config, &output, &helm, format, stdout),

        Commands::Resolve {
            registry,
            chart,
            chart_version,
        } => commands::resolve::run(&registry, &chart, &chart_version),
    };

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(code as u8)
        }
    }
}
