//! Kustogen Helm - render a chart and turn the output into a kustomization
//!
//! The pipeline runs four stages in sequence, each aborting the run on failure:
//!
//! 1. `ChartResolver` finds the chart archive URL in the registry index
//! 2. `TemplateRenderer` runs `helm template` into a temporary directory
//! 3. `collect` picks the rendered manifests
//! 4. `KustomizationBuilder` copies the rendered tree and returns the resource list
//!
//! `HelmGenerator` wires the stages together. Temporary files and directories
//! are removed on every exit path.

pub mod builder;
pub mod error;
pub mod generator;
pub mod process;
pub mod renderer;

pub use builder::KustomizationBuilder;
pub use error::{GenerateError, RenderError};
pub use generator::HelmGenerator;
pub use process::{FnRunner, ProcessOutput, ProcessRunner, SystemRunner, find_executable};
pub use renderer::{DEFAULT_EXECUTABLE, RenderedChart, TemplateRenderer};
