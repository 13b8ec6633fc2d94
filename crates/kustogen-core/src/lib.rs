//! Kustogen Core - shared types for turning Helm charts into kustomizations
//!
//! This crate provides the pieces used by every stage of the generator:
//! - `GeneratorConfig`: The generator input (registry, chart, version, values, ...)
//! - `Values`: Schema-less values tree handed to the templating engine
//! - `Kustomization`: The namespaced resource list produced by a run
//! - `FileSystem`: Filesystem capability with local and in-memory implementations
//! - `collect`: Manifest discovery over a rendered output tree

pub mod collect;
pub mod config;
pub mod error;
pub mod fs;
pub mod kustomization;
pub mod values;

pub use collect::{ManifestFilter, collect};
pub use config::GeneratorConfig;
pub use error::{CoreError, ErrorKind, Result};
pub use fs::{FileSystem, LocalFs, MemoryFs};
pub use kustomization::Kustomization;
pub use values::Values;
