//! Kustogen Repository Access
//!
//! Resolves a chart reference (registry, name, version) to the download URL
//! of its archive, using the registry's Helm-compatible `index.yaml`.
//!
//! ## Resolution rules
//!
//! - The index is fetched fresh from `<registry>/index.yaml` on every call
//! - Versions are matched by exact string equality, in index order
//! - The matched entry must list exactly one URL
//! - Relative URLs are joined onto the registry base with a single slash
//!
//! ## Example
//!
//! ```rust,no_run
//! use kustogen_repo::{ChartResolver, HttpIndexFetcher};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = ChartResolver::new(HttpIndexFetcher::new()?);
//! let url = resolver.resolve("https://charts.example.com", "nginx", "15.0.0")?;
//! println!("{url}");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod fetch;
pub mod index;
pub mod resolver;

// Re-exports for convenience
pub use error::{RepoError, Result};
pub use fetch::{HttpIndexFetcher, IndexFetcher, StaticIndexFetcher};
pub use index::{ChartEntry, RegistryIndex};
pub use resolver::{ChartResolver, ResolvedChart, index_url, join_registry_url};
