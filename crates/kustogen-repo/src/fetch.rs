//! Index fetching
//!
//! `HttpIndexFetcher` performs a single blocking GET per call. No retry and no
//! timeout are applied; callers that need bounded latency must impose it.

use std::collections::HashMap;

use crate::error::{RepoError, Result};

/// Source of registry index documents
pub trait IndexFetcher: Send + Sync {
    /// Fetch the raw body at `url`
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP fetcher
#[derive(Debug, Clone)]
pub struct HttpIndexFetcher {
    client: reqwest::blocking::Client,
}

impl HttpIndexFetcher {
    /// Create a fetcher with a default client
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("kustogen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RepoError::NetworkError {
                url: String::new(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }

    /// Create a fetcher around an existing client
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl IndexFetcher for HttpIndexFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| RepoError::from_reqwest(url, e))?;

        let body = response
            .bytes()
            .map_err(|e| RepoError::from_reqwest(url, e))?;

        tracing::debug!(url, bytes = body.len(), "fetched registry index");
        Ok(body.to_vec())
    }
}

/// In-memory fetcher serving fixed bodies by URL
///
/// Unknown URLs answer with HTTP 404.
#[derive(Debug, Clone, Default)]
pub struct StaticIndexFetcher {
    bodies: HashMap<String, Vec<u8>>,
}

impl StaticIndexFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` at `url`
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }
}

impl IndexFetcher for StaticIndexFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| RepoError::HttpError {
                url: url.to_string(),
                status: 404,
            })
    }
}

impl<F: IndexFetcher + ?Sized> IndexFetcher for &F {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url)
    }
}

impl<F: IndexFetcher + ?Sized> IndexFetcher for Box<F> {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kustogen_core::ErrorKind;

    #[test]
    fn test_static_fetcher() {
        let fetcher = StaticIndexFetcher::new().with_body("https://repo.test/index.yaml", "entries: {}");
        assert_eq!(
            fetcher.fetch("https://repo.test/index.yaml").unwrap(),
            b"entries: {}"
        );

        let err = fetcher.fetch("https://other.test/index.yaml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(matches!(err, RepoError::HttpError { status: 404, .. }));
    }
}
