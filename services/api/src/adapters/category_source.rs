//! services/api/src/adapters/category_source.rs
//!
//! Concrete implementations of the `CategorySource` port. The category table
//! either ships with the deployment as a local file or is fetched from a
//! static URL; which one applies is decided once at startup from the
//! configuration.

use async_trait::async_trait;
use foodmatch_core::ports::{CategorySource, PortError, PortResult};
use std::path::PathBuf;

/// Reads the raw category table from a bundled file on disk.
pub struct FileCategorySource {
    path: PathBuf,
}

impl FileCategorySource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl CategorySource for FileCategorySource {
    async fn load_raw(&self) -> PortResult<String> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            PortError::Unexpected(format!("failed to read {}: {e}", self.path.display()))
        })
    }
}

/// Fetches the raw category table from a static URL.
pub struct HttpCategorySource {
    client: reqwest::Client,
    url: String,
}

impl HttpCategorySource {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl CategorySource for HttpCategorySource {
    async fn load_raw(&self) -> PortResult<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(format!("failed to fetch {}: {e}", self.url)))?;

        if !response.status().is_success() {
            return Err(PortError::Unexpected(format!(
                "fetching {} answered http status {}",
                self.url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| PortError::Unexpected(format!("failed to read body of {}: {e}", self.url)))
    }
}
