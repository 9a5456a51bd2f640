use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::model::Product;
use crate::domain::ports::CatalogProvider;
use crate::utils::error::Result;

/// Top-level catalog document: `{ "products": [...] }`.
/// A missing `products` key reads as an empty catalog.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    products: Vec<Product>,
}

/// Fetches the catalog document from an HTTP endpoint.
pub struct HttpCatalogProvider {
    client: Client,
    endpoint: String,
}

impl HttpCatalogProvider {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalogProvider {
    async fn load_catalog(&self) -> Result<Vec<Product>> {
        tracing::debug!("requesting catalog from {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        tracing::debug!("catalog response status: {}", response.status());
        let response = response.error_for_status()?;

        let document: CatalogDocument = response.json().await?;
        Ok(document.products)
    }
}

/// Reads the same catalog document from a local file.
pub struct FileCatalogProvider {
    path: PathBuf,
}

impl FileCatalogProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogProvider for FileCatalogProvider {
    async fn load_catalog(&self) -> Result<Vec<Product>> {
        let bytes = tokio::fs::read(&self.path).await?;
        let document: CatalogDocument = serde_json::from_slice(&bytes)?;
        Ok(document.products)
    }
}
