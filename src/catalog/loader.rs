//! Catalog sources and load-once lifecycle

use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::models::DismantlingCatalog;
use crate::config::CatalogConfig;

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog endpoint returned status {0}")]
    Status(u16),

    #[error("Malformed catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A place the catalog can be loaded from
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable location, for logs
    fn describe(&self) -> String;

    async fn load(&self) -> Result<DismantlingCatalog, CatalogError>;
}

/// JSON file on the local filesystem
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    async fn load(&self) -> Result<DismantlingCatalog, CatalogError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        DismantlingCatalog::from_json(&text)
    }
}

/// JSON resource served over HTTP
pub struct HttpCatalogSource {
    client: Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn load(&self) -> Result<DismantlingCatalog, CatalogError> {
        debug!("Fetching dismantling catalog from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status().as_u16()));
        }

        let text = response.text().await?;
        DismantlingCatalog::from_json(&text)
    }
}

/// Catalog already held in memory
pub struct StaticCatalogSource {
    catalog: DismantlingCatalog,
}

impl StaticCatalogSource {
    pub fn new(catalog: DismantlingCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    fn describe(&self) -> String {
        "static".to_string()
    }

    async fn load(&self) -> Result<DismantlingCatalog, CatalogError> {
        Ok(self.catalog.clone())
    }
}

/// Pick a source from configuration: http(s) URLs are fetched, anything else is a path
pub fn source_from_config(config: &CatalogConfig) -> Result<Box<dyn CatalogSource>, CatalogError> {
    let source = config.source.trim();
    if source.starts_with("http://") || source.starts_with("https://") {
        Ok(Box::new(HttpCatalogSource::new(source, config.timeout())?))
    } else {
        Ok(Box::new(FileCatalogSource::new(source)))
    }
}

/// Load the catalog once; any failure yields an empty catalog so matching fails closed
pub async fn load_or_empty(source: &dyn CatalogSource) -> Arc<DismantlingCatalog> {
    match source.load().await {
        Ok(catalog) => {
            info!(
                "Loaded dismantling catalog from {}: {} categories, {} configured subcategories",
                source.describe(),
                catalog.category_count(),
                catalog.configured_count()
            );
            Arc::new(catalog)
        }
        Err(e) => {
            warn!(
                "Failed to load dismantling catalog from {}: {}; continuing with an empty catalog",
                source.describe(),
                e
            );
            Arc::new(DismantlingCatalog::empty())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::{Category, SubCategory};

    #[test]
    fn test_source_selection() {
        let mut config = CatalogConfig::default();
        assert!(source_from_config(&config).unwrap().describe().starts_with("file:"));

        config.source = "https://catalog.example.org/d3e.json".to_string();
        assert_eq!(
            source_from_config(&config).unwrap().describe(),
            "https://catalog.example.org/d3e.json"
        );
    }

    #[tokio::test]
    async fn test_static_source_round_trip() {
        let catalog = DismantlingCatalog::new(vec![Category {
            label: "Informatique".to_string(),
            subcategories: vec![SubCategory {
                label: "Serveurs".to_string(),
                dismantling_config: None,
            }],
        }]);
        let loaded = load_or_empty(&StaticCatalogSource::new(catalog.clone())).await;
        assert_eq!(*loaded, catalog);
    }

    #[tokio::test]
    async fn test_missing_file_fails_closed() {
        let source = FileCatalogSource::new("/nonexistent/d3e/catalog.json");
        assert!(matches!(source.load().await, Err(CatalogError::Io { .. })));

        let loaded = load_or_empty(&source).await;
        assert!(loaded.is_empty());
    }
}
