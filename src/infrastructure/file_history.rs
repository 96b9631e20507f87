//! Directory of `<product_id>.json` price histories

use crate::domain::price::{PriceHistorySource, ProductHistory};
use crate::shared::errors::HistoryError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct FileHistorySource {
    root: PathBuf,
}

impl FileHistorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn product_path(&self, product_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", product_id))
    }
}

/// Read and parse a JSON file
pub async fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, HistoryError> {
    let display = path.display().to_string();
    let content = tokio::fs::read_to_string(path).await.map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            HistoryError::NotFound(display.clone())
        } else {
            HistoryError::Io {
                path: display.clone(),
                source,
            }
        }
    })?;
    serde_json::from_str(&content).map_err(|source| HistoryError::Parse { path: display, source })
}

#[async_trait]
impl PriceHistorySource for FileHistorySource {
    async fn list_products(&self) -> Result<Vec<String>, HistoryError> {
        let io_err = |source: std::io::Error| HistoryError::Io {
            path: self.root.display().to_string(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.root).await.map_err(io_err)?;
        let mut products = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                products.push(stem.to_string());
            }
        }
        products.sort();

        debug!("Found {} product histories in {}", products.len(), self.root.display());
        Ok(products)
    }

    async fn load(&self, product_id: &str) -> Result<ProductHistory, HistoryError> {
        let path = self.product_path(product_id);
        match read_json_file(&path).await {
            Err(HistoryError::NotFound(_)) => Err(HistoryError::NotFound(product_id.to_string())),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HISTORY: &str = r#"{
        "product_id": "SKU-1",
        "current_price": 1299.0,
        "history": [
            { "product_id": "SKU-1", "date": "2024-07-01", "price": 999.0, "source": "web" },
            { "product_id": "SKU-1", "date": "2024-10-20", "price": 1499.0, "source": "web", "is_festive_period": true }
        ]
    }"#;

    #[tokio::test]
    async fn test_list_and_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("SKU-1.json"), HISTORY).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let source = FileHistorySource::new(dir.path());
        assert_eq!(source.list_products().await.unwrap(), vec!["SKU-1".to_string()]);

        let history = source.load("SKU-1").await.unwrap();
        assert_eq!(history.product_id, "SKU-1");
        assert_eq!(history.current_price, Some(1299.0));
        assert_eq!(history.history.len(), 2);
        assert!(history.history[1].is_festive());
    }

    #[tokio::test]
    async fn test_missing_product() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileHistorySource::new(dir.path());
        let err = source.load("SKU-404").await.unwrap_err();
        assert!(matches!(err, HistoryError::NotFound(id) if id == "SKU-404"));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("SKU-2.json"), "{ not json").unwrap();
        let source = FileHistorySource::new(dir.path());
        assert!(matches!(source.load("SKU-2").await, Err(HistoryError::Parse { .. })));
    }
}
