//! Price history source interface

use super::ProductHistory;
use crate::shared::errors::HistoryError;
use async_trait::async_trait;

/// Where product price histories come from
#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    async fn list_products(&self) -> Result<Vec<String>, HistoryError>;
    async fn load(&self, product_id: &str) -> Result<ProductHistory, HistoryError>;
}
