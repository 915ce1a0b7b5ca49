pub mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod scripted;

use crate::domain::{RatingEvent, Recommendation};
use crate::gateway::types::CatalogPage;
use anyhow::Result;

pub use http::HttpDataGateway;

/// Remote source behind both stores. Any error means the call failed;
/// an empty ticker search is a successful, empty result.
#[async_trait::async_trait]
pub trait DataGateway: Send + Sync {
    fn gateway_name(&self) -> &'static str;

    async fn fetch_catalog_page(&self, page: u32, page_size: u32) -> Result<CatalogPage>;

    async fn fetch_by_ticker(&self, ticker: &str) -> Result<Vec<RatingEvent>>;

    async fn fetch_recommendations(&self) -> Result<Vec<Recommendation>>;
}
