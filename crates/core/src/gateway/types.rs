use crate::domain::{RatingEvent, Recommendation};
use serde::{Deserialize, Serialize};

/// One page of the catalog listing, as served by `GET /stocks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    #[serde(rename = "stocks")]
    pub items: Vec<RatingEvent>,
    pub total_count: u64,
    pub page_size: u32,
    pub page: u32,
    pub total_pages: u32,
}

/// `GET /recommendations` answers with a bare array, or with a
/// `{"message": ...}` object when nothing qualifies.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecommendationsResponse {
    List(Vec<Recommendation>),
    Empty { message: String },
}

impl RecommendationsResponse {
    pub fn into_items(self) -> Vec<Recommendation> {
        match self {
            Self::List(items) => items,
            Self::Empty { message } => {
                tracing::debug!(%message, "recommendations endpoint returned no items");
                Vec::new()
            }
        }
    }
}
