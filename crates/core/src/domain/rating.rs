use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One analyst rating action on a ticker, as published by the stonks API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEvent {
    pub id: Uuid,
    pub ticker: String,
    pub company: String,
    pub brokerage: String,
    pub action: String,
    pub rating_from: String,
    pub rating_to: String,
    pub target_from: f64,
    pub target_to: f64,
    pub time: DateTime<Utc>,
}
