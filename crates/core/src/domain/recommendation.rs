use crate::domain::rating::RatingEvent;
use serde::{Deserialize, Serialize};

/// A rating event the API scored as a buy candidate. Scores are computed
/// server-side; the client only displays them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "stock")]
    pub event: RatingEvent,
    pub score: f64,
    pub reason: String,
}
