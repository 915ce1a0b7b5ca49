//! State containers mediating between View intents and the [`DataGateway`].
//!
//! Each store owns its state behind a `watch` channel: the store is the only
//! writer, Views read snapshots or subscribe for changes. Intent methods run
//! their synchronous prefix at call time and hand back a future that settles
//! the request; callers await it or pass it to `tokio::spawn`. Concurrent
//! intents are not fenced, so whichever settles last decides what is shown.
//!
//! [`DataGateway`]: crate::gateway::DataGateway

pub mod catalog;
pub mod recommendations;

pub use catalog::{CatalogState, CatalogStore};
pub use recommendations::{RecommendationState, RecommendationStore};

/// Human-readable message for a failed gateway call.
fn failure_message(err: &anyhow::Error, fallback: &str) -> String {
    let message = format!("{err:#}");
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
