use crate::domain::Recommendation;
use crate::gateway::DataGateway;
use crate::store::failure_message;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

const LOAD_FALLBACK: &str = "Failed to fetch recommendations";

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RecommendationState {
    items: Vec<Recommendation>,
    loading: bool,
    error: Option<String>,
}

impl RecommendationState {
    pub fn items(&self) -> &[Recommendation] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

struct Inner {
    gateway: Arc<dyn DataGateway>,
    state: watch::Sender<RecommendationState>,
}

/// Current list of buy recommendations.
#[derive(Clone)]
pub struct RecommendationStore {
    inner: Arc<Inner>,
}

impl RecommendationStore {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        let (state, _) = watch::channel(RecommendationState::default());
        Self {
            inner: Arc::new(Inner { gateway, state }),
        }
    }

    pub fn snapshot(&self) -> RecommendationState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RecommendationState> {
        self.inner.state.subscribe()
    }

    /// Refreshes the list. A failed refresh keeps the previous items.
    pub fn load_recommendations(&self) -> impl Future<Output = ()> + Send + 'static {
        self.inner.state.send_modify(|state| {
            state.error = None;
            state.loading = true;
        });

        let inner = Arc::clone(&self.inner);
        async move {
            tracing::debug!(
                gateway = inner.gateway.gateway_name(),
                "recommendations: loading"
            );

            let res = inner.gateway.fetch_recommendations().await;

            inner.state.send_modify(|state| {
                match res {
                    Ok(items) => {
                        tracing::debug!(items = items.len(), "recommendations: loaded");
                        state.items = items;
                        state.error = None;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "recommendations: fetch failed");
                        state.error = Some(failure_message(&err, LOAD_FALLBACK));
                    }
                }
                state.loading = false;
            });
        }
    }
}
