use crate::config::DEFAULT_PAGE_SIZE;
use crate::domain::{BrowseMode, PageDescriptor, RatingEvent};
use crate::gateway::DataGateway;
use crate::store::failure_message;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

pub const FIRST_PAGE: u32 = 1;

const LOAD_FALLBACK: &str = "Failed to fetch stocks";
const SEARCH_FALLBACK: &str = "Failed to find stock";

/// Message shown when a ticker search succeeds with no rating events.
pub fn no_stocks_found_message(ticker: &str) -> String {
    format!("No stocks found for ticker: {ticker}")
}

/// What the catalog view currently shows.
///
/// `pagination` is only meaningful in listing mode; during a search it keeps
/// the last listing's values.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CatalogState {
    items: Vec<RatingEvent>,
    loading: bool,
    error: Option<String>,
    pagination: PageDescriptor,
    mode: BrowseMode,
}

impl CatalogState {
    pub fn items(&self) -> &[RatingEvent] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pagination(&self) -> &PageDescriptor {
        &self.pagination
    }

    pub fn mode(&self) -> &BrowseMode {
        &self.mode
    }

    /// Active search term, `""` in listing mode.
    pub fn search_ticker(&self) -> &str {
        self.mode.ticker()
    }

    fn begin(&mut self) {
        self.error = None;
        self.loading = true;
    }

    fn fail(&mut self, message: String) {
        self.items.clear();
        self.error = Some(message);
    }
}

struct Inner {
    gateway: Arc<dyn DataGateway>,
    page_size: u32,
    state: watch::Sender<CatalogState>,
}

/// Paginated listing and ticker search over the rating catalog.
#[derive(Clone)]
pub struct CatalogStore {
    inner: Arc<Inner>,
}

impl CatalogStore {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        Self::with_page_size(gateway, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(gateway: Arc<dyn DataGateway>, page_size: u32) -> Self {
        let initial = CatalogState {
            pagination: PageDescriptor {
                page_size,
                ..PageDescriptor::default()
            },
            ..CatalogState::default()
        };
        let (state, _) = watch::channel(initial);
        Self {
            inner: Arc::new(Inner {
                gateway,
                page_size,
                state,
            }),
        }
    }

    pub fn snapshot(&self) -> CatalogState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.inner.state.subscribe()
    }

    /// Fetches `page` of the full listing and switches to listing mode once
    /// the response settles.
    pub fn load_page(&self, page: u32) -> impl Future<Output = ()> + Send + 'static {
        self.inner.state.send_modify(CatalogState::begin);

        let inner = Arc::clone(&self.inner);
        async move {
            let page_size = inner.page_size;
            tracing::debug!(
                gateway = inner.gateway.gateway_name(),
                page,
                page_size,
                "catalog: loading page"
            );

            let res = inner.gateway.fetch_catalog_page(page, page_size).await;

            inner.state.send_modify(|state| {
                match res {
                    Ok(catalog_page) => {
                        state.pagination = PageDescriptor::from(&catalog_page);
                        state.items = catalog_page.items;
                        state.error = None;
                        tracing::debug!(
                            page = state.pagination.current_page,
                            total_pages = state.pagination.total_pages,
                            items = state.items.len(),
                            "catalog: page loaded"
                        );
                    }
                    Err(err) => {
                        tracing::warn!(page, error = %err, "catalog: page fetch failed");
                        state.fail(failure_message(&err, LOAD_FALLBACK));
                    }
                }
                state.mode = BrowseMode::Listing;
                state.loading = false;
            });
        }
    }

    /// Fetches every rating event for `ticker`. The store is in search mode
    /// as soon as this returns, before the request settles.
    pub fn search_by_ticker(&self, ticker: &str) -> impl Future<Output = ()> + Send + 'static {
        let ticker = ticker.to_string();
        self.inner.state.send_modify(|state| {
            state.begin();
            state.mode = BrowseMode::from_ticker(ticker.clone());
        });

        let inner = Arc::clone(&self.inner);
        async move {
            tracing::debug!(
                gateway = inner.gateway.gateway_name(),
                %ticker,
                "catalog: searching ticker"
            );

            let res = inner.gateway.fetch_by_ticker(&ticker).await;

            inner.state.send_modify(|state| {
                match res {
                    Ok(items) if items.is_empty() => {
                        tracing::info!(%ticker, "catalog: no stocks found");
                        state.items = items;
                        state.error = Some(no_stocks_found_message(&ticker));
                    }
                    Ok(items) => {
                        tracing::debug!(%ticker, items = items.len(), "catalog: search loaded");
                        state.items = items;
                        state.error = None;
                    }
                    Err(err) => {
                        tracing::warn!(%ticker, error = %err, "catalog: ticker search failed");
                        state.fail(failure_message(&err, SEARCH_FALLBACK));
                    }
                }
                state.mode = BrowseMode::from_ticker(ticker);
                state.loading = false;
            });
        }
    }

    /// Leaves search mode and reloads the first listing page, whatever page
    /// was shown before the search.
    pub fn clear_search(&self) -> impl Future<Output = ()> + Send + 'static {
        self.inner
            .state
            .send_modify(|state| state.mode = BrowseMode::Listing);
        self.load_page(FIRST_PAGE)
    }
}
