use crate::config::DEFAULT_PAGE_SIZE;
use crate::gateway::types::CatalogPage;
use serde::{Deserialize, Serialize};

/// Position of the listing within the full catalog.
///
/// Values are taken verbatim from the API; `current_page` is 1-based and
/// lies in `1..=total_pages` whenever `total_pages > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescriptor {
    pub total_count: u64,
    pub page_size: u32,
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for PageDescriptor {
    fn default() -> Self {
        Self {
            total_count: 0,
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
            total_pages: 0,
        }
    }
}

impl PageDescriptor {
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }
}

impl From<&CatalogPage> for PageDescriptor {
    fn from(page: &CatalogPage) -> Self {
        Self {
            total_count: page.total_count,
            page_size: page.page_size,
            current_page: page.page,
            total_pages: page.total_pages,
        }
    }
}

/// Which of the two mutually exclusive views the catalog store shows.
///
/// An empty ticker always means listing mode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "ticker", rename_all = "snake_case")]
pub enum BrowseMode {
    #[default]
    Listing,
    Search(String),
}

impl BrowseMode {
    pub fn from_ticker(ticker: impl Into<String>) -> Self {
        let ticker = ticker.into();
        if ticker.is_empty() {
            Self::Listing
        } else {
            Self::Search(ticker)
        }
    }

    /// The active search term, `""` in listing mode.
    pub fn ticker(&self) -> &str {
        match self {
            Self::Listing => "",
            Self::Search(ticker) => ticker,
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, Self::Search(_))
    }
}
