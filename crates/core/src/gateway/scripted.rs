//! Test gateway whose replies are queued up front, either ready or held back
//! behind a oneshot so tests decide when (and in which order) calls settle.

use crate::domain::{RatingEvent, Recommendation};
use crate::gateway::types::CatalogPage;
use crate::gateway::DataGateway;
use anyhow::Result;
use chrono::{TimeZone, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

pub(crate) type Reply<T> = std::result::Result<T, String>;

enum Queued<T> {
    Ready(Reply<T>),
    Deferred(oneshot::Receiver<Reply<T>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    CatalogPage { page: u32, page_size: u32 },
    ByTicker(String),
    Recommendations,
}

#[derive(Default)]
pub(crate) struct ScriptedGateway {
    catalog: Mutex<VecDeque<Queued<CatalogPage>>>,
    by_ticker: Mutex<VecDeque<Queued<Vec<RatingEvent>>>>,
    recommendations: Mutex<VecDeque<Queued<Vec<Recommendation>>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedGateway {
    pub(crate) fn reply_catalog(&self, reply: Reply<CatalogPage>) {
        push(&self.catalog, Queued::Ready(reply));
    }

    pub(crate) fn defer_catalog(&self) -> oneshot::Sender<Reply<CatalogPage>> {
        let (tx, rx) = oneshot::channel();
        push(&self.catalog, Queued::Deferred(rx));
        tx
    }

    pub(crate) fn reply_by_ticker(&self, reply: Reply<Vec<RatingEvent>>) {
        push(&self.by_ticker, Queued::Ready(reply));
    }

    pub(crate) fn defer_by_ticker(&self) -> oneshot::Sender<Reply<Vec<RatingEvent>>> {
        let (tx, rx) = oneshot::channel();
        push(&self.by_ticker, Queued::Deferred(rx));
        tx
    }

    pub(crate) fn reply_recommendations(&self, reply: Reply<Vec<Recommendation>>) {
        push(&self.recommendations, Queued::Ready(reply));
    }

    pub(crate) fn defer_recommendations(&self) -> oneshot::Sender<Reply<Vec<Recommendation>>> {
        let (tx, rx) = oneshot::channel();
        push(&self.recommendations, Queued::Deferred(rx));
        tx
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn push<T>(queue: &Mutex<VecDeque<Queued<T>>>, item: Queued<T>) {
    queue.lock().unwrap().push_back(item);
}

async fn next<T>(queue: &Mutex<VecDeque<Queued<T>>>, what: &str) -> Result<T> {
    let queued = queue.lock().unwrap().pop_front();
    let reply = match queued {
        Some(Queued::Ready(reply)) => reply,
        Some(Queued::Deferred(rx)) => rx
            .await
            .unwrap_or_else(|_| Err(format!("scripted {what} reply dropped"))),
        None => Err(format!("no scripted {what} reply")),
    };
    reply.map_err(anyhow::Error::msg)
}

#[async_trait::async_trait]
impl DataGateway for ScriptedGateway {
    fn gateway_name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch_catalog_page(&self, page: u32, page_size: u32) -> Result<CatalogPage> {
        self.record(Call::CatalogPage { page, page_size });
        next(&self.catalog, "catalog").await
    }

    async fn fetch_by_ticker(&self, ticker: &str) -> Result<Vec<RatingEvent>> {
        self.record(Call::ByTicker(ticker.to_string()));
        next(&self.by_ticker, "ticker").await
    }

    async fn fetch_recommendations(&self) -> Result<Vec<Recommendation>> {
        self.record(Call::Recommendations);
        next(&self.recommendations, "recommendations").await
    }
}

pub(crate) fn event(ticker: &str, n: u32) -> RatingEvent {
    RatingEvent {
        id: uuid::Uuid::new_v4(),
        ticker: ticker.to_string(),
        company: format!("{ticker} Holdings"),
        brokerage: "Morgan Stanley".to_string(),
        action: "upgraded by".to_string(),
        rating_from: "Hold".to_string(),
        rating_to: "Buy".to_string(),
        target_from: 100.0 + f64::from(n),
        target_to: 120.0 + f64::from(n),
        time: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
    }
}

pub(crate) fn catalog_page(page: u32, total_pages: u32, items: Vec<RatingEvent>) -> CatalogPage {
    CatalogPage {
        total_count: u64::from(total_pages) * 10,
        page_size: 10,
        page,
        total_pages,
        items,
    }
}

pub(crate) fn recommendation(ticker: &str, score: f64) -> Recommendation {
    Recommendation {
        event: event(ticker, 0),
        score,
        reason: "Stock was recently upgraded, Strong positive rating".to_string(),
    }
}
