use crate::config::Settings;
use crate::domain::{RatingEvent, Recommendation};
use crate::gateway::types::{CatalogPage, RecommendationsResponse};
use crate::gateway::DataGateway;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;

const API_KEY_HEADER: &str = "x-api-key";
// Response bodies end up in user-facing error state.
const BODY_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct HttpDataGateway {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpDataGateway {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_api_base_url()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .build()
            .context("failed to build stonks API http client")?;

        Ok(Self::with_client(http, base_url, settings.api_key.clone()))
    }

    pub fn with_client(http: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn url(&self, path: &str) -> String {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        format!("{}{}", self.base_url, path)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &self.api_key {
            headers.insert(
                API_KEY_HEADER,
                HeaderValue::from_str(api_key).context("API key is not a valid header value")?,
            );
        }
        Ok(headers)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(path);
        let headers = self.headers()?;

        tracing::debug!(%url, ?query, "stonks API request");

        let res = self
            .http
            .get(&url)
            .headers(headers)
            .query(query)
            .send()
            .await
            .with_context(|| format!("stonks API request to {url} failed"))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read stonks API response")?;

        if !status.is_success() {
            tracing::debug!(%url, %status, body = %text, "stonks API error response");
            anyhow::bail!("stonks API HTTP {status}: {}", excerpt(&text));
        }

        serde_json::from_str::<T>(&text).map_err(|err| {
            tracing::debug!(%url, body = %text, "undecodable stonks API response");
            anyhow::Error::new(err).context(format!(
                "unexpected stonks API response from {url}: {}",
                excerpt(&text)
            ))
        })
    }
}

fn excerpt(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= BODY_EXCERPT_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(BODY_EXCERPT_CHARS).collect();
    out.push_str("...");
    out
}

#[async_trait::async_trait]
impl DataGateway for HttpDataGateway {
    fn gateway_name(&self) -> &'static str {
        "stonks_http"
    }

    async fn fetch_catalog_page(&self, page: u32, page_size: u32) -> Result<CatalogPage> {
        self.get_json(
            "/stocks",
            &[("page", page.to_string()), ("page_size", page_size.to_string())],
        )
        .await
    }

    async fn fetch_by_ticker(&self, ticker: &str) -> Result<Vec<RatingEvent>> {
        let path = format!("/stock/{}", urlencoding::encode(ticker));
        self.get_json(&path, &[]).await
    }

    async fn fetch_recommendations(&self) -> Result<Vec<Recommendation>> {
        let res: RecommendationsResponse = self.get_json("/recommendations", &[]).await?;
        Ok(res.into_items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_settings_requires_base_url() {
        let err = HttpDataGateway::from_settings(&Settings::default()).unwrap_err();
        assert!(err.to_string().contains("STONKS_API_BASE_URL"));
    }

    #[test]
    fn url_normalizes_slashes() {
        let gw = HttpDataGateway::with_client(
            reqwest::Client::new(),
            "https://api.example.com/",
            None,
        );
        assert_eq!(gw.url("/stocks"), "https://api.example.com/stocks");
        assert_eq!(gw.url("recommendations"), "https://api.example.com/recommendations");
    }

    #[test]
    fn excerpt_keeps_short_bodies_and_cuts_long_ones() {
        assert_eq!(
            excerpt("  {\"error\":\"Invalid API key\"}\n"),
            "{\"error\":\"Invalid API key\"}"
        );

        let long = "é".repeat(BODY_EXCERPT_CHARS + 50);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), BODY_EXCERPT_CHARS + 3);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn api_key_header_only_when_configured() {
        let gw = HttpDataGateway::with_client(reqwest::Client::new(), "http://x", None);
        assert!(gw.headers().unwrap().is_empty());

        let gw = HttpDataGateway::with_client(
            reqwest::Client::new(),
            "http://x",
            Some("secret".to_string()),
        );
        let headers = gw.headers().unwrap();
        assert_eq!(headers.get("X-API-Key").unwrap(), "secret");
    }
}
