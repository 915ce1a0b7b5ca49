pub mod domain;
pub mod gateway;
pub mod store;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub api_base_url: Option<String>,
        pub api_key: Option<String>,
        pub http_timeout_secs: u64,
        pub page_size: u32,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                api_base_url: None,
                api_key: None,
                http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
                page_size: DEFAULT_PAGE_SIZE,
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        /// Builds settings from `lookup`; blank values count as unset.
        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

            let http_timeout_secs = match var("STONKS_HTTP_TIMEOUT_SECS") {
                Some(s) => s
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("invalid STONKS_HTTP_TIMEOUT_SECS: {s}"))?,
                None => DEFAULT_HTTP_TIMEOUT_SECS,
            };

            let page_size = match var("STONKS_PAGE_SIZE") {
                Some(s) => s
                    .trim()
                    .parse::<u32>()
                    .with_context(|| format!("invalid STONKS_PAGE_SIZE: {s}"))?,
                None => DEFAULT_PAGE_SIZE,
            };
            anyhow::ensure!(page_size >= 1, "STONKS_PAGE_SIZE must be >= 1");

            Ok(Self {
                api_base_url: var("STONKS_API_BASE_URL"),
                api_key: var("STONKS_API_KEY"),
                http_timeout_secs,
                page_size,
                sentry_dsn: var("SENTRY_DSN"),
            })
        }

        pub fn require_api_base_url(&self) -> anyhow::Result<&str> {
            self.api_base_url
                .as_deref()
                .context("STONKS_API_BASE_URL is required")
        }
    }

}
