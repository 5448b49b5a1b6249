//! Best-effort page fetching through a public CORS-proxy passthrough.
//!
//! The enrichment layer treats every error from here as "no page data" and
//! keeps the URL-derived draft, so failures stay on the degraded path and
//! never reach the user as an error.

use crate::error::{Result, TrackerError};
use async_trait::async_trait;
use reqwest::blocking::Client;
use reqwest::Client as AsyncClient;
use std::time::Duration;
use url::Url;

/// Passthrough proxy job pages are fetched through. Override with
/// `BECANDIDATURE_PROXY` or [`ProxyFetcher::with_proxy`].
pub const DEFAULT_PROXY: &str = "https://api.allorigins.win/raw";

#[async_trait]
pub trait PageFetcher: Send + Sync {
    fn name(&self) -> &'static str;
    fn fetch_blocking(&self, url: &str) -> Result<String>;
    async fn fetch_async(&self, url: &str) -> Result<String>;
}

pub struct ProxyFetcher {
    proxy_base: String,
}

impl ProxyFetcher {
    pub fn new() -> Self {
        let proxy_base =
            std::env::var("BECANDIDATURE_PROXY").unwrap_or_else(|_| DEFAULT_PROXY.to_string());
        Self { proxy_base }
    }

    pub fn with_proxy(proxy_base: impl Into<String>) -> Self {
        Self {
            proxy_base: proxy_base.into(),
        }
    }

    /// Target goes to the proxy as a `url` query parameter.
    fn proxied(&self, target: &str) -> Result<String> {
        let u = Url::parse_with_params(&self.proxy_base, &[("url", target)])
            .map_err(|_| TrackerError::InvalidUrl(self.proxy_base.clone()))?;
        Ok(u.to_string())
    }

    fn build_client(&self) -> Result<Client> {
        Ok(Client::builder()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(Duration::from_secs(10))
            .build()?)
    }

    fn build_async_client(&self) -> Result<AsyncClient> {
        Ok(AsyncClient::builder()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(Duration::from_secs(10))
            .build()?)
    }
}

impl Default for ProxyFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for ProxyFetcher {
    fn name(&self) -> &'static str {
        "reqwest-proxy"
    }

    fn fetch_blocking(&self, url: &str) -> Result<String> {
        let client = self.build_client()?;
        let resp = client.get(self.proxied(url)?).send()?;
        let status = resp.status();
        let text = resp.text()?;
        if status.is_success() && !text.trim().is_empty() {
            return Ok(text);
        }
        Err(TrackerError::Fetch {
            url: url.to_string(),
            reason: format!("HTTP status {}", status),
        })
    }

    async fn fetch_async(&self, url: &str) -> Result<String> {
        let client = self.build_async_client()?;
        let resp = client.get(self.proxied(url)?).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if status.is_success() && !text.trim().is_empty() {
            return Ok(text);
        }
        Err(TrackerError::Fetch {
            url: url.to_string(),
            reason: format!("HTTP status {}", status),
        })
    }
}
