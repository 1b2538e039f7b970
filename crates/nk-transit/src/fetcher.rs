use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use nk_core::config::TransitConfig;
use reqwest::Client;
use std::time::Duration;

/// A fetched page and the URL it was finally served from.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub body: Vec<u8>,
    pub url: String,
}

impl FetchedPage {
    pub fn new(body: impl Into<Vec<u8>>, url: impl Into<String>) -> Self {
        Self { body: body.into(), url: url.into() }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Fetch collaborator. One attempt per call; callers decide what a failure means.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, params: &[(String, String)]) -> Result<FetchedPage>;
}

/// HTTP fetcher with a bounded timeout and no retries.
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("norikae/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { http })
    }

    pub fn from_config(config: &TransitConfig) -> Result<Self> {
        Self::new(Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, params: &[(String, String)]) -> Result<FetchedPage> {
        let mut request = self.http.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("fetch {} returned {}", url, status));
        }

        let effective_url = response.url().to_string();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read body of {}", effective_url))?;

        tracing::debug!(url = %effective_url, bytes = body.len(), "fetched page");
        Ok(FetchedPage::new(body.to_vec(), effective_url))
    }
}
