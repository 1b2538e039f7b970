//! Outbound notification of the last result.

use anyhow::Context;
use async_trait::async_trait;
use nk_core::config::NotifyConfig;
use nk_core::{NkError, Result};
use reqwest::{Client, StatusCode};
use std::sync::OnceLock;
use std::time::Duration;

static WEBHOOK_KEY: OnceLock<String> = OnceLock::new();

/// Install the webhook key. Only the first call has any effect.
pub fn init_webhook_key(key: impl Into<String>) -> bool {
    WEBHOOK_KEY.set(key.into()).is_ok()
}

/// The process-wide webhook key, read from `env_name` on first use.
pub fn webhook_key(env_name: &str) -> Option<&'static str> {
    if let Some(key) = WEBHOOK_KEY.get() {
        return Some(key.as_str());
    }
    let key = std::env::var(env_name).ok().filter(|k| !k.trim().is_empty())?;
    Some(WEBHOOK_KEY.get_or_init(|| key).as_str())
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `message` and the result's `url`. Anything but success is `NotificationFailed`.
    async fn notify(&self, message: &str, url: &str) -> Result<()>;
}

/// Posts `value1`/`value2` form fields to a trigger endpoint.
pub struct WebhookNotifier {
    http: Client,
    endpoint: String,
    key_env: String,
}

impl WebhookNotifier {
    pub fn new(config: &NotifyConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create webhook client")?;
        Ok(Self {
            http,
            endpoint: config.webhook_url.clone(),
            key_env: config.key_env.clone(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, message: &str, url: &str) -> Result<()> {
        let key = webhook_key(&self.key_env)
            .ok_or_else(|| NkError::NotificationFailed(format!("{} is not set", self.key_env)))?;
        let form = [("value1", message), ("value2", url)];

        let response = self
            .http
            .post(format!("{}{}", self.endpoint, key))
            .form(&form)
            .send()
            .await
            .map_err(|e| NkError::NotificationFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                tracing::info!("notification delivered");
                Ok(())
            }
            status => Err(NkError::NotificationFailed(format!("webhook returned {}", status))),
        }
    }
}
