use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NorikaeConfig {
    pub transit: TransitConfig,
    pub notify: NotifyConfig,
    pub server: ServerConfig,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitConfig {
    /// Origin that relative result links are resolved against.
    pub base_url: String,
    pub search_url: String,
    /// 1 (hurry) .. 4 (slowly).
    pub walk_speed: u8,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Trigger endpoint; the webhook key is appended.
    pub webhook_url: String,
    /// Environment variable holding the decrypted webhook key.
    pub key_env: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for NorikaeConfig {
    fn default() -> Self {
        Self {
            transit: TransitConfig::default(),
            notify: NotifyConfig::default(),
            server: ServerConfig::default(),
            log_level: "info".into(),
        }
    }
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            base_url: "https://transit.yahoo.co.jp".into(),
            search_url: "https://transit.yahoo.co.jp/search/result".into(),
            walk_speed: 2,
            timeout_secs: 10,
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            webhook_url: "https://maker.ifttt.com/trigger/yahoo_transit/with/key/".into(),
            key_env: "IFTTT_WEBHOOK_KEY".into(),
            timeout_secs: 10,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

impl NorikaeConfig {
    /// Load from the file named by `NORIKAE_CONFIG` (if any), then apply env overrides.
    pub fn load() -> crate::Result<Self> {
        let mut config = match std::env::var("NORIKAE_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("read config {}: {}", path.display(), e))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Apply `NORIKAE_*` overrides. Values that do not parse are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("NORIKAE_BASE_URL") {
            self.transit.base_url = v;
        }
        if let Some(v) = get("NORIKAE_SEARCH_URL") {
            self.transit.search_url = v;
        }
        if let Some(v) = get("NORIKAE_WALK_SPEED").and_then(|v| v.parse().ok()) {
            self.transit.walk_speed = v;
        }
        if let Some(v) = get("NORIKAE_FETCH_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.transit.timeout_secs = v;
        }
        if let Some(v) = get("NORIKAE_WEBHOOK_URL") {
            self.notify.webhook_url = v;
        }
        if let Some(v) = get("NORIKAE_WEBHOOK_KEY_ENV") {
            self.notify.key_env = v;
        }
        if let Some(v) = get("NORIKAE_HOST") {
            self.server.host = v;
        }
        if let Some(v) = get("NORIKAE_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = v;
        }
        if let Some(v) = get("NORIKAE_LOG_LEVEL") {
            self.log_level = v;
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
