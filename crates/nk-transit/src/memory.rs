//! In-memory collaborators for offline runs and tests.

use crate::fetcher::{FetchedPage, PageFetcher};
use crate::notify::Notifier;
use anyhow::anyhow;
use async_trait::async_trait;
use nk_core::{NkError, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned pages keyed by request URL and records every request.
#[derive(Default)]
pub struct MemoryFetcher {
    pages: Mutex<HashMap<String, FetchedPage>>,
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`, reporting `effective_url` as where it came from.
    pub fn insert(&self, url: impl Into<String>, body: impl Into<Vec<u8>>, effective_url: impl Into<String>) {
        self.pages
            .lock()
            .unwrap()
            .insert(url.into(), FetchedPage::new(body, effective_url));
    }

    /// Serve `body` for `url` with no redirect.
    pub fn insert_page(&self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
        let url = url.into();
        self.insert(url.clone(), body, url);
    }

    pub fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl PageFetcher for MemoryFetcher {
    async fn fetch(&self, url: &str, params: &[(String, String)]) -> anyhow::Result<FetchedPage> {
        self.requests.lock().unwrap().push((url.to_string(), params.to_vec()));
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("no page for {}", url))
    }
}

/// Records notifications; can be told to fail.
#[derive(Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { sent: Mutex::new(Vec::new()), fail: true }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn notify(&self, message: &str, url: &str) -> Result<()> {
        if self.fail {
            return Err(NkError::NotificationFailed("webhook returned 500".into()));
        }
        self.sent.lock().unwrap().push((message.to_string(), url.to_string()));
        Ok(())
    }
}
