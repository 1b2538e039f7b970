//! Application state shared across all handlers.

use chrono::{DateTime, Utc};
use nk_core::NorikaeConfig;
use nk_dialog::DialogController;
use nk_transit::{HttpFetcher, Notifier, PageFetcher, RouteSearch, WebhookNotifier};
use std::sync::Arc;

/// Shared application state.
///
/// Holds no conversation data: session state travels in each request.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<DialogController>,
    pub search: Arc<RouteSearch>,
    pub start_time: std::time::Instant,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn PageFetcher>, notifier: Arc<dyn Notifier>, config: &NorikaeConfig) -> Self {
        Self {
            controller: Arc::new(DialogController::new(fetcher.clone(), notifier, &config.transit)),
            search: Arc::new(RouteSearch::new(fetcher, &config.transit)),
            start_time: std::time::Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// State wired to the live transit site and webhook.
    pub fn from_config(config: &NorikaeConfig) -> anyhow::Result<Self> {
        let fetcher = Arc::new(HttpFetcher::from_config(&config.transit)?);
        let notifier = Arc::new(WebhookNotifier::new(&config.notify)?);
        Ok(Self::new(fetcher, notifier, config))
    }
}
