//! Adjacency navigation: the departure right before or after one already shown.

use crate::fetcher::PageFetcher;
use nk_core::config::TransitConfig;
use nk_core::{Direction, ItineraryFragment, NkError, Result};
use nk_parser::{ResultPageParser, RouteParser};
use reqwest::Url;
use std::sync::Arc;

pub struct AdjacencyNavigator {
    fetcher: Arc<dyn PageFetcher>,
    parser: Arc<dyn ResultPageParser>,
    base_url: String,
}

impl AdjacencyNavigator {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &TransitConfig) -> Self {
        Self {
            fetcher,
            parser: Arc::new(RouteParser::new()),
            base_url: config.base_url.clone(),
        }
    }

    pub fn with_parser(mut self, parser: Arc<dyn ResultPageParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Re-read the anchor page, follow its link for `direction`, parse the target.
    ///
    /// Returns the parsed fragment and the target's URL, which is the handle for
    /// the next hop. Two sequential fetches per call.
    pub async fn navigate(&self, source_url: &str, direction: Direction) -> Result<(ItineraryFragment, String)> {
        let no_result = |reason: String| NkError::NoAdjacentResult(reason);

        let anchor = self
            .fetcher
            .fetch(source_url, &[])
            .await
            .map_err(|e| no_result(format!("anchor fetch failed: {:#}", e)))?;

        let href = self
            .parser
            .adjacent_link(&anchor.text(), direction)
            .ok_or_else(|| no_result(format!("no `{}` link on {}", direction.link_class(), anchor.url)))?;
        let target_url = self.resolve(&href)?;
        tracing::debug!(?direction, %target_url, "following adjacent link");

        let target = self
            .fetcher
            .fetch(&target_url, &[])
            .await
            .map_err(|e| no_result(format!("target fetch failed: {:#}", e)))?;

        let fragment = self
            .parser
            .parse_bytes(&target.body)
            .map_err(|e| no_result(e.to_string()))?;
        Ok((fragment, target.url))
    }

    /// Resolve a site-relative href against the base origin.
    pub fn resolve(&self, href: &str) -> Result<String> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| NkError::NoAdjacentResult(format!("bad base url {}: {}", self.base_url, e)))?;
        base.join(href)
            .map(String::from)
            .map_err(|e| NkError::NoAdjacentResult(format!("bad link {}: {}", href, e)))
    }
}
