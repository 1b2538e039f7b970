//! Route search: query builder, one fetch, one parse.

use crate::fetcher::PageFetcher;
use chrono::{DateTime, FixedOffset};
use nk_core::config::TransitConfig;
use nk_core::{build_query, Itinerary, NkError, QueryInput, Result, SearchCriteria, SearchRequest};
use nk_parser::{ResultPageParser, RouteParser};
use std::sync::Arc;

pub struct RouteSearch {
    fetcher: Arc<dyn PageFetcher>,
    parser: Arc<dyn ResultPageParser>,
    search_url: String,
    walk_speed: u8,
}

impl RouteSearch {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &TransitConfig) -> Self {
        Self {
            fetcher,
            parser: Arc::new(RouteParser::new()),
            search_url: config.search_url.clone(),
            walk_speed: config.walk_speed,
        }
    }

    pub fn with_parser(mut self, parser: Arc<dyn ResultPageParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Build the query from raw criteria and run it.
    pub async fn search(&self, input: &QueryInput, now: DateTime<FixedOffset>) -> Result<Itinerary> {
        let (criteria, request) = build_query(input, self.walk_speed, now)?;
        self.run(criteria, &request).await
    }

    /// Run an already built request. The final URL becomes the itinerary's handle.
    pub async fn run(&self, criteria: SearchCriteria, request: &SearchRequest) -> Result<Itinerary> {
        let page = self
            .fetcher
            .fetch(&self.search_url, &request.query_params())
            .await
            .map_err(|e| NkError::UnparsablePage(format!("search fetch failed: {:#}", e)))?;

        let fragment = self.parser.parse_bytes(&page.body)?;
        tracing::info!(url = %page.url, transport = %fragment.transport, "search succeeded");
        Ok(Itinerary::from_fragment(fragment, criteria, page.url))
    }
}
