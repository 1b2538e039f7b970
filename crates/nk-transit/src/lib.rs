//! Transit site access: fetching result pages, following next/previous
//! links, and posting notifications.

pub mod fetcher;
pub mod memory;
pub mod navigator;
pub mod notify;
pub mod search;

pub use fetcher::{FetchedPage, HttpFetcher, PageFetcher};
pub use memory::{MemoryFetcher, MemoryNotifier};
pub use navigator::AdjacencyNavigator;
pub use notify::{Notifier, WebhookNotifier};
pub use search::RouteSearch;

#[cfg(test)]
mod tests;
