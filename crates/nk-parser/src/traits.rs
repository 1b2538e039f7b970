use nk_core::{Direction, ItineraryFragment, Result};

/// Trait for result page parsers.
pub trait ResultPageParser: Send + Sync {
    /// Extract the first itinerary on the page.
    fn parse_page(&self, content: &str) -> Result<ItineraryFragment>;

    /// Extract from raw bytes, replacing invalid UTF-8.
    fn parse_bytes(&self, content: &[u8]) -> Result<ItineraryFragment> {
        self.parse_page(&String::from_utf8_lossy(content))
    }

    /// Href of the link towards the adjacent departure.
    fn adjacent_link(&self, content: &str, direction: Direction) -> Option<String>;
}
