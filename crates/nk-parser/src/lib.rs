//! Result page parsing for transit searches.
//!
//! All knowledge of the result page markup lives in this crate. Callers hand
//! over raw page content and get back an [`ItineraryFragment`] or
//! `UnparsablePage`; nothing here performs I/O.

pub mod html;
pub mod route;
pub mod traits;

pub use route::RouteParser;
pub use traits::ResultPageParser;

use nk_core::{Direction, ItineraryFragment, Result};

/// Parse one result page with the default parser.
pub fn parse(content: &str) -> Result<ItineraryFragment> {
    RouteParser::new().parse_page(content)
}

/// Site-relative href of the next/previous result link, if the page has one.
pub fn find_adjacent_href(content: &str, direction: Direction) -> Option<String> {
    RouteParser::new().adjacent_link(content, direction)
}
