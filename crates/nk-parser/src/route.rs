//! Route result parser.

use crate::html::{self, Element};
use crate::traits::ResultPageParser;
use nk_core::{Direction, ItineraryFragment, NkError, Result};
use regex::Regex;
use std::sync::LazyLock;

static LEG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(?:train|bus)\]").expect("valid leg pattern"));
static CLOCK_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}").expect("valid time pattern"));
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid digit pattern"));

/// Class names of the regions the parser reads.
#[derive(Debug, Clone)]
pub struct RouteClasses {
    pub route_detail: String,
    pub time: String,
    pub distance: String,
    pub fare: String,
    pub transfer: String,
}

impl Default for RouteClasses {
    fn default() -> Self {
        Self {
            route_detail: "routeDetail".into(),
            time: "time".into(),
            distance: "distance".into(),
            fare: "fare".into(),
            transfer: "transfer".into(),
        }
    }
}

/// Parser for the first route on a search result page.
///
/// Any missing field fails the whole page. A guessed value would end up
/// spoken to the user as if it were real.
pub struct RouteParser {
    pub classes: RouteClasses,
}

impl RouteParser {
    pub fn new() -> Self {
        Self { classes: RouteClasses::default() }
    }

    pub fn with_classes(classes: RouteClasses) -> Self {
        Self { classes }
    }

    fn required<'a>(&self, content: &'a str, class: &str) -> Result<Element<'a>> {
        html::find_by_class(content, class)
            .ok_or_else(|| NkError::UnparsablePage(format!("missing `{}` region", class)))
    }

    fn required_text(&self, content: &str, class: &str) -> Result<String> {
        let text = self.required(content, class)?.text();
        let text = text.trim();
        if text.is_empty() {
            return Err(NkError::UnparsablePage(format!("empty `{}` region", class)));
        }
        Ok(text.to_string())
    }

    /// Transfer count: the first run of digits in the transfer summary.
    fn transfer_count(&self, content: &str) -> Result<u32> {
        let text = self.required(content, &self.classes.transfer)?.text();
        DIGITS
            .find(&text)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| NkError::UnparsablePage(format!("no transfer count in `{}`", text.trim())))
    }

    /// Name of the first train or bus leg, taken after its `[train]`/`[bus]` tag.
    fn transport(&self, detail: &Element<'_>) -> Result<String> {
        detail
            .text()
            .lines()
            .map(str::trim)
            .find(|line| LEG_TAG.is_match(line))
            .and_then(|line| line.split(']').nth(1))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .ok_or_else(|| NkError::UnparsablePage("no train or bus leg in route detail".into()))
    }

    /// First and last recorded times in the route detail.
    fn times(&self, detail: &Element<'_>) -> Result<(String, String)> {
        let times: Vec<String> = html::find_all_by_class(detail.inner, &self.classes.time)
            .iter()
            .filter_map(clock_time)
            .collect();
        match (times.first(), times.last()) {
            (Some(start), Some(arrival)) => Ok((start.clone(), arrival.clone())),
            _ => Err(NkError::UnparsablePage("no recorded time in route detail".into())),
        }
    }
}

/// `HH:MM` from a time cell, preferring its first list item.
fn clock_time(cell: &Element<'_>) -> Option<String> {
    let text = cell.first_child("li").map(|li| li.text()).unwrap_or_else(|| cell.text());
    CLOCK_TIME.find(&text).map(|m| m.as_str().to_string())
}

impl ResultPageParser for RouteParser {
    fn parse_page(&self, content: &str) -> Result<ItineraryFragment> {
        let detail = self.required(content, &self.classes.route_detail)?;
        let distance = self.required_text(content, &self.classes.distance)?;
        let fare = self.required_text(content, &self.classes.fare)?;
        let transfer_count = self.transfer_count(content)?;
        let transport = self.transport(&detail)?;
        let (start_time, arrival_time) = self.times(&detail)?;

        tracing::debug!(%transport, %start_time, %arrival_time, transfer_count, "parsed route page");

        Ok(ItineraryFragment {
            transport,
            start_time,
            arrival_time,
            fare,
            transfer_count,
            distance,
        })
    }

    fn adjacent_link(&self, content: &str, direction: Direction) -> Option<String> {
        let container = html::find_by_class(content, direction.link_class())?;
        let href = if container.tag.eq_ignore_ascii_case("a") {
            container.attr_href()
        } else {
            container.first_child("a").and_then(|a| a.attr_href())
        };
        href.filter(|h| !h.trim().is_empty())
    }
}

impl Default for RouteParser {
    fn default() -> Self {
        Self::new()
    }
}
