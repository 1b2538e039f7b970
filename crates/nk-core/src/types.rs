use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Search mode: what the requested date/time means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Depart,
    Arrive,
    First,
    Last,
}

impl SearchMode {
    /// Map a spoken or slot token onto the closed mode set. Unknown tokens mean Arrive.
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "出発" | "depart" => SearchMode::Depart,
            "到着" | "arrive" => SearchMode::Arrive,
            "始発" | "first" => SearchMode::First,
            "終電" | "last" => SearchMode::Last,
            _ => SearchMode::Arrive,
        }
    }

    /// Numeric code understood by the search endpoint.
    pub fn code(&self) -> u8 {
        match self {
            SearchMode::Depart => 1,
            SearchMode::Last => 2,
            SearchMode::First => 3,
            SearchMode::Arrive => 4,
        }
    }

    /// Japanese word used when speaking the mode back.
    pub fn label(&self) -> &'static str {
        match self {
            SearchMode::Depart => "出発",
            SearchMode::Arrive => "到着",
            SearchMode::First => "始発",
            SearchMode::Last => "終電",
        }
    }

    /// First and last train searches ignore the time of day.
    pub fn is_terminal_train(&self) -> bool {
        matches!(self, SearchMode::First | SearchMode::Last)
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Direction for adjacency navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    /// Class name of the link container on a result page.
    pub fn link_class(&self) -> &'static str {
        match self {
            Direction::Next => "next",
            Direction::Previous => "prev",
        }
    }
}

/// Accumulated search criteria. Stations stay set once given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<SearchMode>,
}

impl SearchCriteria {
    pub fn with_stations(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            departure_station: Some(from.into()),
            arrival_station: Some(to.into()),
            date_time: None,
            mode: None,
        }
    }

    /// Both stations are known.
    pub fn has_stations(&self) -> bool {
        self.stations().is_some()
    }

    /// Station pair, if both are set.
    pub fn stations(&self) -> Option<(&str, &str)> {
        match (&self.departure_station, &self.arrival_station) {
            (Some(from), Some(to)) => Some((from.as_str(), to.as_str())),
            _ => None,
        }
    }

    /// Date/time and mode are both known.
    pub fn has_schedule(&self) -> bool {
        self.date_time.is_some() && self.mode.is_some()
    }
}

/// The fields the result parser can recover from one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryFragment {
    pub transport: String,
    pub start_time: String,
    pub arrival_time: String,
    pub fare: String,
    pub transfer_count: u32,
    pub distance: String,
}

/// One complete itinerary as spoken back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub departure_station: String,
    pub arrival_station: String,
    pub transport: String,
    pub start_time: String,
    pub arrival_time: String,
    pub fare: String,
    pub transfer_count: u32,
    #[serde(default)]
    pub distance: String,
    /// Handle for later next/previous navigation.
    pub source_url: String,
    pub search_criteria: SearchCriteria,
}

impl Itinerary {
    /// Attach identity and criteria to a parsed fragment.
    pub fn from_fragment(
        fragment: ItineraryFragment,
        criteria: SearchCriteria,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            departure_station: criteria.departure_station.clone().unwrap_or_default(),
            arrival_station: criteria.arrival_station.clone().unwrap_or_default(),
            transport: fragment.transport,
            start_time: fragment.start_time,
            arrival_time: fragment.arrival_time,
            fare: fragment.fare,
            transfer_count: fragment.transfer_count,
            distance: fragment.distance,
            source_url: source_url.into(),
            search_criteria: criteria,
        }
    }
}
