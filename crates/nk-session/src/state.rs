use nk_core::{Itinerary, NkError, Result, SearchCriteria};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a conversation stands, derived from which fields are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoStations,
    StationsOnly,
    HasItinerary,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::NoStations => write!(f, "no-stations"),
            Phase::StationsOnly => write!(f, "stations-only"),
            Phase::HasItinerary => write!(f, "has-itinerary"),
        }
    }
}

/// Dialog state carried across turns.
///
/// The core keeps no copy of this between turns. It arrives with each
/// request and leaves with each response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default)]
    pub criteria: SearchCriteria,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_itinerary: Option<Itinerary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_rendered_message: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode session attributes. `null` and `{}` both mean a fresh state.
    pub fn from_attributes(attributes: &serde_json::Value) -> Result<Self> {
        if attributes.is_null() {
            return Ok(Self::new());
        }
        serde_json::from_value(attributes.clone()).map_err(NkError::from)
    }

    pub fn to_attributes(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }

    pub fn phase(&self) -> Phase {
        if !self.criteria.has_stations() {
            Phase::NoStations
        } else if self.last_itinerary.is_some() {
            Phase::HasItinerary
        } else {
            Phase::StationsOnly
        }
    }

    /// Handle for adjacency navigation.
    pub fn source_url(&self) -> Option<&str> {
        self.last_itinerary.as_ref().map(|it| it.source_url.as_str())
    }

    /// Overwrite both stations and drop the last result, which belongs to the
    /// old pair. Date/time and mode are kept.
    pub fn set_stations(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.criteria.departure_station = Some(from.into());
        self.criteria.arrival_station = Some(to.into());
        self.last_itinerary = None;
        self.last_rendered_message = None;
    }

    /// Fold a successful result into the state.
    pub fn merge(&mut self, itinerary: Itinerary, message: impl Into<String>) {
        merge_criteria(&mut self.criteria, &itinerary.search_criteria);
        if !itinerary.departure_station.is_empty() {
            self.criteria.departure_station = Some(itinerary.departure_station.clone());
        }
        if !itinerary.arrival_station.is_empty() {
            self.criteria.arrival_station = Some(itinerary.arrival_station.clone());
        }
        tracing::debug!(url = %itinerary.source_url, "merged itinerary into session");
        self.last_itinerary = Some(itinerary);
        self.last_rendered_message = Some(message.into());
    }
}

/// Merge-only: a field absent in `update` never clears one already set.
pub fn merge_criteria(target: &mut SearchCriteria, update: &SearchCriteria) {
    if let Some(from) = &update.departure_station {
        target.departure_station = Some(from.clone());
    }
    if let Some(to) = &update.arrival_station {
        target.arrival_station = Some(to.clone());
    }
    if let Some(at) = update.date_time {
        target.date_time = Some(at);
    }
    if let Some(mode) = update.mode {
        target.mode = Some(mode);
    }
}

/// Apply a turn's outcome. Failures leave the state untouched.
pub fn merge<E>(state: &mut SessionState, outcome: std::result::Result<(Itinerary, String), E>) -> std::result::Result<(), E> {
    let (itinerary, message) = outcome?;
    state.merge(itinerary, message);
    Ok(())
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SessionState(phase={}, from={:?}, to={:?}, url={:?})",
            self.phase(),
            self.criteria.departure_station,
            self.criteria.arrival_station,
            self.source_url()
        )
    }
}
