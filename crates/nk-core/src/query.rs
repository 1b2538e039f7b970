//! Query builder: normalizes spoken criteria into a search request.

use crate::error::{NkError, Result};
use crate::types::{SearchCriteria, SearchMode};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};
use regex::Regex;
use std::sync::LazyLock;

static DURATION_HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^P.*T(\d+)H").expect("valid hours pattern"));
static DURATION_MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^P.*[TH](\d+)M").expect("valid minutes pattern"));

/// Fixed UTC+9.
pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("valid JST offset")
}

pub fn now_jst() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&jst())
}

/// Raw criteria as they arrive from slots.
#[derive(Debug, Clone, Default)]
pub struct QueryInput {
    pub departure_station: String,
    pub arrival_station: String,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// `HH:MM`
    pub time: Option<String>,
    /// ISO-8601 duration from now, e.g. `PT2H30M`.
    pub duration: Option<String>,
    pub mode: Option<String>,
}

/// Request descriptor for the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub from: String,
    pub to: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute_tens: u32,
    pub minute_units: u32,
    pub mode: SearchMode,
    pub walk_speed: u8,
}

impl SearchRequest {
    fn new(from: &str, to: &str, at: NaiveDateTime, mode: SearchMode, walk_speed: u8) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            year: at.year(),
            month: at.month(),
            day: at.day(),
            hour: at.hour(),
            minute_tens: at.minute() / 10,
            minute_units: at.minute() % 10,
            mode,
            walk_speed,
        }
    }

    /// Query parameters in the order the endpoint documents them.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let params = [
            ("from", self.from.clone()),
            ("to", self.to.clone()),
            ("y", self.year.to_string()),
            ("m", format!("{:02}", self.month)),
            ("d", format!("{:02}", self.day)),
            ("hh", format!("{:02}", self.hour)),
            ("m1", self.minute_tens.to_string()),
            ("m2", self.minute_units.to_string()),
            ("type", self.mode.code().to_string()),
            ("expkind", "1".to_string()),
            ("ws", self.walk_speed.to_string()),
            ("s", "0".to_string()),
            ("lb", "1".to_string()),
            ("kw", self.to.clone()),
        ];
        params
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}

/// Build normalized criteria and the request descriptor. Pure; `now` is injected.
pub fn build_query(
    input: &QueryInput,
    walk_speed: u8,
    now: DateTime<FixedOffset>,
) -> Result<(SearchCriteria, SearchRequest)> {
    let from = input.departure_station.trim();
    let to = input.arrival_station.trim();
    if from.is_empty() || to.is_empty() {
        return Err(NkError::InvalidCriteria("departure and arrival stations are required".into()));
    }

    let mode = input
        .mode
        .as_deref()
        .map(SearchMode::from_token)
        .unwrap_or(SearchMode::Arrive);

    let at = match (non_empty(&input.date), non_empty(&input.duration)) {
        (Some(date), _) => explicit_date_time(date, non_empty(&input.time))?,
        (None, Some(duration)) => relative_date_time(duration, now)?,
        (None, None) => {
            return Err(NkError::InvalidCriteria("neither a date nor a duration was given".into()))
        }
    };

    tracing::debug!(%from, %to, %at, ?mode, "built search query");

    let criteria = SearchCriteria {
        departure_station: Some(from.to_string()),
        arrival_station: Some(to.to_string()),
        date_time: Some(at),
        mode: Some(mode),
    };
    let request = SearchRequest::new(from, to, at, mode, walk_speed);
    Ok((criteria, request))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn explicit_date_time(date: &str, time: Option<&str>) -> Result<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| NkError::InvalidCriteria(format!("unrecognized date: {}", date)))?;
    let time = match time {
        Some(t) => NaiveTime::parse_from_str(t, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
            .map_err(|_| NkError::InvalidCriteria(format!("unrecognized time: {}", t)))?,
        // A bare date (typically "the first train on ...") starts at midnight.
        None => NaiveTime::MIN,
    };
    Ok(date.and_time(time))
}

fn relative_date_time(duration: &str, now: DateTime<FixedOffset>) -> Result<NaiveDateTime> {
    let hours = duration_component(&DURATION_HOURS, duration);
    let minutes = duration_component(&DURATION_MINUTES, duration);
    let delta = TimeDelta::try_hours(hours)
        .zip(TimeDelta::try_minutes(minutes))
        .map(|(h, m)| h + m)
        .ok_or_else(|| NkError::InvalidCriteria(format!("duration out of range: {}", duration)))?;
    now.checked_add_signed(delta)
        .map(|t| t.naive_local())
        .ok_or_else(|| NkError::InvalidCriteria(format!("duration out of range: {}", duration)))
}

fn duration_component(re: &Regex, duration: &str) -> i64 {
    re.captures(duration)
        .and_then(|c| c[1].parse::<i64>().ok())
        .unwrap_or(0)
}
