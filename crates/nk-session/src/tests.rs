use crate::*;
use chrono::NaiveDate;
use nk_core::{Itinerary, NkError, SearchCriteria, SearchMode};

fn criteria(day: u32, hour: u32) -> SearchCriteria {
    SearchCriteria {
        departure_station: Some("渋谷".into()),
        arrival_station: Some("東京".into()),
        date_time: NaiveDate::from_ymd_opt(2018, 6, day).unwrap().and_hms_opt(hour, 0, 0),
        mode: Some(SearchMode::Depart),
    }
}

fn itinerary(url: &str, criteria: SearchCriteria) -> Itinerary {
    Itinerary {
        departure_station: criteria.departure_station.clone().unwrap_or_default(),
        arrival_station: criteria.arrival_station.clone().unwrap_or_default(),
        transport: "JR山手線外回り".into(),
        start_time: "10:01".into(),
        arrival_time: "10:25".into(),
        fare: "200円".into(),
        transfer_count: 0,
        distance: "7.2km".into(),
        source_url: url.into(),
        search_criteria: criteria,
    }
}

// ========== Phases ==========

#[test]
fn test_new_state_has_no_stations() {
    let s = SessionState::new();
    assert_eq!(s.phase(), Phase::NoStations);
    assert!(s.source_url().is_none());
}

#[test]
fn test_set_stations() {
    let mut s = SessionState::new();
    s.set_stations("渋谷", "東京");
    assert_eq!(s.phase(), Phase::StationsOnly);
    assert_eq!(s.criteria.stations(), Some(("渋谷", "東京")));
}

#[test]
fn test_merge_moves_to_has_itinerary() {
    let mut s = SessionState::new();
    s.merge(itinerary("https://x/1", criteria(1, 10)), "msg");
    assert_eq!(s.phase(), Phase::HasItinerary);
    assert_eq!(s.source_url(), Some("https://x/1"));
    assert_eq!(s.last_rendered_message.as_deref(), Some("msg"));
    assert_eq!(s.criteria.mode, Some(SearchMode::Depart));
}

#[test]
fn test_set_stations_drops_last_result() {
    let mut s = SessionState::new();
    s.merge(itinerary("https://x/1", criteria(1, 10)), "msg");
    s.set_stations("新宿", "横浜");
    assert_eq!(s.phase(), Phase::StationsOnly);
    assert_eq!(s.criteria.stations(), Some(("新宿", "横浜")));
    assert_eq!(s.criteria.date_time, criteria(1, 10).date_time);
    assert_eq!(s.criteria.mode, Some(SearchMode::Depart));
    assert!(s.source_url().is_none());
    assert!(s.last_rendered_message.is_none());
}

// ========== Merge ==========

#[test]
fn test_merge_keeps_stations_when_update_has_only_schedule() {
    let mut s = SessionState::new();
    s.set_stations("渋谷", "東京");
    let update = SearchCriteria {
        departure_station: None,
        arrival_station: None,
        date_time: NaiveDate::from_ymd_opt(2018, 6, 2).unwrap().and_hms_opt(8, 0, 0),
        mode: Some(SearchMode::Arrive),
    };
    merge_criteria(&mut s.criteria, &update);
    assert_eq!(s.criteria.stations(), Some(("渋谷", "東京")));
    assert_eq!(s.criteria.mode, Some(SearchMode::Arrive));
}

#[test]
fn test_merge_monotonic_over_turns() {
    let mut s = SessionState::new();
    s.set_stations("渋谷", "東京");
    for (i, day) in [1u32, 2, 3].into_iter().enumerate() {
        let mut it = itinerary(&format!("https://x/{}", i), criteria(day, 9));
        it.departure_station.clear();
        it.search_criteria.departure_station = None;
        s.merge(it, format!("msg {}", i));
        assert_eq!(s.criteria.stations(), Some(("渋谷", "東京")));
    }
    assert_eq!(s.source_url(), Some("https://x/2"));
}

#[test]
fn test_merge_outcome_failure_leaves_state() {
    let mut s = SessionState::new();
    s.merge(itinerary("https://x/1", criteria(1, 10)), "first");
    let before = s.clone();
    let res = merge(&mut s, Err(NkError::UnparsablePage("boom".into())));
    assert!(res.is_err());
    assert_eq!(s, before);
}

#[test]
fn test_merge_outcome_success() {
    let mut s = SessionState::new();
    merge::<NkError>(&mut s, Ok((itinerary("https://x/9", criteria(1, 10)), "ok".into()))).unwrap();
    assert_eq!(s.source_url(), Some("https://x/9"));
}

// ========== Attributes ==========

#[test]
fn test_attributes_round_trip() {
    let mut s = SessionState::new();
    s.merge(itinerary("https://x/1", criteria(1, 10)), "msg");
    let attrs = s.to_attributes();
    assert_eq!(attrs["criteria"]["departureStation"], "渋谷");
    assert_eq!(attrs["lastItinerary"]["sourceUrl"], "https://x/1");
    let back = SessionState::from_attributes(&attrs).unwrap();
    assert_eq!(back, s);
    assert_eq!(back.phase(), s.phase());
}

#[test]
fn test_attributes_empty_and_null() {
    assert_eq!(SessionState::from_attributes(&serde_json::Value::Null).unwrap(), SessionState::new());
    assert_eq!(SessionState::from_attributes(&serde_json::json!({})).unwrap(), SessionState::new());
}

#[test]
fn test_attributes_malformed() {
    let attrs = serde_json::json!({ "criteria": { "mode": "sometime" } });
    assert!(SessionState::from_attributes(&attrs).is_err());
}

#[test]
fn test_display() {
    let mut s = SessionState::new();
    s.set_stations("渋谷", "東京");
    assert!(s.to_string().contains("stations-only"));
}
