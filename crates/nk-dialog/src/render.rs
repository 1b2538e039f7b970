//! Spoken text for itineraries and search conditions.

use chrono::{Datelike, Timelike};
use nk_core::{Itinerary, MessageKey, Messages};
use nk_session::SessionState;

pub fn render_itinerary(messages: &Messages, it: &Itinerary) -> String {
    let transfer = if it.transfer_count == 0 {
        messages.get(MessageKey::TransferNone).to_string()
    } else {
        messages
            .get(MessageKey::TransferSome)
            .replace("{n}", &it.transfer_count.to_string())
    };
    messages
        .get(MessageKey::Itinerary)
        .replace("{start}", &it.start_time)
        .replace("{from}", &it.departure_station)
        .replace("{transport}", &it.transport)
        .replace("{arrival}", &it.arrival_time)
        .replace("{to}", &it.arrival_station)
        .replace("{fare}", &it.fare)
        .replace("{transfer}", &transfer)
        // "〜行に" is read as "〜行きに".
        .replace("行に", "行きに")
}

/// Speak the current search conditions back.
pub fn render_condition(messages: &Messages, state: &SessionState) -> String {
    let mut out = messages.get(MessageKey::ConditionPrefix).to_string();
    let Some((from, to)) = state.criteria.stations() else {
        out.push_str(messages.get(MessageKey::ConditionNotSet));
        out.push_str(messages.get(MessageKey::Welcome));
        return out;
    };
    out.push_str(&format!("{}から、{}まで、", from, to));

    if let (Some(at), Some(mode)) = (state.criteria.date_time, state.criteria.mode) {
        let date = format!("{}年{:02}月{:02}日", at.year(), at.month(), at.day());
        if mode.is_terminal_train() && at.hour() == 0 {
            out.push_str(&format!("{} の、{}", date, mode.label()));
        } else {
            out.push_str(&format!("{} {:02}時{:02}分、に{}", date, at.hour(), at.minute(), mode.label()));
        }
    }
    out.push_str("です。");
    out
}
