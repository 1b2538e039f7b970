//! Pre-built Japanese message templates, addressed by key.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    /// Ask for departure and arrival stations.
    Welcome,
    WelcomeReprompt,
    /// Ask for date/time and mode.
    AskDateTime,
    AskDateTimeReprompt,
    Retry,
    /// Guidance after a result has been spoken.
    AfterResult,
    Exit,
    Error,
    ErrorExit,
    Notified,
    NotifyFailed,
    ConditionPrefix,
    ConditionNotSet,
    /// Itinerary sentence; placeholders `{start}` `{from}` `{transport}` `{arrival}` `{to}` `{fare}` `{transfer}`.
    Itinerary,
    TransferNone,
    /// Placeholder `{n}`.
    TransferSome,
}

impl MessageKey {
    fn default_text(&self) -> &'static str {
        match self {
            MessageKey::Welcome => {
                "Yahoo路線を使ってルート案内します。出発駅と到着駅を教えてください。"
            }
            MessageKey::WelcomeReprompt => {
                "確認できませんでした。もう一度、渋谷駅から東京駅まで、のように出発駅と到着駅を教えてください。"
            }
            MessageKey::AskDateTime => "日時を教えてください",
            MessageKey::AskDateTimeReprompt => {
                "確認できませんでした。もう一度、今日の8時45分に到着、や、30分後に出発、や、6月1日の始発、のように、出発または到着の日時を教えてください"
            }
            MessageKey::Retry => "確認できませんでした。もう一度お試しください。",
            MessageKey::AfterResult => {
                "前後の電車を検索する場合は、前の電車、または、次の電車と、検索条件を変更する場合は、出発駅と到着駅、または、日時を言ってください。"
            }
            MessageKey::Exit => "ハバッナイスデーイ！",
            MessageKey::Error => "確認できませんでした。再度お試しください。",
            MessageKey::ErrorExit => "問題が発生しました。もう一度はじめからやり直してください。",
            MessageKey::Notified => "Lineに通知しました。",
            MessageKey::NotifyFailed => "Lineへの通知に失敗しました。",
            MessageKey::ConditionPrefix => "検索条件は、",
            MessageKey::ConditionNotSet => "まだ設定されていません。",
            MessageKey::Itinerary => {
                "{start}に{from}を発車する、{transport}に乗車すると、{arrival}に{to}に到着します。料金は{fare}で、{transfer}"
            }
            MessageKey::TransferNone => "乗り換えはありません。",
            MessageKey::TransferSome => "{n}回の乗り換えがあります。",
        }
    }
}

/// Message catalog. Keys without an override fall back to the built-in text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Messages {
    overrides: HashMap<MessageKey, String>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: MessageKey, text: impl Into<String>) -> Self {
        self.overrides.insert(key, text.into());
        self
    }

    pub fn get(&self, key: MessageKey) -> &str {
        self.overrides
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_text())
    }
}
