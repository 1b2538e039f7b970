use std::fmt;

/// Intent names the skill understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetStation,
    SetDateTime,
    Next,
    Previous,
    Repeat,
    CheckCondition,
    Notify,
    Help,
    Stop,
    Cancel,
    Unknown(String),
}

impl Intent {
    pub fn from_name(name: &str) -> Self {
        match name {
            "SetStation" => Intent::SetStation,
            "SetDateTime" => Intent::SetDateTime,
            "AMAZON.NextIntent" => Intent::Next,
            "AMAZON.PreviousIntent" => Intent::Previous,
            "AMAZON.RepeatIntent" => Intent::Repeat,
            "CheckCondition" => Intent::CheckCondition,
            "LineNotify" | "Notify" => Intent::Notify,
            "AMAZON.HelpIntent" => Intent::Help,
            "AMAZON.StopIntent" => Intent::Stop,
            "AMAZON.CancelIntent" => Intent::Cancel,
            other => Intent::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Intent::SetStation => "SetStation",
            Intent::SetDateTime => "SetDateTime",
            Intent::Next => "AMAZON.NextIntent",
            Intent::Previous => "AMAZON.PreviousIntent",
            Intent::Repeat => "AMAZON.RepeatIntent",
            Intent::CheckCondition => "CheckCondition",
            Intent::Notify => "LineNotify",
            Intent::Help => "AMAZON.HelpIntent",
            Intent::Stop => "AMAZON.StopIntent",
            Intent::Cancel => "AMAZON.CancelIntent",
            Intent::Unknown(name) => name,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Slot names.
pub mod slot {
    pub const STATION_FROM: &str = "StationFrom";
    pub const STATION_TO: &str = "StationTo";
    pub const DATE: &str = "Date";
    pub const TIME: &str = "Time";
    pub const DURATION: &str = "Duration";
    pub const TYPE: &str = "Type";
}
