//! Request/response envelopes exchanged with the voice platform.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    #[serde(rename = "LaunchRequest")]
    Launch,
    #[default]
    #[serde(rename = "IntentRequest")]
    Intent,
    #[serde(rename = "SessionEndedRequest")]
    SessionEnded,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEnvelope {
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    /// Session attributes as returned by the previous turn.
    #[serde(default)]
    pub attributes: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogRequest {
    #[serde(default)]
    pub request_type: RequestType,
    #[serde(default)]
    pub intent_name: Option<String>,
    #[serde(default)]
    pub slots: HashMap<String, String>,
    #[serde(default)]
    pub session: SessionEnvelope,
}

impl DialogRequest {
    pub fn launch() -> Self {
        Self { request_type: RequestType::Launch, ..Default::default() }
    }

    pub fn intent(name: impl Into<String>) -> Self {
        Self { intent_name: Some(name.into()), ..Default::default() }
    }

    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(name.into(), value.into());
        self
    }

    pub fn with_attributes(mut self, attributes: serde_json::Value) -> Self {
        self.session.attributes = attributes;
        self
    }

    pub fn with_session_id(mut self, id: impl Into<String>) -> Self {
        self.session.session_id = Some(id.into());
        self
    }

    /// Trimmed slot value; empty counts as absent.
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogResponse {
    pub title: String,
    pub spoken_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt_text: Option<String>,
    pub should_end_session: bool,
    pub session_attributes: serde_json::Value,
}
