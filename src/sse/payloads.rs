//! SSE payload deserialization structs
//!
//! Internal structs used to deserialize the JSON payloads carried on
//! `data:` lines. Every field is optional so a partial payload decodes
//! to empty/default values instead of failing the event.

use serde::Deserialize;

/// `content` event payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContentPayload {
    /// Text fragment - some backend versions send "text" instead
    #[serde(default, alias = "text")]
    pub content: Option<String>,
}

/// `tool_call` event payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ToolCallPayload {
    #[serde(default, alias = "name")]
    pub tool_name: Option<String>,
}

/// `tool_result` event payload - the result is not introspected
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ToolResultPayload {
    #[serde(default)]
    pub result: serde_json::Value,
}

/// `status` event payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StatusPayload {
    #[serde(default)]
    pub status: Option<String>,
}

/// `error` event payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorPayload {
    #[serde(default, alias = "message")]
    pub error: Option<String>,
}
