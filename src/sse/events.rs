//! SSE event types and definitions
//!
//! Contains the StreamEvent enum with the event variants emitted by the
//! Otto agent-run streaming endpoint.

/// Typed events from the agent-run stream, discriminated by the payload's
/// `type` field.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Text fragment of the agent response. Fragments arrive in order and
    /// concatenate to the full response.
    Content { content: String },
    /// The agent invoked a tool
    ToolCall { tool_name: String },
    /// A tool finished; the payload is carried through opaquely
    ToolResult { result: serde_json::Value },
    /// Run status change
    Status { status: String },
    /// Error surfaced by the backend mid-stream
    Error { error: String },
    /// Unrecognized event type - ignored downstream
    Unknown { event_type: String },
}

impl StreamEvent {
    /// Returns the event type tag as a string for logging purposes.
    pub fn event_type_name(&self) -> &str {
        match self {
            StreamEvent::Content { .. } => "content",
            StreamEvent::ToolCall { .. } => "tool_call",
            StreamEvent::ToolResult { .. } => "tool_result",
            StreamEvent::Status { .. } => "status",
            StreamEvent::Error { .. } => "error",
            StreamEvent::Unknown { event_type } => event_type,
        }
    }
}

/// Classification of one raw line from the stream body
#[derive(Debug, Clone, PartialEq)]
pub enum StreamLine {
    /// Payload from a `data:` line
    Data(String),
    /// The `[DONE]` end-of-stream sentinel
    Done,
    /// Keep-alive, comment, blank, or otherwise non-data line
    Ignored,
}

/// Errors that can occur while decoding a single data payload
#[derive(Debug, Clone, PartialEq)]
pub enum StreamDecodeError {
    /// Payload was not valid JSON
    InvalidJson { payload: String, source: String },
}

impl std::fmt::Display for StreamDecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamDecodeError::InvalidJson { payload, source } => {
                write!(f, "Invalid JSON in stream payload '{}': {}", payload, source)
            }
        }
    }
}

impl std::error::Error for StreamDecodeError {}
