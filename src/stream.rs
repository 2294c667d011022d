//! Agent-run stream consumption.
//!
//! Separates pulling the event stream from reacting to it: [`drive_stream`]
//! drains an [`EventStream`] and dispatches each event to a caller-supplied
//! [`StreamHandler`], so consumers (console output, tests, future UIs) plug
//! in without touching the transport.

use futures_util::StreamExt;

use crate::client::EventStream;
use crate::sse::StreamEvent;

/// Per-event callbacks invoked by [`drive_stream`].
///
/// All methods default to no-ops so handlers implement only what they need.
/// Exactly one method fires per decoded event.
pub trait StreamHandler {
    /// A text fragment of the agent response arrived.
    fn on_content(&mut self, _content: &str) {}
    /// The agent invoked a tool.
    fn on_tool_call(&mut self, _tool_name: &str) {}
    /// A tool finished; the payload is opaque.
    fn on_tool_result(&mut self, _result: &serde_json::Value) {}
    /// The run changed status.
    fn on_status(&mut self, _status: &str) {}
    /// The backend surfaced an error mid-stream.
    fn on_error(&mut self, _error: &str) {}
    /// An event with an unrecognized type tag arrived.
    fn on_unknown(&mut self, _event_type: &str) {}
}

/// Outcome of draining one agent-run event stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamSummary {
    /// Stream ended via `[DONE]` or natural close without a transport failure
    pub completed: bool,
    /// Content fragments concatenated in arrival order
    pub content: String,
    /// Number of decoded events dispatched to the handler
    pub events: usize,
    /// Data lines whose JSON failed to decode (the stream continued)
    pub decode_failures: usize,
    /// Transport error that terminated the stream, if any
    pub transport_error: Option<String>,
}

/// Drain an event stream, dispatching each event to `handler`.
///
/// Decode failures are logged and counted but never end the read; a
/// transport error ends it with `completed = false`. Returning drops the
/// stream, which closes the underlying connection.
pub async fn drive_stream<H: StreamHandler>(
    mut events: EventStream,
    handler: &mut H,
) -> StreamSummary {
    let mut summary = StreamSummary::default();

    while let Some(item) = events.next().await {
        match item {
            Ok(event) => {
                summary.events += 1;
                match &event {
                    StreamEvent::Content { content } => {
                        summary.content.push_str(content);
                        handler.on_content(content);
                    }
                    StreamEvent::ToolCall { tool_name } => handler.on_tool_call(tool_name),
                    StreamEvent::ToolResult { result } => handler.on_tool_result(result),
                    StreamEvent::Status { status } => handler.on_status(status),
                    StreamEvent::Error { error } => handler.on_error(error),
                    StreamEvent::Unknown { event_type } => handler.on_unknown(event_type),
                }
            }
            Err(e) if e.is_recoverable() => {
                // A malformed single event must not kill the whole stream
                tracing::warn!("skipping undecodable stream event: {}", e);
                summary.decode_failures += 1;
            }
            Err(e) => {
                summary.transport_error = Some(e.to_string());
                break;
            }
        }
    }

    summary.completed = summary.transport_error.is_none();
    summary
}
