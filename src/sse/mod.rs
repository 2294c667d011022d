//! SSE (Server-Sent Events) stream decoding
//!
//! Decodes the SSE framing used by the Otto agent-run stream endpoint:
//! - `data: <json>` - one event per data line
//! - `data: [DONE]` - explicit end-of-stream sentinel
//! - Anything else (blank lines, `: comment` keep-alives) - ignored
//!
//! # Module structure
//! - `events` - Event type definitions (StreamEvent, StreamLine, StreamDecodeError)
//! - `payloads` - Internal payload deserialization structs
//! - `parser` - Decoding logic (parse_stream_line, decode_event)

mod events;
mod parser;
mod payloads;

// Re-export public types
pub use events::{StreamDecodeError, StreamEvent, StreamLine};
pub use parser::{decode_event, parse_stream_line};
