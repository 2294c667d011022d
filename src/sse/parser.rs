//! Stream line classification and event decoding
//!
//! The agent-run stream frames one event per `data:` line. There is no
//! `event:` line or blank-line accumulation; lines that do not carry a
//! data payload are keep-alives and are skipped.

use crate::sse::events::{StreamDecodeError, StreamEvent, StreamLine};
use crate::sse::payloads::{
    ContentPayload, ErrorPayload, StatusPayload, ToolCallPayload, ToolResultPayload,
};

/// End-of-stream sentinel payload
const DONE_SENTINEL: &str = "[DONE]";

/// Classify a single raw line from the stream body.
///
/// Only `data:` lines matter; everything else (blank lines, `: comment`
/// keep-alives, unknown fields) is [`StreamLine::Ignored`].
pub fn parse_stream_line(line: &str) -> StreamLine {
    let Some(rest) = line.strip_prefix("data:") else {
        return StreamLine::Ignored;
    };
    let payload = rest.strip_prefix(' ').unwrap_or(rest);

    if payload.trim() == DONE_SENTINEL {
        return StreamLine::Done;
    }

    StreamLine::Data(payload.to_string())
}

/// Decode a data payload into a typed [`StreamEvent`].
///
/// The payload's `type` field selects the variant; unrecognized types decode
/// to [`StreamEvent::Unknown`] so callers can skip them without erroring.
/// Missing fields fall back to empty defaults.
pub fn decode_event(payload: &str) -> Result<StreamEvent, StreamDecodeError> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| StreamDecodeError::InvalidJson {
            payload: payload.to_string(),
            source: e.to_string(),
        })?;

    let event_type = value
        .get("type")
        .and_then(|t| t.as_str())
        .unwrap_or_default()
        .to_string();

    let invalid = |e: serde_json::Error| StreamDecodeError::InvalidJson {
        payload: payload.to_string(),
        source: e.to_string(),
    };

    match event_type.as_str() {
        "content" => {
            let p: ContentPayload = serde_json::from_value(value).map_err(invalid)?;
            Ok(StreamEvent::Content {
                content: p.content.unwrap_or_default(),
            })
        }
        "tool_call" => {
            let p: ToolCallPayload = serde_json::from_value(value).map_err(invalid)?;
            Ok(StreamEvent::ToolCall {
                tool_name: p.tool_name.unwrap_or_else(|| "unknown".to_string()),
            })
        }
        "tool_result" => {
            let p: ToolResultPayload = serde_json::from_value(value).map_err(invalid)?;
            Ok(StreamEvent::ToolResult { result: p.result })
        }
        "status" => {
            let p: StatusPayload = serde_json::from_value(value).map_err(invalid)?;
            Ok(StreamEvent::Status {
                status: p.status.unwrap_or_default(),
            })
        }
        "error" => {
            let p: ErrorPayload = serde_json::from_value(value).map_err(invalid)?;
            Ok(StreamEvent::Error {
                error: p.error.unwrap_or_else(|| "Unknown error".to_string()),
            })
        }
        _ => Ok(StreamEvent::Unknown { event_type }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests for parse_stream_line

    #[test]
    fn test_parse_empty_line_ignored() {
        assert_eq!(parse_stream_line(""), StreamLine::Ignored);
    }

    #[test]
    fn test_parse_comment_line_ignored() {
        assert_eq!(parse_stream_line(": keep-alive"), StreamLine::Ignored);
        assert_eq!(parse_stream_line(":"), StreamLine::Ignored);
    }

    #[test]
    fn test_parse_non_data_line_ignored() {
        assert_eq!(parse_stream_line("event: content"), StreamLine::Ignored);
        assert_eq!(parse_stream_line("retry: 3000"), StreamLine::Ignored);
    }

    #[test]
    fn test_parse_data_line() {
        assert_eq!(
            parse_stream_line(r#"data: {"type":"content"}"#),
            StreamLine::Data(r#"{"type":"content"}"#.to_string())
        );
        // No space after the colon is also accepted
        assert_eq!(
            parse_stream_line(r#"data:{"x":1}"#),
            StreamLine::Data(r#"{"x":1}"#.to_string())
        );
    }

    #[test]
    fn test_parse_done_sentinel() {
        assert_eq!(parse_stream_line("data: [DONE]"), StreamLine::Done);
        assert_eq!(parse_stream_line("data:[DONE]"), StreamLine::Done);
        assert_eq!(parse_stream_line("data:  [DONE]  "), StreamLine::Done);
    }

    #[test]
    fn test_done_sentinel_not_matched_inside_json() {
        // A payload merely containing the sentinel text is still data
        assert_eq!(
            parse_stream_line(r#"data: {"content":"[DONE]"}"#),
            StreamLine::Data(r#"{"content":"[DONE]"}"#.to_string())
        );
    }

    // Tests for decode_event

    #[test]
    fn test_decode_content_event() {
        let event = decode_event(r#"{"type":"content","content":"Hello"}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::Content {
                content: "Hello".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_content_event_text_alias() {
        let event = decode_event(r#"{"type":"content","text":"Hi"}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::Content {
                content: "Hi".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_content_event_missing_field() {
        // Missing content field falls back to empty, never fails
        let event = decode_event(r#"{"type":"content"}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::Content {
                content: String::new(),
            }
        );
    }

    #[test]
    fn test_decode_tool_call_event() {
        let event = decode_event(r#"{"type":"tool_call","tool_name":"web_search"}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::ToolCall {
                tool_name: "web_search".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_tool_call_missing_name() {
        let event = decode_event(r#"{"type":"tool_call"}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::ToolCall {
                tool_name: "unknown".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_tool_result_event() {
        let event =
            decode_event(r#"{"type":"tool_result","result":{"rows":3,"ok":true}}"#).unwrap();
        match event {
            StreamEvent::ToolResult { result } => {
                assert_eq!(result["rows"], 3);
                assert_eq!(result["ok"], true);
            }
            other => panic!("Expected ToolResult, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_tool_result_without_payload() {
        let event = decode_event(r#"{"type":"tool_result"}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::ToolResult {
                result: serde_json::Value::Null,
            }
        );
    }

    #[test]
    fn test_decode_status_event() {
        let event = decode_event(r#"{"type":"status","status":"running"}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::Status {
                status: "running".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_error_event() {
        let event = decode_event(r#"{"type":"error","error":"rate limited"}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::Error {
                error: "rate limited".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_error_event_default_message() {
        let event = decode_event(r#"{"type":"error"}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::Error {
                error: "Unknown error".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_unknown_event_type() {
        let event = decode_event(r#"{"type":"usage","tokens":12}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::Unknown {
                event_type: "usage".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_missing_type_tag() {
        // Valid JSON without a type tag is an unknown event, not an error
        let event = decode_event(r#"{"content":"orphan"}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::Unknown {
                event_type: String::new(),
            }
        );
    }

    #[test]
    fn test_decode_invalid_json() {
        let result = decode_event("not valid json");
        assert!(matches!(
            result,
            Err(StreamDecodeError::InvalidJson { .. })
        ));
    }
}
