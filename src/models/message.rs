use serde::{Deserialize, Serialize};

/// Maximum characters shown by [`Message::preview`]
const PREVIEW_CHARS: usize = 100;

/// A message retrieved from a thread via GET /threads/{id}/messages.
///
/// Messages are read-only on this side; the probe never constructs them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Message kind tag from the backend (e.g. "user", "assistant", "tool")
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Message body; the shape varies across backend versions
    #[serde(default)]
    pub content: MessageContent,
}

impl Message {
    /// Role carried in a structured body, if present.
    pub fn role(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Structured(body) => Some(body.role.as_str()),
            _ => None,
        }
    }

    /// Message text, if the body carries a string payload.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Structured(body) => body.content.as_str(),
            MessageContent::Text(text) => Some(text.as_str()),
            MessageContent::Other(_) => None,
        }
    }

    /// Truncated text preview for display.
    pub fn preview(&self) -> Option<String> {
        let text = self.text()?;
        if text.chars().count() > PREVIEW_CHARS {
            let truncated: String = text.chars().take(PREVIEW_CHARS).collect();
            Some(format!("{}...", truncated))
        } else {
            Some(text.to_string())
        }
    }
}

/// Message content - structured body, bare string, or anything else
/// (tolerated opaquely).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    /// Object with role/content sub-fields
    Structured(MessageBody),
    /// Plain string body (legacy shape)
    Text(String),
    /// Any other JSON value
    Other(serde_json::Value),
}

impl Default for MessageContent {
    fn default() -> Self {
        MessageContent::Other(serde_json::Value::Null)
    }
}

/// Structured message body
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageBody {
    /// Role of the sender ("user", "assistant", ...)
    #[serde(default)]
    pub role: String,
    /// Message text; non-string payloads are carried through untouched
    #[serde(default)]
    pub content: serde_json::Value,
}

/// Message list response from the backend.
///
/// The endpoint has shipped three shapes: a bare ordered array, and an
/// object wrapping the array under "messages" or "data". All of them
/// normalize to one ordered sequence via [`MessageListResponse::into_messages`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MessageListResponse {
    /// Bare ordered array
    List(Vec<Message>),
    /// Wrapped under a "messages" key
    Wrapped { messages: Vec<Message> },
    /// Wrapped under a "data" key
    Data { data: Vec<Message> },
}

impl MessageListResponse {
    /// Normalize to the canonical ordered message sequence.
    pub fn into_messages(self) -> Vec<Message> {
        match self {
            MessageListResponse::List(messages) => messages,
            MessageListResponse::Wrapped { messages } => messages,
            MessageListResponse::Data { data } => data,
        }
    }
}
