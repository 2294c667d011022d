//! Otto API client for backend communication.
//!
//! This module provides the HTTP client for interacting with the Otto backend,
//! including streaming agent-run responses via Server-Sent Events (SSE).

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use reqwest::Client;
use std::pin::Pin;
use std::time::Duration;

use crate::models::{AgentRun, AgentStartResponse, Message, MessageListResponse};
use crate::sse::{decode_event, parse_stream_line, StreamDecodeError, StreamEvent, StreamLine};

/// Default base URL for the Otto API
pub const OTTO_BASE_URL: &str = "https://api.otto.lk/api";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV_VAR: &str = "OTTO_API_URL";

/// Default bound on a whole streaming read, in seconds
pub const DEFAULT_STREAM_TIMEOUT_SECS: u64 = 60;

/// Stream of decoded agent-run events
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, OttoError>> + Send>>;

/// Error type for Otto client operations
#[derive(Debug)]
pub enum OttoError {
    /// HTTP request failed (connection error, timeout)
    Http(reqwest::Error),
    /// A single stream payload failed to decode
    Decode(StreamDecodeError),
    /// JSON deserialization of a response body failed
    Json(serde_json::Error),
    /// Server returned an error status
    Server { status: u16, message: String },
}

impl OttoError {
    /// Whether this error only affects a single stream event.
    ///
    /// Recoverable errors are reported and the stream keeps going; anything
    /// else terminates the read.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, OttoError::Decode(_))
    }
}

impl std::fmt::Display for OttoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OttoError::Http(e) => write!(f, "HTTP error: {}", e),
            OttoError::Decode(e) => write!(f, "Stream decode error: {}", e),
            OttoError::Json(e) => write!(f, "JSON error: {}", e),
            OttoError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for OttoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OttoError::Http(e) => Some(e),
            OttoError::Decode(e) => Some(e),
            OttoError::Json(e) => Some(e),
            OttoError::Server { .. } => None,
        }
    }
}

impl From<reqwest::Error> for OttoError {
    fn from(e: reqwest::Error) -> Self {
        OttoError::Http(e)
    }
}

impl From<StreamDecodeError> for OttoError {
    fn from(e: StreamDecodeError) -> Self {
        OttoError::Decode(e)
    }
}

impl From<serde_json::Error> for OttoError {
    fn from(e: serde_json::Error) -> Self {
        OttoError::Json(e)
    }
}

/// Client for the Otto backend API.
///
/// Every request carries the bearer token; the HTTP connection pool is
/// shared across calls via the inner `reqwest::Client`.
pub struct OttoClient {
    /// Base URL for the Otto API
    pub base_url: String,
    /// Bearer token sent on every request
    token: String,
    /// Reusable HTTP client
    client: Client,
}

impl OttoClient {
    /// Create a new client against the default base URL.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(OTTO_BASE_URL, token)
    }

    /// Create a new client with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            client: Client::new(),
        }
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header("Authorization", format!("Bearer {}", self.token))
    }

    /// Check if the Otto API is healthy and reachable.
    ///
    /// Returns `true` if GET /health answers with a success status.
    pub async fn health(&self) -> Result<bool, OttoError> {
        let url = format!("{}/health", self.base_url);

        let response = self.authorized(self.client.get(&url)).send().await?;

        Ok(response.status().is_success())
    }

    /// Start an agent run against a thread.
    ///
    /// Sends POST /agent/start with a form-encoded body. Omitting
    /// `thread_id` makes the backend create a fresh thread; supplying one
    /// continues that conversation.
    pub async fn start_agent(
        &self,
        prompt: &str,
        thread_id: Option<&str>,
    ) -> Result<AgentStartResponse, OttoError> {
        let url = format!("{}/agent/start", self.base_url);

        let mut form = vec![("prompt", prompt.to_string())];
        if let Some(id) = thread_id {
            form.push(("thread_id", id.to_string()));
        }

        let response = self
            .authorized(self.client.post(&url))
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OttoError::Server { status, message });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Stream the response events for an agent run.
    ///
    /// Sends GET /agent-run/{id}/stream and returns a lazy stream of decoded
    /// [`StreamEvent`] values. The whole read is bounded by `timeout`;
    /// expiry surfaces as a transport error, never as end-of-stream.
    ///
    /// Stream semantics:
    /// - the `[DONE]` sentinel ends the stream; no further lines are read
    /// - a payload that fails to decode is yielded as a recoverable
    ///   [`OttoError::Decode`] item and the stream continues
    /// - a transport error is yielded once and the stream ends
    /// - dropping the stream closes the connection
    pub async fn stream_run(
        &self,
        agent_run_id: &str,
        timeout: Duration,
    ) -> Result<EventStream, OttoError> {
        let url = format!("{}/agent-run/{}/stream", self.base_url, agent_run_id);

        let response = self
            .authorized(self.client.get(&url))
            .header("Accept", "text/event-stream")
            .timeout(timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OttoError::Server { status, message });
        }

        tracing::debug!("attached to stream for agent run {}", agent_run_id);

        // Get the byte stream from the response
        let bytes_stream = response.bytes_stream();

        // Reassemble lines from arbitrary chunk boundaries, classify each,
        // and decode data payloads into events. The `finished` flag lets a
        // terminal item be yielded before the stream ends.
        let event_stream = stream::unfold(
            (bytes_stream, String::new(), false),
            |(mut bytes_stream, mut buffer, finished)| async move {
                if finished {
                    return None;
                }
                loop {
                    // First, process any complete lines already buffered
                    if let Some(newline_pos) = buffer.find('\n') {
                        let line = buffer[..newline_pos].trim_end_matches('\r').to_string();
                        buffer = buffer[newline_pos + 1..].to_string();

                        match parse_stream_line(&line) {
                            StreamLine::Done => {
                                // Sentinel: stop reading, drop the connection
                                return None;
                            }
                            StreamLine::Data(payload) => {
                                let item = decode_event(&payload).map_err(OttoError::Decode);
                                return Some((item, (bytes_stream, buffer, false)));
                            }
                            StreamLine::Ignored => {
                                continue;
                            }
                        }
                    }

                    // Need more data from the stream
                    match bytes_stream.next().await {
                        Some(Ok(chunk)) => {
                            if let Ok(text) = String::from_utf8(chunk.to_vec()) {
                                buffer.push_str(&text);
                            }
                            // Loop back to process the buffer
                        }
                        Some(Err(e)) => {
                            return Some((
                                Err(OttoError::Http(e)),
                                (bytes_stream, buffer, true),
                            ));
                        }
                        None => {
                            // Graceful close counts as end of stream; flush
                            // a final unterminated line if one is pending
                            if !buffer.is_empty() {
                                let line = buffer.trim_end_matches('\r').to_string();
                                buffer.clear();
                                if let StreamLine::Data(payload) = parse_stream_line(&line) {
                                    let item = decode_event(&payload).map_err(OttoError::Decode);
                                    return Some((item, (bytes_stream, buffer, true)));
                                }
                            }
                            return None;
                        }
                    }
                }
            },
        );

        Ok(Box::pin(event_stream))
    }

    /// Fetch metadata for an agent run.
    pub async fn agent_run(&self, agent_run_id: &str) -> Result<AgentRun, OttoError> {
        let url = format!("{}/agent-run/{}", self.base_url, agent_run_id);

        let response = self.authorized(self.client.get(&url)).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OttoError::Server { status, message });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch all messages in a thread, normalized to one ordered sequence
    /// regardless of which response shape the backend used.
    pub async fn thread_messages(&self, thread_id: &str) -> Result<Vec<Message>, OttoError> {
        let url = format!("{}/threads/{}/messages", self.base_url, thread_id);

        let response = self.authorized(self.client.get(&url)).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OttoError::Server { status, message });
        }

        let body = response.bytes().await?;
        let list: MessageListResponse = serde_json::from_slice(&body)?;
        Ok(list.into_messages())
    }
}
