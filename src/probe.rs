//! End-to-end conversation probe against a live Otto deployment.
//!
//! Walks the full conversation flow the way a user would: health check,
//! initial prompt, streamed response, run metadata, message history, then a
//! follow-up prompt on the same thread. Each step reports its outcome to the
//! console and into a [`ProbeReport`].

use std::time::Duration;

use crate::cli_output::{self, ConsoleHandler};
use crate::client::{OttoClient, DEFAULT_STREAM_TIMEOUT_SECS};
use crate::stream::{drive_stream, StreamSummary};

/// Delay between starting a run and attaching to its stream, giving the
/// agent a moment to begin processing.
const STREAM_ATTACH_DELAY: Duration = Duration::from_secs(2);

/// How many thread messages are shown in the history step.
const MESSAGE_DISPLAY_LIMIT: usize = 5;

/// Default initial prompt.
pub const DEFAULT_PROMPT: &str = "Hello! Can you tell me a short joke about programming?";

/// Default follow-up prompt, sent on the same thread.
pub const DEFAULT_FOLLOW_UP: &str = "Can you make that joke even shorter?";

/// Knobs for one probe run.
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Initial prompt to start the conversation with
    pub prompt: String,
    /// Follow-up prompt on the same thread; `None` skips the step
    pub follow_up: Option<String>,
    /// Existing thread to continue instead of creating a fresh one
    pub thread_id: Option<String>,
    /// Bound on each streaming read
    pub stream_timeout: Duration,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            follow_up: Some(DEFAULT_FOLLOW_UP.to_string()),
            thread_id: None,
            stream_timeout: Duration::from_secs(DEFAULT_STREAM_TIMEOUT_SECS),
        }
    }
}

/// Outcome of one probe run.
#[derive(Debug, Clone, Default)]
pub struct ProbeReport {
    /// Health endpoint answered with success
    pub healthy: bool,
    /// Thread the conversation ran on
    pub thread_id: Option<String>,
    /// First agent run started
    pub agent_run_id: Option<String>,
    /// Summary of the initial response stream
    pub initial_stream: Option<StreamSummary>,
    /// Status reported by the run-details endpoint afterwards
    pub run_status: Option<String>,
    /// Number of messages listed on the thread
    pub messages_listed: Option<usize>,
    /// Summary of the follow-up response stream
    pub follow_up_stream: Option<StreamSummary>,
}

impl ProbeReport {
    /// Whether every step that ran came back clean.
    pub fn passed(&self) -> bool {
        self.healthy
            && self.agent_run_id.is_some()
            && self.initial_stream.as_ref().is_some_and(|s| s.completed)
            && self
                .follow_up_stream
                .as_ref()
                .map_or(true, |s| s.completed)
    }
}

/// Run the conversation probe.
///
/// A failed health check aborts immediately; any later step that fails is
/// reported and the remaining steps still run.
pub async fn run_probe(client: &OttoClient, options: &ProbeOptions) -> ProbeReport {
    let mut report = ProbeReport::default();

    cli_output::print_header("OTTO API CONVERSATION PROBE");

    // Step 1: health check - the only fatal step
    cli_output::print_step_start(1, "HEALTH CHECK");
    let start = std::time::Instant::now();
    match client.health().await {
        Ok(true) => {
            report.healthy = true;
            cli_output::print_step_line(
                "✓",
                &format!("Backend responding ({}ms)", start.elapsed().as_millis()),
            );
        }
        Ok(false) => {
            cli_output::print_step_line("✗", "Backend returned a non-success status");
        }
        Err(e) => {
            cli_output::print_step_line("✗", &format!("Backend unreachable: {}", e));
        }
    }
    cli_output::print_step_end();
    if !report.healthy {
        return report;
    }

    // Step 2: start the conversation
    cli_output::print_step_start(2, "START CONVERSATION");
    cli_output::print_step_line("→", &format!("Prompt: {}", options.prompt));
    match options.thread_id.as_deref() {
        Some(id) => cli_output::print_step_line("→", &format!("Thread: {}", id)),
        None => cli_output::print_step_line("→", "Thread: NEW THREAD"),
    }
    let started = match client
        .start_agent(&options.prompt, options.thread_id.as_deref())
        .await
    {
        Ok(response) => {
            cli_output::print_step_line("✓", &format!("Thread ID: {}", response.thread_id));
            cli_output::print_step_line("✓", &format!("Agent run ID: {}", response.agent_run_id));
            if !response.status.is_empty() {
                cli_output::print_step_line("·", &format!("Status: {}", response.status));
            }
            report.thread_id = Some(response.thread_id.clone());
            report.agent_run_id = Some(response.agent_run_id.clone());
            Some(response)
        }
        Err(e) => {
            cli_output::print_step_line("✗", &format!("Failed to start conversation: {}", e));
            None
        }
    };
    cli_output::print_step_end();
    let Some(started) = started else {
        return report;
    };

    // Step 3: stream the agent's response
    cli_output::print_step_start(3, "STREAM RESPONSE");
    tokio::time::sleep(STREAM_ATTACH_DELAY).await;
    let summary = stream_response(client, &started.agent_run_id, options.stream_timeout).await;
    report.initial_stream = Some(summary);
    cli_output::print_step_end();

    // Step 4: fetch run details
    cli_output::print_step_start(4, "RUN DETAILS");
    match client.agent_run(&started.agent_run_id).await {
        Ok(run) => {
            cli_output::print_step_line("·", &format!("Status: {}", run.status));
            if let Some(error) = &run.error {
                cli_output::print_step_line("·", &format!("Error: {}", error));
            }
            if let Some(model) = &run.model {
                cli_output::print_step_line("·", &format!("Model: {}", model));
            }
            if let Some(created_at) = &run.created_at {
                cli_output::print_step_line("·", &format!("Created: {}", created_at));
            }
            report.run_status = Some(run.status);
        }
        Err(e) => {
            cli_output::print_step_line("✗", &format!("Failed to fetch run details: {}", e));
        }
    }
    cli_output::print_step_end();

    // Step 5: list thread messages
    cli_output::print_step_start(5, "THREAD MESSAGES");
    match client.thread_messages(&started.thread_id).await {
        Ok(messages) => {
            cli_output::print_step_line("✓", &format!("Total messages: {}", messages.len()));
            for message in messages.iter().take(MESSAGE_DISPLAY_LIMIT) {
                let role = message.role().unwrap_or("-");
                let preview = message.preview().unwrap_or_default();
                cli_output::print_step_line(
                    "·",
                    &format!("[{}] {}: {}", message.kind, role, preview),
                );
            }
            report.messages_listed = Some(messages.len());
        }
        Err(e) => {
            cli_output::print_step_line("✗", &format!("Failed to list messages: {}", e));
        }
    }
    cli_output::print_step_end();

    // Step 6: follow-up on the same thread
    if let Some(follow_up) = &options.follow_up {
        cli_output::print_step_start(6, "FOLLOW-UP");
        cli_output::print_step_line("→", &format!("Prompt: {}", follow_up));
        match client.start_agent(follow_up, Some(&started.thread_id)).await {
            Ok(response) => {
                cli_output::print_step_line(
                    "✓",
                    &format!("Agent run ID: {}", response.agent_run_id),
                );
                tokio::time::sleep(STREAM_ATTACH_DELAY).await;
                let summary =
                    stream_response(client, &response.agent_run_id, options.stream_timeout).await;
                report.follow_up_stream = Some(summary);
            }
            Err(e) => {
                cli_output::print_step_line("✗", &format!("Failed to start follow-up: {}", e));
                report.follow_up_stream = Some(StreamSummary::default());
            }
        }
        cli_output::print_step_end();
    }

    report
}

/// Stream one run's response to the console and summarize the outcome.
async fn stream_response(
    client: &OttoClient,
    agent_run_id: &str,
    timeout: Duration,
) -> StreamSummary {
    match client.stream_run(agent_run_id, timeout).await {
        Ok(events) => {
            let mut handler = ConsoleHandler::new();
            let summary = drive_stream(events, &mut handler).await;
            println!();
            if summary.completed {
                cli_output::print_step_line(
                    "✓",
                    &format!(
                        "Stream complete ({} events, {} undecodable)",
                        summary.events, summary.decode_failures
                    ),
                );
            } else if let Some(error) = &summary.transport_error {
                cli_output::print_step_line("✗", &format!("Stream failed: {}", error));
            }
            summary
        }
        Err(e) => {
            cli_output::print_step_line("✗", &format!("Stream request failed: {}", e));
            StreamSummary::default()
        }
    }
}
