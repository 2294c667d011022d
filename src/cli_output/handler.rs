//! Console handler for agent-run stream events.

use std::io::{self, Write};

use crate::stream::StreamHandler;

/// Prints stream events to stdout as they arrive.
///
/// Content fragments are written inline without a newline so the response
/// renders as continuous text; everything else gets a bracketed marker on
/// its own line. Tool result payloads are not printed, only the marker.
#[derive(Debug, Default)]
pub struct ConsoleHandler;

impl ConsoleHandler {
    pub fn new() -> Self {
        Self
    }
}

impl StreamHandler for ConsoleHandler {
    fn on_content(&mut self, content: &str) {
        print!("{}", content);
        io::stdout().flush().ok();
    }

    fn on_tool_call(&mut self, tool_name: &str) {
        println!("\n[TOOL CALL: {}]", tool_name);
    }

    fn on_tool_result(&mut self, _result: &serde_json::Value) {
        println!("\n[TOOL RESULT]");
    }

    fn on_status(&mut self, status: &str) {
        println!("\n[STATUS: {}]", status);
    }

    fn on_error(&mut self, error: &str) {
        println!("\n[ERROR: {}]", error);
    }
}
