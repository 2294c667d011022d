//! Simple line-based CLI output utilities.

/// Line width for separators.
const LINE_WIDTH: usize = 60;

/// Print the main header.
///
/// ```text
/// OTTO API CONVERSATION PROBE
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_header(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "═".repeat(LINE_WIDTH));
    println!();
}

/// Print the start of a step.
///
/// ```text
/// STEP 1: HEALTH CHECK
/// ────────────────────────────────────────────────────────────
/// ```
pub fn print_step_start(step: u8, title: &str) {
    println!("STEP {}: {}", step, title);
    println!("{}", "─".repeat(LINE_WIDTH));
}

/// Print a line within a step.
///
/// ```text
///   ✓ Backend responding (120ms)
/// ```
pub fn print_step_line(icon: &str, message: &str) {
    println!("  {} {}", icon, message);
}

/// Print the end of a step (just a blank line).
pub fn print_step_end() {
    println!();
}
