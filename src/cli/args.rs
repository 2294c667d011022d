//! Command-line argument parsing for otto-probe.

/// Parsed command-line options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    /// Base URL override (`--url`)
    pub base_url: Option<String>,
    /// Bearer token override (`--token`)
    pub token: Option<String>,
    /// Initial prompt (`--prompt`)
    pub prompt: Option<String>,
    /// Follow-up prompt (`--follow-up`); `--no-follow-up` disables the step
    pub follow_up: Option<String>,
    /// Skip the follow-up step entirely
    pub no_follow_up: bool,
    /// Existing thread to continue (`--thread`)
    pub thread_id: Option<String>,
    /// Bound on each streaming read, in seconds (`--timeout`)
    pub timeout_secs: Option<u64>,
    /// Show version information and exit
    pub show_version: bool,
}

/// Parse command-line arguments into [`CliOptions`].
///
/// Unknown flags are ignored; a value flag at the end of the arguments
/// simply leaves its option unset.
///
/// # Examples
///
/// ```
/// use otto_probe::cli::args::parse_args;
///
/// let args = vec!["otto-probe".to_string(), "--version".to_string()];
/// assert!(parse_args(args.into_iter()).show_version);
/// ```
pub fn parse_args<I>(args: I) -> CliOptions
where
    I: Iterator<Item = String>,
{
    let mut options = CliOptions::default();
    let mut args = args.skip(1); // Skip the program name

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => options.show_version = true,
            "--url" => options.base_url = args.next(),
            "--token" => options.token = args.next(),
            "--prompt" => options.prompt = args.next(),
            "--follow-up" => options.follow_up = args.next(),
            "--no-follow-up" => options.no_follow_up = true,
            "--thread" => options.thread_id = args.next(),
            "--timeout" => {
                options.timeout_secs = args.next().and_then(|v| v.parse().ok());
            }
            _ => {}
        }
    }

    options
}
