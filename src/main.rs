use otto_probe::auth;
use otto_probe::cli::{parse_args, VERSION};
use otto_probe::client::{OttoClient, BASE_URL_ENV_VAR, DEFAULT_STREAM_TIMEOUT_SECS, OTTO_BASE_URL};
use otto_probe::probe::{run_probe, ProbeOptions, DEFAULT_FOLLOW_UP, DEFAULT_PROMPT};

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let options = parse_args(std::env::args());

    if options.show_version {
        println!("otto-probe {}", VERSION);
        return Ok(());
    }

    let base_url = options
        .base_url
        .or_else(|| std::env::var(BASE_URL_ENV_VAR).ok())
        .unwrap_or_else(|| OTTO_BASE_URL.to_string());
    let token = auth::resolve_token(options.token.as_deref())?;

    let client = OttoClient::with_base_url(base_url, token);

    let follow_up = if options.no_follow_up {
        None
    } else {
        Some(
            options
                .follow_up
                .unwrap_or_else(|| DEFAULT_FOLLOW_UP.to_string()),
        )
    };
    let probe_options = ProbeOptions {
        prompt: options
            .prompt
            .unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
        follow_up,
        thread_id: options.thread_id,
        stream_timeout: Duration::from_secs(
            options.timeout_secs.unwrap_or(DEFAULT_STREAM_TIMEOUT_SECS),
        ),
    };

    let report = run_probe(&client, &probe_options).await;

    if !report.healthy {
        return Err(eyre!("health check failed, aborting"));
    }
    if report.passed() {
        println!("Probe complete: all steps passed.");
    } else {
        println!("Probe complete: some steps failed (see above).");
    }

    Ok(())
}
