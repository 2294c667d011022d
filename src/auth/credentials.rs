//! Bearer-token storage and resolution.
//!
//! Tokens are resolved in priority order: explicit `--token` flag, the
//! `OTTO_API_TOKEN` environment variable, then `~/.otto/.credentials.json`.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The credentials directory name.
const CREDENTIALS_DIR: &str = ".otto";

/// The credentials file name.
const CREDENTIALS_FILE: &str = ".credentials.json";

/// Environment variable carrying the bearer token.
pub const TOKEN_ENV_VAR: &str = "OTTO_API_TOKEN";

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("no API token found: pass --token, set {TOKEN_ENV_VAR}, or store one in {0}")]
    Missing(String),

    #[error("failed to read credentials file: {0}")]
    Io(#[from] std::io::Error),

    #[error("credentials file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stored credentials for the Otto API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    /// Bearer token for API authentication.
    pub access_token: Option<String>,
}

impl Credentials {
    /// Check if the credentials carry a non-empty token.
    pub fn has_token(&self) -> bool {
        self.access_token
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }
}

/// Path to the credentials file: `~/.otto/.credentials.json`.
///
/// Returns `None` if the home directory cannot be determined.
pub fn credentials_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE))
}

/// Load credentials from an explicit path.
///
/// A missing file is not an error; it loads as empty credentials.
pub fn load_from(path: &Path) -> Result<Credentials, CredentialsError> {
    if !path.exists() {
        return Ok(Credentials::default());
    }
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Resolve the bearer token: flag > environment > credentials file.
pub fn resolve_token(explicit: Option<&str>) -> Result<String, CredentialsError> {
    if let Some(token) = explicit {
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }

    if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
        if !token.is_empty() {
            return Ok(token);
        }
    }

    let path = credentials_path();
    if let Some(ref path) = path {
        let credentials = load_from(path)?;
        if let Some(token) = credentials.access_token {
            if !token.is_empty() {
                return Ok(token);
            }
        }
    }

    let shown_path = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| format!("~/{}/{}", CREDENTIALS_DIR, CREDENTIALS_FILE));
    Err(CredentialsError::Missing(shown_path))
}
