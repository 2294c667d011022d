//! Authentication for the Otto API.
//!
//! All endpoints require a bearer token; this module resolves one from the
//! CLI flag, the environment, or the on-disk credentials file.

pub mod credentials;

pub use credentials::{resolve_token, Credentials, CredentialsError, TOKEN_ENV_VAR};
