//! otto-probe - a CLI smoke-test client for the Otto agent API
//!
//! This library exposes modules for use in integration tests.

pub mod auth;
pub mod cli;
pub mod cli_output;
pub mod client;
pub mod models;
pub mod probe;
pub mod sse;
pub mod stream;
