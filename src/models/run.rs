use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_id, deserialize_nullable_string};

/// Response from starting an agent run via POST /agent/start
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentStartResponse {
    /// Thread the run belongs to; created server-side when not supplied
    #[serde(deserialize_with = "deserialize_id")]
    pub thread_id: String,
    /// Identifier of the run that was just started
    #[serde(deserialize_with = "deserialize_id")]
    pub agent_run_id: String,
    /// Initial status reported by the backend
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub status: String,
}

/// Agent run metadata from GET /agent-run/{id}
///
/// Every field is defaulted: the backend omits fields depending on run
/// state and that must never fail the fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentRun {
    /// Run identifier (backend sends "id" or "agent_run_id")
    #[serde(default, deserialize_with = "deserialize_id", alias = "agent_run_id")]
    pub id: String,
    /// Free-form status string, e.g. "running", "completed", "failed"
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub status: String,
    /// Error message if the run failed
    #[serde(default)]
    pub error: Option<String>,
    /// Model identifier the run used
    #[serde(default)]
    pub model: Option<String>,
    /// When the run was created
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
