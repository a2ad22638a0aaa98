use serde::{Deserialize, Serialize};

/// Health descriptor from the chat backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    /// Status string, "healthy" when all dependencies are up.
    pub status: String,

    /// Backend version, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Per-dependency detail (vector store, model endpoint, ...).
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl HealthStatus {
    /// Returns true if the backend reported itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}
