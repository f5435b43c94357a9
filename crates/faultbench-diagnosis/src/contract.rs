//! Query/response contract of the external diagnosis agent

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Period of telemetry the agent looked at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: chrono::DateTime<chrono::Utc>,
    pub end: chrono::DateTime<chrono::Utc>,
}

/// Outcome of one natural-language investigation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestigationResult {
    pub success: bool,
    pub service_name: String,
    pub root_cause: String,
    /// Always within [0, 1]
    #[serde(deserialize_with = "clamped_confidence")]
    pub confidence: f64,
    pub duration_seconds: f64,
    pub metrics_analyzed: u64,
    pub logs_analyzed: u64,
    pub time_window: Option<TimeWindow>,
    pub summary: String,
    /// Non-fatal problems the agent hit while analyzing
    pub errors: Vec<String>,
    /// Why the investigation failed, when `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InvestigationResult {
    /// A failed investigation carrying `error`
    pub fn failed(service_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            service_name: service_name.into(),
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

fn clamped_confidence<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    })
}

/// Request body sent to the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisQuery {
    pub query_id: Uuid,
    pub query: String,
    pub service_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Anything that can answer health and root-cause questions about a service
#[async_trait]
pub trait DiagnosisAgent: Send + Sync {
    /// Investigate `query` for `service_name`.
    ///
    /// Failures are reported through [`InvestigationResult::failed`], never
    /// as an error.
    async fn handle_query(&self, query: &str, service_name: &str) -> InvestigationResult;
}
