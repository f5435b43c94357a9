//! HTTP client for a diagnosis agent exposing `POST /query`

use crate::contract::{DiagnosisAgent, DiagnosisQuery, InvestigationResult};
use crate::error::{DiagnosisError, DiagnosisResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use uuid::Uuid;

/// Diagnosis agent reached over HTTP
pub struct HttpDiagnosisAgent {
    client: Client,
    base_url: String,
    project_id: Option<String>,
}

impl HttpDiagnosisAgent {
    /// Create a new agent client
    pub fn new(endpoint: &str, project_id: Option<String>, timeout: Duration) -> DiagnosisResult<Self> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| DiagnosisError::Config(format!("invalid agent URL {}: {}", base_url, e)))?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            project_id,
        })
    }

    async fn query(&self, query: &str, service_name: &str) -> DiagnosisResult<InvestigationResult> {
        let request = DiagnosisQuery {
            query_id: Uuid::new_v4(),
            query: query.to_string(),
            service_name: service_name.to_string(),
            project_id: self.project_id.clone(),
        };

        tracing::debug!(query_id = %request.query_id, "Sending diagnosis query");

        let response = self
            .client
            .post(format!("{}/query", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DiagnosisError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl DiagnosisAgent for HttpDiagnosisAgent {
    async fn handle_query(&self, query: &str, service_name: &str) -> InvestigationResult {
        match self.query(query, service_name).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(service = service_name, "Diagnosis query failed: {}", e);
                InvestigationResult::failed(service_name, e.to_string())
            }
        }
    }
}
