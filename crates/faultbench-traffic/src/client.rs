//! Authenticated HTTP client for faultbench-service

use crate::auth::AuthToken;
use crate::error::{TrafficError, TrafficResult};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Client that attaches the session bearer token to every request
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    base_url: String,
    token: AuthToken,
}

impl ServiceClient {
    /// Create a client whose requests time out after `request_timeout`
    pub fn new(base_url: &str, token: AuthToken, request_timeout: Duration) -> TrafficResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| TrafficError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path`, returning the response status
    pub async fn get(&self, path: &str) -> Result<StatusCode, reqwest::Error> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(self.token.secret())
            .send()
            .await?;
        Ok(response.status())
    }

    /// GET `path` with a timeout tighter than the client default
    pub async fn get_with_timeout(
        &self,
        path: &str,
        timeout: Duration,
    ) -> Result<StatusCode, reqwest::Error> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(self.token.secret())
            .timeout(timeout)
            .send()
            .await?;
        Ok(response.status())
    }
}
