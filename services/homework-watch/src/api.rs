//! Practicum homework status API client

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::io::HttpClient;

/// Source of homework status responses
#[async_trait]
pub trait StatusSource: Send + Sync + std::fmt::Debug {
    /// Fetch all homework changes since `from_date` (epoch seconds).
    ///
    /// Returns the decoded body; its shape is checked by the caller.
    async fn fetch(&self, from_date: i64) -> crate::Result<Value>;
}

/// Client for the Practicum homework status endpoint
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", endpoint);

        Self {
            endpoint: endpoint.to_string(),
            authorization: format!("OAuth {}", token),
            http,
        }
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> crate::Result<Value> {
        let from_date = from_date.to_string();
        tracing::debug!("Requesting homework statuses from_date={}", from_date);

        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await?;

        if response.status != 200 {
            tracing::debug!(
                "Homework API returned {} with body: {}",
                response.status,
                response.body
            );
            return Err(crate::WatchError::Status {
                status: response.status,
                body: response.body,
            });
        }

        serde_json::from_str(&response.body)
            .map_err(|e| crate::WatchError::Decode(e.to_string()))
    }
}
