//! HTTP implementation of the planner client
//!
//! Talks JSON to the planning service with reqwest. Non-2xx responses are
//! turned into [`ApiError::Server`] carrying the service's `detail` message
//! when one is present.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::types::ErrorBody;
use super::{ApiError, PlanRequest, PlanResponse, PlannerApi};
use crate::config::ApiConfig;
use crate::domain::HistoryEntry;

/// Planner API client over HTTP
#[derive(Debug, Clone)]
pub struct HttpPlannerClient {
    base_url: String,
    history_limit: u32,
    http: Client,
}

impl HttpPlannerClient {
    /// Create a new client from configuration
    ///
    /// No request timeout is applied unless `timeout_ms` is set.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        debug!(?config, "from_config: called");
        let mut builder = Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let http = builder.build().map_err(ApiError::Network)?;

        Ok(Self {
            base_url: config.normalized_base_url(),
            history_limit: config.clamped_history_limit(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a service path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Download link for the latest plan as CSV
    pub fn csv_url(&self) -> String {
        self.url("/plan/csv")
    }

    /// Link to the service's rendered dashboard
    pub fn dashboard_url(&self) -> String {
        self.url("/dashboard")
    }

    async fn check(response: Response) -> Result<String, ApiError> {
        let status = response.status();
        let body = response.text().await.map_err(ApiError::Network)?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::message);
            debug!(status = status.as_u16(), ?detail, "check: non-success response");
            return Err(ApiError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(body)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = Self::check(response).await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "decode: response body did not match expected shape");
            ApiError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl PlannerApi for HttpPlannerClient {
    async fn diets(&self) -> Result<Vec<String>, ApiError> {
        let url = self.url("/diets");
        debug!(%url, "diets: called");
        let response = self.http.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        let url = self.url("/history");
        debug!(%url, limit = self.history_limit, "history: called");
        let response = self
            .http
            .get(&url)
            .query(&[("limit", self.history_limit)])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create_plan(&self, request: &PlanRequest) -> Result<PlanResponse, ApiError> {
        let url = self.url("/plan");
        debug!(%url, items = request.available_items.len(), diet = %request.diet_choice, "create_plan: called");
        let response = self.http.post(&url).json(request).send().await?;
        Self::decode(response).await
    }

    async fn plan_csv(&self) -> Result<String, ApiError> {
        let url = self.csv_url();
        debug!(%url, "plan_csv: called");
        let response = self.http.get(&url).send().await?;
        Self::check(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> HttpPlannerClient {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        };
        HttpPlannerClient::from_config(&config).unwrap()
    }

    #[test]
    fn test_urls_join_without_double_slash() {
        let c = client("http://planner.local:8000/");
        assert_eq!(c.base_url(), "http://planner.local:8000");
        assert_eq!(c.url("/diets"), "http://planner.local:8000/diets");
        assert_eq!(c.csv_url(), "http://planner.local:8000/plan/csv");
        assert_eq!(c.dashboard_url(), "http://planner.local:8000/dashboard");
    }

    #[test]
    fn test_history_limit_clamped() {
        let config = ApiConfig {
            history_limit: 500,
            ..Default::default()
        };
        let c = HttpPlannerClient::from_config(&config).unwrap();
        assert_eq!(c.history_limit, 100);
    }
}
