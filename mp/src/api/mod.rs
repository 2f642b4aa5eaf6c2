//! Planner API module
//!
//! Typed access to the external meal-planning service: the [`PlannerApi`]
//! trait, its reqwest-backed implementation and the request/response shapes.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod http;
mod types;

pub use client::PlannerApi;
pub use error::ApiError;
pub use http::HttpPlannerClient;
pub use types::{PlanRequest, PlanResponse};

use crate::config::ApiConfig;

/// Create a shared planner client from configuration
pub fn create_client(config: &ApiConfig) -> Result<Arc<dyn PlannerApi>, ApiError> {
    debug!(base_url = %config.base_url, "create_client: called");
    Ok(Arc::new(HttpPlannerClient::from_config(config)?))
}
