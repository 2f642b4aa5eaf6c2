//! PlannerApi trait definition

use async_trait::async_trait;

use super::{ApiError, PlanRequest, PlanResponse};
use crate::domain::HistoryEntry;

/// Client for the external meal-planning service
///
/// Every call is an independent HTTP round trip. Implementations must not
/// retry; the workflow leaves retries to the user.
#[async_trait]
pub trait PlannerApi: Send + Sync {
    /// `GET /diets` - supported diet labels, in display order
    async fn diets(&self) -> Result<Vec<String>, ApiError>;

    /// `GET /history` - saved plans, newest first
    async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError>;

    /// `POST /plan` - generate and persist a new weekly plan
    async fn create_plan(&self, request: &PlanRequest) -> Result<PlanResponse, ApiError>;

    /// `GET /plan/csv` - the most recent plan as CSV text
    async fn plan_csv(&self) -> Result<String, ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// Mock planner client for unit tests
    ///
    /// Each endpoint pops from its own queue of canned results. An empty
    /// queue yields a decode error.
    #[derive(Default)]
    pub struct MockPlannerApi {
        diets: Mutex<VecDeque<Result<Vec<String>, ApiError>>>,
        history: Mutex<VecDeque<Result<Vec<HistoryEntry>, ApiError>>>,
        plans: Mutex<VecDeque<Result<PlanResponse, ApiError>>>,
        requests: Mutex<Vec<PlanRequest>>,
        history_calls: AtomicUsize,
    }

    fn pop<T>(queue: &Mutex<VecDeque<Result<T, ApiError>>>, what: &str) -> Result<T, ApiError> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Decode(format!("No more mock {what} responses"))))
    }

    impl MockPlannerApi {
        pub fn new() -> Self {
            debug!("MockPlannerApi::new: called");
            Self::default()
        }

        pub fn with_diets(self, result: Result<Vec<String>, ApiError>) -> Self {
            self.diets.lock().unwrap().push_back(result);
            self
        }

        pub fn with_history(self, result: Result<Vec<HistoryEntry>, ApiError>) -> Self {
            self.history.lock().unwrap().push_back(result);
            self
        }

        pub fn with_plan(self, result: Result<PlanResponse, ApiError>) -> Self {
            self.plans.lock().unwrap().push_back(result);
            self
        }

        /// Plan requests received so far
        pub fn requests(&self) -> Vec<PlanRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn history_calls(&self) -> usize {
            self.history_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PlannerApi for MockPlannerApi {
        async fn diets(&self) -> Result<Vec<String>, ApiError> {
            debug!("MockPlannerApi::diets: called");
            pop(&self.diets, "diets")
        }

        async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
            debug!("MockPlannerApi::history: called");
            self.history_calls.fetch_add(1, Ordering::SeqCst);
            pop(&self.history, "history")
        }

        async fn create_plan(&self, request: &PlanRequest) -> Result<PlanResponse, ApiError> {
            debug!("MockPlannerApi::create_plan: called");
            self.requests.lock().unwrap().push(request.clone());
            pop(&self.plans, "plan")
        }

        async fn plan_csv(&self) -> Result<String, ApiError> {
            debug!("MockPlannerApi::plan_csv: called");
            Ok("day,meal,rationale,recipe,nutritional_value\n".to_string())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_returns_queued_results_in_order() {
            let api = MockPlannerApi::new()
                .with_diets(Ok(vec!["Paleo Diet".to_string()]))
                .with_diets(Err(ApiError::Server { status: 503, detail: None }));

            assert_eq!(api.diets().await.unwrap(), vec!["Paleo Diet".to_string()]);
            assert!(api.diets().await.is_err());
            // Exhausted
            assert!(matches!(api.diets().await, Err(ApiError::Decode(_))));
        }

        #[tokio::test]
        async fn test_mock_records_requests() {
            let api = MockPlannerApi::new().with_plan(Ok(PlanResponse::default()));
            let req = PlanRequest {
                available_items: vec!["rice".to_string()],
                weekly_goal: "save money".to_string(),
                diet_choice: "Flexitarian Diet".to_string(),
                custom_diet_description: None,
            };
            api.create_plan(&req).await.unwrap();
            assert_eq!(api.requests(), vec![req]);
        }
    }
}
