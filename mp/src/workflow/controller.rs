//! Plan workflow controller
//!
//! Owns a [`WorkflowState`] and a [`PlannerApi`] client, and runs each
//! network operation end to end: begin on the state, await the client,
//! finish on the state. Failures never escape; they land in the state's
//! error fields.

use std::sync::Arc;

use tracing::debug;

use super::state::{SubmitOutcome, WorkflowState};
use crate::api::PlannerApi;

/// Controller for one plan-form session
pub struct PlanWorkflow {
    api: Arc<dyn PlannerApi>,
    state: WorkflowState,
}

impl PlanWorkflow {
    pub fn new(api: Arc<dyn PlannerApi>) -> Self {
        debug!("PlanWorkflow::new: called");
        Self {
            api,
            state: WorkflowState::new(),
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut WorkflowState {
        &mut self.state
    }

    /// Startup loads: diet options, then saved history
    pub async fn initialize(&mut self) {
        debug!("PlanWorkflow::initialize: called");
        self.load_diet_options().await;
        self.load_history().await;
    }

    /// Fetch the diet list; failure sets the form error
    pub async fn load_diet_options(&mut self) {
        debug!("PlanWorkflow::load_diet_options: called");
        let result = self.api.diets().await;
        self.state.apply_diet_options(result);
    }

    /// Fetch saved plans; failure sets the history error and keeps the old list
    pub async fn load_history(&mut self) -> bool {
        debug!("PlanWorkflow::load_history: called");
        let ticket = self.state.begin_history_load();
        let result = self.api.history().await;
        self.state.finish_history_load(ticket, result)
    }

    /// Submit the form
    ///
    /// Returns `None` when the form is not submittable. On success the
    /// history is reloaded; a history failure does not change the outcome.
    pub async fn submit_plan_request(&mut self) -> Option<SubmitOutcome> {
        debug!("PlanWorkflow::submit_plan_request: called");
        let request = self.state.begin_submit()?;
        let result = self.api.create_plan(&request).await;
        let outcome = self.state.finish_submit(result);

        if outcome == SubmitOutcome::Planned {
            debug!("PlanWorkflow::submit_plan_request: refreshing history");
            self.load_history().await;
        }
        Some(outcome)
    }
}
