//! Plan-request workflow
//!
//! - [`WorkflowState`] - form fields, plan, history and error text
//! - [`PlanWorkflow`] - runs the network operations against a [`PlannerApi`](crate::api::PlannerApi)

mod controller;
mod state;

pub use controller::PlanWorkflow;
pub use state::{
    DIETS_LOAD_ERROR, HISTORY_LOAD_ERROR, HistoryTicket, PLAN_GENERIC_ERROR, PLAN_SERVICE_ERROR, SubmitOutcome,
    WorkflowState,
};
