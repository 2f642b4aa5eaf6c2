//! mealplan - weekly meal planning client
//!
//! Collects the ingredients on hand, a weekly goal and a diet preference,
//! asks the planning service for a seven-day plan, and shows the plans it
//! has saved before.
//!
//! # Modules
//!
//! - [`domain`] - pantry, diet selection, plan and history types
//! - [`api`] - planner service client trait and HTTP implementation
//! - [`workflow`] - plan form state and the controller that drives it
//! - [`tui`] - interactive terminal UI
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod tui;
pub mod workflow;

pub use api::{ApiError, HttpPlannerClient, PlanRequest, PlanResponse, PlannerApi, create_client};
pub use config::{ApiConfig, Config};
pub use domain::{DietChoice, DietOption, HistoryEntry, Pantry, Plan, PlanEntry, RecipeView};
pub use workflow::{PlanWorkflow, SubmitOutcome, WorkflowState};
