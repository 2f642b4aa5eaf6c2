//! Domain types for the plan workflow
//!
//! Plain data with no I/O: pantry list, diet selection, plan entries,
//! history entries and the display helpers derived from them.

mod diet;
mod pantry;
mod plan;
mod timestamp;

pub use diet::{CUSTOM_DIET_LABEL, DietChoice, DietOption, parse_diet_options};
pub use pantry::Pantry;
pub use plan::{HistoryEntry, HistoryId, Plan, PlanEntry, RecipeView};
pub use timestamp::{format_created_at, format_created_at_in};
