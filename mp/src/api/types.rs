//! Wire types for the planning service

use serde::{Deserialize, Serialize};

use crate::domain::{DietChoice, Plan};

/// Body of `POST /plan`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub available_items: Vec<String>,
    pub weekly_goal: String,
    /// Server diet label, or `"Custom Diet"`
    pub diet_choice: String,
    /// Trimmed description for custom diets, `null` otherwise
    pub custom_diet_description: Option<String>,
}

impl PlanRequest {
    pub fn new(available_items: Vec<String>, weekly_goal: impl Into<String>, diet: &DietChoice) -> Self {
        Self {
            available_items,
            weekly_goal: weekly_goal.into(),
            diet_choice: diet.wire_label().to_string(),
            custom_diet_description: diet.wire_description(),
        }
    }
}

/// Successful `POST /plan` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub plan: Plan,
    #[serde(default)]
    pub csv_endpoint: Option<String>,
    #[serde(default)]
    pub dashboard_endpoint: Option<String>,
    #[serde(default)]
    pub dashboard_db_path: Option<String>,
}

/// Error body the service sends with non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The `detail` field as a message, when it is a non-empty string
    ///
    /// Validation failures carry a structured `detail` array; those are not
    /// user-facing messages and yield `None`.
    pub fn message(self) -> Option<String> {
        match self.detail {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }
}
