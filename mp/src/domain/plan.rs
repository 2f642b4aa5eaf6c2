//! Weekly plan, history entries and recipe rendering

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// One day's meal in a generated plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanEntry {
    pub day: String,
    pub meal: String,
    pub rationale: String,
    /// Free text; newline-delimited when the service returns steps
    pub recipe: String,
    pub nutritional_value: String,
}

impl PlanEntry {
    pub fn recipe_view(&self) -> RecipeView {
        RecipeView::from_text(&self.recipe)
    }
}

/// A weekly plan, ordered as the service returned it
pub type Plan = Vec<PlanEntry>;

/// Opaque identifier of a saved plan
///
/// The service currently sends integers; strings are accepted as well so the
/// client does not depend on the storage backend's key type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HistoryId(String);

impl HistoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HistoryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// A previously generated plan as stored by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: HistoryId,
    /// Raw timestamp text; see [`crate::domain::format_created_at`]
    pub created_at: String,
    #[serde(default)]
    pub weekly_goal: Option<String>,
    #[serde(default)]
    pub diet_descriptor: Option<String>,
    #[serde(default)]
    pub plan: Plan,
}

impl HistoryEntry {
    /// Goal for display, `—` when the service stored none
    pub fn goal_label(&self) -> &str {
        display_or_dash(self.weekly_goal.as_deref())
    }

    /// Diet for display, `—` when the service stored none
    pub fn diet_label(&self) -> &str {
        display_or_dash(self.diet_descriptor.as_deref())
    }
}

fn display_or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "—",
    }
}

/// How a recipe should be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeView {
    /// Single block of prose
    Prose(String),
    /// Ordered steps
    Steps(Vec<String>),
}

impl RecipeView {
    /// Text without a line break is prose; otherwise each non-blank trimmed line is a step
    pub fn from_text(text: &str) -> Self {
        if !text.contains('\n') {
            return Self::Prose(text.to_string());
        }
        let steps = text
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self::Steps(steps)
    }
}
