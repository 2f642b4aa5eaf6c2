//! Diet options and the user's diet choice
//!
//! The planning service enumerates its diets as plain labels, one of which is
//! the sentinel `"Custom Diet"`. Inside the client that sentinel never travels
//! as a string: it becomes [`DietOption::Custom`] when options are loaded and
//! [`DietChoice::Custom`] once selected, and is only turned back into the
//! label when a request is serialized.

use std::fmt;

use tracing::debug;

/// Label the service uses for a free-text diet description
pub const CUSTOM_DIET_LABEL: &str = "Custom Diet";

/// One selectable entry in the diet list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DietOption {
    /// A diet the service knows by name
    Predefined(String),
    /// The user describes their own diet
    Custom,
}

impl DietOption {
    /// Map a label received from `/diets` to an option
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        if label == CUSTOM_DIET_LABEL {
            Self::Custom
        } else {
            Self::Predefined(label)
        }
    }

    /// Label shown in the diet list
    pub fn label(&self) -> &str {
        match self {
            Self::Predefined(label) => label,
            Self::Custom => CUSTOM_DIET_LABEL,
        }
    }

    /// Turn this option into a fresh choice
    pub fn to_choice(&self) -> DietChoice {
        match self {
            Self::Predefined(label) => DietChoice::Predefined(label.clone()),
            Self::Custom => DietChoice::Custom(String::new()),
        }
    }
}

impl fmt::Display for DietOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The diet the user picked for this week's plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DietChoice {
    /// A server-enumerated diet label
    Predefined(String),
    /// Free-text description, as typed (not yet trimmed)
    Custom(String),
}

impl DietChoice {
    /// Whether the choice carries everything a plan request needs
    ///
    /// A custom diet needs a description that is non-empty after trimming.
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Predefined(_) => true,
            Self::Custom(description) => !description.trim().is_empty(),
        }
    }

    /// Value sent as `diet_choice`
    pub fn wire_label(&self) -> &str {
        match self {
            Self::Predefined(label) => label,
            Self::Custom(_) => CUSTOM_DIET_LABEL,
        }
    }

    /// Value sent as `custom_diet_description`: trimmed, and only for custom diets
    pub fn wire_description(&self) -> Option<String> {
        match self {
            Self::Predefined(_) => None,
            Self::Custom(description) => Some(description.trim().to_string()),
        }
    }

    /// Whether this choice came from the given list option
    pub fn matches(&self, option: &DietOption) -> bool {
        match (self, option) {
            (Self::Predefined(a), DietOption::Predefined(b)) => a == b,
            (Self::Custom(_), DietOption::Custom) => true,
            _ => false,
        }
    }
}

/// Convert the raw `/diets` payload into options, preserving order
pub fn parse_diet_options(labels: Vec<String>) -> Vec<DietOption> {
    debug!(count = labels.len(), "parse_diet_options: called");
    labels.into_iter().map(DietOption::from_label).collect()
}
