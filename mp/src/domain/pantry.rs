//! Pantry item list

use tracing::debug;

/// Ingredients the user has on hand, in the order they were added
///
/// Items are stored trimmed and never empty. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pantry {
    items: Vec<String>,
}

impl Pantry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a trimmed item; returns false (and changes nothing) if the draft is blank
    pub fn add(&mut self, draft: &str) -> bool {
        let trimmed = draft.trim();
        if trimmed.is_empty() {
            debug!("Pantry::add: blank draft ignored");
            return false;
        }
        debug!(item = %trimmed, "Pantry::add: appending");
        self.items.push(trimmed.to_string());
        true
    }

    /// Remove the item at `index`; out-of-range indices are ignored
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index >= self.items.len() {
            debug!(index, len = self.items.len(), "Pantry::remove: index out of bounds");
            return None;
        }
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
