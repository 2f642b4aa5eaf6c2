//! Plan workflow state
//!
//! Pure data plus the synchronous halves of every workflow operation. No I/O
//! happens here: network calls are issued by whoever owns the state (the
//! [`PlanWorkflow`](super::PlanWorkflow) controller or the TUI runner), which
//! calls `begin_*` before the request and `finish_*` with its result.

use tracing::{debug, info, warn};

use crate::api::{ApiError, PlanRequest, PlanResponse};
use crate::domain::{DietChoice, DietOption, HistoryEntry, Pantry, Plan, parse_diet_options};

/// Shown when `/diets` cannot be loaded
pub const DIETS_LOAD_ERROR: &str = "Unable to load diet options";

/// Shown when `/history` cannot be loaded
pub const HISTORY_LOAD_ERROR: &str = "Unable to load saved plans";

/// Shown when `/plan` fails without a server-supplied detail
pub const PLAN_SERVICE_ERROR: &str = "The AI service returned an error";

/// Shown when `/plan` fails before a usable response arrives
pub const PLAN_GENERIC_ERROR: &str = "Something went wrong while generating the plan";

/// Sequence number handed out when a history load starts
///
/// Only a result carrying a ticket newer than the last applied one is used,
/// so overlapping loads cannot roll the list back to an older snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HistoryTicket(u64);

/// Result of finishing a plan submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// New plan installed; history should be reloaded
    Planned,
    /// Error text set; previous plan left in place
    Failed,
}

/// Session state of the plan form
#[derive(Debug, Default)]
pub struct WorkflowState {
    diet_options: Vec<DietOption>,
    pantry: Pantry,
    item_draft: String,
    weekly_goal: String,
    diet_choice: Option<DietChoice>,
    /// Custom description kept while another diet is selected
    stashed_custom: String,
    loading: bool,
    error: Option<String>,
    plan: Option<Plan>,
    history: Vec<HistoryEntry>,
    history_error: Option<String>,
    history_issued: u64,
    history_applied: u64,
}

impl WorkflowState {
    pub fn new() -> Self {
        debug!("WorkflowState::new: called");
        Self::default()
    }

    // === Accessors ===

    pub fn diet_options(&self) -> &[DietOption] {
        &self.diet_options
    }

    pub fn pantry_items(&self) -> &[String] {
        self.pantry.items()
    }

    pub fn item_draft(&self) -> &str {
        &self.item_draft
    }

    pub fn weekly_goal(&self) -> &str {
        &self.weekly_goal
    }

    pub fn diet_choice(&self) -> Option<&DietChoice> {
        self.diet_choice.as_ref()
    }

    /// Description typed for a custom diet, if that is the current choice
    pub fn custom_description(&self) -> Option<&str> {
        match &self.diet_choice {
            Some(DietChoice::Custom(text)) => Some(text),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Plan-request error text (also used for diet loading failures)
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn history_error(&self) -> Option<&str> {
        self.history_error.as_deref()
    }

    // === Form editing ===

    pub fn set_item_draft(&mut self, draft: impl Into<String>) {
        self.item_draft = draft.into();
    }

    pub fn item_draft_mut(&mut self) -> &mut String {
        &mut self.item_draft
    }

    pub fn set_weekly_goal(&mut self, goal: impl Into<String>) {
        self.weekly_goal = goal.into();
    }

    pub fn weekly_goal_mut(&mut self) -> &mut String {
        &mut self.weekly_goal
    }

    /// Add a pantry item from `draft`
    ///
    /// Blank drafts are ignored. On success the draft buffer is cleared.
    pub fn add_pantry_item(&mut self, draft: &str) -> bool {
        debug!(%draft, "add_pantry_item: called");
        if !self.pantry.add(draft) {
            return false;
        }
        self.item_draft.clear();
        true
    }

    /// Add whatever is in the draft buffer
    pub fn commit_item_draft(&mut self) -> bool {
        let draft = self.item_draft.clone();
        self.add_pantry_item(&draft)
    }

    /// Remove the pantry item at `index`; out-of-range is a no-op
    pub fn remove_pantry_item(&mut self, index: usize) -> Option<String> {
        debug!(index, "remove_pantry_item: called");
        self.pantry.remove(index)
    }

    /// Select a diet from the option list
    ///
    /// Custom text survives switching to another diet and back; only
    /// [`reset`](Self::reset) clears it.
    pub fn select_diet(&mut self, option: &DietOption) {
        debug!(%option, "select_diet: called");
        if self.diet_choice.as_ref().is_some_and(|c| c.matches(option)) {
            return;
        }
        self.set_diet_choice(Some(option.to_choice()));
    }

    /// Set the choice directly
    ///
    /// A custom choice with empty text picks up the stashed description.
    pub fn set_diet_choice(&mut self, choice: Option<DietChoice>) {
        if let Some(DietChoice::Custom(text)) = self.diet_choice.take() {
            self.stashed_custom = text;
        }
        self.diet_choice = match choice {
            Some(DietChoice::Custom(text)) if text.is_empty() => {
                Some(DietChoice::Custom(std::mem::take(&mut self.stashed_custom)))
            }
            Some(DietChoice::Custom(text)) => {
                self.stashed_custom.clear();
                Some(DietChoice::Custom(text))
            }
            other => other,
        };
    }

    /// Update the custom description; ignored unless a custom diet is selected
    pub fn set_custom_description(&mut self, text: impl Into<String>) -> bool {
        match &mut self.diet_choice {
            Some(DietChoice::Custom(description)) => {
                *description = text.into();
                true
            }
            _ => false,
        }
    }

    pub fn custom_description_mut(&mut self) -> Option<&mut String> {
        match &mut self.diet_choice {
            Some(DietChoice::Custom(description)) => Some(description),
            _ => None,
        }
    }

    /// Whether a plan request may be sent with the current fields
    pub fn can_submit(&self) -> bool {
        if self.weekly_goal.is_empty() {
            return false;
        }
        match &self.diet_choice {
            Some(choice) if choice.is_complete() => !self.pantry.is_empty(),
            _ => false,
        }
    }

    // === Submission ===

    /// Start a submission
    ///
    /// Returns the request to send, or `None` if the form is not submittable
    /// or a submission is already in flight. Sets loading and clears the
    /// previous error.
    pub fn begin_submit(&mut self) -> Option<PlanRequest> {
        debug!(loading = self.loading, "begin_submit: called");
        if self.loading || !self.can_submit() {
            debug!("begin_submit: not submittable");
            return None;
        }
        let diet = self.diet_choice.as_ref()?;
        let request = PlanRequest::new(self.pantry.items().to_vec(), self.weekly_goal.clone(), diet);

        self.loading = true;
        self.error = None;
        Some(request)
    }

    /// Finish a submission with the service's result
    ///
    /// Loading is always cleared. A failure leaves the current plan untouched.
    pub fn finish_submit(&mut self, result: Result<PlanResponse, ApiError>) -> SubmitOutcome {
        self.loading = false;
        match result {
            Ok(response) => {
                info!(days = response.plan.len(), "finish_submit: plan received");
                self.plan = Some(response.plan);
                SubmitOutcome::Planned
            }
            Err(e) => {
                warn!(error = %e, "finish_submit: plan request failed");
                let message = match &e {
                    ApiError::Server { .. } => e.user_message(PLAN_SERVICE_ERROR),
                    _ => PLAN_GENERIC_ERROR.to_string(),
                };
                self.error = Some(message);
                SubmitOutcome::Failed
            }
        }
    }

    // === Loading ===

    /// Install the diet list, or record the failure as the form error
    pub fn apply_diet_options(&mut self, result: Result<Vec<String>, ApiError>) {
        match result {
            Ok(labels) => {
                debug!(count = labels.len(), "apply_diet_options: loaded");
                self.diet_options = parse_diet_options(labels);
            }
            Err(e) => {
                warn!(error = %e, "apply_diet_options: failed to load diet options");
                self.error = Some(DIETS_LOAD_ERROR.to_string());
            }
        }
    }

    /// Issue a ticket for a new history load
    pub fn begin_history_load(&mut self) -> HistoryTicket {
        self.history_issued += 1;
        debug!(seq = self.history_issued, "begin_history_load: called");
        HistoryTicket(self.history_issued)
    }

    /// Apply a history result if it is newer than anything applied so far
    ///
    /// Returns whether the result was applied. On failure the previous list
    /// is kept and the history error is set.
    pub fn finish_history_load(&mut self, ticket: HistoryTicket, result: Result<Vec<HistoryEntry>, ApiError>) -> bool {
        if ticket.0 <= self.history_applied {
            debug!(
                seq = ticket.0,
                applied = self.history_applied,
                "finish_history_load: stale result dropped"
            );
            return false;
        }
        self.history_applied = ticket.0;

        match result {
            Ok(entries) => {
                debug!(count = entries.len(), "finish_history_load: history replaced");
                self.history = entries;
                self.history_error = None;
            }
            Err(e) => {
                warn!(error = %e, "finish_history_load: failed to load history");
                self.history_error = Some(HISTORY_LOAD_ERROR.to_string());
            }
        }
        true
    }

    // === Reset / history viewing ===

    /// Clear the form, plan and plan error; history and diet options stay
    pub fn reset(&mut self) {
        debug!("reset: called");
        self.pantry.clear();
        self.item_draft.clear();
        self.weekly_goal.clear();
        self.diet_choice = None;
        self.stashed_custom.clear();
        self.plan = None;
        self.error = None;
    }

    /// Show a saved plan in place of the current one
    pub fn view_history_entry(&mut self, entry: &HistoryEntry) {
        debug!(id = %entry.id, "view_history_entry: called");
        self.plan = Some(entry.plan.clone());
    }

    /// Show the saved plan at `index` in the history list
    pub fn view_history_at(&mut self, index: usize) -> bool {
        match self.history.get(index) {
            Some(entry) => {
                self.plan = Some(entry.plan.clone());
                true
            }
            None => false,
        }
    }
}
