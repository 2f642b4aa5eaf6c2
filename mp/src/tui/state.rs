//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here. The plan form
//! itself lives in [`WorkflowState`]; this module adds what only a terminal
//! needs: focus, list cursors, scroll offsets and queued network actions.

use tracing::debug;

use crate::workflow::WorkflowState;

/// Which part of the screen receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Draft buffer for the next pantry item
    #[default]
    ItemDraft,
    /// Pantry item list (select/remove)
    Pantry,
    /// Weekly goal text
    Goal,
    /// Diet option list
    Diet,
    /// Custom diet description (only reachable while Custom is selected)
    CustomDiet,
    /// Plan cards (scroll)
    Plan,
    /// Saved plan list
    History,
}

impl Focus {
    const ORDER: [Focus; 7] = [
        Focus::ItemDraft,
        Focus::Pantry,
        Focus::Goal,
        Focus::Diet,
        Focus::CustomDiet,
        Focus::Plan,
        Focus::History,
    ];

    fn reachable(self, custom_visible: bool) -> bool {
        self != Focus::CustomDiet || custom_visible
    }

    fn step(self, custom_visible: bool, forward: bool) -> Self {
        let len = Self::ORDER.len();
        let mut idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        loop {
            idx = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
            let candidate = Self::ORDER[idx];
            if candidate.reachable(custom_visible) {
                return candidate;
            }
        }
    }

    /// Next focus target in Tab order
    pub fn next(self, custom_visible: bool) -> Self {
        debug!(?self, custom_visible, "Focus::next: called");
        self.step(custom_visible, true)
    }

    /// Previous focus target in Tab order
    pub fn prev(self, custom_visible: bool) -> Self {
        debug!(?self, custom_visible, "Focus::prev: called");
        self.step(custom_visible, false)
    }

    /// Whether printable keys are typed into a text field here
    pub fn is_text_input(self) -> bool {
        matches!(self, Focus::ItemDraft | Focus::Goal | Focus::CustomDiet)
    }

    /// Whether this field is part of the form (disabled while loading)
    pub fn is_form_field(self) -> bool {
        matches!(
            self,
            Focus::ItemDraft | Focus::Pantry | Focus::Goal | Focus::Diet | Focus::CustomDiet
        )
    }
}

/// Network work requested by a key press, executed by the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Submit,
    ReloadHistory,
    ReloadDiets,
}

/// Service links shown once a plan is on screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceLinks {
    pub base_url: String,
    pub csv_url: String,
    pub dashboard_url: String,
}

/// Main TUI application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Plan form, plan and history
    pub workflow: WorkflowState,
    pub focus: Focus,
    /// Help overlay visible
    pub show_help: bool,
    /// Cursor in the pantry list
    pub pantry_selected: usize,
    /// Cursor in the diet list
    pub diet_selected: usize,
    /// Cursor in the history list
    pub history_selected: usize,
    /// Vertical scroll of the plan pane
    pub plan_scroll: u16,
    /// Actions queued for the runner
    pub pending_actions: Vec<PendingAction>,
    pub links: ServiceLinks,
}

impl AppState {
    pub fn new() -> Self {
        debug!("AppState::new: called");
        Self::default()
    }

    pub fn with_links(links: ServiceLinks) -> Self {
        Self {
            links,
            ..Self::default()
        }
    }

    /// Whether the custom description field is shown
    pub fn custom_visible(&self) -> bool {
        self.workflow.custom_description().is_some()
    }

    /// Queue a network action, ignoring duplicates
    pub fn queue(&mut self, action: PendingAction) {
        if !self.pending_actions.contains(&action) {
            debug!(?action, "AppState::queue: queued");
            self.pending_actions.push(action);
        }
    }

    /// Drain queued actions in order
    pub fn take_pending_actions(&mut self) -> Vec<PendingAction> {
        std::mem::take(&mut self.pending_actions)
    }

    /// Keep list cursors inside their lists after the lists change
    pub fn clamp_selections(&mut self) {
        self.pantry_selected = clamp_index(self.pantry_selected, self.workflow.pantry_items().len());
        self.diet_selected = clamp_index(self.diet_selected, self.workflow.diet_options().len());
        self.history_selected = clamp_index(self.history_selected, self.workflow.history().len());
        if !self.custom_visible() && self.focus == Focus::CustomDiet {
            self.focus = Focus::Diet;
        }
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { index.min(len - 1) }
}
