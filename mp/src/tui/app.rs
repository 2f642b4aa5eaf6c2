//! TUI application - event handling and state management
//!
//! The App struct owns the AppState and handles all keyboard events.
//! It does not do any rendering or networking: rendering is delegated to the
//! views module, and network work is queued as [`PendingAction`]s for the
//! runner.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace};

use super::state::{AppState, Focus, PendingAction, ServiceLinks};

/// TUI application
#[derive(Debug)]
pub struct App {
    /// Application state
    state: AppState,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new application instance
    pub fn new() -> Self {
        debug!("App::new: called");
        Self { state: AppState::new() }
    }

    /// Create an application that shows the given service links
    pub fn with_links(links: ServiceLinks) -> Self {
        debug!(?links, "App::with_links: called");
        Self {
            state: AppState::with_links(links),
        }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        trace!("App::state: called");
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        trace!("App::state_mut: called");
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");

        if self.state.show_help {
            debug!("App::handle_key: closing help overlay");
            self.state.show_help = false;
            return false;
        }

        // Global chords work from any focus
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                debug!("App::handle_key: Ctrl+C quit");
                return true;
            }
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                self.handle_submit();
                return false;
            }
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
                self.handle_reset();
                return false;
            }
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => {
                debug!("App::handle_key: reload history");
                self.state.queue(PendingAction::ReloadHistory);
                return false;
            }
            (KeyCode::Tab, _) => {
                self.state.focus = self.state.focus.next(self.state.custom_visible());
                return false;
            }
            (KeyCode::BackTab, _) => {
                self.state.focus = self.state.focus.prev(self.state.custom_visible());
                return false;
            }
            (KeyCode::F(1), _) => {
                self.state.show_help = true;
                return false;
            }
            _ => {}
        }

        if !self.state.focus.is_text_input() {
            match key.code {
                KeyCode::Char('q') => {
                    debug!("App::handle_key: quit requested");
                    return true;
                }
                KeyCode::Char('?') => {
                    self.state.show_help = true;
                    return false;
                }
                _ => {}
            }
        }

        if self.state.focus.is_form_field() && self.state.workflow.is_loading() {
            debug!("App::handle_key: form disabled while loading");
            return false;
        }

        match self.state.focus {
            Focus::ItemDraft => self.handle_item_draft_key(key),
            Focus::Pantry => self.handle_pantry_key(key),
            Focus::Goal => self.handle_goal_key(key),
            Focus::Diet => self.handle_diet_key(key),
            Focus::CustomDiet => self.handle_custom_diet_key(key),
            Focus::Plan => self.handle_plan_key(key),
            Focus::History => self.handle_history_key(key),
        }
        false
    }

    fn handle_submit(&mut self) {
        let workflow = &self.state.workflow;
        if workflow.is_loading() || !workflow.can_submit() {
            debug!("App::handle_submit: form not submittable");
            return;
        }
        debug!("App::handle_submit: queuing submit");
        self.state.queue(PendingAction::Submit);
    }

    fn handle_reset(&mut self) {
        if self.state.workflow.is_loading() {
            debug!("App::handle_reset: ignored while loading");
            return;
        }
        debug!("App::handle_reset: resetting form");
        self.state.workflow.reset();
        self.state.plan_scroll = 0;
        self.state.focus = Focus::ItemDraft;
        self.state.clamp_selections();
    }

    fn handle_item_draft_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if self.state.workflow.commit_item_draft() {
                    self.state.pantry_selected = self.state.workflow.pantry_items().len() - 1;
                }
            }
            _ => edit_text(self.state.workflow.item_draft_mut(), key),
        }
    }

    fn handle_pantry_key(&mut self, key: KeyEvent) {
        let len = self.state.workflow.pantry_items().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.pantry_selected = self.state.pantry_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.state.pantry_selected + 1 < len {
                    self.state.pantry_selected += 1;
                }
            }
            KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('x') => {
                let index = self.state.pantry_selected;
                if let Some(removed) = self.state.workflow.remove_pantry_item(index) {
                    debug!(%removed, index, "App::handle_pantry_key: removed item");
                }
                self.state.clamp_selections();
            }
            _ => {}
        }
    }

    fn handle_goal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.state.focus = self.state.focus.next(self.state.custom_visible());
            }
            _ => edit_text(self.state.workflow.weekly_goal_mut(), key),
        }
    }

    fn handle_diet_key(&mut self, key: KeyEvent) {
        let len = self.state.workflow.diet_options().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.diet_selected = self.state.diet_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.state.diet_selected + 1 < len {
                    self.state.diet_selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let Some(option) = self.state.workflow.diet_options().get(self.state.diet_selected).cloned() else {
                    debug!("App::handle_diet_key: no diet options loaded");
                    return;
                };
                self.state.workflow.select_diet(&option);
                if self.state.custom_visible() {
                    self.state.focus = Focus::CustomDiet;
                }
            }
            _ => {}
        }
    }

    fn handle_custom_diet_key(&mut self, key: KeyEvent) {
        if let Some(text) = self.state.workflow.custom_description_mut() {
            edit_text(text, key);
        }
    }

    fn handle_plan_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.plan_scroll = self.state.plan_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.plan_scroll = self.state.plan_scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                self.state.plan_scroll = self.state.plan_scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                self.state.plan_scroll = self.state.plan_scroll.saturating_add(10);
            }
            KeyCode::Home | KeyCode::Char('g') => self.state.plan_scroll = 0,
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        let len = self.state.workflow.history().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.history_selected = self.state.history_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.state.history_selected + 1 < len {
                    self.state.history_selected += 1;
                }
            }
            KeyCode::Enter => {
                if self.state.workflow.view_history_at(self.state.history_selected) {
                    debug!(index = self.state.history_selected, "App::handle_history_key: viewing saved plan");
                    self.state.plan_scroll = 0;
                }
            }
            _ => {}
        }
    }
}

/// Apply a line-editing key to a text buffer
fn edit_text(buffer: &mut String, key: KeyEvent) {
    match key.code {
        KeyCode::Backspace => {
            buffer.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => buffer.push(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PlanResponse;
    use crate::domain::{HistoryEntry, HistoryId, PlanEntry};

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::from(code))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn ctrl(app: &mut App, c: char) -> bool {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn filled_app() -> App {
        let mut app = App::new();
        app.state_mut()
            .workflow
            .apply_diet_options(Ok(vec!["Balanced".to_string(), "Custom Diet".to_string()]));
        type_str(&mut app, "eggs");
        press(&mut app, KeyCode::Enter);
        app.state_mut().focus = Focus::Goal;
        type_str(&mut app, "more protein");
        app.state_mut().focus = Focus::Diet;
        press(&mut app, KeyCode::Enter);
        app
    }

    #[test]
    fn test_app_new() {
        let app = App::new();
        assert_eq!(app.state().focus, Focus::ItemDraft);
        assert!(!app.state().show_help);
    }

    #[test]
    fn test_app_quit_keys() {
        let mut app = App::new();
        // Ctrl+C always quits
        assert!(ctrl(&mut app, 'c'));

        // 'q' is text while typing an item
        let mut app = App::new();
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.state().workflow.item_draft(), "q");

        app.state_mut().focus = Focus::History;
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_typing_and_adding_items() {
        let mut app = App::new();
        type_str(&mut app, " tomatoes ");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "basil");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state().workflow.pantry_items(), ["tomatoes", "basi"]);
        assert_eq!(app.state().workflow.item_draft(), "");
        assert_eq!(app.state().pantry_selected, 1);
    }

    #[test]
    fn test_remove_selected_item() {
        let mut app = App::new();
        for item in ["a", "b", "c"] {
            type_str(&mut app, item);
            press(&mut app, KeyCode::Enter);
        }
        app.state_mut().focus = Focus::Pantry;
        app.state_mut().pantry_selected = 0;
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.state().workflow.pantry_items(), ["a", "c"]);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.state().workflow.pantry_items(), ["a"]);
        assert_eq!(app.state().pantry_selected, 0);
    }

    #[test]
    fn test_submit_queued_only_when_valid() {
        let mut app = App::new();
        ctrl(&mut app, 's');
        assert!(app.state().pending_actions.is_empty());

        let mut app = filled_app();
        assert!(app.state().workflow.can_submit());
        ctrl(&mut app, 's');
        assert_eq!(app.state().pending_actions, vec![PendingAction::Submit]);
    }

    #[test]
    fn test_custom_diet_focus_and_text() {
        let mut app = filled_app();
        app.state_mut().focus = Focus::Diet;
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state().focus, Focus::CustomDiet);
        assert!(!app.state().workflow.can_submit());

        type_str(&mut app, "  ");
        assert!(!app.state().workflow.can_submit());
        type_str(&mut app, "no dairy");
        assert_eq!(app.state().workflow.custom_description(), Some("  no dairy"));
        assert!(app.state().workflow.can_submit());
    }

    #[test]
    fn test_form_locked_while_loading() {
        let mut app = filled_app();
        assert!(app.state_mut().workflow.begin_submit().is_some());
        app.state_mut().focus = Focus::ItemDraft;
        type_str(&mut app, "rice");
        assert_eq!(app.state().workflow.item_draft(), "");

        ctrl(&mut app, 'r');
        assert_eq!(app.state().workflow.pantry_items(), ["eggs"]);
    }

    #[test]
    fn test_quit_and_help_while_loading() {
        let mut app = filled_app();
        assert!(app.state_mut().workflow.begin_submit().is_some());

        app.state_mut().focus = Focus::Pantry;
        assert!(!press(&mut app, KeyCode::Char('?')));
        assert!(app.state().show_help);
        press(&mut app, KeyCode::Esc);

        app.state_mut().focus = Focus::Diet;
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_reset_clears_form() {
        let mut app = filled_app();
        app.state_mut().workflow.begin_submit();
        app.state_mut().workflow.finish_submit(Ok(PlanResponse {
            plan: vec![PlanEntry::default()],
            ..Default::default()
        }));
        ctrl(&mut app, 'r');

        let workflow = &app.state().workflow;
        assert!(workflow.pantry_items().is_empty());
        assert_eq!(workflow.weekly_goal(), "");
        assert!(workflow.diet_choice().is_none());
        assert!(workflow.plan().is_none());
        assert_eq!(workflow.diet_options().len(), 2);
    }

    #[test]
    fn test_view_history_entry() {
        let mut app = App::new();
        let workflow = &mut app.state_mut().workflow;
        let ticket = workflow.begin_history_load();
        workflow.finish_history_load(
            ticket,
            Ok(vec![HistoryEntry {
                id: HistoryId::new("9"),
                created_at: "2025-01-01T00:00:00Z".to_string(),
                weekly_goal: None,
                diet_descriptor: None,
                plan: vec![PlanEntry {
                    day: "Monday".to_string(),
                    meal: "Lentil soup".to_string(),
                    ..Default::default()
                }],
            }]),
        );

        app.state_mut().focus = Focus::History;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state().workflow.plan().unwrap()[0].meal, "Lentil soup");
    }

    #[test]
    fn test_help_toggle() {
        let mut app = App::new();
        app.state_mut().focus = Focus::Plan;
        press(&mut app, KeyCode::Char('?'));
        assert!(app.state().show_help);
        press(&mut app, KeyCode::Char('j'));
        assert!(!app.state().show_help);
        assert_eq!(app.state().plan_scroll, 0);
    }

    #[test]
    fn test_reload_history_queued() {
        let mut app = App::new();
        ctrl(&mut app, 'l');
        assert_eq!(app.state().pending_actions, vec![PendingAction::ReloadHistory]);
    }
}
