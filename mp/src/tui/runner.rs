//! TUI runner - main event loop
//!
//! Handles:
//! - Terminal setup and teardown
//! - Dispatching key events to App for handling
//! - Spawning planner requests and applying their results
//! - Rendering at ~30 FPS

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::{PendingAction, ServiceLinks};
use super::views;
use crate::api::{ApiError, PlanResponse, PlannerApi};
use crate::domain::HistoryEntry;
use crate::workflow::{HistoryTicket, SubmitOutcome};

/// Result from a background planner request
#[derive(Debug)]
enum TaskResult {
    Diets(Result<Vec<String>, ApiError>),
    History(HistoryTicket, Result<Vec<HistoryEntry>, ApiError>),
    Plan(Result<PlanResponse, ApiError>),
}

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Planner service client
    api: Arc<dyn PlannerApi>,
    /// Event handler
    event_handler: EventHandler,
    /// Sender cloned into each spawned request
    result_tx: mpsc::UnboundedSender<TaskResult>,
    /// Receiver for finished requests
    result_rx: mpsc::UnboundedReceiver<TaskResult>,
}

impl TuiRunner {
    pub fn new(terminal: Tui, api: Arc<dyn PlannerApi>, links: ServiceLinks) -> Self {
        debug!(base_url = %links.base_url, "TuiRunner::new: called");
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        Self {
            app: App::with_links(links),
            terminal,
            api,
            event_handler: EventHandler::new(Duration::from_millis(33)), // ~30 FPS
            result_tx,
            result_rx,
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: called");
        self.app.state_mut().queue(PendingAction::ReloadDiets);
        self.app.state_mut().queue(PendingAction::ReloadHistory);

        loop {
            self.dispatch_pending();

            self.terminal.draw(|frame| views::render(self.app.state(), frame))?;

            tokio::select! {
                event = self.event_handler.next() => {
                    match event? {
                        Event::Tick => {}
                        Event::Key(key_event) => {
                            debug!(?key_event, "TuiRunner::run: key");
                            if self.app.handle_key(key_event) {
                                debug!("TuiRunner::run: quit requested");
                                break;
                            }
                        }
                        Event::Resize(width, height) => {
                            debug!(width, height, "TuiRunner::run: resize");
                        }
                    }
                }
                Some(result) = self.result_rx.recv() => {
                    self.apply_result(result);
                }
            }
        }

        debug!("TuiRunner::run: exiting");
        Ok(())
    }

    /// Start the network work queued by key handling
    fn dispatch_pending(&mut self) {
        for action in self.app.state_mut().take_pending_actions() {
            debug!(?action, "TuiRunner::dispatch_pending: dispatching");
            match action {
                PendingAction::Submit => self.spawn_submit(),
                PendingAction::ReloadHistory => self.spawn_history(),
                PendingAction::ReloadDiets => self.spawn_diets(),
            }
        }
    }

    fn spawn_diets(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.result_tx.clone();
        tokio::spawn(async move {
            let result = api.diets().await;
            let _ = tx.send(TaskResult::Diets(result));
        });
    }

    fn spawn_history(&mut self) {
        let ticket = self.app.state_mut().workflow.begin_history_load();
        let api = Arc::clone(&self.api);
        let tx = self.result_tx.clone();
        tokio::spawn(async move {
            let result = api.history().await;
            let _ = tx.send(TaskResult::History(ticket, result));
        });
    }

    fn spawn_submit(&mut self) {
        let Some(request) = self.app.state_mut().workflow.begin_submit() else {
            debug!("TuiRunner::spawn_submit: form not submittable");
            return;
        };
        info!(items = request.available_items.len(), "Submitting plan request");
        let api = Arc::clone(&self.api);
        let tx = self.result_tx.clone();
        tokio::spawn(async move {
            let result = api.create_plan(&request).await;
            let _ = tx.send(TaskResult::Plan(result));
        });
    }

    fn apply_result(&mut self, result: TaskResult) {
        let state = self.app.state_mut();
        match result {
            TaskResult::Diets(result) => {
                debug!(ok = result.is_ok(), "TuiRunner::apply_result: diets");
                state.workflow.apply_diet_options(result);
            }
            TaskResult::History(ticket, result) => {
                debug!(?ticket, ok = result.is_ok(), "TuiRunner::apply_result: history");
                if !state.workflow.finish_history_load(ticket, result) {
                    warn!(?ticket, "Dropped stale history response");
                }
            }
            TaskResult::Plan(result) => {
                debug!(ok = result.is_ok(), "TuiRunner::apply_result: plan");
                if state.workflow.finish_submit(result) == SubmitOutcome::Planned {
                    info!("Plan generated");
                    state.plan_scroll = 0;
                    state.queue(PendingAction::ReloadHistory);
                }
            }
        }
        state.clamp_selections();
    }
}
