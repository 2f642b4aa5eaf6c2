//! End-to-end workflow scenarios against a scripted planner

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mealplan::api::{ApiError, PlanRequest, PlanResponse, PlannerApi};
use mealplan::domain::{DietOption, HistoryEntry, HistoryId, PlanEntry, RecipeView};
use mealplan::workflow::{DIETS_LOAD_ERROR, PLAN_GENERIC_ERROR, PlanWorkflow, SubmitOutcome};

/// Planner whose responses are fixed up front; each history call returns
/// one more saved entry than the last
struct ScriptedPlanner {
    diets: Option<Vec<String>>,
    plan: Mutex<Option<Result<PlanResponse, ApiError>>>,
    history_calls: Mutex<usize>,
    requests: Mutex<Vec<PlanRequest>>,
}

impl ScriptedPlanner {
    fn new(plan: Result<PlanResponse, ApiError>) -> Self {
        Self {
            diets: Some(vec!["Balanced".to_string(), "Custom Diet".to_string()]),
            plan: Mutex::new(Some(plan)),
            history_calls: Mutex::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }
}

fn saved(n: usize) -> HistoryEntry {
    HistoryEntry {
        id: HistoryId::new(n.to_string()),
        created_at: "2025-03-01T18:30:00Z".to_string(),
        weekly_goal: Some("more protein".to_string()),
        diet_descriptor: Some("Balanced".to_string()),
        plan: Vec::new(),
    }
}

#[async_trait]
impl PlannerApi for ScriptedPlanner {
    async fn diets(&self) -> Result<Vec<String>, ApiError> {
        self.diets
            .clone()
            .ok_or_else(|| ApiError::Decode("diets unavailable".to_string()))
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        let mut calls = self.history_calls.lock().unwrap();
        let entries = (0..*calls).map(saved).collect();
        *calls += 1;
        Ok(entries)
    }

    async fn create_plan(&self, request: &PlanRequest) -> Result<PlanResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.plan
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(ApiError::Decode("no plan scripted".to_string())))
    }

    async fn plan_csv(&self) -> Result<String, ApiError> {
        Ok(String::new())
    }
}

fn week() -> Vec<PlanEntry> {
    ["Monday", "Tuesday"]
        .into_iter()
        .map(|day| PlanEntry {
            day: day.to_string(),
            meal: "Spinach omelette".to_string(),
            rationale: "High protein".to_string(),
            recipe: "Boil water\nAdd pasta\nDrain".to_string(),
            nutritional_value: "450 kcal".to_string(),
        })
        .collect()
}

fn fill_form(workflow: &mut PlanWorkflow) {
    let state = workflow.state_mut();
    state.add_pantry_item("eggs");
    state.add_pantry_item("  spinach ");
    state.set_weekly_goal("more protein");
    state.select_diet(&DietOption::from_label("Balanced"));
}

#[tokio::test]
async fn test_successful_plan_then_reset() {
    let planner = Arc::new(ScriptedPlanner::new(Ok(PlanResponse {
        plan: week(),
        ..Default::default()
    })));
    let mut workflow = PlanWorkflow::new(planner.clone());

    workflow.initialize().await;
    assert_eq!(workflow.state().diet_options().len(), 2);
    assert!(workflow.state().history().is_empty());

    fill_form(&mut workflow);
    assert!(workflow.state().can_submit());

    let outcome = workflow.submit_plan_request().await;
    assert_eq!(outcome, Some(SubmitOutcome::Planned));
    assert!(!workflow.state().is_loading());
    assert!(workflow.state().error().is_none());

    let plan = workflow.state().plan().unwrap();
    assert_eq!(plan.len(), 2);
    assert_eq!(
        plan[0].recipe_view(),
        RecipeView::Steps(vec!["Boil water".into(), "Add pasta".into(), "Drain".into()])
    );

    // History was reloaded after the plan arrived
    assert_eq!(workflow.state().history().len(), 1);

    let requests = planner.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].available_items, vec!["eggs", "spinach"]);
    assert_eq!(requests[0].diet_choice, "Balanced");
    assert_eq!(requests[0].custom_diet_description, None);

    workflow.state_mut().reset();
    let state = workflow.state();
    assert!(state.pantry_items().is_empty());
    assert!(state.weekly_goal().is_empty());
    assert!(state.diet_choice().is_none());
    assert!(state.plan().is_none());
    assert_eq!(state.history().len(), 1);
}

#[tokio::test]
async fn test_server_detail_shown_and_plan_kept() {
    let planner = Arc::new(ScriptedPlanner::new(Err(ApiError::Server {
        status: 500,
        detail: Some("model unavailable".to_string()),
    })));
    let mut workflow = PlanWorkflow::new(planner);
    fill_form(&mut workflow);

    let outcome = workflow.submit_plan_request().await;
    assert_eq!(outcome, Some(SubmitOutcome::Failed));
    assert_eq!(workflow.state().error(), Some("model unavailable"));
    assert!(workflow.state().plan().is_none());
    assert!(!workflow.state().is_loading());
}

#[tokio::test]
async fn test_transport_failure_uses_generic_message() {
    let planner = Arc::new(ScriptedPlanner::new(Err(ApiError::Decode("truncated".to_string()))));
    let mut workflow = PlanWorkflow::new(planner);
    fill_form(&mut workflow);

    workflow.submit_plan_request().await;
    assert_eq!(workflow.state().error(), Some(PLAN_GENERIC_ERROR));
}

#[tokio::test]
async fn test_blank_custom_diet_not_sent() {
    let planner = Arc::new(ScriptedPlanner::new(Ok(PlanResponse::default())));
    let mut workflow = PlanWorkflow::new(planner.clone());
    fill_form(&mut workflow);
    workflow.state_mut().select_diet(&DietOption::Custom);
    workflow.state_mut().set_custom_description("  ");

    assert!(!workflow.state().can_submit());
    assert_eq!(workflow.submit_plan_request().await, None);
    assert!(planner.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_diet_load_failure_sets_form_error() {
    let mut planner = ScriptedPlanner::new(Ok(PlanResponse::default()));
    planner.diets = None;
    let mut workflow = PlanWorkflow::new(Arc::new(planner));

    workflow.load_diet_options().await;
    assert_eq!(workflow.state().error(), Some(DIETS_LOAD_ERROR));
    assert!(workflow.state().diet_options().is_empty());
}
