//! mealplan - weekly meal planner client
//!
//! CLI entry point: the interactive UI by default, plus one-shot commands.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail};
use tracing::{debug, info};

use mealplan::api::{HttpPlannerClient, PlannerApi, create_client};
use mealplan::cli::{Cli, Command, OutputFormat, get_log_path};
use mealplan::config::Config;
use mealplan::domain::{CUSTOM_DIET_LABEL, DietOption, PlanEntry, RecipeView, format_created_at, parse_diet_options};
use mealplan::tui::{self, ServiceLinks};
use mealplan::workflow::{PlanWorkflow, SubmitOutcome};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = get_log_path();
    let log_dir = log_path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref())
        .context("Failed to load configuration")?
        .with_base_url(cli.api_base.clone());

    info!("mealplan loaded config: base_url={}", config.api.base_url);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        None | Some(Command::Ui) => cmd_ui(&config).await,
        Some(Command::Diets) => cmd_diets(&config).await,
        Some(Command::History { limit }) => cmd_history(config, limit).await,
        Some(Command::Show { id }) => cmd_show(&config, &id).await,
        Some(Command::Plan {
            items,
            goal,
            diet,
            custom,
            format,
        }) => cmd_plan(&config, items, goal, &diet, custom, format).await,
        Some(Command::Export { output }) => cmd_export(&config, &output).await,
        Some(Command::Links) => cmd_links(&config),
    }
}

fn service_links(config: &Config) -> Result<ServiceLinks> {
    let client = HttpPlannerClient::from_config(&config.api).context("Failed to create planner client")?;
    Ok(ServiceLinks {
        base_url: client.base_url().to_string(),
        csv_url: client.csv_url(),
        dashboard_url: client.dashboard_url(),
    })
}

async fn cmd_ui(config: &Config) -> Result<()> {
    debug!("cmd_ui: called");
    let api = create_client(&config.api).context("Failed to create planner client")?;
    let links = service_links(config)?;
    tui::run(api, links).await
}

async fn cmd_diets(config: &Config) -> Result<()> {
    debug!("cmd_diets: called");
    let api = create_client(&config.api).context("Failed to create planner client")?;
    let labels = api.diets().await.context("Failed to load diet options")?;

    for option in parse_diet_options(labels) {
        match option {
            DietOption::Predefined(label) => println!("{}", label),
            DietOption::Custom => println!("{} {}", CUSTOM_DIET_LABEL, "(use --custom TEXT)".dimmed()),
        }
    }
    Ok(())
}

async fn cmd_history(mut config: Config, limit: Option<u32>) -> Result<()> {
    debug!(?limit, "cmd_history: called");
    if let Some(limit) = limit {
        config.api.history_limit = limit;
    }
    let api = create_client(&config.api).context("Failed to create planner client")?;
    let entries = api.history().await.context("Failed to load saved plans")?;

    if entries.is_empty() {
        println!("No saved plans yet. Generate one to get started.");
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{}  {}  Goal: {}  Diet: {}",
            entry.id.as_str().yellow(),
            format_created_at(&entry.created_at).cyan(),
            entry.goal_label(),
            entry.diet_label().dimmed()
        );
    }
    Ok(())
}

async fn cmd_show(config: &Config, id: &str) -> Result<()> {
    debug!(%id, "cmd_show: called");
    let api = create_client(&config.api).context("Failed to create planner client")?;
    let entries = api.history().await.context("Failed to load saved plans")?;

    let Some(entry) = entries.iter().find(|e| e.id.as_str() == id) else {
        bail!("No saved plan with id {}", id);
    };

    println!("Saved: {}", format_created_at(&entry.created_at).cyan());
    println!("Goal: {}", entry.goal_label());
    println!("Diet: {}", entry.diet_label());
    println!();
    print_plan(&entry.plan);
    Ok(())
}

/// Resolve the diet argument to an option; "custom" is accepted for the custom entry
fn diet_option(diet: &str) -> DietOption {
    if diet.eq_ignore_ascii_case("custom") {
        DietOption::Custom
    } else {
        DietOption::from_label(diet)
    }
}

async fn cmd_plan(
    config: &Config,
    items: Vec<String>,
    goal: String,
    diet: &str,
    custom: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    debug!(items = items.len(), %goal, %diet, ?format, "cmd_plan: called");
    let api = create_client(&config.api).context("Failed to create planner client")?;
    let mut workflow = PlanWorkflow::new(api);

    let state = workflow.state_mut();
    for item in &items {
        state.add_pantry_item(item);
    }
    state.set_weekly_goal(goal);
    state.select_diet(&diet_option(diet));
    if let Some(text) = custom
        && !state.set_custom_description(text)
    {
        eprintln!("{} --custom is ignored unless the diet is {}", "Warning:".yellow(), CUSTOM_DIET_LABEL);
    }

    if !state.can_submit() {
        bail!("Add at least one item, a weekly goal and a diet (with a description for a custom diet)");
    }

    match workflow.submit_plan_request().await {
        Some(SubmitOutcome::Planned) => {
            let plan = workflow.state().plan().map(Vec::as_slice).unwrap_or_default();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(plan)?),
                OutputFormat::Text => print_plan(plan),
            }
            Ok(())
        }
        Some(SubmitOutcome::Failed) => {
            let message = workflow.state().error().unwrap_or_default().to_string();
            eprintln!("{} {}", "Error:".red(), message);
            std::process::exit(1);
        }
        None => bail!("Plan request was not sent"),
    }
}

async fn cmd_export(config: &Config, output: &Path) -> Result<()> {
    debug!(?output, "cmd_export: called");
    let api = create_client(&config.api).context("Failed to create planner client")?;
    let csv = api.plan_csv().await.context("Failed to download plan CSV")?;
    fs::write(output, csv).context(format!("Failed to write {}", output.display()))?;
    println!("{} Saved plan CSV to {}", "✓".green(), output.display().to_string().cyan());
    Ok(())
}

fn cmd_links(config: &Config) -> Result<()> {
    debug!("cmd_links: called");
    let links = service_links(config)?;
    println!("CSV: {}", links.csv_url.cyan());
    println!("Dashboard: {}", links.dashboard_url.cyan());
    Ok(())
}

fn print_plan(plan: &[PlanEntry]) {
    for (index, entry) in plan.iter().enumerate() {
        println!("{} {}", entry.day.bold(), format!("· Day {}", index + 1).dimmed());
        println!("  {}", entry.meal.green());
        println!("  {}", "Why this meal".underline());
        println!("    {}", entry.rationale);
        println!("  {}", "Recipe".underline());
        match entry.recipe_view() {
            RecipeView::Prose(text) => println!("    {}", text),
            RecipeView::Steps(steps) => {
                for (n, step) in steps.iter().enumerate() {
                    println!("    {}. {}", n + 1, step);
                }
            }
        }
        println!("  {}", "Nutritional Value".underline());
        println!("    {}", entry.nutritional_value);
        println!();
    }
}
