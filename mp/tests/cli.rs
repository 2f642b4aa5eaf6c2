//! Command-line behavior of the `mp` binary

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

/// `mp` isolated from the user's config, logs and environment
fn mp(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mp").expect("bin");
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env("NO_COLOR", "1")
        .env_remove("MEALPLAN_API_BASE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    mp(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("diets"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("--api-base"));
}

#[test]
fn links_use_api_base_flag() {
    let home = TempDir::new().unwrap();
    mp(&home)
        .args(["--api-base", "http://planner.test:9000/", "links"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://planner.test:9000/plan/csv"))
        .stdout(predicate::str::contains("http://planner.test:9000/dashboard"));
}

#[test]
fn links_use_environment_then_local_config() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join(".mealplan.yml"),
        "api:\n  base-url: http://from-file:8000\n",
    )
    .unwrap();

    mp(&home)
        .arg("links")
        .assert()
        .success()
        .stdout(predicate::str::contains("http://from-file:8000/plan/csv"));

    mp(&home)
        .env("MEALPLAN_API_BASE", "http://from-env:7000")
        .arg("links")
        .assert()
        .success()
        .stdout(predicate::str::contains("http://from-env:7000/plan/csv"));
}

#[test]
fn plan_with_blank_custom_diet_is_rejected() {
    let home = TempDir::new().unwrap();
    mp(&home)
        .args(["plan", "--item", "eggs", "--goal", "more protein", "--diet", "custom"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("weekly goal"));
}

#[test]
fn plan_against_unreachable_service_reports_generic_error() {
    let home = TempDir::new().unwrap();
    mp(&home)
        .args([
            "--api-base",
            "http://127.0.0.1:1",
            "plan",
            "--item",
            "eggs",
            "--goal",
            "more protein",
            "--diet",
            "Balanced",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Something went wrong while generating the plan"));
}
