//! Binary-level tests for the lnav CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// lnav with its data, config and working directories inside `temp`
fn lnav(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lnav").unwrap();
    cmd.current_dir(temp.path())
        .env("XDG_DATA_HOME", temp.path().join("data"))
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_plan_rules_mode_writes_document() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("plan.md");
    let store = temp.path().join("preferences.json");

    lnav(&temp)
        .args(["plan", "--mode", "rules", "--output"])
        .arg(&output)
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan saved to"));

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("# LifeNav Personalized Plan"));
    assert!(text.contains("## 6. Calendar Schedule"));
    assert!(text.ends_with("---\nGenerated by LifeNav.\n"));

    let prefs = std::fs::read_to_string(&store).unwrap();
    assert!(prefs.contains("\"name\": \"Sam\""));
}

#[test]
fn test_plan_with_profile_and_tasks_files() {
    let temp = TempDir::new().unwrap();
    let profile = temp.path().join("profile.json");
    let tasks = temp.path().join("tasks.yml");
    std::fs::write(
        &profile,
        r#"{"name": "Ana", "diet_type": "vegan", "budget_level": "low", "avoid_ingredients": ["oats"]}"#,
    )
    .unwrap();
    std::fs::write(
        &tasks,
        "- title: C\n  priority: 2\n- title: A\n  priority: 3\n- title: B\n  priority: 1\n",
    )
    .unwrap();

    lnav(&temp)
        .args(["plan", "--profile", "profile.json", "--tasks", "tasks.yml", "--output", "plan.md"])
        .args(["--store", "preferences.json"])
        .assert()
        .success();

    let text = std::fs::read_to_string(temp.path().join("plan.md")).unwrap();
    assert!(text.contains("Homemade alternative ingredient with banana"));
    assert!(text.contains("- (1) [Priority 1] B\n- (2) [Priority 2] C\n- (3) [Priority 3] A"));
}

#[test]
fn test_missing_calendar_file_is_absorbed() {
    let temp = TempDir::new().unwrap();

    lnav(&temp)
        .args(["plan", "--calendar", "missing.json", "--output", "plan.md", "--store", "preferences.json"])
        .assert()
        .success();

    let text = std::fs::read_to_string(temp.path().join("plan.md")).unwrap();
    assert!(text.contains("Calendar unavailable."));
    assert!(text.contains("_No calendar events loaded._"));
}

#[test]
fn test_delegated_mode_without_key_fails_before_writing() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("lifenav.yml");
    std::fs::write(&config, "llm:\n  api-key-env: LIFENAV_CLI_TEST_MISSING_KEY\n").unwrap();

    lnav(&temp)
        .env_remove("LIFENAV_CLI_TEST_MISSING_KEY")
        .arg("--config")
        .arg(&config)
        .args(["plan", "--mode", "delegated", "--output", "plan.md", "--store", "preferences.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LIFENAV_CLI_TEST_MISSING_KEY"));

    assert!(!temp.path().join("plan.md").exists());
}

#[test]
fn test_profile_command_prints_tags() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("profile.yaml"),
        "wake_time: \"05:00\"\nwork_start: \"08:00\"\nwork_end: \"18:00\"\n",
    )
    .unwrap();

    lnav(&temp)
        .args(["profile", "--profile", "profile.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("early_riser"))
        .stdout(predicate::str::contains("heavy_worker"));
}

#[test]
fn test_config_command_prints_yaml() {
    let temp = TempDir::new().unwrap();

    lnav(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("mode: rules"))
        .stdout(predicate::str::contains("api-key-env:"));
}
