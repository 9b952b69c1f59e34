//! Profile and task sources
//!
//! Reading a profile from a file, the preference store or the terminal, and
//! reading the task list.

use std::path::Path;

use colored::*;
use eyre::{Context, Result};
use prefstore::Preferences;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::domain::{ClockTime, Profile, Task};

/// Load a profile from a JSON or YAML file
///
/// A missing or unparsable file yields the default profile.
pub fn load_profile(path: &Path) -> Profile {
    debug!(path = %path.display(), "load_profile: called");
    if !path.exists() {
        info!(path = %path.display(), "Profile file not found, using default profile");
        return Profile::default();
    }

    match read_document::<Profile>(path) {
        Ok(profile) => {
            info!(path = %path.display(), name = %profile.name, "Loaded profile");
            profile
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load profile, using default profile");
            Profile::default()
        }
    }
}

/// Rebuild the last stored profile; an unusable record yields the default
pub fn profile_from_store(prefs: &Preferences) -> Profile {
    debug!(keys = prefs.len(), "profile_from_store: called");
    Profile::from_preferences(prefs).unwrap_or_else(|e| {
        warn!(error = %e, "Stored preferences are not a valid profile, using default profile");
        Profile::default()
    })
}

/// Load tasks from a JSON or YAML array
pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    debug!(path = %path.display(), "load_tasks: called");
    let tasks: Vec<Task> = read_document(path).context(format!("Failed to load tasks from {}", path.display()))?;
    info!(path = %path.display(), count = tasks.len(), "Loaded tasks");
    Ok(tasks)
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).context("Failed to read file")?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yml") || e.eq_ignore_ascii_case("yaml"));

    if is_yaml {
        serde_yaml::from_str(&content).context("Failed to parse YAML")
    } else {
        serde_json::from_str(&content).context("Failed to parse JSON")
    }
}

/// Ask for a profile on the terminal
pub fn interactive_profile() -> Result<Profile> {
    let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

    println!("\n{}\n", "===== Create New LifeNav Profile =====".bold());
    ask_profile(|question| match rl.readline(&format!("{} ", question.cyan())) {
        Ok(line) => Ok(line),
        // Ctrl+C and Ctrl+D accept the default for the question
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(String::new()),
        Err(err) => Err(eyre::eyre!("Readline error: {}", err)),
    })
}

/// Build a profile from answers to a fixed list of questions
///
/// Blank answers keep the profile default. A yes/no answer counts as yes
/// when it starts with `y`; an unparsable time keeps the default.
pub fn ask_profile<F>(mut ask: F) -> Result<Profile>
where
    F: FnMut(&str) -> Result<String>,
{
    let defaults = Profile::default();
    let mut answer = |question: &str| -> Result<Option<String>> {
        let line = ask(question)?;
        let line = line.trim();
        Ok(if line.is_empty() { None } else { Some(line.to_string()) })
    };

    let name = answer("Your name:")?.unwrap_or(defaults.name.clone());
    let wake_time = time_answer(answer("Wake-up time (HH:MM, default 07:00):")?, defaults.wake_time);
    let sleep_time = time_answer(answer("Sleep time (HH:MM, default 23:00):")?, defaults.sleep_time);
    let work_start = time_answer(answer("Work start time (HH:MM, default 09:00):")?, defaults.work_start);
    let work_end = time_answer(answer("Work end time (HH:MM, default 17:00):")?, defaults.work_end);

    let wants_gym = yes_answer(answer("Do you want gym in your routine? (y/n):")?, defaults.wants_gym);
    let wants_learning = yes_answer(answer("Do you want a learning block? (y/n):")?, defaults.wants_learning);
    let wants_skincare = yes_answer(answer("Do you want skincare steps? (y/n):")?, defaults.wants_skincare);

    let diet_type = answer("Diet type (balanced/vegetarian/vegan/high-protein, default balanced):")?
        .unwrap_or(defaults.diet_type.clone());
    let budget_level =
        answer("Budget level (low/medium/high, default medium):")?.unwrap_or(defaults.budget_level.clone());
    let avoid_ingredients = answer("Ingredients to avoid (comma separated, optional):")?
        .map(|raw| {
            raw.split(',')
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect()
        })
        .unwrap_or_default();

    Ok(Profile {
        name,
        wake_time,
        sleep_time,
        work_start,
        work_end,
        wants_gym,
        wants_learning,
        wants_skincare,
        diet_type,
        budget_level,
        avoid_ingredients,
        ..defaults
    })
}

fn time_answer(answer: Option<String>, default: ClockTime) -> ClockTime {
    match answer {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!(%raw, error = %e, "Invalid time, keeping {}", default);
            default
        }),
    }
}

fn yes_answer(answer: Option<String>, default: bool) -> bool {
    answer.map_or(default, |a| a.to_lowercase().starts_with('y'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scripted(answers: &[&str]) -> impl FnMut(&str) -> Result<String> {
        let mut answers: Vec<String> = answers.iter().rev().map(|s| s.to_string()).collect();
        move |_| Ok(answers.pop().unwrap_or_default())
    }

    #[test]
    fn test_missing_profile_file_uses_default() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_profile(&temp.path().join("profile.json")), Profile::default());
    }

    #[test]
    fn test_unparsable_profile_file_uses_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("profile.json");
        std::fs::write(&path, "{\"wake_time\": \"25:99\"}").unwrap();
        assert_eq!(load_profile(&path), Profile::default());
    }

    #[test]
    fn test_yaml_profile_with_extra_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("profile.yaml");
        std::fs::write(&path, "name: Ana\nwake_time: \"05:30\"\nwants_gym: false\ntimezone: UTC\n").unwrap();

        let profile = load_profile(&path);
        assert_eq!(profile.name, "Ana");
        assert_eq!(profile.wake_time, ClockTime::at(5, 30));
        assert!(!profile.wants_gym);
        assert_eq!(profile.diet_type, "balanced");
        assert_eq!(profile.extra.get("timezone"), Some(&serde_json::json!("UTC")));
    }

    #[test]
    fn test_load_tasks_defaults_priority() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        std::fs::write(&path, r#"[{"title": "A", "priority": 1}, {"title": "B"}]"#).unwrap();

        let tasks = load_tasks(&path).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].priority, 3);
    }

    #[test]
    fn test_load_tasks_missing_file_errors() {
        let temp = TempDir::new().unwrap();
        assert!(load_tasks(&temp.path().join("tasks.json")).is_err());
    }

    #[test]
    fn test_profile_from_store_round_trip() {
        let profile = Profile::sample();
        let prefs = profile.to_preferences().unwrap();
        assert_eq!(profile_from_store(&prefs), profile);
    }

    #[test]
    fn test_blank_answers_keep_defaults() {
        let profile = ask_profile(scripted(&[])).unwrap();
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn test_answers_fill_profile() {
        let profile = ask_profile(scripted(&[
            "Ana", "05:30", "22:00", "08:00", "18:00", "no", "Yes", "nah", "vegan", "low", "milk, , peanuts",
        ]))
        .unwrap();

        assert_eq!(profile.name, "Ana");
        assert_eq!(profile.wake_time, ClockTime::at(5, 30));
        assert_eq!(profile.work_end, ClockTime::at(18, 0));
        assert!(!profile.wants_gym);
        assert!(profile.wants_learning);
        assert!(!profile.wants_skincare);
        assert_eq!(profile.diet_type, "vegan");
        assert_eq!(profile.avoid_ingredients, vec!["milk".to_string(), "peanuts".to_string()]);
    }

    #[test]
    fn test_invalid_time_keeps_default() {
        let profile = ask_profile(scripted(&["", "7am"])).unwrap();
        assert_eq!(profile.wake_time, ClockTime::at(7, 0));
    }
}
