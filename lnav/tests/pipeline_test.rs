//! End-to-end pipeline tests through the public library API

use lifenav::calendar::{CalendarMerger, FileCalendar, SampleCalendar};
use lifenav::domain::{ClockTime, Profile, Task};
use lifenav::orchestrator::{Engine, Orchestrator, PipelineState};
use prefstore::PreferenceStore;
use tempfile::TempDir;

fn rules_orchestrator(temp: &TempDir, merger: CalendarMerger) -> Orchestrator {
    Orchestrator::new(
        PreferenceStore::open(temp.path().join("preferences.json")),
        merger,
        Engine::RuleBased,
    )
}

#[tokio::test]
async fn test_default_profile_routine_scenario() {
    let temp = TempDir::new().unwrap();
    let mut orch = rules_orchestrator(&temp, CalendarMerger::new(Box::new(SampleCalendar)));
    let profile = Profile {
        wants_gym: false,
        wants_learning: false,
        wants_skincare: false,
        ..Profile::default()
    };

    let outcome = orch.run(profile, Vec::new(), &temp.path().join("plan.md")).await.unwrap();

    let routine = outcome.routine.as_structured().unwrap();
    let tasks: Vec<&str> = routine.iter().map(|b| b.task.as_str()).collect();
    assert_eq!(
        tasks,
        vec!["Morning hygiene & skincare", "Breakfast", "Work / Study", "Wind down / Relax"]
    );
    let last = routine.iter().last().unwrap();
    assert_eq!(last.start, ClockTime::at(22, 30));
    assert_eq!(last.end, ClockTime::at(23, 0));
    assert_eq!(orch.state(), PipelineState::Saved);
}

#[tokio::test]
async fn test_file_calendar_events_rendered() {
    let temp = TempDir::new().unwrap();
    let events = temp.path().join("events.json");
    std::fs::write(
        &events,
        r#"[{"start": "2025-12-01 09:00", "end": "2025-12-01 09:30", "title": "Dentist"}]"#,
    )
    .unwrap();

    let mut orch = rules_orchestrator(&temp, CalendarMerger::new(Box::new(FileCalendar::new(&events))));
    let outcome = orch
        .run(Profile::sample(), vec![Task::new("Call parents", 2)], &temp.path().join("plan.md"))
        .await
        .unwrap();

    assert_eq!(outcome.schedule.events.len(), 1);
    let text = outcome.document.as_str();
    assert!(text.contains("- 2025-12-01 09:00 Dentist\n"));
    assert!(!text.contains("Dentist ("));
}

#[tokio::test]
async fn test_stored_profile_carries_unknown_keys() {
    let temp = TempDir::new().unwrap();
    let mut profile = Profile::sample();
    profile.extra.insert("timezone".to_string(), serde_json::json!("UTC"));

    let mut orch = rules_orchestrator(&temp, CalendarMerger::new(Box::new(SampleCalendar)));
    orch.run(profile.clone(), Vec::new(), &temp.path().join("plan.md")).await.unwrap();

    let store = PreferenceStore::open(temp.path().join("preferences.json"));
    let restored = Profile::from_preferences(&store.all()).unwrap();
    assert_eq!(restored, profile);
}
