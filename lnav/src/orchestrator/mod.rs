//! Pipeline orchestrator
//!
//! Sequences the generation stages of one run through a strictly linear state
//! machine:
//!
//! ```text
//! Init -> ProfileLoaded -> RoutineReady -> MealsReady -> TasksReady
//!      -> CalendarMerged -> DocumentAssembled -> Saved
//! ```
//!
//! In rules mode each stage validates its output and substitutes the stage's
//! fallback once on failure. In delegated mode the LLM text is accepted as-is
//! and any LLM error aborts the run. The document is only written in the
//! final transition, so an aborted run leaves nothing on disk.

use std::fmt;
use std::path::{Path, PathBuf};

use prefstore::PreferenceStore;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calendar::{CalendarMerger, mark_unavailable};
use crate::config::Mode;
use crate::document::{PlanDocument, PlanInputs, assemble, save_document};
use crate::domain::{Artifact, BehavioralProfile, MealPlan, MergedSchedule, Profile, Routine, ShoppingList, Task};
use crate::generators::{
    DelegatedError, DelegatedGenerator, fallback_meal_plan, fallback_routine, generate_meal_plan,
    generate_routine, generate_shopping_list, order_tasks,
};
use crate::validation::{Verdict, validate_meal_plan, validate_routine, validate_schedule_merge};

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Init,
    ProfileLoaded,
    RoutineReady,
    MealsReady,
    TasksReady,
    CalendarMerged,
    DocumentAssembled,
    Saved,
}

impl PipelineState {
    /// The only state reachable from this one
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Init => Some(Self::ProfileLoaded),
            Self::ProfileLoaded => Some(Self::RoutineReady),
            Self::RoutineReady => Some(Self::MealsReady),
            Self::MealsReady => Some(Self::TasksReady),
            Self::TasksReady => Some(Self::CalendarMerged),
            Self::CalendarMerged => Some(Self::DocumentAssembled),
            Self::DocumentAssembled => Some(Self::Saved),
            Self::Saved => None,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::ProfileLoaded => write!(f, "profile_loaded"),
            Self::RoutineReady => write!(f, "routine_ready"),
            Self::MealsReady => write!(f, "meals_ready"),
            Self::TasksReady => write!(f, "tasks_ready"),
            Self::CalendarMerged => write!(f, "calendar_merged"),
            Self::DocumentAssembled => write!(f, "document_assembled"),
            Self::Saved => write!(f, "saved"),
        }
    }
}

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Delegated generation failed: {0}")]
    Delegation(#[from] DelegatedError),

    #[error("Failed to save plan to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pipeline transition from {from} to {to}")]
    InvalidTransition { from: PipelineState, to: PipelineState },
}

/// What produces the routine, meals and tasks
pub enum Engine {
    /// Rule tables with validation and fallbacks
    RuleBased,
    /// LLM free text, no validation
    Delegated(DelegatedGenerator),
}

impl Engine {
    pub fn mode(&self) -> Mode {
        match self {
            Engine::RuleBased => Mode::Rules,
            Engine::Delegated(_) => Mode::Delegated,
        }
    }
}

/// Everything a completed run produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub saved_path: PathBuf,
    pub profile: Profile,
    pub behavioral: BehavioralProfile,
    pub routine: Artifact<Routine>,
    pub meals: Artifact<MealPlan>,
    pub shopping_list: ShoppingList,
    pub tasks: Artifact<Vec<Task>>,
    pub schedule: MergedSchedule,
    pub document: PlanDocument,
}

/// Runs the plan pipeline over injected collaborators
pub struct Orchestrator {
    store: PreferenceStore,
    calendar: CalendarMerger,
    engine: Engine,
    state: PipelineState,
}

impl Orchestrator {
    pub fn new(store: PreferenceStore, calendar: CalendarMerger, engine: Engine) -> Self {
        debug!(mode = %engine.mode(), "Orchestrator::new: called");
        Self {
            store,
            calendar,
            engine,
            state: PipelineState::Init,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    /// Run every stage and write the plan to `output_path`
    ///
    /// An orchestrator runs once; calling this again is an invalid transition.
    pub async fn run(
        &mut self,
        profile: Profile,
        tasks: Vec<Task>,
        output_path: &Path,
    ) -> Result<PipelineOutcome, PipelineError> {
        info!(mode = %self.mode(), name = %profile.name, "Starting LifeNav pipeline");

        self.advance(PipelineState::ProfileLoaded)?;
        self.remember(&profile);
        let behavioral = BehavioralProfile::derive(&profile);
        debug!(?behavioral, "run: derived behavioral profile");

        let routine = match &self.engine {
            Engine::RuleBased => Artifact::Structured(checked_routine(generate_routine(&profile), &profile)),
            Engine::Delegated(generator) => generator.routine(&profile, &behavioral).await?,
        };
        self.advance(PipelineState::RoutineReady)?;

        let meals = match &self.engine {
            Engine::RuleBased => Artifact::Structured(checked_meal_plan(generate_meal_plan(
                &profile.diet_type,
                &profile.budget_level,
                &profile.avoid_ingredients,
            ))),
            Engine::Delegated(generator) => generator.meals(&profile, &behavioral).await?,
        };
        let shopping_list = generate_shopping_list(&meals);
        self.advance(PipelineState::MealsReady)?;

        let tasks = match &self.engine {
            Engine::RuleBased => Artifact::Structured(order_tasks(tasks)),
            Engine::Delegated(generator) => generator.tasks(&profile, &behavioral, &tasks).await?,
        };
        self.advance(PipelineState::TasksReady)?;

        let schedule = checked_schedule(self.calendar.merge(routine.clone()));
        self.advance(PipelineState::CalendarMerged)?;

        let document = assemble(&PlanInputs {
            profile: &profile,
            behavioral: &behavioral,
            routine: &routine,
            meals: &meals,
            shopping_list: &shopping_list,
            tasks: &tasks,
            schedule: &schedule,
        });
        self.advance(PipelineState::DocumentAssembled)?;

        info!(path = %output_path.display(), "Saving plan");
        save_document(&document, output_path).map_err(|source| PipelineError::Export {
            path: output_path.to_path_buf(),
            source,
        })?;
        self.advance(PipelineState::Saved)?;

        info!(path = %output_path.display(), "Pipeline complete");
        Ok(PipelineOutcome {
            saved_path: output_path.to_path_buf(),
            profile,
            behavioral,
            routine,
            meals,
            shopping_list,
            tasks,
            schedule,
            document,
        })
    }

    /// Persist the profile; a store failure never stops the run
    fn remember(&mut self, profile: &Profile) {
        let prefs = match profile.to_preferences() {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!(error = %e, "Could not serialize profile for the preference store");
                return;
            }
        };
        if let Err(e) = self.store.update(prefs) {
            warn!(error = %e, path = %self.store.path().display(), "Failed to update preference store");
        }
    }

    fn advance(&mut self, to: PipelineState) -> Result<(), PipelineError> {
        if self.state.next() != Some(to) {
            return Err(PipelineError::InvalidTransition { from: self.state, to });
        }
        debug!(from = %self.state, %to, "advance: called");
        self.state = to;
        Ok(())
    }
}

fn checked_routine(candidate: Routine, profile: &Profile) -> Routine {
    match validate_routine(&candidate) {
        Verdict::Passed => {
            info!(blocks = candidate.len(), "Routine created");
            candidate
        }
        Verdict::Failed { reason } => {
            warn!(code = reason.code(), %reason, "Routine validation failed, using fallback routine");
            fallback_routine(profile)
        }
    }
}

fn checked_meal_plan(candidate: MealPlan) -> MealPlan {
    match validate_meal_plan(&candidate) {
        Verdict::Passed => {
            info!("Meal plan generated");
            candidate
        }
        Verdict::Failed { reason } => {
            warn!(code = reason.code(), %reason, "Meal plan validation failed, using fallback plan");
            fallback_meal_plan()
        }
    }
}

fn checked_schedule(candidate: MergedSchedule) -> MergedSchedule {
    match validate_schedule_merge(&candidate) {
        Verdict::Passed => candidate,
        Verdict::Failed { reason } => {
            warn!(code = reason.code(), %reason, "Schedule merge validation failed, returning routine only");
            mark_unavailable(candidate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;
    use tempfile::TempDir;

    use crate::calendar::mock::UnavailableCalendar;
    use crate::calendar::{MERGED_NOTE, SampleCalendar, UNAVAILABLE_NOTE};
    use crate::domain::{ClockTime, RoutineBlock, Weekday, sample_tasks};
    use crate::llm::CompletionResponse;
    use crate::llm::client::mock::MockLlmClient;
    use crate::prompts::PromptLoader;

    fn orchestrator(temp: &TempDir, engine: Engine) -> Orchestrator {
        let store = PreferenceStore::open(temp.path().join("preferences.json"));
        Orchestrator::new(store, CalendarMerger::new(Box::new(SampleCalendar)), engine)
    }

    fn delegated(client: Arc<MockLlmClient>) -> Engine {
        Engine::Delegated(DelegatedGenerator::new(client, PromptLoader::embedded_only(), 512))
    }

    #[test]
    fn test_states_are_linear() {
        let mut state = PipelineState::Init;
        let mut visited = vec![state];
        while let Some(next) = state.next() {
            visited.push(next);
            state = next;
        }
        assert_eq!(visited.len(), 8);
        assert_eq!(visited.last(), Some(&PipelineState::Saved));
    }

    #[tokio::test]
    async fn test_rules_run_writes_document_and_store() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("life_plan.md");
        let mut orch = orchestrator(&temp, Engine::RuleBased);

        let outcome = orch.run(Profile::sample(), sample_tasks(), &output).await.unwrap();

        assert_eq!(orch.state(), PipelineState::Saved);
        assert_eq!(outcome.saved_path, output);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), outcome.document.as_str());
        assert!(outcome.routine.is_structured());
        assert_eq!(outcome.schedule.notes, MERGED_NOTE);
        assert_eq!(outcome.schedule.events.len(), 2);

        let ordered = outcome.tasks.as_structured().unwrap();
        assert_eq!(ordered[0].title, "Pay electricity bill");
        assert_eq!(ordered[1].title, "Update resume");

        let stored = PreferenceStore::open(temp.path().join("preferences.json"));
        assert_eq!(stored.get("name"), Some(&json!("Sam")));
        assert_eq!(stored.get("wake_time"), Some(&json!("07:00")));
    }

    #[tokio::test]
    async fn test_store_failure_does_not_abort() {
        let temp = TempDir::new().unwrap();
        // A directory cannot be written as the preference file
        let store = PreferenceStore::open(temp.path());
        let mut orch = Orchestrator::new(store, CalendarMerger::new(Box::new(SampleCalendar)), Engine::RuleBased);
        let output = temp.path().join("plan.md");

        orch.run(Profile::default(), Vec::new(), &output).await.unwrap();
        assert!(output.exists());
    }

    #[tokio::test]
    async fn test_unavailable_calendar_keeps_routine() {
        let temp = TempDir::new().unwrap();
        let store = PreferenceStore::open(temp.path().join("preferences.json"));
        let mut orch = Orchestrator::new(
            store,
            CalendarMerger::new(Box::new(UnavailableCalendar)),
            Engine::RuleBased,
        );

        let outcome = orch
            .run(Profile::sample(), sample_tasks(), &temp.path().join("plan.md"))
            .await
            .unwrap();

        assert_eq!(outcome.schedule.notes, UNAVAILABLE_NOTE);
        assert!(outcome.schedule.events.is_empty());
        assert_eq!(outcome.schedule.routine, outcome.routine);
        assert!(outcome.document.as_str().contains("_No calendar events loaded._"));
    }

    #[tokio::test]
    async fn test_second_run_is_rejected() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("plan.md");
        let mut orch = orchestrator(&temp, Engine::RuleBased);

        orch.run(Profile::sample(), sample_tasks(), &output).await.unwrap();
        let intruder = Profile {
            name: "Intruder".to_string(),
            ..Profile::sample()
        };
        let result = orch.run(intruder, sample_tasks(), &output).await;
        assert!(matches!(
            result,
            Err(PipelineError::InvalidTransition {
                from: PipelineState::Saved,
                to: PipelineState::ProfileLoaded
            })
        ));

        let store = PreferenceStore::open(temp.path().join("preferences.json"));
        assert_eq!(store.get("name"), Some(&json!("Sam")));
    }

    #[tokio::test]
    async fn test_delegated_run_uses_llm_text() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("plan.md");
        let client = Arc::new(MockLlmClient::new(vec![
            CompletionResponse::text("07:00-08:00: Slow morning"),
            CompletionResponse::text("Monday: lentil soup"),
            CompletionResponse::text("1. Update resume [Priority 1]"),
        ]));
        let mut orch = orchestrator(&temp, delegated(client.clone()));

        let outcome = orch.run(Profile::sample(), sample_tasks(), &output).await.unwrap();

        assert_eq!(client.call_count(), 3);
        assert_eq!(outcome.routine.as_freeform(), Some("07:00-08:00: Slow morning"));
        assert_eq!(outcome.meals.as_freeform(), Some("Monday: lentil soup"));
        assert_eq!(outcome.tasks.as_freeform(), Some("1. Update resume [Priority 1]"));
        assert_eq!(outcome.shopping_list.items.len(), 9);
        assert_eq!(outcome.schedule.notes, MERGED_NOTE);

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.contains("Monday: lentil soup"));
    }

    #[tokio::test]
    async fn test_delegated_failure_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("plan.md");
        // Routine succeeds, meals call finds no response
        let client = Arc::new(MockLlmClient::repeating("07:00-08:00: Slow morning", 1));
        let mut orch = orchestrator(&temp, delegated(client));

        let result = orch.run(Profile::sample(), sample_tasks(), &output).await;

        assert!(matches!(result, Err(PipelineError::Delegation(_))));
        assert_eq!(orch.state(), PipelineState::RoutineReady);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_export_failure_is_fatal() {
        let temp = TempDir::new().unwrap();
        let mut orch = orchestrator(&temp, Engine::RuleBased);

        // The temp dir itself is a directory, not a writable file
        let result = orch.run(Profile::sample(), sample_tasks(), temp.path()).await;
        assert!(matches!(result, Err(PipelineError::Export { .. })));
        assert_eq!(orch.state(), PipelineState::DocumentAssembled);
    }

    #[test]
    fn test_short_routine_replaced_by_fallback() {
        let profile = Profile::default();
        let short = Routine::new(vec![RoutineBlock::new(ClockTime::at(9, 0), ClockTime::at(17, 0), "Work")]);

        let routine = checked_routine(short, &profile);
        assert_eq!(routine, fallback_routine(&profile));
    }

    #[test]
    fn test_incomplete_meal_plan_replaced_by_fallback() {
        let mut plan = generate_meal_plan("vegan", "high", &[]);
        plan.days.remove(&Weekday::Friday);

        assert_eq!(checked_meal_plan(plan), fallback_meal_plan());
    }

    #[test]
    fn test_empty_routine_schedule_marked_unavailable() {
        let schedule = MergedSchedule {
            routine: Artifact::Freeform("   ".to_string()),
            events: Vec::new(),
            notes: MERGED_NOTE.to_string(),
        };
        assert_eq!(checked_schedule(schedule).notes, UNAVAILABLE_NOTE);
    }

    #[test]
    fn test_zero_block_routine_merge_clears_events() {
        let merged = CalendarMerger::new(Box::new(SampleCalendar)).merge(Artifact::Structured(Routine::default()));
        assert!(!merged.events.is_empty());

        let checked = checked_schedule(merged);
        assert!(checked.events.is_empty());
        assert_eq!(checked.notes, UNAVAILABLE_NOTE);
        assert_eq!(checked.routine, Artifact::Structured(Routine::default()));
    }
}
