//! Structural validators
//!
//! Each validator checks one generator's output for presence and shape only.
//! A failure carries a [`FailureReason`]; the orchestrator answers it with the
//! stage's single fallback substitute.

use std::fmt;

use crate::domain::{Artifact, MealPlan, MergedSchedule, Routine, Weekday};

/// Minimum number of blocks a routine must have
pub const MIN_ROUTINE_BLOCKS: usize = 3;

/// Outcome of a structural check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed { reason: FailureReason },
}

impl Verdict {
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Passed)
    }

    fn fail(reason: FailureReason) -> Self {
        Verdict::Failed { reason }
    }
}

/// Why a check failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Fewer blocks than [`MIN_ROUTINE_BLOCKS`]
    TooFewBlocks { found: usize, required: usize },
    /// Block at `index` has a blank task label
    IncompleteBlock { index: usize },
    /// Meal plan lacks these weekdays
    MissingWeekdays { missing: Vec<Weekday> },
    /// Schedule has no routine to merge against
    MissingRoutine,
}

impl FailureReason {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            FailureReason::TooFewBlocks { .. } => "too_few_blocks",
            FailureReason::IncompleteBlock { .. } => "incomplete_block",
            FailureReason::MissingWeekdays { .. } => "missing_weekdays",
            FailureReason::MissingRoutine => "missing_routine",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::TooFewBlocks { found, required } => {
                write!(f, "routine has {} blocks, needs at least {}", found, required)
            }
            FailureReason::IncompleteBlock { index } => write!(f, "routine block {} has no task", index),
            FailureReason::MissingWeekdays { missing } => {
                let names: Vec<&str> = missing.iter().map(|d| d.name()).collect();
                write!(f, "meal plan is missing {}", names.join(", "))
            }
            FailureReason::MissingRoutine => write!(f, "schedule has no routine"),
        }
    }
}

/// At least three blocks, each with start, end and a non-blank task
pub fn validate_routine(routine: &Routine) -> Verdict {
    if routine.len() < MIN_ROUTINE_BLOCKS {
        return Verdict::fail(FailureReason::TooFewBlocks {
            found: routine.len(),
            required: MIN_ROUTINE_BLOCKS,
        });
    }

    // start and end are typed and always present; only the label can be empty
    if let Some(index) = routine.iter().position(|b| b.task.trim().is_empty()) {
        return Verdict::fail(FailureReason::IncompleteBlock { index });
    }

    Verdict::Passed
}

/// Every weekday present as a key
pub fn validate_meal_plan(plan: &MealPlan) -> Verdict {
    let missing: Vec<Weekday> = Weekday::ALL
        .iter()
        .filter(|d| !plan.days.contains_key(*d))
        .copied()
        .collect();

    if missing.is_empty() {
        Verdict::Passed
    } else {
        Verdict::fail(FailureReason::MissingWeekdays { missing })
    }
}

/// The routine exists: at least one block, or non-blank freeform text
pub fn validate_schedule_merge(schedule: &MergedSchedule) -> Verdict {
    let exists = match &schedule.routine {
        Artifact::Structured(routine) => !routine.is_empty(),
        Artifact::Freeform(text) => !text.trim().is_empty(),
    };

    if exists {
        Verdict::Passed
    } else {
        Verdict::fail(FailureReason::MissingRoutine)
    }
}
