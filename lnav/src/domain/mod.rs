//! Domain types shared by every pipeline stage
//!
//! Everything here is plain data. Generators, validators, the calendar merger
//! and the document assembler all speak in these types.

mod artifact;
mod behavioral;
mod calendar;
mod clock;
mod meal;
mod profile;
mod routine;
mod task;

pub use artifact::Artifact;
pub use behavioral::{BehavioralProfile, FitnessLevel, LearningMode, SkincareImportance, SleepType, WorkStyle};
pub use calendar::{CalendarEvent, EVENT_TIME_FORMAT, MergedSchedule};
pub use clock::{ClockTime, ClockTimeError};
pub use meal::{DayMeals, MealPlan, MealSlot, ShoppingList, Weekday};
pub use profile::Profile;
pub use routine::{Routine, RoutineBlock};
pub use task::{DEFAULT_PRIORITY, Task, sample_tasks};
