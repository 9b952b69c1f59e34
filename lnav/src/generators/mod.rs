//! Plan generators
//!
//! Three independent generators, each with a rule-based implementation here
//! and a delegated implementation in [`delegated`] that asks an LLM for text.
//!
//! - [`routine`] - daily routine blocks from wake/work/sleep times
//! - [`meals`] - weekly meal plan and shopping list
//! - [`tasks`] - priority ordering of to-do items

pub mod delegated;
pub mod meals;
pub mod routine;
pub mod tasks;

pub use delegated::{DelegatedError, DelegatedGenerator};
pub use meals::{AVOID_PLACEHOLDER, fallback_meal_plan, generate_meal_plan, generate_shopping_list};
pub use routine::{fallback_routine, generate_routine};
pub use tasks::order_tasks;
