//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// System prompt shared by every delegated call
pub const SYSTEM: &str = include_str!("../../prompts/system.pmt");

/// Daily routine prompt
pub const ROUTINE: &str = include_str!("../../prompts/routine.pmt");

/// Weekly meal plan prompt
pub const MEALS: &str = include_str!("../../prompts/meals.pmt");

/// Task ordering prompt
pub const TASKS: &str = include_str!("../../prompts/tasks.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "system" => Some(SYSTEM),
        "routine" => Some(ROUTINE),
        "meals" => Some(MEALS),
        "tasks" => Some(TASKS),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
