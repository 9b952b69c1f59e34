//! Plan document assembly
//!
//! Renders every artifact of a run into one Markdown document with a fixed
//! section order. Rendering is pure: the same inputs always produce the same
//! bytes. Structured artifacts are laid out as lists, freeform artifacts are
//! emitted as-is.

mod export;

pub use export::save_document;

use std::fmt;

use crate::domain::{
    Artifact, BehavioralProfile, EVENT_TIME_FORMAT, MealPlan, MergedSchedule, Profile, Routine, ShoppingList, Task,
};

/// Heading of every rendered plan
pub const TITLE: &str = "# LifeNav Personalized Plan";

/// Line closing every rendered plan
pub const TRAILER: &str = "Generated by LifeNav.";

/// Rendered plan text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDocument(String);

impl PlanDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PlanDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the assembler renders, borrowed from the run
#[derive(Debug, Clone, Copy)]
pub struct PlanInputs<'a> {
    pub profile: &'a Profile,
    pub behavioral: &'a BehavioralProfile,
    pub routine: &'a Artifact<Routine>,
    pub meals: &'a Artifact<MealPlan>,
    pub shopping_list: &'a ShoppingList,
    pub tasks: &'a Artifact<Vec<Task>>,
    pub schedule: &'a MergedSchedule,
}

/// Render the plan
pub fn assemble(inputs: &PlanInputs<'_>) -> PlanDocument {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("{}\n", TITLE));

    lines.push("## 1. User Profile\n".to_string());
    for (key, value) in inputs.profile.attributes() {
        lines.push(format!("- **{}**: {}", key, value));
    }
    lines.push(String::new());
    lines.push("### Behavioral Profile\n".to_string());
    for (key, value) in inputs.behavioral.tags() {
        lines.push(format!("- **{}**: {}", key, value));
    }
    lines.push(String::new());

    lines.push("## 2. Daily Routine\n".to_string());
    render_routine(&mut lines, inputs.routine);
    lines.push(String::new());

    lines.push("## 3. Weekly Meal Plan\n".to_string());
    match inputs.meals {
        Artifact::Structured(plan) => {
            for (day, meals) in plan.iter() {
                lines.push(format!("### {}", day));
                for (slot, description) in meals {
                    lines.push(format!("- **{}**: {}", slot, description));
                }
                lines.push(String::new());
            }
        }
        Artifact::Freeform(text) => {
            lines.push(text.trim().to_string());
            lines.push(String::new());
        }
    }

    lines.push("## 4. Shopping List\n".to_string());
    for item in &inputs.shopping_list.items {
        lines.push(format!("- {}", item));
    }
    lines.push(String::new());

    lines.push("## 5. Optimized Tasks\n".to_string());
    match inputs.tasks {
        Artifact::Structured(tasks) => {
            for (index, task) in tasks.iter().enumerate() {
                let order = task.recommended_order.unwrap_or(index + 1);
                lines.push(format!("- ({}) [Priority {}] {}", order, task.priority, task.title));
            }
        }
        Artifact::Freeform(text) => lines.push(text.trim().to_string()),
    }
    lines.push(String::new());

    lines.push("## 6. Calendar Schedule\n".to_string());
    lines.push(inputs.schedule.notes.clone());
    lines.push(String::new());
    if inputs.schedule.events.is_empty() {
        lines.push("_No calendar events loaded._".to_string());
    } else {
        for event in &inputs.schedule.events {
            let start = event.start.format(EVENT_TIME_FORMAT);
            match &event.location {
                Some(location) => lines.push(format!("- {} {} ({})", start, event.title, location)),
                None => lines.push(format!("- {} {}", start, event.title)),
            }
        }
    }

    finish(&lines.join("\n"))
}

fn render_routine(lines: &mut Vec<String>, routine: &Artifact<Routine>) {
    match routine {
        Artifact::Structured(routine) => {
            for block in routine.iter() {
                lines.push(format!("- {}-{}: {}", block.start, block.end, block.task));
            }
        }
        Artifact::Freeform(text) => lines.push(text.trim().to_string()),
    }
}

/// Trim the body and append the trailer
fn finish(body: &str) -> PlanDocument {
    PlanDocument(format!("{}\n\n---\n{}\n", body.trim(), TRAILER))
}
