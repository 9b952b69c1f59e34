//! To-do items and their recommended order

use serde::{Deserialize, Serialize};

/// Priority assumed when a task does not state one
pub const DEFAULT_PRIORITY: u32 = 3;

fn default_priority() -> u32 {
    DEFAULT_PRIORITY
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,

    /// Lower is more urgent
    #[serde(default = "default_priority")]
    pub priority: u32,

    /// 1-based position assigned by the task orderer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_order: Option<usize>,
}

impl Task {
    pub fn new(title: impl Into<String>, priority: u32) -> Self {
        Self {
            title: title.into(),
            priority,
            recommended_order: None,
        }
    }
}

/// Demonstration tasks used when no task file is given
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new("Pay electricity bill", 1),
        Task::new("Deep clean kitchen", 2),
        Task::new("Update resume", 1),
        Task::new("Read 20 pages", 3),
        Task::new("Call parents", 2),
    ]
}
