//! Rule-based task orderer

use tracing::debug;

use crate::domain::Task;

/// Stable sort by ascending priority, then number positions from 1
pub fn order_tasks(mut tasks: Vec<Task>) -> Vec<Task> {
    debug!(count = tasks.len(), "order_tasks: called");
    tasks.sort_by_key(|t| t.priority);
    for (index, task) in tasks.iter_mut().enumerate() {
        task.recommended_order = Some(index + 1);
    }
    tasks
}
