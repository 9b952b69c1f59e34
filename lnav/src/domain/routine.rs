//! Daily routine blocks

use serde::{Deserialize, Serialize};

use super::ClockTime;

/// One labelled interval of the day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineBlock {
    pub start: ClockTime,
    pub end: ClockTime,
    pub task: String,
}

impl RoutineBlock {
    pub fn new(start: ClockTime, end: ClockTime, task: impl Into<String>) -> Self {
        Self {
            start,
            end,
            task: task.into(),
        }
    }
}

/// Blocks in insertion order; chronology is not checked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    pub blocks: Vec<RoutineBlock>,
}

impl Routine {
    pub fn new(blocks: Vec<RoutineBlock>) -> Self {
        Self { blocks }
    }

    pub fn push(&mut self, block: RoutineBlock) {
        self.blocks.push(block);
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RoutineBlock> {
        self.blocks.iter()
    }
}
