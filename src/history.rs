//! Bounded undo/redo stacks over [`Command`]s.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use tracing::debug;

use crate::command::Command;
use crate::consts::HISTORY_LIMIT;
use crate::doc::FloorPlanData;

#[derive(Debug, Clone)]
pub struct UndoRedoManager {
    undo_stack: VecDeque<Command>,
    redo_stack: Vec<Command>,
    limit: usize,
}

impl Default for UndoRedoManager {
    fn default() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }
}

impl UndoRedoManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A manager keeping at most `limit` undoable commands (at least one).
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self { undo_stack: VecDeque::new(), redo_stack: Vec::new(), limit: limit.max(1) }
    }

    /// Run `cmd` against `plan`, record it and drop the redo history.
    pub fn execute(&mut self, mut cmd: Command, plan: &FloorPlanData) -> FloorPlanData {
        let next = cmd.execute(plan);
        debug!(command = cmd.label(), depth = self.undo_stack.len() + 1, "execute");
        self.undo_stack.push_back(cmd);
        if self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
        next
    }

    /// Revert the most recent command. Returns `plan` unchanged when there is
    /// nothing to undo.
    pub fn undo(&mut self, plan: &FloorPlanData) -> FloorPlanData {
        let Some(cmd) = self.undo_stack.pop_back() else {
            return plan.clone();
        };
        debug!(command = cmd.label(), "undo");
        let prev = cmd.undo(plan);
        self.redo_stack.push(cmd);
        prev
    }

    /// Re-apply the most recently undone command. Returns `plan` unchanged
    /// when there is nothing to redo.
    pub fn redo(&mut self, plan: &FloorPlanData) -> FloorPlanData {
        let Some(mut cmd) = self.redo_stack.pop() else {
            return plan.clone();
        };
        debug!(command = cmd.label(), "redo");
        let next = cmd.execute(plan);
        self.undo_stack.push_back(cmd);
        next
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
