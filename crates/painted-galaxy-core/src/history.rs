//! Undo/redo stacks of action batches.
//!
//! The history only stores batches; applying and reverting them is the
//! editor's job. Recording a new batch discards everything that was undone.

use painted_galaxy_logic::action::Action;

/// Underflow of the undo or redo stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    NothingToUndo,
    NothingToRedo,
}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryError::NothingToUndo => write!(f, "No actions to undo"),
            HistoryError::NothingToRedo => write!(f, "No actions to redo"),
        }
    }
}

impl std::error::Error for HistoryError {}

#[derive(Debug, Clone, Default)]
pub struct History {
    done: Vec<Vec<Action>>,
    undone: Vec<Vec<Action>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a freshly applied batch. Empty batches are not recorded.
    pub fn record(&mut self, batch: Vec<Action>) {
        if batch.is_empty() {
            return;
        }
        self.done.push(batch);
        self.undone.clear();
    }

    /// Move the latest batch to the redo stack and return it for reverting.
    pub fn undo(&mut self) -> Result<&[Action], HistoryError> {
        let batch = self.done.pop().ok_or(HistoryError::NothingToUndo)?;
        self.undone.push(batch);
        Ok(self.undone.last().map(Vec::as_slice).unwrap_or_default())
    }

    /// Move the latest undone batch back and return it for re-applying.
    pub fn redo(&mut self) -> Result<&[Action], HistoryError> {
        let batch = self.undone.pop().ok_or(HistoryError::NothingToRedo)?;
        self.done.push(batch);
        Ok(self.done.last().map(Vec::as_slice).unwrap_or_default())
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.done.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.undone.len()
    }

    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
    }
}
