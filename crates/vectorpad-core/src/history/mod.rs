//! Undo/redo history.

mod commands;

pub use commands::{Command, CommandError};

use crate::canvas::Canvas;
use log::debug;
use std::collections::VecDeque;

/// Maximum number of undo entries kept by default.
pub const DEFAULT_MAX_UNDO: usize = 100;

/// Undo and redo stacks of executed commands.
///
/// Executing a new command discards the redo stack. The oldest undo entry is
/// dropped once `max_depth` is exceeded.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Command>,
    redo_stack: Vec<Command>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UNDO)
    }
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Apply a command and record it. A command that fails to apply is not
    /// recorded and leaves both stacks as they were.
    pub fn execute(&mut self, command: Command, canvas: &mut Canvas) -> Result<(), CommandError> {
        command.apply(canvas)?;
        debug!("execute: {}", command.label());
        self.record(command);
        Ok(())
    }

    /// Record a command whose effect is already on the canvas.
    ///
    /// Gestures mutate the shape while the pointer moves, so by the time the
    /// command exists its effect has happened. Apply is idempotent for every
    /// command kind except `AddShape`, which must go through `execute`.
    pub fn record(&mut self, command: Command) {
        self.undo_stack.push_back(command);
        self.redo_stack.clear();
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
    }

    /// Revert the most recent command. Returns false if there was nothing to
    /// undo.
    pub fn undo(&mut self, canvas: &mut Canvas) -> Result<bool, CommandError> {
        let Some(command) = self.undo_stack.pop_back() else {
            return Ok(false);
        };
        if let Err(err) = command.revert(canvas) {
            self.undo_stack.push_back(command);
            return Err(err);
        }
        debug!("undo: {}", command.label());
        self.redo_stack.push(command);
        Ok(true)
    }

    /// Re-apply the most recently undone command. Returns false if there was
    /// nothing to redo.
    pub fn redo(&mut self, canvas: &mut Canvas) -> Result<bool, CommandError> {
        let Some(command) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.apply(canvas) {
            self.redo_stack.push(command);
            return Err(err);
        }
        debug!("redo: {}", command.label());
        self.undo_stack.push_back(command);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Label of the command `undo` would revert.
    pub fn undo_label(&self) -> Option<&'static str> {
        self.undo_stack.back().map(Command::label)
    }

    /// Label of the command `redo` would re-apply.
    pub fn redo_label(&self) -> Option<&'static str> {
        self.redo_stack.last().map(Command::label)
    }

    /// Empty both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
