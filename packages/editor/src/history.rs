//! # Undo/Redo History
//!
//! Bounded double stack of applied commands.
//!
//! ## Design
//!
//! - Each command records its inverse before being applied
//! - Undo applies the inverses and moves the entry to the redo stack
//! - Redo reapplies the original commands
//! - New entries clear the redo stack
//! - Batches group several commands into one undo step
//! - Undo and redo run on a working copy; the entry only moves if every
//!   command in it succeeded
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new();
//! let mut project = Project::new("Site");
//!
//! history.apply(&command, &mut project)?;
//! history.undo(&mut project)?;
//! history.redo(&mut project)?;
//! ```

use crate::{Command, CommandError};
use pagecraft_model::Project;
use tracing::trace;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Commands undone and redone together
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// In application order
    pub commands: Vec<Command>,

    /// In undo order (reverse of application)
    pub inverses: Vec<Command>,

    pub description: Option<String>,
}

impl HistoryEntry {
    pub fn single(command: Command, inverse: Command) -> Self {
        Self {
            commands: vec![command],
            inverses: vec![inverse],
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct History {
    /// Most recent last
    undo_stack: Vec<HistoryEntry>,

    /// Most recent last
    redo_stack: Vec<HistoryEntry>,

    /// 0 = unlimited
    max_levels: usize,

    current_batch: Option<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply a command and record it for undo.
    pub fn apply(&mut self, command: &Command, project: &mut Project) -> Result<(), CommandError> {
        // Inverse comes from the pre-change state
        let inverse = command.to_inverse(project)?;
        command.apply(project)?;

        trace!(command = command.name(), "Recorded command");

        if let Some(batch) = &mut self.current_batch {
            batch.commands.push(command.clone());
            batch.inverses.insert(0, inverse);
        } else {
            self.push_entry(HistoryEntry::single(command.clone(), inverse));
        }

        Ok(())
    }

    /// Start grouping commands into one undo step.
    pub fn begin_batch(&mut self, description: Option<String>) {
        self.current_batch = Some(HistoryEntry {
            commands: Vec::new(),
            inverses: Vec::new(),
            description,
        });
    }

    /// Close the current batch. Empty batches record nothing.
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if !batch.commands.is_empty() {
                self.push_entry(batch);
            }
        }
    }

    /// Drop the current batch without recording it.
    pub fn abort_batch(&mut self) {
        self.current_batch = None;
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Undo the most recent entry. `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self, project: &mut Project) -> Result<bool, CommandError> {
        let Some(entry) = self.undo_stack.last() else {
            return Ok(false);
        };

        *project = replay(&entry.inverses, project)?;

        if let Some(entry) = self.undo_stack.pop() {
            self.redo_stack.push(entry);
        }
        Ok(true)
    }

    /// Redo the most recently undone entry. `Ok(false)` when there is none.
    pub fn redo(&mut self, project: &mut Project) -> Result<bool, CommandError> {
        let Some(entry) = self.redo_stack.last() else {
            return Ok(false);
        };

        *project = replay(&entry.commands, project)?;

        if let Some(entry) = self.redo_stack.pop() {
            self.undo_stack.push(entry);
        }
        Ok(true)
    }

    /// Whether any recorded command or inverse, on either stack, matches.
    pub fn references(&self, predicate: impl Fn(&Command) -> bool) -> bool {
        self.undo_stack
            .iter()
            .chain(&self.redo_stack)
            .flat_map(|entry| entry.commands.iter().chain(&entry.inverses))
            .any(|command| predicate(command))
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply `commands` to a copy of `project`; the original is untouched on error.
fn replay(commands: &[Command], project: &Project) -> Result<Project, CommandError> {
    let mut working = project.clone();
    for command in commands {
        command.apply(&mut working)?;
    }
    Ok(working)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::Block;
    use serde_json::json;

    fn project() -> Project {
        let mut project = Project::new("Test");
        project.pages[0].blocks = vec![Block::new("a", "hero").with_prop("title", "Hello")];
        project
    }

    fn set_title(title: &str) -> Command {
        let mut patch = pagecraft_model::Props::new();
        patch.insert("title".to_string(), json!(title));
        Command::UpdateBlockProps {
            block_id: "a".to_string(),
            patch,
        }
    }

    fn title(project: &Project) -> &str {
        project.find_block("a").unwrap().props["title"].as_str().unwrap()
    }

    #[test]
    fn test_history_creation() {
        let history = History::new();
        assert_eq!(history.undo_levels(), 0);
        assert_eq!(history.redo_levels(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_apply_undo_redo() {
        let mut project = project();
        let mut history = History::new();

        history.apply(&set_title("World"), &mut project).unwrap();
        assert_eq!(title(&project), "World");
        assert_eq!(history.undo_levels(), 1);

        assert!(history.undo(&mut project).unwrap());
        assert_eq!(title(&project), "Hello");
        assert_eq!(history.redo_levels(), 1);

        assert!(history.redo(&mut project).unwrap());
        assert_eq!(title(&project), "World");
        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.redo_levels(), 0);
    }

    #[test]
    fn test_batched_commands() {
        let mut project = project();
        let mut history = History::new();

        history.begin_batch(Some("Update greeting".to_string()));
        history.apply(&set_title("World"), &mut project).unwrap();
        history.apply(&set_title("Everyone!"), &mut project).unwrap();
        history.end_batch();

        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.undo_description(), Some("Update greeting"));

        history.undo(&mut project).unwrap();
        assert_eq!(title(&project), "Hello");
        assert_eq!(history.undo_levels(), 0);
    }

    #[test]
    fn test_new_command_clears_redo() {
        let mut project = project();
        let mut history = History::new();

        history.apply(&set_title("World"), &mut project).unwrap();
        history.undo(&mut project).unwrap();
        assert_eq!(history.redo_levels(), 1);

        history.apply(&set_title("Everyone"), &mut project).unwrap();
        assert_eq!(history.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut project = project();
        let mut history = History::with_max_levels(2);

        for i in 0..3 {
            history.apply(&set_title(&format!("Text {}", i)), &mut project).unwrap();
        }

        assert_eq!(history.undo_levels(), 2);
    }

    #[test]
    fn test_rejected_command_records_nothing() {
        let mut project = project();
        let before = project.clone();
        let mut history = History::new();

        let missing = Command::RemoveBlock {
            page_id: "home".to_string(),
            block_id: "nope".to_string(),
        };
        assert!(history.apply(&missing, &mut project).is_err());
        assert_eq!(project, before);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_failed_undo_keeps_entry_and_project() {
        let mut project = project();
        let mut history = History::new();
        history.apply(&set_title("World"), &mut project).unwrap();

        // Block removed behind the history's back
        project.pages[0].blocks.clear();
        let before = project.clone();

        assert_eq!(
            history.undo(&mut project),
            Err(CommandError::BlockNotFound("a".to_string()))
        );
        assert_eq!(project, before);
        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.redo_levels(), 0);
    }

    #[test]
    fn test_aborted_batch_records_nothing() {
        let mut project = project();
        let mut history = History::new();

        history.begin_batch(None);
        history.apply(&set_title("World"), &mut project).unwrap();
        history.abort_batch();

        assert!(!history.is_batching());
        assert!(!history.can_undo());
    }
}
