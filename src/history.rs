//! Editing history over selection snapshots.
//!
//! The editor owns one current `Selection` and replaces it wholesale after
//! every edit. Because selections are persistent, keeping the previous ones
//! for undo costs only the nodes each edit rebuilt.
//!
//! Edits can also be written as one-line commands, which is what the
//! `replay` binary reads:
//!
//! ```text
//! select 4 8
//! delete 6
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{ScriptError, SelectionError};
use crate::selection::{Position, Selection};

/// A user action on the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    /// A click or drag over the words `start..=end`.
    Select { start: Position, end: Position },
    /// A delete-tool click on one word.
    Delete { index: Position },
}

impl Edit {
    /// Apply the edit, producing the next selection.
    pub fn apply(&self, selection: &Selection) -> Result<Selection, SelectionError> {
        return match *self {
            Edit::Select { start, end } => selection.select(start, end),
            Edit::Delete { index } => selection.delete_index(index),
        };
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Edit::Select { start, end } => write!(f, "select {} {}", start, end),
            Edit::Delete { index } => write!(f, "delete {}", index),
        };
    }
}

fn position(
    words: &mut std::str::SplitWhitespace<'_>,
    command: &'static str,
    argument: &'static str,
) -> Result<Position, ScriptError> {
    let word = words
        .next()
        .ok_or(ScriptError::MissingArgument { command, argument })?;
    return word
        .parse()
        .map_err(|_| ScriptError::InvalidNumber(word.to_string()));
}

impl FromStr for Edit {
    type Err = ScriptError;

    fn from_str(line: &str) -> Result<Edit, ScriptError> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(ScriptError::Empty)?;
        let edit = match command {
            "select" => {
                let start = position(&mut words, "select", "start")?;
                let end = position(&mut words, "select", "end")?;
                Edit::Select { start, end }
            }
            "delete" => Edit::Delete {
                index: position(&mut words, "delete", "index")?,
            },
            other => return Err(ScriptError::UnknownCommand(other.to_string())),
        };
        if let Some(extra) = words.next() {
            return Err(ScriptError::TrailingInput(extra.to_string()));
        }
        return Ok(edit);
    }
}

/// Undo/redo stacks of selection snapshots.
#[derive(Clone, Debug, Default)]
pub struct History {
    current: Selection,
    undo: Vec<Selection>,
    redo: Vec<Selection>,
}

impl History {
    pub fn new() -> History {
        return History::default();
    }

    /// Start from an existing selection with empty undo and redo stacks.
    pub fn with_selection(selection: Selection) -> History {
        return History {
            current: selection,
            undo: Vec::new(),
            redo: Vec::new(),
        };
    }

    pub fn current(&self) -> &Selection {
        return &self.current;
    }

    /// Apply an edit to the current selection.
    ///
    /// On success the previous selection goes on the undo stack and the redo
    /// stack is cleared. Edits that leave the selection unchanged record
    /// nothing. On failure the history is left as it was.
    pub fn apply(&mut self, edit: Edit) -> Result<&Selection, SelectionError> {
        let next = edit.apply(&self.current)?;
        if next == self.current {
            debug!(%edit, "edit left selection unchanged");
            return Ok(&self.current);
        }
        let previous = std::mem::replace(&mut self.current, next);
        self.undo.push(previous);
        self.redo.clear();
        return Ok(&self.current);
    }

    /// Step back one edit. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.pop() else {
            return false;
        };
        let undone = std::mem::replace(&mut self.current, previous);
        self.redo.push(undone);
        return true;
    }

    /// Re-apply the last undone edit. Returns false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let replaced = std::mem::replace(&mut self.current, next);
        self.undo.push(replaced);
        return true;
    }

    pub fn can_undo(&self) -> bool {
        return !self.undo.is_empty();
    }

    pub fn can_redo(&self) -> bool {
        return !self.redo.is_empty();
    }

    /// Drop the current selection and both stacks.
    pub fn clear(&mut self) {
        self.current = Selection::new();
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(selection: &Selection) -> Vec<(Position, Position)> {
        return selection.ranges().map(|r| (r.start(), r.end())).collect();
    }

    #[test]
    fn parse_edits() {
        assert_eq!("select 4 8".parse::<Edit>(), Ok(Edit::Select { start: 4, end: 8 }));
        assert_eq!("  delete   6 ".parse::<Edit>(), Ok(Edit::Delete { index: 6 }));
        assert_eq!("".parse::<Edit>(), Err(ScriptError::Empty));
        assert_eq!(
            "toggle 3".parse::<Edit>(),
            Err(ScriptError::UnknownCommand("toggle".to_string()))
        );
        assert_eq!(
            "select 4".parse::<Edit>(),
            Err(ScriptError::MissingArgument {
                command: "select",
                argument: "end"
            })
        );
        assert_eq!(
            "delete -1".parse::<Edit>(),
            Err(ScriptError::InvalidNumber("-1".to_string()))
        );
        assert_eq!(
            "delete 1 2".parse::<Edit>(),
            Err(ScriptError::TrailingInput("2".to_string()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for edit in [Edit::Select { start: 3, end: 9 }, Edit::Delete { index: 12 }] {
            assert_eq!(edit.to_string().parse::<Edit>(), Ok(edit));
        }
    }

    #[test]
    fn undo_and_redo() {
        let mut history = History::new();
        history.apply(Edit::Select { start: 4, end: 8 }).unwrap();
        history.apply(Edit::Delete { index: 6 }).unwrap();
        assert_eq!(ranges(history.current()), vec![(4, 5), (7, 8)]);

        assert!(history.undo());
        assert_eq!(ranges(history.current()), vec![(4, 8)]);
        assert!(history.undo());
        assert!(history.current().is_empty());
        assert!(!history.undo());

        assert!(history.redo());
        assert!(history.redo());
        assert_eq!(ranges(history.current()), vec![(4, 5), (7, 8)]);
        assert!(!history.redo());
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut history = History::new();
        history.apply(Edit::Select { start: 1, end: 2 }).unwrap();
        history.undo();
        assert!(history.can_redo());
        history.apply(Edit::Select { start: 5, end: 6 }).unwrap();
        assert!(!history.can_redo());
        assert_eq!(ranges(history.current()), vec![(5, 6)]);
    }

    #[test]
    fn failed_edit_changes_nothing() {
        let mut history = History::new();
        history.apply(Edit::Select { start: 1, end: 2 }).unwrap();
        let err = history.apply(Edit::Delete { index: 9 }).unwrap_err();
        assert_eq!(err, SelectionError::PositionNotSelected { index: 9 });
        assert_eq!(ranges(history.current()), vec![(1, 2)]);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn no_op_edit_is_not_recorded() {
        let mut history = History::new();
        history.apply(Edit::Select { start: 1, end: 9 }).unwrap();
        history.apply(Edit::Select { start: 3, end: 4 }).unwrap();
        assert!(history.undo());
        assert!(!history.can_undo());
    }

    #[test]
    fn clear_resets_everything() {
        let mut history = History::with_selection(Selection::new().select(0, 3).unwrap());
        history.apply(Edit::Delete { index: 0 }).unwrap();
        history.clear();
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
