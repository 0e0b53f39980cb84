//! Error types for selection editing and transcript handling.

use thiserror::Error;

use crate::selection::Position;

/// Misuse of the selection engine.
///
/// Both variants indicate a caller bug (the UI and the selection have drifted
/// apart); neither is retried.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("invalid range: start {start} > end {end}")]
    InvalidRange { start: Position, end: Position },

    #[error("position {index} is not selected")]
    PositionNotSelected { index: Position },
}

/// Errors raised while loading a transcript or editing against its domain.
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("malformed transcript: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("position {index} is outside the transcript ({len} words)")]
    OutOfRange { index: Position, len: usize },

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Errors raised while parsing an edit script line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("empty edit")]
    Empty,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("`{command}` is missing its {argument} argument")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("invalid position: {0}")]
    InvalidNumber(String),

    #[error("unexpected trailing input: {0}")]
    TrailingInput(String),
}
