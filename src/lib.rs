//! Vitexte - word-range selection for transcript editing.
//!
//! Users mark ranges of words in a transcript, grow the selection with more
//! ranges, drop single words from it, and ask whether a word is selected.
//! The selection drives playback looping and batch deletion elsewhere in the
//! editor.
//!
//! # Quick Start
//!
//! ```
//! use vitexte::history::{Edit, History};
//!
//! let mut history = History::new();
//! history.apply(Edit::Select { start: 4, end: 8 })?;
//! history.apply(Edit::Delete { index: 6 })?;
//! assert_eq!(history.current().to_string(), "{[4, 5], [7, 8]}");
//!
//! history.undo();
//! assert!(history.current().contains(6));
//! # Ok::<(), vitexte::error::SelectionError>(())
//! ```

pub mod error;
pub mod history;
pub mod selection;
pub mod transcript;

pub use error::SelectionError;
pub use selection::{Interval, Position, Selection};
