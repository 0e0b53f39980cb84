//! Transcript words, the domain selections index into.
//!
//! A transcript is the ordered word list produced by speech recognition.
//! Position `i` of a selection refers to `words[i]`; the engine itself never
//! looks at the words, this module only checks indices against the list and
//! applies a finished selection to it.
//!
//! The JSON layout matches what the transcript service serves:
//!
//! ```json
//! { "words": [
//!     { "start": 0.5, "end": 0.9, "conf": 0.98,
//!       "delta": { "previous": 0.0, "next": 0.12 }, "word": "hello" }
//! ] }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TranscriptError;
use crate::selection::{Interval, Position, Selection};

/// Silence around a word, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WordDelta {
    pub previous: f64,
    pub next: f64,
}

/// One recognised word with its time span in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub start: f64,
    pub end: f64,
    /// Recogniser confidence in `[0, 1]`.
    pub conf: f64,
    #[serde(default)]
    pub delta: WordDelta,
    pub word: String,
}

/// An ordered list of words.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    words: Vec<Word>,
}

impl Transcript {
    pub fn new(words: Vec<Word>) -> Transcript {
        return Transcript { words };
    }

    /// Parse a `{ "words": [...] }` document.
    pub fn from_json(json: &str) -> Result<Transcript, TranscriptError> {
        let transcript: Transcript = serde_json::from_str(json)?;
        debug!(words = transcript.len(), "loaded transcript");
        return Ok(transcript);
    }

    pub fn len(&self) -> usize {
        return self.words.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.words.is_empty();
    }

    pub fn get(&self, index: Position) -> Option<&Word> {
        return self.words.get(index);
    }

    pub fn words(&self) -> &[Word] {
        return &self.words;
    }

    /// The valid positions, `[0, len - 1]`.
    pub fn domain(&self) -> Option<Interval> {
        let last = self.words.len().checked_sub(1)?;
        return Some(Interval::point(0).hull(&Interval::point(last)));
    }

    /// Select `[start, end]`, rejecting positions past the last word.
    pub fn select(
        &self,
        selection: &Selection,
        start: Position,
        end: Position,
    ) -> Result<Selection, TranscriptError> {
        let range = Interval::new(start, end)?;
        if range.end() >= self.words.len() {
            return Err(TranscriptError::OutOfRange {
                index: range.end(),
                len: self.words.len(),
            });
        }
        return Ok(selection.select_interval(range));
    }

    /// The selected words with their positions, in transcript order.
    ///
    /// Selected positions past the end of the transcript are skipped.
    pub fn selected_words<'a>(
        &'a self,
        selection: &'a Selection,
    ) -> impl Iterator<Item = (Position, &'a Word)> + 'a {
        let len = self.words.len();
        return selection
            .ranges()
            .take_while(move |range| range.start() < len)
            .flat_map(move |range| range.start()..=range.end().min(len - 1))
            .map(move |index| (index, &self.words[index]));
    }

    /// The words joined by single spaces.
    pub fn text(&self) -> String {
        return self
            .words
            .iter()
            .map(|word| word.word.as_str())
            .collect::<Vec<_>>()
            .join(" ");
    }

    /// A copy of the transcript with every selected word removed.
    pub fn remove_selected(&self, selection: &Selection) -> Transcript {
        let words: Vec<Word> = self
            .words
            .iter()
            .enumerate()
            .filter(|(index, _)| !selection.contains(*index))
            .map(|(_, word)| word.clone())
            .collect();
        debug!(
            removed = self.words.len() - words.len(),
            kept = words.len(),
            "removed selected words"
        );
        return Transcript { words };
    }
}

impl From<Vec<Word>> for Transcript {
    fn from(words: Vec<Word>) -> Transcript {
        return Transcript::new(words);
    }
}
