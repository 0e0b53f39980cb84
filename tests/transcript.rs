//! Tests for transcripts: loading words and applying selections to them.

use vitexte::error::TranscriptError;
use vitexte::history::{Edit, History};
use vitexte::selection::Selection;
use vitexte::transcript::{Transcript, WordDelta};

const WORDS_JSON: &str = r#"{
  "words": [
    { "start": 0.00, "end": 0.31, "conf": 0.99, "delta": { "previous": 0.0,  "next": 0.05 }, "word": "so" },
    { "start": 0.36, "end": 0.52, "conf": 0.61, "delta": { "previous": 0.05, "next": 0.20 }, "word": "um" },
    { "start": 0.72, "end": 0.80, "conf": 0.97, "delta": { "previous": 0.20, "next": 0.02 }, "word": "I" },
    { "start": 0.82, "end": 1.10, "conf": 0.95, "delta": { "previous": 0.02, "next": 0.30 }, "word": "think" },
    { "start": 1.40, "end": 1.55, "conf": 0.58, "delta": { "previous": 0.30, "next": 0.10 }, "word": "uh" },
    { "start": 1.65, "end": 1.80, "conf": 0.98, "delta": { "previous": 0.10, "next": 0.04 }, "word": "we" },
    { "start": 1.84, "end": 2.10, "conf": 0.96, "delta": { "previous": 0.04, "next": 0.00 }, "word": "ship" }
  ]
}"#;

fn load() -> Transcript {
    Transcript::from_json(WORDS_JSON).unwrap()
}

#[test]
fn parse_words() {
    let transcript = load();
    assert_eq!(transcript.len(), 7);
    assert_eq!(transcript.text(), "so um I think uh we ship");

    let um = transcript.get(1).unwrap();
    assert_eq!(um.word, "um");
    assert_eq!(um.conf, 0.61);
    assert_eq!(um.delta, WordDelta { previous: 0.05, next: 0.20 });
    assert!(transcript.get(7).is_none());
}

#[test]
fn missing_delta_defaults_to_zero() {
    let json = r#"{ "words": [ { "start": 1.0, "end": 1.5, "conf": 0.9, "word": "hi" } ] }"#;
    let transcript = Transcript::from_json(json).unwrap();
    assert_eq!(transcript.get(0).unwrap().delta, WordDelta::default());
}

#[test]
fn malformed_json_is_reported() {
    let err = Transcript::from_json(r#"{ "words": [ { "word": 3 } ] }"#).unwrap_err();
    assert!(matches!(err, TranscriptError::Parse(_)));
    assert!(err.to_string().starts_with("malformed transcript"));
}

#[test]
fn select_within_the_transcript() {
    let transcript = load();
    let selection = transcript.select(&Selection::new(), 1, 1).unwrap();
    let selection = transcript.select(&selection, 4, 4).unwrap();

    let picked: Vec<(usize, &str)> = transcript
        .selected_words(&selection)
        .map(|(i, word)| (i, word.word.as_str()))
        .collect();
    assert_eq!(picked, vec![(1, "um"), (4, "uh")]);

    let err = transcript.select(&selection, 5, 7).unwrap_err();
    assert_eq!(err.to_string(), "position 7 is outside the transcript (7 words)");
}

#[test]
fn batch_delete_after_editing() {
    let transcript = load();
    let mut history = History::new();
    history.apply(Edit::Select { start: 0, end: 4 }).unwrap();
    history.apply(Edit::Delete { index: 2 }).unwrap();
    history.apply(Edit::Delete { index: 3 }).unwrap();
    history.apply(Edit::Delete { index: 0 }).unwrap();

    let edited = transcript.remove_selected(history.current());
    assert_eq!(edited.text(), "so I think we ship");
    assert_eq!(edited.len(), 5);

    history.undo();
    let edited = transcript.remove_selected(history.current());
    assert_eq!(edited.text(), "I think we ship");
}

#[test]
fn serialize_round_trip_keeps_words() {
    let transcript = load();
    let json = serde_json::to_string(&transcript).unwrap();
    assert_eq!(Transcript::from_json(&json).unwrap(), transcript);
}
