//! AFL fuzz harness for the selection engine
//!
//! This harness checks, for arbitrary edit sequences:
//! 1. Agreement: the tree selects exactly the positions an ordered set holds
//! 2. Canonical form: every intermediate selection passes `check_invariants`
//! 3. Persistence: selections taken earlier still hold their old contents
//!
//! Usage: cargo afl build --features afl --bin fuzz_selection

use std::collections::BTreeSet;

use afl::fuzz;
use vitexte::selection::{Position, Selection};

/// Largest position a select can reach: a `u8` start plus a length below 16.
const MAX_POSITION: Position = u8::MAX as Position + 15;

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    /// Select `start..=start + len`
    Select { start: u8, len: u8 },
    /// Delete one position, selected or not
    Delete { index: u8 },
    /// Remember the current selection for the persistence check
    Snapshot,
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 3;
        let rest = &bytes[1..];

        match op_type {
            0 if rest.len() >= 2 => {
                let op = FuzzOp::Select {
                    start: rest[0],
                    len: rest[1] % 16,
                };
                Some((op, &rest[2..]))
            }
            1 if !rest.is_empty() => Some((FuzzOp::Delete { index: rest[0] }, &rest[1..])),
            2 => Some((FuzzOp::Snapshot, rest)),
            _ => None,
        }
    }
}

fn positions(selection: &Selection) -> BTreeSet<Position> {
    selection.ranges().flat_map(|r| r.start()..=r.end()).collect()
}

fn main() {
    fuzz!(|data: &[u8]| {
        let mut selection = Selection::new();
        let mut oracle: BTreeSet<Position> = BTreeSet::new();
        let mut snapshots: Vec<(Selection, BTreeSet<Position>)> = Vec::new();
        let mut remaining = data;

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;

            match op {
                FuzzOp::Select { start, len } => {
                    let start = start as Position;
                    let end = start + len as Position;
                    selection = selection.select(start, end).expect("start <= end");
                    oracle.extend(start..=end);
                }

                FuzzOp::Delete { index } => {
                    let index = index as Position;
                    match selection.delete_index(index) {
                        Ok(next) => {
                            assert!(oracle.remove(&index), "deleted unselected {}", index);
                            selection = next;
                        }
                        Err(_) => assert!(!oracle.contains(&index), "failed to delete {}", index),
                    }
                }

                FuzzOp::Snapshot => snapshots.push((selection.clone(), oracle.clone())),
            }

            // CRITICAL INVARIANT: the tree stays canonical after every edit!
            if let Err(violation) = selection.check_invariants() {
                panic!("Invariant broken: {} in {:?}", violation, selection);
            }
        }

        assert_eq!(positions(&selection), oracle, "Final contents differ");
        for index in 0..=MAX_POSITION + 1 {
            assert_eq!(selection.contains(index), oracle.contains(&index), "contains({})", index);
        }

        // Earlier selections must be untouched
        for (i, (snapshot, expected)) in snapshots.iter().enumerate() {
            assert_eq!(&positions(snapshot), expected, "Snapshot {} changed", i);
        }
    });
}
