//! Replay an edit script against an empty selection
//!
//! Usage: cargo run --features cli --bin replay -- [script]
//!
//! Reads one edit per line (`select <start> <end>` or `delete <index>`) from
//! the given file, or stdin when no file is given. Blank lines and lines
//! starting with `#` are skipped. The selection is printed after every edit;
//! the first failing edit stops the replay with a non-zero exit code.
//!
//! Set `RUST_LOG=vitexte=debug` to see merges and splits as they happen.

use std::io::Read;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vitexte::history::{Edit, History};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn read_script(path: Option<&str>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut script = String::new();
            std::io::stdin().read_to_string(&mut script)?;
            Ok(script)
        }
    }
}

fn main() -> ExitCode {
    enable_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [script]", args[0]);
        return ExitCode::FAILURE;
    }

    let script = match read_script(args.get(1).map(String::as_str)) {
        Ok(script) => script,
        Err(err) => {
            error!(%err, "failed to read script");
            return ExitCode::FAILURE;
        }
    };

    let mut history = History::new();
    let mut applied = 0usize;
    for (line_number, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let edit: Edit = match line.parse() {
            Ok(edit) => edit,
            Err(err) => {
                error!(line = line_number + 1, %err, "bad edit");
                return ExitCode::FAILURE;
            }
        };

        match history.apply(edit) {
            Ok(selection) => println!("{:<20} {}", edit.to_string(), selection),
            Err(err) => {
                error!(line = line_number + 1, %edit, %err, "edit rejected");
                return ExitCode::FAILURE;
            }
        }
        applied += 1;
    }

    let selection = history.current();
    info!(
        edits = applied,
        intervals = selection.interval_count(),
        positions = selection.len(),
        depth = selection.depth(),
        "replay finished"
    );
    ExitCode::SUCCESS
}
