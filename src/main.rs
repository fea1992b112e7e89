// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build the rate-limited Wikipedia client
// 3. Run one bounded-time search and measure how long it took
// 4. Print the path (or the timeout) as text or JSON
// 5. Exit with proper code (0 = path found, 1 = timed out, 2 = error)
//
// Everything interesting lives in src/search/ (the concurrent engine)
// and src/wiki/ (the Wikipedia client); this file is glue.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod search; // src/search/ - the concurrent BFS engine
mod wiki; // src/wiki/ - Wikipedia fetching and link extraction

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use cli::Cli;
use search::SearchOutcome;
use wiki::WikiClient;

// The #[tokio::main] attribute transforms our async main into a real main
// function: it creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Unexpected internal error (bad client config etc.)
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Main application logic
// Returns:
//   Ok(0) = path found
//   Ok(1) = no path within the timeout
//   Err   = unexpected error (reported as exit code 2 above)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Wikipedia titles use underscores; accept spaces for convenience
    let start = normalize_title(&cli.start);
    let target = normalize_title(&cli.target);

    println!("🔍 Searching for a path: '{}' -> '{}'", start, target);
    println!(
        "👷 {} worker(s), {}s timeout, {}ms between requests",
        cli.workers, cli.timeout_secs, cli.request_interval_ms
    );

    let client = Arc::new(WikiClient::new(Duration::from_millis(
        cli.request_interval_ms,
    ))?);

    let started = Instant::now();
    let outcome = search::find(
        client,
        &start,
        &target,
        Duration::from_secs(cli.timeout_secs),
        cli.workers,
    )
    .await;
    let elapsed = started.elapsed();

    if cli.json {
        print_json(&start, &target, &outcome, elapsed)?;
    } else {
        print_report(&outcome, elapsed);
    }

    match outcome {
        SearchOutcome::Found { .. } => Ok(0),
        SearchOutcome::TimedOut => Ok(1),
    }
}

// Converts a human-entered title into Wikipedia's canonical form
fn normalize_title(title: &str) -> String {
    title.trim().replace(' ', "_")
}

// Prints the human-readable outcome
fn print_report(outcome: &SearchOutcome, elapsed: Duration) {
    println!();
    match outcome {
        SearchOutcome::Found { path } => {
            println!(
                "✅ Took {:.1} seconds, result is: {}",
                elapsed.as_secs_f64(),
                path.join(" > ")
            );
        }
        SearchOutcome::TimedOut => {
            println!(
                "⏱️  No path found within {:.1} seconds",
                elapsed.as_secs_f64()
            );
        }
    }
}

// The structure we serialize for --json output
#[derive(Serialize)]
struct SearchReport<'a> {
    start: &'a str,
    target: &'a str,
    found: bool,
    // None when the search timed out; skipped in the JSON then
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a [String]>,
    elapsed_secs: f64,
}

// Prints the outcome as pretty JSON on stdout
fn print_json(
    start: &str,
    target: &str,
    outcome: &SearchOutcome,
    elapsed: Duration,
) -> Result<()> {
    let report = SearchReport {
        start,
        target,
        found: matches!(outcome, SearchOutcome::Found { .. }),
        path: match outcome {
            SearchOutcome::Found { path } => Some(path.as_slice()),
            SearchOutcome::TimedOut => None,
        },
        elapsed_secs: elapsed.as_secs_f64(),
    };

    let json_output = serde_json::to_string_pretty(&report)?;
    println!("{}", json_output);
    Ok(())
}
