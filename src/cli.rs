// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Defaults mirror the reference behavior: 10 workers, a 5 minute
// timeout and 200 ms between outbound requests.
// =============================================================================

use clap::Parser;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "wiki-racer",
    version = "0.1.0",
    about = "Races worker tasks through Wikipedia links to find a path between two articles",
    long_about = "wiki-racer runs a bounded-time, multi-worker breadth-first search over \
                  Wikipedia's link graph: start at one article, follow links level by level, \
                  and report the first path that reaches the target article."
)]
pub struct Cli {
    /// Title of the article to start from (e.g. "Java_(programming_language)")
    ///
    /// Spaces are accepted and converted to underscores
    pub start: String,

    /// Title of the article to reach (e.g. "TiVo_Inc.")
    pub target: String,

    /// Overall search timeout in seconds
    ///
    /// When it elapses the search stops and reports a timeout
    #[arg(long, default_value_t = 300)]
    pub timeout_secs: u64,

    /// Number of concurrent worker tasks expanding the frontier
    #[arg(long, default_value_t = crate::search::DEFAULT_WORKERS)]
    pub workers: usize,

    /// Minimum milliseconds between consecutive requests to Wikipedia
    ///
    /// All workers share this budget - it spaces requests globally,
    /// not per worker
    #[arg(long, default_value_t = 200)]
    pub request_interval_ms: u64,

    /// Output the result in JSON format instead of text
    ///
    /// This is an optional flag: --json
    #[arg(long)]
    pub json: bool,
}
