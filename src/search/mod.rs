// src/search/mod.rs
// =============================================================================
// This module contains the concurrent breadth-first search engine.
//
// Submodules:
// - node: PathNode, one step of a candidate path with a back-pointer chain
// - frontier: the shared depth-ordered work queue with dedup and blocking
// - result: the write-once slot the first winning worker publishes into
// - worker: the expansion loop each pooled task runs
// - coordinator: find() - seeds the frontier, spawns the pool, enforces
//   the deadline and reconstructs the final path
//
// This file (mod.rs) is the module root - it defines the LinkSource trait
// (the engine's only view of the outside world) and re-exports the public
// API so callers write `search::find(...)` instead of reaching into
// submodules.
//
// Rust concepts:
// - Traits: LinkSource is the seam between the engine and the network
// - impl Future + Send: lets implementors write plain async fns while
//   keeping worker tasks spawnable on the multi-thread runtime
// =============================================================================

mod coordinator;
mod frontier;
mod node;
mod result;
mod worker;

use std::collections::HashSet;
use std::future::Future;

use anyhow::Result;

// Re-export the public API callers actually reach for; the internal
// types (Frontier, PathNode, ResultSlot) stay behind find()
pub use coordinator::{find, SearchOutcome, DEFAULT_WORKERS};

// The engine's only dependency on the outside world
//
// Given an article title, return the set of titles it links to.
// Contract for implementors:
// - Err means a transport/parse failure for this one title; the engine
//   treats it as "no links from this page" and keeps searching
// - An empty set means the page exists but has no qualifying links
// - May block (network I/O, rate limiting); must be callable from many
//   worker tasks at once
pub trait LinkSource: Send + Sync {
    fn fetch_links(&self, title: &str) -> impl Future<Output = Result<HashSet<String>>> + Send;
}
