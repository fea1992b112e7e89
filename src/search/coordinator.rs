// src/search/coordinator.rs
// =============================================================================
// This module orchestrates one end-to-end search call.
//
// What find() does:
// 1. Short-circuit if start and target are the same article
// 2. Compute the absolute deadline and build the shared context
//    (fresh Frontier + ResultSlot, never reused across searches)
// 3. Seed the frontier with the start node at depth 0
// 4. Spawn the worker pool into a JoinSet
// 5. Sleep until the first result is published OR the deadline fires OR
//    every worker has exited - whichever comes first (no busy-spin)
// 6. Shut the pool down so no task outlives this call
// 7. Read the slot and reconstruct the path, or report the timeout
//
// Why JoinSet?
// - It ties the worker tasks' lifetime to the search call: shutdown()
//   aborts whatever is still running and reaps every handle, so a timed
//   out search leaves nothing behind.
//
// Rust concepts:
// - tokio::select!: Wait on several futures, continue with the first
// - JoinSet: A managed set of spawned tasks with collective shutdown
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::{self, Instant};

use super::frontier::Frontier;
use super::node::PathNode;
use super::result::ResultSlot;
use super::{worker, LinkSource};

/// Worker pool size used when the caller does not override it
pub const DEFAULT_WORKERS: usize = 10;

// The terminal outcome of one search call
//
// Timing out is an expected outcome, not an error - which is why this is
// an enum and not an Err variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A path was found, in start-to-target order
    Found { path: Vec<String> },
    /// The deadline elapsed before any worker reached the target
    TimedOut,
}

impl SearchOutcome {
    /// The path joined with " > ", or None if the search timed out
    pub fn path_string(&self) -> Option<String> {
        match self {
            SearchOutcome::Found { path } => Some(path.join(" > ")),
            SearchOutcome::TimedOut => None,
        }
    }
}

// Everything the workers share, bundled so one Arc clone hands a worker
// its whole world
pub(crate) struct SearchContext<S> {
    pub(crate) frontier: Frontier,
    pub(crate) result: ResultSlot,
    pub(crate) source: Arc<S>,
    // Lower-cased target title; all comparisons are case-insensitive
    pub(crate) target_key: String,
    pub(crate) deadline: Instant,
}

// Runs one bounded-time breadth-first search from start to target
//
// Parameters:
//   source: where links come from (the real WikiClient, or a mock in tests)
//   start/target: article titles
//   timeout: how long the whole search may run
//   workers: pool size (DEFAULT_WORKERS = 10 matches the reference setup)
//
// Returns Found with the start-to-target path, or TimedOut. Per-page
// fetch problems never surface here - workers absorb them.
pub async fn find<S: LinkSource + 'static>(
    source: Arc<S>,
    start: &str,
    target: &str,
    timeout: Duration,
    workers: usize,
) -> SearchOutcome {
    let target_key = target.to_lowercase();

    // Searching for the page we are standing on: answer without a single
    // fetch. Without this the engine would expand the start page and only
    // match the target if some page linked back to it.
    if start.to_lowercase() == target_key {
        return SearchOutcome::Found {
            path: vec![start.to_string()],
        };
    }

    let deadline = Instant::now() + timeout;
    let ctx = Arc::new(SearchContext {
        frontier: Frontier::new(),
        result: ResultSlot::new(),
        source,
        target_key,
        deadline,
    });

    // Seed with the start node; it is the first insertion ever, so the
    // dedup set cannot drop it
    ctx.frontier.enqueue(PathNode::start(start));

    let mut pool = JoinSet::new();
    for id in 0..workers.max(1) {
        pool.spawn(worker::run(id, Arc::clone(&ctx)));
    }

    // Park until something decides the search. Each arm only wakes us;
    // the slot itself is the single source of truth below.
    tokio::select! {
        _ = ctx.result.wait() => {}
        _ = time::sleep_until(deadline) => {}
        _ = drain(&mut pool) => {}
    }

    // Abort and reap every remaining worker. A publish that sneaks in
    // while we shut down still counts - a usable answer beats a timeout.
    pool.shutdown().await;

    match ctx.result.get() {
        Some(winner) => SearchOutcome::Found {
            path: winner.path_titles(),
        },
        None => SearchOutcome::TimedOut,
    }
}

// Resolves once every worker task has finished on its own
async fn drain(pool: &mut JoinSet<()>) {
    while pool.join_next().await.is_some() {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};

    // In-memory link graph standing in for Wikipedia
    struct GraphSource {
        links: HashMap<String, Vec<String>>,
        failing: HashSet<String>,
        fetches: AtomicUsize,
    }

    impl GraphSource {
        fn new(edges: &[(&str, &[&str])]) -> Self {
            let links = edges
                .iter()
                .map(|(from, tos)| {
                    (
                        from.to_lowercase(),
                        tos.iter().map(|t| t.to_string()).collect(),
                    )
                })
                .collect();
            GraphSource {
                links,
                failing: HashSet::new(),
                fetches: AtomicUsize::new(0),
            }
        }

        fn failing_on(mut self, title: &str) -> Self {
            self.failing.insert(title.to_lowercase());
            self
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    impl crate::search::LinkSource for GraphSource {
        async fn fetch_links(&self, title: &str) -> anyhow::Result<HashSet<String>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let key = title.to_lowercase();
            if self.failing.contains(&key) {
                bail!("simulated fetch failure");
            }
            Ok(self
                .links
                .get(&key)
                .map(|links| links.iter().cloned().collect())
                .unwrap_or_default())
        }
    }

    const LONG: Duration = Duration::from_secs(10);

    #[tokio::test]
    async fn finds_a_two_hop_path() {
        let source = Arc::new(GraphSource::new(&[
            ("start", &["a"]),
            ("a", &["target"]),
        ]));

        let outcome = find(source, "start", "target", LONG, 4).await;
        assert_eq!(
            outcome.path_string().as_deref(),
            Some("start > a > target")
        );
    }

    #[tokio::test]
    async fn finds_a_direct_neighbor() {
        let source = Arc::new(GraphSource::new(&[("start", &["other", "target"])]));

        let outcome = find(source, "start", "target", LONG, 4).await;
        assert_eq!(outcome.path_string().as_deref(), Some("start > target"));
    }

    #[tokio::test]
    async fn target_match_is_case_insensitive() {
        let source = Arc::new(GraphSource::new(&[("start", &["Target_Page"])]));

        let outcome = find(source, "start", "TARGET_PAGE", LONG, 4).await;
        // The path carries the title as it appeared in the link
        assert_eq!(
            outcome.path_string().as_deref(),
            Some("start > Target_Page")
        );
    }

    #[tokio::test]
    async fn expired_deadline_times_out_without_blocking() {
        let source = Arc::new(GraphSource::new(&[("start", &["a"]), ("a", &["b"])]));

        // The whole call must come back promptly even with a dead deadline
        let outcome = tokio::time::timeout(
            Duration::from_secs(5),
            find(source, "start", "unreachable", Duration::ZERO, 4),
        )
        .await
        .expect("find must not block past its deadline");
        assert_eq!(outcome, SearchOutcome::TimedOut);
    }

    #[tokio::test]
    async fn unreachable_target_times_out() {
        // Small closed graph that never mentions the target
        let source = Arc::new(GraphSource::new(&[("start", &["a"]), ("a", &["start"])]));

        let outcome = tokio::time::timeout(
            Duration::from_secs(5),
            find(source, "start", "nowhere", Duration::from_millis(50), 4),
        )
        .await
        .expect("find must return once the deadline fires");
        assert_eq!(outcome, SearchOutcome::TimedOut);
    }

    #[tokio::test]
    async fn start_equals_target_answers_without_fetching() {
        let source = Arc::new(GraphSource::new(&[("rust", &["a"])]));

        let outcome = find(Arc::clone(&source), "Rust", "rUSt", LONG, 4).await;
        assert_eq!(outcome.path_string().as_deref(), Some("Rust"));
        assert_eq!(source.fetch_count(), 0);
    }

    #[tokio::test]
    async fn dead_pages_abandon_only_their_branch() {
        // "dead" yields no links at all; the path through "a" must still
        // be found
        let source = Arc::new(GraphSource::new(&[
            ("start", &["dead", "a"]),
            ("a", &["target"]),
        ]));

        let outcome = find(source, "start", "target", LONG, 4).await;
        assert_eq!(
            outcome.path_string().as_deref(),
            Some("start > a > target")
        );
    }

    #[tokio::test]
    async fn fetch_errors_do_not_abort_the_search() {
        let source = Arc::new(
            GraphSource::new(&[("start", &["bad", "good"]), ("good", &["target"])])
                .failing_on("bad"),
        );

        let outcome = find(source, "start", "target", LONG, 4).await;
        assert_eq!(
            outcome.path_string().as_deref(),
            Some("start > good > target")
        );
    }

    #[tokio::test]
    async fn cycles_do_not_trap_the_search() {
        let source = Arc::new(GraphSource::new(&[
            ("start", &["a"]),
            ("a", &["start", "b"]),
            ("b", &["a", "target"]),
        ]));

        let outcome = find(source, "start", "target", LONG, 4).await;
        assert_eq!(
            outcome.path_string().as_deref(),
            Some("start > a > b > target")
        );
    }

    #[test]
    fn timed_out_has_no_path_string() {
        assert_eq!(SearchOutcome::TimedOut.path_string(), None);
    }
}
