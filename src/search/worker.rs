// src/search/worker.rs
// =============================================================================
// This module is the loop each pooled worker task runs.
//
// One iteration:
// 1. Stop if a winner exists or the deadline has passed
// 2. Pull the next node from the frontier - racing the dequeue against
//    the deadline timer and the result slot, so a worker parked on an
//    empty queue still notices both
// 3. Ask the LinkSource for the node's outbound links
// 4. Links that match the target get published (first publisher wins);
//    everything else goes back into the frontier as depth+1 successors
//
// Failure policy (deliberately forgiving):
// - A fetch error for one title is a warning, not a search failure: the
//   worker drops that branch and moves on
// - An empty link set (dead or missing page) likewise abandons only
//   that branch
// - Stopping because another worker won, or because time ran out, is
//   normal control flow and is not logged at all
// =============================================================================

use std::sync::Arc;

use tokio::time::{self, Instant};

use super::coordinator::SearchContext;
use super::node::PathNode;
use super::LinkSource;

// Runs one worker until the search is decided
//
// All workers share the same context; the id only labels warnings.
pub(crate) async fn run<S: LinkSource>(id: usize, ctx: Arc<SearchContext<S>>) {
    loop {
        // A winner published by anyone stops everyone within one iteration
        if ctx.result.get().is_some() {
            return;
        }
        if Instant::now() >= ctx.deadline {
            return;
        }

        // Blocking dequeue, but deadline- and winner-aware: an empty
        // frontier must never turn into an indefinite park
        let node = tokio::select! {
            node = ctx.frontier.dequeue() => node,
            _ = time::sleep_until(ctx.deadline) => return,
            _ = ctx.result.wait() => return,
        };

        let links = match ctx.source.fetch_links(&node.title).await {
            Ok(links) => links,
            Err(e) => {
                // Transient per-title failure: this branch dies, the
                // search does not
                eprintln!("  Warning: worker {id}: failed to fetch '{}': {e}", node.title);
                continue;
            }
        };

        if links.is_empty() {
            // Dead or missing page - nothing to expand here
            continue;
        }

        for link in links {
            if link.to_lowercase() == ctx.target_key {
                // Found it. Publish and stop whether we won or lost the
                // race - there is nothing useful left for this worker.
                ctx.result.publish(PathNode::child(link, &node));
                return;
            }
            // The frontier silently drops already-visited titles
            ctx.frontier.enqueue(PathNode::child(link, &node));
        }
    }
}
