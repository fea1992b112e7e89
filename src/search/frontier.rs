// src/search/frontier.rs
// =============================================================================
// This module implements the Frontier: the shared work queue of the search.
//
// It combines three jobs in one structure:
// 1. Level ordering: all depth-k nodes come out before any depth-(k+1)
//    node, which is what makes the search breadth-first
// 2. Deduplication: every lower-cased title is admitted at most once for
//    the lifetime of the search, so no page is ever expanded twice
// 3. Blocking retrieval: a worker that finds the queue empty parks until
//    another worker enqueues something
//
// Why dedup lives inside enqueue:
// - If callers checked "visited?" first and inserted second, two workers
//   could both pass the check and both insert the same title. Making the
//   check-and-insert a single critical section closes that race.
//
// How blocking works:
// - A tokio Semaphore carries exactly one permit per queued node.
//   enqueue adds a permit when it accepts a node; dequeue acquires a
//   permit before popping. The permit count always equals the item
//   count, so an acquired permit guarantees the pop will succeed and no
//   node is ever handed to two workers.
// - Semaphore::acquire is cancel safe, which lets workers race dequeue
//   against the search deadline in a select! without losing items.
//
// Rust concepts:
// - Mutex<T>: Protects the map + visited set as one unit
// - BTreeMap: Keeps levels sorted by depth, smallest first
// - VecDeque: FIFO within a level (insertion-order tie-break)
// =============================================================================

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use super::node::PathNode;

// The shared, depth-ordered, deduplicating work queue
//
// Created fresh for every search call; the visited set is cumulative for
// that call's whole lifetime and is never reset.
pub struct Frontier {
    state: Mutex<FrontierState>,
    // One permit per queued node; dequeue blocks here while empty
    available: Semaphore,
}

struct FrontierState {
    // depth -> FIFO of nodes at that depth; BTreeMap iterates smallest
    // depth first, which gives us level order for free
    levels: BTreeMap<usize, VecDeque<Arc<PathNode>>>,
    // Every lower-cased title ever admitted, including already-dequeued
    // ones - a title must never be re-inserted after it was expanded
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Frontier {
            state: Mutex::new(FrontierState {
                levels: BTreeMap::new(),
                visited: HashSet::new(),
            }),
            available: Semaphore::new(0),
        }
    }

    // Offers a node to the frontier
    //
    // Returns true if the node was admitted, false if its title was seen
    // before (the silent-drop dedup guarantee). The visited check and the
    // insertion happen under one lock so concurrent enqueues of the same
    // title can never both be admitted.
    pub fn enqueue(&self, node: Arc<PathNode>) -> bool {
        let key = node.title.to_lowercase();

        {
            let mut state = self.state.lock().expect("frontier lock poisoned");
            // HashSet::insert returns false if the key was already present
            if !state.visited.insert(key) {
                return false;
            }
            state.levels.entry(node.depth).or_default().push_back(node);
        }

        // Outside the lock: wake one blocked dequeuer (or bank the permit
        // for the next dequeue if nobody is waiting)
        self.available.add_permits(1);
        true
    }

    // Removes and returns the next node in level order
    //
    // Blocks while the queue is empty. Safe for many concurrent callers:
    // each admitted node is delivered to exactly one of them. Cancel safe,
    // so callers may wrap this in select! together with a deadline timer.
    pub async fn dequeue(&self) -> Arc<PathNode> {
        // The semaphore is never closed, so acquire can only fail if the
        // Frontier were dropped mid-call - which the &self borrow prevents
        let permit = self
            .available
            .acquire()
            .await
            .expect("frontier semaphore closed");
        // We consume the permit permanently: one permit, one node
        permit.forget();

        let mut state = self.state.lock().expect("frontier lock poisoned");

        // Pop from the shallowest non-empty level. The permit we hold
        // guarantees there is at least one queued node.
        let (&depth, level) = state
            .levels
            .iter_mut()
            .next()
            .expect("permit held but frontier empty");
        let node = level.pop_front().expect("level present but empty");
        if level.is_empty() {
            state.levels.remove(&depth);
        }

        node
    }
}
