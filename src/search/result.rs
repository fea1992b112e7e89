// src/search/result.rs
// =============================================================================
// This module implements the ResultSlot: the shared cell that captures the
// first winning path.
//
// Rules of the slot:
// - Write-once: exactly one publish succeeds; every later publish is a
//   no-op that reports "you lost"
// - First writer wins, not last: once filled, the value never changes
// - Waiters (the coordinator) are woken promptly when the slot fills
//
// Why a Mutex and not an atomic?
// - We are storing an Arc, not an integer, and the check-then-write must
//   be one exclusive step. The critical section is two instructions long,
//   so a Mutex is both correct and effectively free here.
//
// Waiting without lost wake-ups:
// - Notify::notify_waiters only wakes tasks that are already registered.
//   wait() therefore registers interest with notified()/enable() BEFORE
//   re-checking the slot, the pattern from the tokio Notify docs. A
//   publish that lands between our check and our await still wakes us.
// =============================================================================

use std::pin::pin;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::node::PathNode;

// Single-assignment cell for the winning PathNode
//
// Created fresh for every search call, shared by all workers and the
// coordinator.
pub struct ResultSlot {
    winner: Mutex<Option<Arc<PathNode>>>,
    filled: Notify,
}

impl ResultSlot {
    pub fn new() -> Self {
        ResultSlot {
            winner: Mutex::new(None),
            filled: Notify::new(),
        }
    }

    // Attempts to publish a winning node
    //
    // Returns true if this caller won the race (the slot was empty),
    // false if another worker already published. Losers must simply
    // discard their candidate.
    pub fn publish(&self, node: Arc<PathNode>) -> bool {
        {
            let mut winner = self.winner.lock().expect("result lock poisoned");
            if winner.is_some() {
                return false;
            }
            *winner = Some(node);
        }
        // Wake the coordinator (and any worker parked in wait())
        self.filled.notify_waiters();
        true
    }

    // Snapshots the current winner, if any
    pub fn get(&self) -> Option<Arc<PathNode>> {
        self.winner.lock().expect("result lock poisoned").clone()
    }

    // Resolves once the slot is filled
    //
    // Returns immediately if a winner already exists. Cancel safe, so it
    // can sit inside a select! next to a deadline timer.
    pub async fn wait(&self) -> Arc<PathNode> {
        let mut notified = pin!(self.filled.notified());
        loop {
            // Register for the next notification BEFORE checking, so a
            // publish between the check and the await cannot be missed
            notified.as_mut().enable();
            if let Some(winner) = self.get() {
                return winner;
            }
            notified.as_mut().await;
            notified.set(self.filled.notified());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;
    use std::time::Duration;

    #[test]
    fn first_publish_wins_and_sticks() {
        let slot = ResultSlot::new();
        assert!(slot.get().is_none());

        assert!(slot.publish(PathNode::start("first")));
        assert!(!slot.publish(PathNode::start("second")));

        // The losing publish must not have overwritten the winner
        assert_eq!(slot.get().unwrap().title, "first");
    }

    #[tokio::test]
    async fn exactly_one_of_many_concurrent_publishes_succeeds() {
        let slot = Arc::new(ResultSlot::new());

        let attempts = (0..16).map(|i| {
            let slot = Arc::clone(&slot);
            tokio::spawn(async move { slot.publish(PathNode::start(format!("candidate_{i}"))) })
        });

        let wins = join_all(attempts)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .filter(|&won| won)
            .count();
        assert_eq!(wins, 1);

        // And the stored winner is one of the candidates
        assert!(slot.get().unwrap().title.starts_with("candidate_"));
    }

    #[tokio::test]
    async fn wait_returns_immediately_when_already_filled() {
        let slot = ResultSlot::new();
        slot.publish(PathNode::start("done"));

        let winner = tokio::time::timeout(Duration::from_secs(1), slot.wait())
            .await
            .expect("wait should not block on a filled slot");
        assert_eq!(winner.title, "done");
    }

    #[tokio::test]
    async fn wait_is_woken_by_a_later_publish() {
        let slot = Arc::new(ResultSlot::new());

        let publisher = {
            let slot = Arc::clone(&slot);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                slot.publish(PathNode::start("late_winner"));
            })
        };

        let winner = tokio::time::timeout(Duration::from_secs(5), slot.wait())
            .await
            .expect("wait should be woken by publish");
        assert_eq!(winner.title, "late_winner");
        publisher.await.unwrap();
    }
}
