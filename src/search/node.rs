// src/search/node.rs
// =============================================================================
// This module defines PathNode - one step in a candidate path.
//
// A PathNode remembers:
// - which article it represents (title)
// - how many hops it is from the start article (depth)
// - which node we came from (predecessor)
//
// The predecessor pointers form a singly-linked chain back to the start
// node, so when a worker finds the target we can reconstruct the whole
// path by walking the chain and reversing it.
//
// Rust concepts:
// - Arc<T>: Atomically reference-counted pointer for sharing across tasks
// - Option<T>: The start node has no predecessor (None)
// - Immutability: Nodes are never mutated after construction, so they
//   need no locking - only the structures that reference them do
// =============================================================================

use std::sync::Arc;

// One step of a candidate path through the link graph
//
// Nodes are immutable once constructed and shared via Arc, so many
// queue entries and the result slot can reference the same chain
// without copying it.
#[derive(Debug)]
pub struct PathNode {
    /// Article title as it appeared in the link
    pub title: String,
    /// Hop count from the start node (start = 0)
    pub depth: usize,
    /// The node we expanded to reach this one (None for the start node)
    pub predecessor: Option<Arc<PathNode>>,
}

impl PathNode {
    // Creates the start node of a search (depth 0, no predecessor)
    pub fn start(title: impl Into<String>) -> Arc<Self> {
        Arc::new(PathNode {
            title: title.into(),
            depth: 0,
            predecessor: None,
        })
    }

    // Creates a successor node one hop deeper than its parent
    //
    // Cloning the Arc bumps a reference count; the chain itself is shared,
    // not copied.
    pub fn child(title: impl Into<String>, parent: &Arc<PathNode>) -> Arc<Self> {
        Arc::new(PathNode {
            title: title.into(),
            depth: parent.depth + 1,
            predecessor: Some(Arc::clone(parent)),
        })
    }

    // Reconstructs the full path this node terminates
    //
    // Walks the predecessor chain (target back to start), collects the
    // titles, then reverses so the result reads start -> target.
    pub fn path_titles(&self) -> Vec<String> {
        let mut titles = vec![self.title.clone()];
        let mut current = self.predecessor.as_deref();
        while let Some(node) = current {
            titles.push(node.title.clone());
            current = node.predecessor.as_deref();
        }
        titles.reverse();
        titles
    }
}
