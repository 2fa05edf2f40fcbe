//! Minimum-first priority queues backing the queue-driven solvers.
//!
//! Three interchangeable backends implement the same [`MinQueue`] contract:
//! a fully re-sorted vector, an array-backed binary min-heap, and an
//! unbalanced binary search tree. Solvers pick one via [`QueueBackend`]
//! without changing their own logic.

mod bst;
mod heap;
mod sorted;

pub use bst::BstQueue;
pub use heap::BinaryHeapQueue;
pub use sorted::SortedVecQueue;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum-first priority queue over elements carrying their own total
/// order (priorities ride inside the element).
///
/// Implementations must return popped items in non-decreasing order for any
/// interleaving of `push` and `pop_min`, duplicates included.
pub trait MinQueue<T: Ord> {
    /// Insert an item into the queue.
    fn push(&mut self, item: T);

    /// Remove and return the minimum item, or `None` when empty.
    fn pop_min(&mut self) -> Option<T>;

    /// Borrow the minimum item without removing it.
    fn peek_min(&self) -> Option<&T>;

    /// Number of queued items.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an equal item is currently queued.
    fn contains(&self, item: &T) -> bool;
}

/// Selects the queue implementation backing a queue-driven solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QueueBackend {
    /// Vector re-sorted on every push.
    SortedVec,
    /// Array-backed binary min-heap.
    #[default]
    BinaryHeap,
    /// Unbalanced binary search tree.
    SearchTree,
}

impl fmt::Display for QueueBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            QueueBackend::SortedVec => "sorted_vec",
            QueueBackend::BinaryHeap => "binary_heap",
            QueueBackend::SearchTree => "search_tree",
        };
        f.write_str(value)
    }
}
