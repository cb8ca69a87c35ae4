//! Virtual-time timer queue for one-shot deferred tasks.
//!
//! The queue owns a clock that only moves when `advance` is called. A
//! frontend advances it by the frame delta; tests advance it by exact
//! amounts, so deferred work fires deterministically.
//!
//! ```
//! use memorama::timer::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! timers.schedule(1000, "judge");
//!
//! assert!(timers.advance(999).is_empty());
//! let fired: Vec<_> = timers.advance(1).into_iter().map(|(_, task)| task).collect();
//! assert_eq!(fired, vec!["judge"]);
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

/// Handle of a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

#[derive(Debug)]
struct Scheduled<T> {
    due_ms: u64,
    id: TimerId,
    task: T,
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.id == other.id
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Scheduled<T> {
    // Reversed: BinaryHeap is a max-heap, we pop the earliest first.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.due_ms, other.id).cmp(&(self.due_ms, self.id))
    }
}

/// One-shot timers on a virtual clock.
///
/// Tasks fire in due order; tasks due at the same instant fire in the
/// order they were scheduled.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now_ms: u64,
    next_id: u64,
    heap: BinaryHeap<Scheduled<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            heap: BinaryHeap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Run `task` once, `delay_ms` after the current time.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.heap.push(Scheduled {
            due_ms: self.now_ms.saturating_add(delay_ms),
            id,
            task,
        });
        id
    }

    /// Number of tasks not yet fired.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Due time of the earliest pending task.
    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.heap.peek().map(|s| s.due_ms)
    }

    /// Move the clock forward and return every task now due.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<(TimerId, T)> {
        self.now_ms = self.now_ms.saturating_add(delta_ms);

        let mut fired = Vec::new();
        while self.heap.peek().is_some_and(|s| s.due_ms <= self.now_ms) {
            if let Some(scheduled) = self.heap.pop() {
                fired.push((scheduled.id, scheduled.task));
            }
        }
        fired
    }
}
