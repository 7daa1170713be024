// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual-time task queue.
//!
//! Tasks run in deadline order; equal deadlines run in the order they were scheduled,
//! like zero-delay timeouts on the web platform. Time only moves when the caller pops.

use alloc::collections::BinaryHeap;
use core::cmp::Ordering;
use core::time::Duration;

use understory_dropdown::types::Task;

#[derive(Clone, Debug)]
struct Scheduled {
    due: Duration,
    seq: u64,
    task: Task,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl Ord for Scheduled {
    // Reversed: `BinaryHeap` is a max-heap and we want the earliest first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Deferred tasks on a virtual clock.
#[derive(Clone, Debug, Default)]
pub struct Timers {
    now: Duration,
    next_seq: u64,
    queue: BinaryHeap<Scheduled>,
}

impl Timers {
    /// An empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `task` to run `delay` from now.
    pub fn schedule(&mut self, task: Task, delay: Duration) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled {
            due: self.now + delay,
            seq,
            task,
        });
    }

    /// Deadline of the earliest pending task.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.peek().map(|s| s.due)
    }

    /// Pop the earliest task if it is due at or before `until`, advancing the clock to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<Task> {
        if self.next_deadline()? > until {
            return None;
        }
        let next = self.queue.pop()?;
        self.now = self.now.max(next.due);
        Some(next.task)
    }

    /// Move the clock forward to `to` (never backward).
    pub fn advance_to(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
