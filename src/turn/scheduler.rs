//! Virtual-time timers.
//!
//! Monster turns are paced by delayed continuations. The scheduler keeps
//! them in a min-heap keyed by (due time, insertion order), so timers due
//! at the same instant run in the order they were scheduled. Time only
//! moves when the owner pops timers or advances the clock.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

/// Continuations of a monster turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    /// First high-level action after the player's play.
    BeginMonsterTurn,
    /// Start the next high-level action.
    RunHighLevel,
    /// Play the next pending combo step, or close the high-level action.
    DrainCombo,
    /// Hand control back to the player.
    StartPlayerTurn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Timer {
    due: u64,
    seq: u64,
    task: Task,
}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: u64,
    seq: u64,
    timers: BinaryHeap<Timer>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Run `task` `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, task: Task) {
        self.seq += 1;
        self.timers.push(Timer {
            due: self.now.saturating_add(delay_ms),
            seq: self.seq,
            task,
        });
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until: u64) -> Option<Task> {
        if self.timers.peek()?.due > until {
            return None;
        }
        let timer = self.timers.pop()?;
        self.now = self.now.max(timer.due);
        Some(timer.task)
    }

    /// Move the clock forward. Never moves it back.
    pub fn advance_clock(&mut self, to: u64) {
        self.now = self.now.max(to);
    }

    /// Drop every pending timer. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.len()
    }
}
