//! Per-monster action sequencing.
//!
//! `ActionQueue` walks a monster's script cyclically and hands out one
//! atomic action at a time. Starting a combo flattens it into a pending
//! buffer that is drained before the script advances again, so the
//! high-level index moves once per script entry, never per combo step.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::action::{first_step, flatten_combo, AtomicAction, MonsterAction};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionQueue {
    actions: Vec<MonsterAction>,
    high_index: usize,
    pending: VecDeque<AtomicAction>,
    max_depth: usize,
}

impl ActionQueue {
    #[must_use]
    pub fn new(actions: Vec<MonsterAction>, max_depth: usize) -> Self {
        Self {
            actions,
            high_index: 0,
            pending: VecDeque::new(),
            max_depth,
        }
    }

    /// The action the next `dequeue_next` will return. Does not mutate.
    #[must_use]
    pub fn peek_next(&self) -> AtomicAction {
        if let Some(next) = self.pending.front() {
            return next.clone();
        }

        match self.actions.get(self.high_index) {
            None => AtomicAction::waiting(),
            Some(MonsterAction::Atomic(action)) => action.clone(),
            Some(MonsterAction::Combo(combo)) => {
                first_step(combo, self.max_depth).unwrap_or_else(AtomicAction::waiting)
            }
        }
    }

    /// Produce the next atomic action.
    ///
    /// Pending combo steps come first. Otherwise the current script entry is
    /// started and the high-level index advances by one.
    pub fn dequeue_next(&mut self) -> AtomicAction {
        if let Some(next) = self.pending.pop_front() {
            return next;
        }

        let Some(entry) = self.actions.get(self.high_index) else {
            return AtomicAction::waiting();
        };

        let next = match entry {
            MonsterAction::Atomic(action) => action.clone(),
            MonsterAction::Combo(combo) => {
                self.pending.extend(flatten_combo(combo, self.max_depth));
                self.pending.pop_front().unwrap_or_else(AtomicAction::waiting)
            }
        };

        self.high_index = (self.high_index + 1) % self.actions.len();
        next
    }

    /// Index of the script entry the next fresh dequeue will start.
    #[must_use]
    pub fn high_index(&self) -> usize {
        self.high_index
    }

    /// Combo steps still waiting to be played.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    #[must_use]
    pub fn actions(&self) -> &[MonsterAction] {
        &self.actions
    }
}
