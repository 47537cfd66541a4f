//! Turn-controller outputs.
//!
//! The controller never calls into a presentation layer for these; it
//! buffers them and the caller polls with `TurnController::drain_events`.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::combat::{ActionOutcome, DamageReport};
use crate::monsters::{AtomicAction, Intent};
use crate::scoring::HandEvaluation;
use crate::zones::Refill;

/// Whose turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Monster,
}

/// How an encounter ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Turn-controller state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    PlayerTurn,
    MonsterTurn {
        /// High-level actions finished this turn.
        completed: u32,
        actions_per_turn: u32,
    },
    /// Terminal for the encounter.
    Resolved(Outcome),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// The monster's next atomic action changed.
    IntentChanged(Intent),
    /// Stake evaluation changed; `None` when nothing is staked.
    ScoreChanged(Option<HandEvaluation>),
    CardStaked(Card),
    CardUnstaked(Card),
    /// A charm-locked card snapped back into its slot.
    UnstakeVetoed(Card),
    Discarded {
        cards: Vec<Card>,
        discards_remaining: u32,
    },
    HandRefilled(Refill),
    Played {
        cards: Vec<Card>,
        evaluation: HandEvaluation,
    },
    MonsterDamaged(DamageReport),
    MonsterActed {
        action: AtomicAction,
        outcome: ActionOutcome,
    },
    TurnEnded(Side),
    TurnStarted(Side),
    MonsterDied,
    CombatWon {
        gold_delta: i64,
    },
    PlayerDefeated,
    CombatLost,
}
