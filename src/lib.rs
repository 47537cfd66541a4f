//! # poker-crawl
//!
//! Combat engine for a card-battling roguelike where the player fights
//! monsters with scored poker hands.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: All randomness flows from `GameRng` streams derived
//!    from the run seed, so an encounter replays exactly from
//!    `(seed, encounter number)`.
//!
//! 2. **Refuse, Don't Fail**: Invalid player input is a typed no-op
//!    (`ActionRefused`). Nothing in a running encounter panics or
//!    propagates errors to the caller.
//!
//! 3. **No Ambient State**: Cross-encounter data lives in an explicit
//!    `EncounterSession` passed by reference; presentation, persistence and
//!    the overworld map are reached only through collaborator traits.
//!
//! ## Architecture
//!
//! - **Virtual Time**: Monster turns are paced by timers on a
//!   single-threaded scheduler the caller drives with `advance`.
//!
//! - **Polled Events**: The turn controller buffers `CombatEvent`s instead
//!   of calling into a UI.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `cards`: Ranks, suits, card identities, hand ordering
//! - `zones`: Card locations, deck refill, the stake area
//! - `scoring`: Poker-hand classification and scoring
//! - `monsters`: Action scripts, action queue, catalog
//! - `combat`: Combatants and monster action resolution
//! - `turn`: Turn state machine, scheduler, collaborators
//! - `session`: Run-scoped context and encounter start

pub mod core;
pub mod cards;
pub mod zones;
pub mod scoring;
pub mod monsters;
pub mod combat;
pub mod turn;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    GameRng,
    CombatConfig, PacingConfig,
    ActionRefused, LoadError, PersistenceError, SessionError,
};

pub use crate::cards::{Card, Rank, SortMode, Suit};

pub use crate::zones::{DeckManager, PlayZone, Zone, ZoneManager};

pub use crate::scoring::{evaluate, HandCategory, HandEvaluation, ScoringRule};

pub use crate::monsters::{
    ActionKind, ActionQueue, AtomicAction, ComboAction, DefeatedPools, Intent,
    MonsterAction, MonsterCatalog, MonsterDefinition, Tier,
};

pub use crate::combat::{ActionOutcome, CombatState, EffectResolver, MonsterState, PlayerState};

pub use crate::turn::{
    Collaborators, CombatEvent, CombatReport, DisplaySink, MapNotifier, Outcome,
    PersistenceGateway, Phase, TurnController,
};

pub use crate::session::{begin_encounter, EncounterSession, SaveSnapshot};
