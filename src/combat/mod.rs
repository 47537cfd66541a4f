//! Combatants and the state they fight over.
//!
//! ## Key Types
//!
//! - `PlayerState`: HP and gold
//! - `MonsterState`: HP, shield, visual form
//! - `CombatState`: Everything one encounter mutates
//! - `EffectResolver`: Applies monster actions

pub mod monster;
pub mod player;
pub mod resolver;

pub use monster::{DamageReport, MonsterState};
pub use player::PlayerState;
pub use resolver::{ActionOutcome, EffectResolver};

use crate::core::GameRng;
use crate::zones::{DeckManager, PlayZone};

/// Mutable state of one encounter.
#[derive(Clone, Debug)]
pub struct CombatState {
    pub player: PlayerState,
    pub monster: MonsterState,
    pub deck: DeckManager,
    pub play_zone: PlayZone,
    /// The encounter's `"combat"` stream.
    pub rng: GameRng,
}
