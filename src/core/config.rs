//! Combat configuration.
//!
//! Every tunable number of an encounter lives here rather than in the
//! turn controller:
//! - `CombatConfig`: hand size, stake capacity, discard budget, HP
//! - `PacingConfig`: delays between the timed steps of a monster turn
//!
//! Both deserialize with every field defaulted, so a partial JSON document
//! only overrides what it names.

use serde::{Deserialize, Serialize};

use super::error::LoadError;

/// Largest stake the hand evaluator can classify.
pub const MAX_STAKE: usize = 5;

/// Number of card identities in the universe.
pub const DECK_SIZE: usize = 52;

/// Most atomic steps one combo may expand to, repeats and nesting included.
pub const MAX_COMBO_STEPS: usize = 1024;

/// Delays (milliseconds) between the suspension points of a monster turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// From the player's play to the first monster action.
    pub play_to_monster_ms: u64,
    /// Between atomic sub-steps of one high-level action.
    pub atomic_step_ms: u64,
    /// Between successive high-level actions.
    pub high_level_ms: u64,
    /// After the last monster action, before control returns to the player.
    pub return_to_player_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            play_to_monster_ms: 1000,
            atomic_step_ms: 150,
            high_level_ms: 250,
            return_to_player_ms: 300,
        }
    }
}

impl PacingConfig {
    /// All delays zero. Handy for headless simulation.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            play_to_monster_ms: 0,
            atomic_step_ms: 0,
            high_level_ms: 0,
            return_to_player_ms: 0,
        }
    }
}

/// Rules of a single encounter.
///
/// ## Example
///
/// ```
/// use poker_crawl::core::CombatConfig;
///
/// let config = CombatConfig::default()
///     .with_hand_size(7)
///     .with_discard_budget(3);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.play_zone_capacity, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Cards the hand is refilled to after a play or discard.
    pub hand_size: usize,

    /// Cards the player may stake for one play.
    pub play_zone_capacity: usize,

    /// Discard actions allowed per encounter.
    pub discard_budget: u32,

    /// Player HP when the session has no value yet.
    pub starting_hp: i64,

    /// Nesting limit when flattening combo actions.
    pub max_combo_depth: usize,

    /// Clamp monster self-heal (`milk`) at max HP.
    pub cap_monster_heal: bool,

    /// Monster-turn pacing.
    pub pacing: PacingConfig,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            hand_size: 8,
            play_zone_capacity: MAX_STAKE,
            discard_budget: 2,
            starting_hp: 100,
            max_combo_depth: 8,
            cap_monster_heal: false,
            pacing: PacingConfig::default(),
        }
    }
}

impl CombatConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.play_zone_capacity == 0 || self.play_zone_capacity > MAX_STAKE {
            return Err(LoadError::Invalid(format!(
                "play_zone_capacity must be 1..={MAX_STAKE}, got {}",
                self.play_zone_capacity
            )));
        }
        if self.hand_size == 0 {
            return Err(LoadError::Invalid("hand_size must be positive".into()));
        }
        if self.starting_hp <= 0 {
            return Err(LoadError::Invalid("starting_hp must be positive".into()));
        }
        if self.hand_size + self.play_zone_capacity > DECK_SIZE {
            return Err(LoadError::Invalid(format!(
                "hand_size + play_zone_capacity exceeds {DECK_SIZE} cards"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    #[must_use]
    pub fn with_play_zone_capacity(mut self, capacity: usize) -> Self {
        self.play_zone_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_discard_budget(mut self, budget: u32) -> Self {
        self.discard_budget = budget;
        self
    }

    #[must_use]
    pub fn with_starting_hp(mut self, hp: i64) -> Self {
        self.starting_hp = hp;
        self
    }

    #[must_use]
    pub fn with_max_combo_depth(mut self, depth: usize) -> Self {
        self.max_combo_depth = depth;
        self
    }

    #[must_use]
    pub fn with_monster_heal_cap(mut self, cap: bool) -> Self {
        self.cap_monster_heal = cap;
        self
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }
}
