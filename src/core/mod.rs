//! Core engine types: RNG, configuration, errors.
//!
//! These are shared by every other module and know nothing about cards
//! or monsters.

pub mod rng;
pub mod config;
pub mod error;

pub use rng::GameRng;
pub use config::{CombatConfig, PacingConfig, DECK_SIZE, MAX_COMBO_STEPS, MAX_STAKE};
pub use error::{ActionRefused, LoadError, PersistenceError, SessionError};
