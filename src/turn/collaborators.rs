//! Out-of-scope collaborators.
//!
//! Display, persistence and the overworld map are reached through these
//! narrow traits. Display and map calls are fire-and-forget; persistence
//! may fail, and the controller logs the failure and carries on.

use serde::{Deserialize, Serialize};

use crate::core::PersistenceError;

/// Pushes combat numbers to whatever shows them.
pub trait DisplaySink {
    /// Stake label and score. An empty label with 0 clears the display.
    fn set_score(&mut self, label: &str, value: u32);
    fn set_hp(&mut self, hp: i64);
    fn set_gold(&mut self, gold: i64);
    /// Discards left this encounter.
    fn set_discard_count(&mut self, remaining: u32);
}

/// Result tag sent to the save store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatResult {
    Won,
    Lost,
}

/// Body of the end-of-combat request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatReport {
    pub result: CombatResult,
    pub player_hp: i64,
    pub gold_delta: i64,
}

/// The remote save store.
pub trait PersistenceGateway {
    fn end_combat(&mut self, save_id: &str, report: &CombatReport) -> Result<(), PersistenceError>;
}

/// The overworld map, told about HP and gold after an encounter.
pub trait MapNotifier {
    fn hp_updated(&mut self, hp: i64);
    fn gold_updated(&mut self, gold: i64);
}

/// Ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Detached;

impl DisplaySink for Detached {
    fn set_score(&mut self, _label: &str, _value: u32) {}
    fn set_hp(&mut self, _hp: i64) {}
    fn set_gold(&mut self, _gold: i64) {}
    fn set_discard_count(&mut self, _remaining: u32) {}
}

impl PersistenceGateway for Detached {
    fn end_combat(&mut self, _save_id: &str, _report: &CombatReport) -> Result<(), PersistenceError> {
        Ok(())
    }
}

impl MapNotifier for Detached {
    fn hp_updated(&mut self, _hp: i64) {}
    fn gold_updated(&mut self, _gold: i64) {}
}

/// The three collaborators of an encounter.
pub struct Collaborators {
    pub display: Box<dyn DisplaySink>,
    pub persistence: Box<dyn PersistenceGateway>,
    pub map: Box<dyn MapNotifier>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self::detached()
    }
}

impl Collaborators {
    /// No display, no save store, no map.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            display: Box::new(Detached),
            persistence: Box::new(Detached),
            map: Box::new(Detached),
        }
    }

    #[must_use]
    pub fn with_display(mut self, display: impl DisplaySink + 'static) -> Self {
        self.display = Box::new(display);
        self
    }

    #[must_use]
    pub fn with_persistence(mut self, persistence: impl PersistenceGateway + 'static) -> Self {
        self.persistence = Box::new(persistence);
        self
    }

    #[must_use]
    pub fn with_map(mut self, map: impl MapNotifier + 'static) -> Self {
        self.map = Box::new(map);
        self
    }
}
