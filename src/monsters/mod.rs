//! Monsters: scripts, sequencing and the catalog.
//!
//! ## Key Types
//!
//! - `MonsterAction`: Script entry, atomic or combo
//! - `ActionKind`: Closed set of atomic effects
//! - `ActionQueue`: Cyclic script walker with a pending combo buffer
//! - `Intent`: What the monster will do next, for display
//! - `MonsterCatalog`: Definitions per `Tier`, with encounter selection
//! - `DefeatedPools`: Per-tier repeat avoidance

pub mod action;
pub mod catalog;
pub mod defeated;
pub mod queue;

pub use action::{first_step, flatten_combo, ActionKind, AtomicAction, ComboAction, Intent, MonsterAction};
pub use catalog::{GoldReward, MonsterCatalog, MonsterDefinition, Tier};
pub use defeated::DefeatedPools;
pub use queue::ActionQueue;
