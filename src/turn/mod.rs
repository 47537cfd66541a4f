//! Turn sequencing for one encounter.
//!
//! ## Key Types
//!
//! - `TurnController`: Player/monster turn state machine
//! - `Scheduler`: Virtual-time timers pacing the monster turn
//! - `CombatEvent`: Buffered outputs for the presentation layer
//! - `DisplaySink`, `PersistenceGateway`, `MapNotifier`: Collaborator seams

pub mod collaborators;
pub mod controller;
pub mod events;
pub mod scheduler;

pub use collaborators::{
    Collaborators, CombatReport, CombatResult, Detached, DisplaySink, MapNotifier,
    PersistenceGateway,
};
pub use controller::TurnController;
pub use events::{CombatEvent, Outcome, Phase, Side};
pub use scheduler::{Scheduler, Task};
