//! Card zones for one encounter.
//!
//! Every card identity sits in exactly one of five zones. The undealt deck,
//! the hand, the stake, the discard pile and the used pile always add up to
//! the full 52-card universe.
//!
//! ## Key Types
//!
//! - `Zone`: The five card pools
//! - `ZoneManager`: Card location tracking and movement
//! - `DeckManager`: Hand refill, discard recycling, discard budget
//! - `PlayZone`: Stake capacity, charm locks, stake evaluation

pub mod deck;
pub mod manager;
pub mod play_zone;

pub use deck::{DeckManager, Refill};
pub use manager::{Zone, ZoneManager, ZoneSnapshot};
pub use play_zone::PlayZone;
