//! Cards: ranks, suits, identities and hand ordering.
//!
//! The deck is the fixed 52-card universe. A card is owned by exactly one
//! zone at a time (see `zones`).

pub mod card;

pub use card::{Card, Rank, SortMode, Suit};
