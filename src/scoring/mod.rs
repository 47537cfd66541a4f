//! Hand evaluation.
//!
//! - `evaluate`: stake → (`HandCategory`, score)
//! - `ScoringRule`: monster-specific suit bonus
//!
//! Pure functions; callers push results to their own displays.

mod evaluator;

pub use evaluator::{classify, evaluate, HandCategory, HandEvaluation, ScoringRule};
