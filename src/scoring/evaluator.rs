//! Poker-hand classification and scoring.
//!
//! Classification always uses raw rank values. The score is the sum of the
//! per-card scoring values times the category multiplier, rounded half up.
//! The active `ScoringRule` may double the scoring value of one suit; it
//! never changes which category a stake falls into.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::cards::{Card, Suit};
use crate::core::MAX_STAKE;

/// Texture prefix of the elite family against which hearts score double.
const HEART_BONUS_FAMILY: &str = "yundera";

/// Hand category, strongest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    RoyalFlush,
    StraightFlush,
    FourOfAKind,
    FullHouse,
    Flush,
    Straight,
    ThreeOfAKind,
    TwoPair,
    Pair,
    HighCard,
}

impl HandCategory {
    /// Multiplier in tenths, so 2.5 and 1.5 stay exact.
    #[must_use]
    pub const fn multiplier_tenths(self) -> u32 {
        match self {
            HandCategory::RoyalFlush => 200,
            HandCategory::StraightFlush => 150,
            HandCategory::FourOfAKind => 120,
            HandCategory::FullHouse => 80,
            HandCategory::Flush => 60,
            HandCategory::Straight => 50,
            HandCategory::ThreeOfAKind => 40,
            HandCategory::TwoPair => 25,
            HandCategory::Pair => 15,
            HandCategory::HighCard => 10,
        }
    }

    #[must_use]
    pub fn multiplier(self) -> f64 {
        f64::from(self.multiplier_tenths()) / 10.0
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            HandCategory::RoyalFlush => "royal flush",
            HandCategory::StraightFlush => "straight flush",
            HandCategory::FourOfAKind => "four of a kind",
            HandCategory::FullHouse => "full house",
            HandCategory::Flush => "flush",
            HandCategory::Straight => "straight",
            HandCategory::ThreeOfAKind => "three of a kind",
            HandCategory::TwoPair => "two pair",
            HandCategory::Pair => "pair",
            HandCategory::HighCard => "high card",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Monster-dependent scoring modifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRule {
    /// Cards of this suit count double toward the score.
    pub doubled_suit: Option<Suit>,
}

impl ScoringRule {
    /// No modifier.
    #[must_use]
    pub const fn standard() -> Self {
        Self { doubled_suit: None }
    }

    /// Rule in force against the monster with the given texture key.
    ///
    /// ```
    /// use poker_crawl::cards::Suit;
    /// use poker_crawl::scoring::ScoringRule;
    ///
    /// assert_eq!(ScoringRule::for_monster("yunderA2").doubled_suit, Some(Suit::Hearts));
    /// assert_eq!(ScoringRule::for_monster("arnak").doubled_suit, None);
    /// ```
    #[must_use]
    pub fn for_monster(texture: &str) -> Self {
        let doubled_suit = texture
            .to_lowercase()
            .starts_with(HEART_BONUS_FAMILY)
            .then_some(Suit::Hearts);
        Self { doubled_suit }
    }

    fn card_value(self, card: Card) -> u32 {
        let base = card.rank.value();
        if self.doubled_suit == Some(card.suit) {
            base * 2
        } else {
            base
        }
    }
}

/// Category and score of a stake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandEvaluation {
    pub category: HandCategory,
    pub score: u32,
}

/// Classify and score a stake of 1..=5 cards.
///
/// Returns `None` for an empty stake or more than five cards.
///
/// ```
/// use poker_crawl::cards::{Card, Rank, Suit};
/// use poker_crawl::scoring::{evaluate, HandCategory, ScoringRule};
///
/// let royal: Vec<_> = [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace]
///     .into_iter()
///     .map(|r| Card::new(r, Suit::Spades))
///     .collect();
///
/// let eval = evaluate(&royal, ScoringRule::standard()).unwrap();
/// assert_eq!(eval.category, HandCategory::RoyalFlush);
/// assert_eq!(eval.score, 1200);
/// ```
#[must_use]
pub fn evaluate(cards: &[Card], rule: ScoringRule) -> Option<HandEvaluation> {
    if cards.is_empty() || cards.len() > MAX_STAKE {
        return None;
    }

    let category = classify(cards);
    let total: u32 = cards.iter().map(|&c| rule.card_value(c)).sum();
    // round(total * multiplier), half up
    let score = (total * category.multiplier_tenths() + 5) / 10;

    Some(HandEvaluation { category, score })
}

/// Classify a stake of 1..=5 cards by raw ranks and suits.
#[must_use]
pub fn classify(cards: &[Card]) -> HandCategory {
    let signature = multiplicity_signature(cards);

    match (cards.len(), signature.as_slice()) {
        (5, sig) => {
            let flush = cards.iter().all(|c| c.suit == cards[0].suit);
            let straight = is_straight(cards);
            let broadway = (10..=14).all(|v| cards.iter().any(|c| c.rank.value() == v));

            if flush && straight && broadway {
                HandCategory::RoyalFlush
            } else if flush && straight {
                HandCategory::StraightFlush
            } else if sig == [4, 1] {
                HandCategory::FourOfAKind
            } else if sig == [3, 2] {
                HandCategory::FullHouse
            } else if flush {
                HandCategory::Flush
            } else if straight {
                HandCategory::Straight
            } else if sig == [3, 1, 1] {
                HandCategory::ThreeOfAKind
            } else if sig == [2, 2, 1] {
                HandCategory::TwoPair
            } else if sig == [2, 1, 1, 1] {
                HandCategory::Pair
            } else {
                HandCategory::HighCard
            }
        }
        (4, [4]) => HandCategory::FourOfAKind,
        (4, [3, 1]) | (3, [3]) => HandCategory::ThreeOfAKind,
        (4, [2, 2]) => HandCategory::TwoPair,
        (4, [2, 1, 1]) | (3, [2, 1]) | (2, [2]) => HandCategory::Pair,
        _ => HandCategory::HighCard,
    }
}

/// Rank multiplicities, sorted descending ("41" = four of a kind).
fn multiplicity_signature(cards: &[Card]) -> SmallVec<[u8; MAX_STAKE]> {
    let mut counts: FxHashMap<u32, u8> = FxHashMap::default();
    for card in cards {
        *counts.entry(card.rank.value()).or_insert(0) += 1;
    }
    let mut signature: SmallVec<[u8; MAX_STAKE]> = counts.into_values().collect();
    signature.sort_unstable_by(|a, b| b.cmp(a));
    signature
}

/// Five consecutive distinct values, or the wheel A-2-3-4-5.
fn is_straight(cards: &[Card]) -> bool {
    let mut values: SmallVec<[u32; MAX_STAKE]> = cards.iter().map(|c| c.rank.value()).collect();
    values.sort_unstable();
    values.dedup();

    let consecutive = values.windows(5).any(|w| w.windows(2).all(|p| p[1] == p[0] + 1));
    let wheel = [14, 2, 3, 4, 5].iter().all(|v| values.contains(v));

    consecutive || wheel
}
