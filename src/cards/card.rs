//! Playing cards.
//!
//! A `Card` is its identity: one (rank, suit) pair out of 52. There is no
//! per-instance id, so the zone bookkeeping can key directly on the card.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::core::LoadError;

/// Card rank, two through ace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric value 2..=14 (ace high).
    #[must_use]
    pub const fn value(self) -> u32 {
        self as u32 + 2
    }

    /// Short label as printed on the card face.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.label() == label)
    }
}

/// Card suit. Declaration order is the display sort order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }

    /// Key used by the save format and sprite names.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamond",
            Suit::Hearts => "heart",
            Suit::Spades => "spade",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// A card identity.
///
/// ```
/// use poker_crawl::cards::{Card, Rank, Suit};
///
/// let card = Card::new(Rank::Ten, Suit::Spades);
/// assert_eq!(card.to_string(), "10♠");
/// assert_eq!(card.key(), "spade_10");
/// assert_eq!("spade_10".parse::<Card>().unwrap(), card);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// All 52 identities, suit-major.
    pub fn universe() -> impl Iterator<Item = Card> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(rank, suit)))
    }

    /// Save-format key, e.g. `heart_7`.
    #[must_use]
    pub fn key(self) -> String {
        format!("{}_{}", self.suit.key(), self.rank.label())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LoadError::Invalid(format!("not a card key: {s:?}"));
        let (suit, rank) = s.split_once('_').ok_or_else(invalid)?;
        let suit = Suit::from_key(suit).ok_or_else(invalid)?;
        let rank = Rank::from_label(rank).ok_or_else(invalid)?;
        Ok(Card::new(rank, suit))
    }
}

/// How the hand is ordered for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortMode {
    /// Deal order.
    #[default]
    None,
    /// By rank, ties broken by suit.
    Value,
    /// By suit, ties broken by rank.
    Suit,
    ValueThenSuit,
    SuitThenValue,
}

impl SortMode {
    /// Comparator for this mode, or `None` to keep deal order.
    #[must_use]
    pub fn comparator(self) -> Option<fn(&Card, &Card) -> Ordering> {
        match self {
            SortMode::None => None,
            SortMode::Value | SortMode::ValueThenSuit => Some(by_value),
            SortMode::Suit | SortMode::SuitThenValue => Some(by_suit),
        }
    }
}

fn by_value(a: &Card, b: &Card) -> Ordering {
    a.rank.cmp(&b.rank).then(a.suit.cmp(&b.suit))
}

fn by_suit(a: &Card, b: &Card) -> Ordering {
    a.suit.cmp(&b.suit).then(a.rank.cmp(&b.rank))
}
