//! Card locations and per-zone ordering.
//!
//! `ZoneManager` answers two questions for the 52 card identities of an
//! encounter: which zone holds a card, and in what order each zone lists
//! its cards. The lookup and the orderings change together, only through
//! `move_to_zone` and `move_all`, so a card is always in exactly one zone.
//! Orderings are `im` vectors, which makes `snapshot` cheap.

use std::cmp::Ordering;

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::rng::GameRng;

/// Card pools of one encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Undealt draw pool.
    Deck,
    /// Player-visible cards.
    Hand,
    /// Cards staked for the current play.
    PlayZone,
    /// Set aside by a discard; recycled when the deck runs short.
    Discard,
    /// Played this encounter; out of circulation.
    Used,
}

impl Zone {
    pub const ALL: [Zone; 5] = [Zone::Deck, Zone::Hand, Zone::PlayZone, Zone::Discard, Zone::Used];
}

/// Locations of every card, plus the order inside each zone.
///
/// ```
/// use poker_crawl::cards::{Card, Rank, Suit};
/// use poker_crawl::zones::{Zone, ZoneManager};
///
/// let mut zones = ZoneManager::full_deck();
/// let ace = Card::new(Rank::Ace, Suit::Spades);
///
/// assert_eq!(zones.move_to_zone(ace, Zone::Hand), Some(Zone::Deck));
/// assert!(zones.is_in_zone(ace, Zone::Hand));
/// assert_eq!(zones.zone_size(Zone::Deck), 51);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    locations: FxHashMap<Card, Zone>,
    zone_order: FxHashMap<Zone, Vector<Card>>,
}

impl ZoneManager {
    /// All 52 identities in the deck, suit-major order.
    #[must_use]
    pub fn full_deck() -> Self {
        let mut manager = Self::default();
        for zone in Zone::ALL {
            manager.zone_order.insert(zone, Vector::new());
        }
        for card in Card::universe() {
            manager.locations.insert(card, Zone::Deck);
            manager.order_mut(Zone::Deck).push_back(card);
        }
        manager
    }

    fn order_mut(&mut self, zone: Zone) -> &mut Vector<Card> {
        self.zone_order.entry(zone).or_default()
    }

    /// Move a card to the end of `zone`. Returns the zone it left.
    ///
    /// Moving a card into its own zone sends it to the end.
    pub fn move_to_zone(&mut self, card: Card, zone: Zone) -> Option<Zone> {
        let slot = self.locations.get_mut(&card)?;
        let old = std::mem::replace(slot, zone);
        self.order_mut(old).retain(|&c| c != card);
        self.order_mut(zone).push_back(card);
        Some(old)
    }

    /// Move every card of `from` to the end of `to`, keeping their order.
    ///
    /// Returns the number of cards moved.
    pub fn move_all(&mut self, from: Zone, to: Zone) -> usize {
        if from == to {
            return 0;
        }
        let moved = std::mem::take(self.order_mut(from));
        for &card in &moved {
            self.locations.insert(card, to);
        }
        let count = moved.len();
        self.order_mut(to).append(moved);
        count
    }

    #[must_use]
    pub fn is_in_zone(&self, card: Card, zone: Zone) -> bool {
        self.locations.get(&card) == Some(&zone)
    }

    /// Cards of a zone in order, without cloning the ordering.
    pub fn iter_zone(&self, zone: Zone) -> impl Iterator<Item = Card> + '_ {
        self.zone_order.get(&zone).into_iter().flat_map(|v| v.iter().copied())
    }

    #[must_use]
    pub fn zone_size(&self, zone: Zone) -> usize {
        self.zone_order.get(&zone).map_or(0, Vector::len)
    }

    /// Last card of a zone; the deck deals from here.
    #[must_use]
    pub fn top_card(&self, zone: Zone) -> Option<Card> {
        self.zone_order.get(&zone)?.last().copied()
    }

    pub fn shuffle_zone(&mut self, zone: Zone, rng: &mut GameRng) {
        let order = self.order_mut(zone);
        let mut cards: Vec<Card> = order.iter().copied().collect();
        rng.shuffle(&mut cards);
        *order = cards.into_iter().collect();
    }

    /// Stable reorder of one zone.
    pub fn sort_zone_by(&mut self, zone: Zone, compare: impl Fn(&Card, &Card) -> Ordering) {
        let order = self.order_mut(zone);
        let mut cards: Vec<Card> = order.iter().copied().collect();
        cards.sort_by(|a, b| compare(a, b));
        *order = cards.into_iter().collect();
    }

    /// Orderings of every zone at this moment. O(1) per zone.
    #[must_use]
    pub fn snapshot(&self) -> ZoneSnapshot {
        let order = |zone| self.zone_order.get(&zone).cloned().unwrap_or_default();
        ZoneSnapshot {
            deck: order(Zone::Deck),
            hand: order(Zone::Hand),
            play_zone: order(Zone::PlayZone),
            discard: order(Zone::Discard),
            used: order(Zone::Used),
        }
    }
}

/// Orderings of all zones at one moment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSnapshot {
    pub deck: Vector<Card>,
    pub hand: Vector<Card>,
    pub play_zone: Vector<Card>,
    pub discard: Vector<Card>,
    pub used: Vector<Card>,
}

impl ZoneSnapshot {
    #[must_use]
    pub fn zone(&self, zone: Zone) -> &Vector<Card> {
        match zone {
            Zone::Deck => &self.deck,
            Zone::Hand => &self.hand,
            Zone::PlayZone => &self.play_zone,
            Zone::Discard => &self.discard,
            Zone::Used => &self.used,
        }
    }

    /// Total cards across all zones.
    #[must_use]
    pub fn total(&self) -> usize {
        Zone::ALL.iter().map(|&z| self.zone(z).len()).sum()
    }
}
