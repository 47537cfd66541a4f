//! Hand, discard and used-card bookkeeping.
//!
//! `DeckManager` owns the encounter's `ZoneManager` and implements the
//! refill rule: top the hand up to `hand_size` from the undealt deck,
//! recycling the whole discard pile into the deck first when the deck alone
//! cannot cover the shortfall. A short hand is tolerated, never an error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{Card, SortMode};
use crate::core::{CombatConfig, GameRng};

use super::manager::{Zone, ZoneManager};

/// Result of one refill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refill {
    /// Cards moved into the hand.
    pub dealt: usize,
    /// The discard pile was recycled into the deck first.
    pub recycled: bool,
}

/// Deck bookkeeping for one encounter.
#[derive(Clone, Debug)]
pub struct DeckManager {
    zones: ZoneManager,
    hand_size: usize,
    discard_budget: u32,
    discards_used: u32,
    sort_mode: SortMode,
}

impl DeckManager {
    /// All 52 cards in the deck, nothing dealt.
    #[must_use]
    pub fn new(config: &CombatConfig) -> Self {
        Self::from_zones(ZoneManager::full_deck(), config)
    }

    /// Resume bookkeeping over existing zones.
    #[must_use]
    pub fn from_zones(zones: ZoneManager, config: &CombatConfig) -> Self {
        Self {
            zones,
            hand_size: config.hand_size,
            discard_budget: config.discard_budget,
            discards_used: 0,
            sort_mode: SortMode::None,
        }
    }

    #[must_use]
    pub fn zones(&self) -> &ZoneManager {
        &self.zones
    }

    pub fn zones_mut(&mut self) -> &mut ZoneManager {
        &mut self.zones
    }

    /// Cards in hand, in display order.
    #[must_use]
    pub fn hand(&self) -> Vec<Card> {
        self.zones.iter_zone(Zone::Hand).collect()
    }

    #[must_use]
    pub fn hand_len(&self) -> usize {
        self.zones.zone_size(Zone::Hand)
    }

    #[must_use]
    pub fn in_hand(&self, card: Card) -> bool {
        self.zones.is_in_zone(card, Zone::Hand)
    }

    /// Top the hand up to `hand_size`.
    pub fn refill(&mut self, rng: &mut GameRng) -> Refill {
        let needed = self.hand_size.saturating_sub(self.hand_len());
        if needed == 0 {
            return Refill::default();
        }

        let mut recycled = false;
        if self.zones.zone_size(Zone::Deck) < needed {
            let count = self.zones.move_all(Zone::Discard, Zone::Deck);
            recycled = true;
            debug!(count, "recycled discard pile into deck");
        }

        self.zones.shuffle_zone(Zone::Deck, rng);

        let mut dealt = 0;
        while dealt < needed {
            let Some(card) = self.zones.top_card(Zone::Deck) else {
                break;
            };
            self.zones.move_to_zone(card, Zone::Hand);
            dealt += 1;
        }

        if dealt < needed {
            debug!(dealt, needed, "deck exhausted, dealing a short hand");
        }

        self.apply_sort();
        Refill { dealt, recycled }
    }

    /// Discards still available this encounter.
    #[must_use]
    pub fn discards_remaining(&self) -> u32 {
        self.discard_budget.saturating_sub(self.discards_used)
    }

    #[must_use]
    pub fn can_discard(&self) -> bool {
        self.discards_used < self.discard_budget
    }

    /// Spend one discard. Returns `false` when the budget is exhausted.
    pub fn consume_discard(&mut self) -> bool {
        if !self.can_discard() {
            return false;
        }
        self.discards_used += 1;
        true
    }

    #[must_use]
    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Change the hand ordering. `SortMode::None` keeps the current order.
    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.apply_sort();
    }

    /// Put a card back in the hand, respecting the sort mode.
    pub fn return_to_hand(&mut self, card: Card) {
        self.zones.move_to_zone(card, Zone::Hand);
        self.apply_sort();
    }

    fn apply_sort(&mut self) {
        if let Some(compare) = self.sort_mode.comparator() {
            self.zones.sort_zone_by(Zone::Hand, compare);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> DeckManager {
        DeckManager::new(&CombatConfig::default())
    }

    #[test]
    fn test_initial_refill_deals_hand() {
        let mut deck = deck();
        let mut rng = GameRng::new(1);

        let refill = deck.refill(&mut rng);

        assert_eq!(refill, Refill { dealt: 8, recycled: false });
        assert_eq!(deck.hand_len(), 8);
        assert_eq!(deck.zones().zone_size(Zone::Deck), 44);
    }

    #[test]
    fn test_full_hand_is_noop() {
        let mut deck = deck();
        let mut rng = GameRng::new(1);
        deck.refill(&mut rng);

        assert_eq!(deck.refill(&mut rng), Refill::default());
    }

    #[test]
    fn test_recycles_when_deck_short() {
        let mut deck = deck();
        let mut rng = GameRng::new(1);
        deck.refill(&mut rng);

        // Leave 1 card in the deck, 5 in discard, the rest used.
        let undealt: Vec<_> = deck.zones().iter_zone(Zone::Deck).collect();
        for (i, card) in undealt.into_iter().enumerate() {
            let zone = match i {
                0 => continue,
                1..=5 => Zone::Discard,
                _ => Zone::Used,
            };
            deck.zones_mut().move_to_zone(card, zone);
        }
        let hand: Vec<_> = deck.hand().into_iter().take(3).collect();
        for card in hand {
            deck.zones_mut().move_to_zone(card, Zone::Used);
        }

        let refill = deck.refill(&mut rng);

        assert_eq!(refill, Refill { dealt: 3, recycled: true });
        assert_eq!(deck.hand_len(), 8);
        assert_eq!(deck.zones().zone_size(Zone::Discard), 0);
        assert_eq!(deck.zones().zone_size(Zone::Deck), 3);
    }

    #[test]
    fn test_short_hand_tolerated() {
        let mut deck = deck();
        let mut rng = GameRng::new(1);

        let all: Vec<_> = deck.zones().iter_zone(Zone::Deck).collect();
        for card in all.into_iter().skip(2) {
            deck.zones_mut().move_to_zone(card, Zone::Used);
        }

        let refill = deck.refill(&mut rng);
        assert_eq!(refill.dealt, 2);
        assert_eq!(deck.hand_len(), 2);
    }

    #[test]
    fn test_discard_budget() {
        let mut deck = deck();
        assert_eq!(deck.discards_remaining(), 2);
        assert!(deck.consume_discard());
        assert!(deck.consume_discard());
        assert!(!deck.consume_discard());
        assert_eq!(deck.discards_remaining(), 0);
    }

    #[test]
    fn test_sort_mode_applies_to_refills() {
        let mut deck = deck();
        let mut rng = GameRng::new(9);
        deck.set_sort_mode(SortMode::Value);
        deck.refill(&mut rng);

        let hand = deck.hand();
        assert!(hand.windows(2).all(|w| w[0].rank <= w[1].rank));
    }
}
