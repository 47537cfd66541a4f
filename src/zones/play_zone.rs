//! The stake area.
//!
//! Holds up to `capacity` cards the player has committed for the next play.
//! Every accepted change re-evaluates the stake against the active
//! `ScoringRule`. Charm-locked cards cannot be withdrawn, and a stake that
//! contains one cannot be discarded.
//!
//! The cards themselves live in `Zone::PlayZone` of the deck's
//! `ZoneManager`; this type only adds capacity, locks and scoring on top.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::cards::Card;
use crate::core::{ActionRefused, MAX_STAKE};
use crate::scoring::{evaluate, HandEvaluation, ScoringRule};

use super::deck::DeckManager;
use super::manager::Zone;

#[derive(Clone, Debug)]
pub struct PlayZone {
    capacity: usize,
    charm_locked: FxHashSet<Card>,
    rule: ScoringRule,
    last: Option<HandEvaluation>,
}

impl PlayZone {
    #[must_use]
    pub fn new(capacity: usize, rule: ScoringRule) -> Self {
        Self {
            capacity: capacity.min(MAX_STAKE),
            charm_locked: FxHashSet::default(),
            rule,
            last: None,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn rule(&self) -> ScoringRule {
        self.rule
    }

    /// Staked cards in slot order.
    #[must_use]
    pub fn staked(&self, deck: &DeckManager) -> Vec<Card> {
        deck.zones().iter_zone(Zone::PlayZone).collect()
    }

    #[must_use]
    pub fn len(&self, deck: &DeckManager) -> usize {
        deck.zones().zone_size(Zone::PlayZone)
    }

    #[must_use]
    pub fn is_empty(&self, deck: &DeckManager) -> bool {
        self.len(deck) == 0
    }

    #[must_use]
    pub fn contains(&self, deck: &DeckManager, card: Card) -> bool {
        deck.zones().is_in_zone(card, Zone::PlayZone)
    }

    #[must_use]
    pub fn can_accept(&self, deck: &DeckManager) -> bool {
        self.len(deck) < self.capacity
    }

    /// Stake a card from the hand.
    ///
    /// Returns the new evaluation of the stake.
    pub fn add(
        &mut self,
        deck: &mut DeckManager,
        card: Card,
    ) -> Result<Option<HandEvaluation>, ActionRefused> {
        if !deck.in_hand(card) {
            return Err(ActionRefused::NotInHand);
        }
        if !self.can_accept(deck) {
            return Err(ActionRefused::PlayZoneFull);
        }

        deck.zones_mut().move_to_zone(card, Zone::PlayZone);
        Ok(self.evaluate(deck))
    }

    /// Move a hand card into the stake regardless of capacity and lock it.
    ///
    /// Returns `false` if the card is not in the hand.
    pub fn force_insert(&mut self, deck: &mut DeckManager, card: Card) -> bool {
        if !deck.in_hand(card) {
            return false;
        }

        deck.zones_mut().move_to_zone(card, Zone::PlayZone);
        self.charm_locked.insert(card);
        self.evaluate(deck);
        true
    }

    /// Charm-lock a card that is already staked.
    pub fn lock(&mut self, deck: &DeckManager, card: Card) -> bool {
        if !self.contains(deck, card) {
            return false;
        }
        self.charm_locked.insert(card)
    }

    /// Withdraw a card back to the hand.
    ///
    /// A charm-locked card is refused and stays in its slot.
    pub fn remove(
        &mut self,
        deck: &mut DeckManager,
        card: Card,
    ) -> Result<Option<HandEvaluation>, ActionRefused> {
        if !self.contains(deck, card) {
            return Err(ActionRefused::NotStaked);
        }
        if self.charm_locked.contains(&card) {
            debug!(%card, "withdrawal vetoed by charm");
            return Err(ActionRefused::CharmLocked);
        }

        deck.return_to_hand(card);
        Ok(self.evaluate(deck))
    }

    /// Move every staked card to `destination` and drop all locks.
    ///
    /// Returns the moved cards in slot order.
    pub fn clear(&mut self, deck: &mut DeckManager, destination: Zone) -> Vec<Card> {
        let cards = self.staked(deck);
        deck.zones_mut().move_all(Zone::PlayZone, destination);
        self.charm_locked.clear();
        self.last = None;
        cards
    }

    #[must_use]
    pub fn is_locked(&self, card: Card) -> bool {
        self.charm_locked.contains(&card)
    }

    #[must_use]
    pub fn has_charm_locked(&self) -> bool {
        !self.charm_locked.is_empty()
    }

    /// Every staked card is charm-locked (and there is at least one).
    #[must_use]
    pub fn all_locked(&self, deck: &DeckManager) -> bool {
        let staked = self.staked(deck);
        !staked.is_empty() && staked.iter().all(|c| self.charm_locked.contains(c))
    }

    /// More cards staked than the capacity allows. Only charm gets here.
    #[must_use]
    pub fn is_overfull(&self, deck: &DeckManager) -> bool {
        self.len(deck) > self.capacity
    }

    /// Evaluate the first `capacity` slots and remember the result.
    pub fn evaluate(&mut self, deck: &DeckManager) -> Option<HandEvaluation> {
        let scored: Vec<Card> = deck
            .zones()
            .iter_zone(Zone::PlayZone)
            .take(self.capacity)
            .collect();
        self.last = evaluate(&scored, self.rule);
        self.last
    }

    /// Evaluation after the last accepted change.
    #[must_use]
    pub fn last_evaluation(&self) -> Option<HandEvaluation> {
        self.last
    }
}
