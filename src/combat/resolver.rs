//! Monster action resolution.
//!
//! `EffectResolver` applies one atomic monster action to the combat state.
//! The match over `ActionKind` is exhaustive: a kind without monster-side
//! semantics yields `ActionOutcome::Unresolved` and changes nothing.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cards::Card;
use crate::core::CombatConfig;
use crate::monsters::{ActionKind, AtomicAction};

use super::CombatState;

/// What an atomic action did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// Player HP lost.
    PlayerDamaged { hp_loss: i64 },
    MonsterShielded { amount: i64 },
    Waited,
    GoldStolen { amount: i64 },
    /// Cards newly charm-locked, forced in from the hand or already staked.
    Charmed { cards: Vec<Card> },
    Transformed { form: u32 },
    /// Monster HP gained.
    MonsterHealed { amount: i64 },
    /// The kind has no monster-side effect yet.
    Unresolved(ActionKind),
}

/// Applies monster actions to combat state.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve one atomic action.
    pub fn resolve(
        state: &mut CombatState,
        action: &AtomicAction,
        config: &CombatConfig,
    ) -> ActionOutcome {
        let outcome = match action.kind {
            ActionKind::Attack => ActionOutcome::PlayerDamaged {
                hp_loss: state.player.take_damage(action.value),
            },
            ActionKind::Defend => {
                let amount = action.value.max(0);
                state.monster.add_shield(amount);
                ActionOutcome::MonsterShielded { amount }
            }
            ActionKind::Waiting => ActionOutcome::Waited,
            ActionKind::StealPercent => ActionOutcome::GoldStolen {
                amount: state.player.steal_gold_percent(action.value),
            },
            ActionKind::Charm => ActionOutcome::Charmed {
                cards: Self::charm(state, action.value),
            },
            ActionKind::Transform => {
                state.monster.transform(action.value);
                ActionOutcome::Transformed {
                    form: state.monster.form(),
                }
            }
            ActionKind::Milk => ActionOutcome::MonsterHealed {
                amount: state.monster.milk(action.value, config.cap_monster_heal),
            },
            ActionKind::DoubleAtk | ActionKind::Heal | ActionKind::Buff | ActionKind::Debuff => {
                warn!(kind = %action.kind, value = action.value, "monster action kind has no effect");
                ActionOutcome::Unresolved(action.kind)
            }
        };

        debug!(kind = %action.kind, value = action.value, ?outcome, "monster action resolved");
        outcome
    }

    /// Force `max(1, value)` random hand cards into the stake and lock them.
    /// With an empty hand, lock one random staked card instead.
    fn charm(state: &mut CombatState, value: i64) -> Vec<Card> {
        let count = usize::try_from(value.max(1)).unwrap_or(1);

        let mut candidates = state.deck.hand();
        if candidates.is_empty() {
            let staked = state.play_zone.staked(&state.deck);
            let Some(&card) = state.rng.choose(&staked) else {
                return Vec::new();
            };
            state.play_zone.lock(&state.deck, card);
            return vec![card];
        }

        state.rng.shuffle(&mut candidates);
        candidates.truncate(count);

        for &card in &candidates {
            state.play_zone.force_insert(&mut state.deck, card);
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{MonsterState, PlayerState};
    use crate::core::GameRng;
    use crate::scoring::ScoringRule;
    use crate::zones::{DeckManager, PlayZone};

    fn state() -> CombatState {
        let config = CombatConfig::default();
        let mut deck = DeckManager::new(&config);
        let mut rng = GameRng::new(21);
        deck.refill(&mut rng);
        CombatState {
            player: PlayerState::new(100, 50),
            monster: MonsterState::new("m", "m", 200),
            deck,
            play_zone: PlayZone::new(5, ScoringRule::standard()),
            rng,
        }
    }

    fn resolve(state: &mut CombatState, kind: ActionKind, value: i64) -> ActionOutcome {
        EffectResolver::resolve(state, &AtomicAction::new(kind, value), &CombatConfig::default())
    }

    #[test]
    fn test_attack_and_defend() {
        let mut s = state();
        assert_eq!(
            resolve(&mut s, ActionKind::Attack, 30),
            ActionOutcome::PlayerDamaged { hp_loss: 30 }
        );
        assert_eq!(s.player.hp(), 70);

        resolve(&mut s, ActionKind::Defend, 15);
        assert_eq!(s.monster.shield(), 15);
    }

    #[test]
    fn test_steal() {
        let mut s = state();
        assert_eq!(
            resolve(&mut s, ActionKind::StealPercent, 20),
            ActionOutcome::GoldStolen { amount: 10 }
        );
        assert_eq!(s.player.gold(), 40);
    }

    #[test]
    fn test_unresolved_kinds_change_nothing() {
        let mut s = state();
        let before_player = s.player;
        let before_monster = s.monster.clone();

        for kind in [ActionKind::DoubleAtk, ActionKind::Heal, ActionKind::Buff, ActionKind::Debuff] {
            assert_eq!(resolve(&mut s, kind, 2), ActionOutcome::Unresolved(kind));
        }

        assert_eq!(s.player, before_player);
        assert_eq!(s.monster, before_monster);
        assert_eq!(s.deck.hand_len(), 8);
    }

    #[test]
    fn test_charm_forces_hand_cards() {
        let mut s = state();

        let ActionOutcome::Charmed { cards } = resolve(&mut s, ActionKind::Charm, 2) else {
            panic!("expected charm");
        };

        assert_eq!(cards.len(), 2);
        assert_eq!(s.deck.hand_len(), 6);
        for card in cards {
            assert!(s.play_zone.contains(&s.deck, card));
            assert!(s.play_zone.is_locked(card));
        }
    }

    #[test]
    fn test_charm_value_zero_takes_one() {
        let mut s = state();
        let ActionOutcome::Charmed { cards } = resolve(&mut s, ActionKind::Charm, 0) else {
            panic!("expected charm");
        };
        assert_eq!(cards.len(), 1);
    }

    #[test]
    fn test_charm_with_empty_hand_locks_staked() {
        let mut s = state();
        let hand = s.deck.hand();
        for &card in &hand[..3] {
            s.play_zone.add(&mut s.deck, card).unwrap();
        }
        for &card in &hand[3..] {
            s.deck.zones_mut().move_to_zone(card, crate::zones::Zone::Used);
        }

        let ActionOutcome::Charmed { cards } = resolve(&mut s, ActionKind::Charm, 1) else {
            panic!("expected charm");
        };

        assert_eq!(cards.len(), 1);
        assert!(s.play_zone.is_locked(cards[0]));
        assert_eq!(s.play_zone.len(&s.deck), 3);
    }

    #[test]
    fn test_milk_and_transform() {
        let mut s = state();
        resolve(&mut s, ActionKind::Milk, 50);
        assert_eq!(s.monster.hp(), 250);

        assert_eq!(
            resolve(&mut s, ActionKind::Transform, 3),
            ActionOutcome::Transformed { form: 3 }
        );
    }
}
