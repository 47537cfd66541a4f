//! Card partition integration tests.
//!
//! Every card identity is in exactly one zone at all times. These tests
//! cover the refill and discard-recycle rules and drive random player
//! sequences through a full encounter to check the partition holds.

use poker_crawl::cards::{Card, SortMode};
use poker_crawl::core::{CombatConfig, GameRng};
use poker_crawl::monsters::{ActionKind, ComboAction, MonsterAction, MonsterDefinition, Tier};
use poker_crawl::scoring::ScoringRule;
use poker_crawl::session::EncounterSession;
use poker_crawl::turn::{Collaborators, TurnController};
use poker_crawl::zones::{DeckManager, PlayZone, Zone, ZoneManager};
use proptest::prelude::*;

/// Lay out the universe as: `hand` in hand, `deck` in deck,
/// `discard` in discard, the rest used.
fn layout(hand: usize, deck: usize, discard: usize) -> DeckManager {
    let mut zones = ZoneManager::full_deck();
    for (i, card) in Card::universe().enumerate() {
        let zone = if i < hand {
            Zone::Hand
        } else if i < hand + deck {
            continue;
        } else if i < hand + deck + discard {
            Zone::Discard
        } else {
            Zone::Used
        };
        zones.move_to_zone(card, zone);
    }
    DeckManager::from_zones(zones, &CombatConfig::default())
}

fn assert_partition(zones: &ZoneManager) {
    let snapshot = zones.snapshot();
    assert_eq!(snapshot.total(), 52);
    for card in Card::universe() {
        let holders = Zone::ALL
            .iter()
            .filter(|&&z| snapshot.zone(z).contains(&card))
            .count();
        assert_eq!(holders, 1, "{card} is in {holders} zones");
    }
}

// =============================================================================
// Refill and recycle
// =============================================================================

/// Test a discard of 2 with 3 cards left in the deck: no recycle needed.
#[test]
fn test_discard_then_refill_without_recycle() {
    let mut deck = layout(8, 3, 6);
    let mut zone = PlayZone::new(5, ScoringRule::standard());
    let mut rng = GameRng::new(5);

    let hand = deck.hand();
    zone.add(&mut deck, hand[0]).unwrap();
    zone.add(&mut deck, hand[1]).unwrap();
    let discarded = zone.clear(&mut deck, Zone::Discard);
    assert!(deck.consume_discard());

    assert_eq!(discarded.len(), 2);
    assert_eq!(deck.zones().zone_size(Zone::Discard), 8);

    let refill = deck.refill(&mut rng);

    assert_eq!(refill.dealt, 2);
    assert!(!refill.recycled);
    assert_eq!(deck.hand_len(), 8);
    assert_eq!(deck.zones().zone_size(Zone::Deck), 1);
    assert_eq!(deck.zones().zone_size(Zone::Discard), 8);
    assert_partition(deck.zones());
}

/// Test the whole discard pile is recycled when the deck cannot cover the need.
#[test]
fn test_refill_recycles_discard_pile() {
    let mut deck = layout(6, 1, 8);
    let mut rng = GameRng::new(5);

    let refill = deck.refill(&mut rng);

    assert_eq!(refill.dealt, 2);
    assert!(refill.recycled);
    assert_eq!(deck.hand_len(), 8);
    assert_eq!(deck.zones().zone_size(Zone::Discard), 0);
    assert_eq!(deck.zones().zone_size(Zone::Deck), 7);
    assert_partition(deck.zones());
}

/// Test a short hand when deck and discard together run dry.
#[test]
fn test_refill_deals_short_hand() {
    let mut deck = layout(2, 1, 2);
    let mut rng = GameRng::new(5);

    let refill = deck.refill(&mut rng);

    assert_eq!(refill.dealt, 3);
    assert!(refill.recycled);
    assert_eq!(deck.hand_len(), 5);
    assert_eq!(deck.zones().zone_size(Zone::Deck), 0);
    assert_partition(deck.zones());
}

/// Test used cards never come back.
#[test]
fn test_used_cards_stay_out() {
    let mut deck = layout(0, 0, 0);
    let mut rng = GameRng::new(5);

    let refill = deck.refill(&mut rng);

    assert_eq!(refill.dealt, 0);
    assert_eq!(deck.zones().zone_size(Zone::Used), 52);
}

/// Test a full hand needs nothing.
#[test]
fn test_full_hand_refill_is_noop() {
    let mut deck = layout(8, 10, 10);
    let before = deck.zones().snapshot();

    let refill = deck.refill(&mut GameRng::new(1));

    assert_eq!(refill.dealt, 0);
    assert!(!refill.recycled);
    assert_eq!(deck.zones().snapshot(), before);
}

// =============================================================================
// Random encounters
// =============================================================================

#[derive(Clone, Debug)]
enum Op {
    Stake(usize),
    Unstake(usize),
    Play,
    Discard,
    Sort(u8),
    Advance(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..8).prop_map(Op::Stake),
        1 => (0usize..6).prop_map(Op::Unstake),
        2 => Just(Op::Play),
        1 => Just(Op::Discard),
        1 => (0u8..3).prop_map(Op::Sort),
        2 => (0u64..2000).prop_map(Op::Advance),
    ]
}

fn meddler() -> MonsterDefinition {
    let combo = ComboAction::new(vec![
        MonsterAction::atomic(ActionKind::Charm, 2, "lure"),
        MonsterAction::atomic(ActionKind::Attack, 1, "nip"),
    ]);
    MonsterDefinition::new("meddler", 100_000)
        .with_actions(vec![
            combo.into(),
            MonsterAction::atomic(ActionKind::Defend, 20, "hide"),
            MonsterAction::atomic(ActionKind::Charm, 7, "enthrall"),
            MonsterAction::atomic(ActionKind::StealPercent, 10, "pickpocket"),
        ])
        .with_actions_per_turn(2)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// No operation sequence can duplicate or lose a card.
    #[test]
    fn proptest_cards_stay_partitioned(
        seed in any::<u64>(),
        ops in prop::collection::vec(op(), 1..60),
    ) {
        let mut session = EncounterSession::new(seed);
        let def = meddler();
        let mut ctl = TurnController::new(
            &mut session,
            &def,
            Tier::Normal,
            CombatConfig::default(),
            Collaborators::detached(),
            &GameRng::new(seed),
        );

        for op in ops {
            match op {
                Op::Stake(i) => {
                    if let Some(&card) = ctl.hand().get(i) {
                        let _ = ctl.stake(card);
                    }
                }
                Op::Unstake(i) => {
                    if let Some(&card) = ctl.staked().get(i) {
                        let _ = ctl.unstake(card);
                    }
                }
                Op::Play => {
                    let _ = ctl.play();
                }
                Op::Discard => {
                    let _ = ctl.discard();
                }
                Op::Sort(mode) => {
                    let mode = match mode {
                        0 => SortMode::None,
                        1 => SortMode::Value,
                        _ => SortMode::Suit,
                    };
                    let _ = ctl.sort_hand(mode);
                }
                Op::Advance(ms) => ctl.advance(ms),
            }

            let snapshot = ctl.state().deck.zones().snapshot();
            prop_assert_eq!(snapshot.total(), 52);
            prop_assert!(ctl.hand().len() <= 8);
            prop_assert!(ctl.discards_remaining() <= 2);

            let staked = ctl.staked();
            if staked.len() > 5 {
                // Only charm can overfill, and it locks what it forces in.
                let locked = staked
                    .iter()
                    .filter(|&&c| ctl.state().play_zone.is_locked(c))
                    .count();
                prop_assert!(locked > 0);
            }
        }

        let snapshot = ctl.state().deck.zones().snapshot();
        for card in Card::universe() {
            let holders = Zone::ALL
                .iter()
                .filter(|&&z| snapshot.zone(z).contains(&card))
                .count();
            prop_assert_eq!(holders, 1);
        }
    }
}
