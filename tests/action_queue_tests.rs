//! Action queue integration tests.
//!
//! These tests verify monster script sequencing:
//! - Combos drain fully before the script advances
//! - The high-level index advances once per script entry
//! - Catalog JSON scripts run through the queue unchanged

use poker_crawl::monsters::{
    ActionKind, ActionQueue, ComboAction, MonsterAction, MonsterCatalog,
};

fn atomic(kind: ActionKind, value: i64) -> MonsterAction {
    MonsterAction::atomic(kind, value, "")
}

/// Test a 3-entry script whose second entry is a 4-step combo played twice.
#[test]
fn test_combo_advances_index_once() {
    let combo = ComboAction::new(vec![
        atomic(ActionKind::Attack, 1),
        atomic(ActionKind::Defend, 2),
        atomic(ActionKind::Attack, 3),
        atomic(ActionKind::Waiting, 0),
    ])
    .with_repeat(2);
    let mut queue = ActionQueue::new(
        vec![
            atomic(ActionKind::StealPercent, 10),
            combo.into(),
            atomic(ActionKind::Milk, 50),
        ],
        8,
    );

    // Entry 1
    assert_eq!(queue.dequeue_next().kind, ActionKind::StealPercent);
    assert_eq!(queue.high_index(), 1);

    // Entry 2: eight atomic steps, one index advance
    let mut values = Vec::new();
    for _ in 0..8 {
        values.push(queue.dequeue_next().value);
        assert_eq!(queue.high_index(), 2);
    }
    assert_eq!(values, [1, 2, 3, 0, 1, 2, 3, 0]);
    assert_eq!(queue.pending_len(), 0);

    // Entry 3
    let next = queue.dequeue_next();
    assert_eq!(next.kind, ActionKind::Milk);
    assert_eq!(queue.high_index(), 0);
}

/// Test that peeking into a combo never commits it.
#[test]
fn test_peek_into_combo_does_not_commit() {
    let combo = ComboAction::new(vec![atomic(ActionKind::Charm, 1), atomic(ActionKind::Attack, 5)]);
    let queue = ActionQueue::new(vec![combo.into()], 8);

    for _ in 0..3 {
        assert_eq!(queue.peek_next().kind, ActionKind::Charm);
    }
    assert_eq!(queue.high_index(), 0);
    assert_eq!(queue.pending_len(), 0);
}

/// Test that a combo-only script cycles back to its start.
#[test]
fn test_single_combo_script_cycles() {
    let combo = ComboAction::new(vec![atomic(ActionKind::Attack, 1), atomic(ActionKind::Attack, 2)]);
    let mut queue = ActionQueue::new(vec![combo.into()], 8);

    let values: Vec<_> = (0..6).map(|_| queue.dequeue_next().value).collect();
    assert_eq!(values, [1, 2, 1, 2, 1, 2]);
    assert_eq!(queue.high_index(), 0);
}

/// Test that a nested combo past the depth limit contributes nothing.
#[test]
fn test_depth_limit_in_queue() {
    let deep = ComboAction::new(vec![atomic(ActionKind::Attack, 99)]);
    let outer = ComboAction::new(vec![deep.into()]);
    let mut queue = ActionQueue::new(vec![outer.into(), atomic(ActionKind::Defend, 4)], 1);

    // Flattens to nothing, so the entry plays as a wait.
    assert_eq!(queue.dequeue_next().kind, ActionKind::Waiting);
    assert_eq!(queue.dequeue_next().kind, ActionKind::Defend);
}

/// Test a JSON-authored combo monster end to end.
#[test]
fn test_catalog_combo_script() {
    let json = r#"{
        "normal": [{
            "name": "maccaroni", "maxHP": 350, "actionsPerTurn": 1,
            "goldReward": { "min": 3, "max": 5 },
            "actions": [
                { "type": "combo", "value": 0, "description": "Project", "delayMs": 10,
                  "steps": [
                    { "type": "transform", "value": 2, "description": "Windup" },
                    { "type": "attack", "value": 5, "description": "Strike" },
                    { "type": "transform", "value": 0, "description": "Recover" }
                  ],
                  "repeat": 4 },
                { "type": "StealPercent", "value": 20, "description": "Taxes" }
            ]
        }]
    }"#;
    let catalog = MonsterCatalog::from_json_str(json).unwrap();
    let def = &catalog.normal[0];
    let mut queue = ActionQueue::new(def.actions.clone(), 8);

    let first_turn: Vec<_> = (0..12).map(|_| queue.dequeue_next().kind).collect();
    assert_eq!(
        first_turn.iter().filter(|&&k| k == ActionKind::Attack).count(),
        4
    );
    assert_eq!(queue.high_index(), 1);
    assert_eq!(queue.peek_next().kind, ActionKind::StealPercent);
}

/// Test every builtin script cycles without leaving the script bounds.
#[test]
fn test_builtin_scripts_cycle() {
    let catalog = MonsterCatalog::builtin();
    for def in catalog.normal.iter().chain(&catalog.elite).chain(&catalog.boss) {
        let mut queue = ActionQueue::new(def.actions.clone(), 8);
        for _ in 0..(def.actions.len() * 2 + 1) {
            let peeked = queue.peek_next();
            assert_eq!(queue.dequeue_next(), peeked, "{}", def.name);
            assert!(queue.high_index() < def.actions.len().max(1));
        }
    }
}
