//! Monster actions.
//!
//! A monster's script is a list of `MonsterAction`s. Each entry is either a
//! single `AtomicAction` or a `ComboAction`: an ordered list of steps
//! (atomic or nested combos) played `repeat` times. Combos are flattened
//! into atomic steps only when the monster starts them.
//!
//! The JSON form keeps the catalog's wire shape:
//!
//! ```json
//! { "type": "StealPercent", "value": 10, "description": "Pickpocket" }
//! { "type": "combo", "value": 0, "steps": [...], "repeat": 2, "delayMs": 10 }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::core::MAX_COMBO_STEPS;

/// Atomic action kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Attack,
    Defend,
    Heal,
    Buff,
    Debuff,
    Waiting,
    #[serde(rename = "StealPercent", alias = "stealPercent")]
    StealPercent,
    DoubleAtk,
    Charm,
    Transform,
    Milk,
}

impl ActionKind {
    pub const ALL: [ActionKind; 11] = [
        ActionKind::Attack,
        ActionKind::Defend,
        ActionKind::Heal,
        ActionKind::Buff,
        ActionKind::Debuff,
        ActionKind::Waiting,
        ActionKind::StealPercent,
        ActionKind::DoubleAtk,
        ActionKind::Charm,
        ActionKind::Transform,
        ActionKind::Milk,
    ];

    /// Name used in catalog data.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ActionKind::Attack => "attack",
            ActionKind::Defend => "defend",
            ActionKind::Heal => "heal",
            ActionKind::Buff => "buff",
            ActionKind::Debuff => "debuff",
            ActionKind::Waiting => "waiting",
            ActionKind::StealPercent => "StealPercent",
            ActionKind::DoubleAtk => "doubleAtk",
            ActionKind::Charm => "charm",
            ActionKind::Transform => "transform",
            ActionKind::Milk => "milk",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One effect with its magnitude.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomicAction {
    pub kind: ActionKind,
    pub value: i64,
    pub description: String,
}

impl AtomicAction {
    #[must_use]
    pub fn new(kind: ActionKind, value: i64) -> Self {
        Self {
            kind,
            value,
            description: String::new(),
        }
    }

    /// The no-op produced by empty scripts and empty combos.
    #[must_use]
    pub fn waiting() -> Self {
        Self::new(ActionKind::Waiting, 0)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn intent(&self) -> Intent {
        Intent {
            kind: self.kind,
            value: self.value,
        }
    }
}

/// An ordered, repeatable list of steps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboAction {
    pub steps: Vec<MonsterAction>,
    /// Times the step list is played. Values below 1 count as 1.
    pub repeat: u32,
    /// Authored spacing between steps. Pacing uses `PacingConfig` instead.
    pub delay_ms: u64,
    pub description: String,
}

impl ComboAction {
    #[must_use]
    pub fn new(steps: Vec<MonsterAction>) -> Self {
        Self {
            steps,
            repeat: 1,
            delay_ms: 0,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    /// Atomic steps this combo expands to at unlimited depth, saturating.
    #[must_use]
    pub fn expanded_len(&self) -> usize {
        let once = self.steps.iter().fold(0usize, |acc, step| {
            acc.saturating_add(match step {
                MonsterAction::Atomic(_) => 1,
                MonsterAction::Combo(inner) => inner.expanded_len(),
            })
        });
        once.saturating_mul(self.repeat.max(1) as usize)
    }

    #[must_use]
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// One entry of a monster's script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAction", into = "RawAction")]
pub enum MonsterAction {
    Atomic(AtomicAction),
    Combo(ComboAction),
}

impl MonsterAction {
    /// Shorthand for an atomic entry.
    #[must_use]
    pub fn atomic(kind: ActionKind, value: i64, description: &str) -> Self {
        MonsterAction::Atomic(AtomicAction::new(kind, value).with_description(description))
    }

    #[must_use]
    pub fn is_combo(&self) -> bool {
        matches!(self, MonsterAction::Combo(_))
    }
}

impl From<AtomicAction> for MonsterAction {
    fn from(action: AtomicAction) -> Self {
        MonsterAction::Atomic(action)
    }
}

impl From<ComboAction> for MonsterAction {
    fn from(combo: ComboAction) -> Self {
        MonsterAction::Combo(combo)
    }
}

/// What the intent display shows for the next atomic action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub kind: ActionKind,
    pub value: i64,
}

impl Intent {
    #[must_use]
    pub const fn glyph(&self) -> &'static str {
        match self.kind {
            ActionKind::Attack => "⚔",
            ActionKind::Defend => "🛡",
            ActionKind::Waiting => "⏳",
            ActionKind::StealPercent => "💰",
            ActionKind::Heal => "➕",
            ActionKind::Buff => "✨",
            ActionKind::Debuff => "☠️",
            ActionKind::DoubleAtk => "🌟",
            ActionKind::Charm => "❤️",
            ActionKind::Transform => "❓",
            ActionKind::Milk => "🥛",
        }
    }

    /// Magnitude as displayed; steal shows a percentage.
    #[must_use]
    pub fn value_label(&self) -> String {
        match self.kind {
            ActionKind::StealPercent => format!("{}%", self.value),
            _ => self.value.to_string(),
        }
    }
}

/// Flatten a combo into its atomic steps.
///
/// The step list is repeated `max(1, repeat)` times and nested combos are
/// flattened in place. Nesting deeper than `max_depth` is dropped, and the
/// result never holds more than `MAX_COMBO_STEPS` steps.
///
/// ```
/// use poker_crawl::monsters::{flatten_combo, ActionKind, ComboAction, MonsterAction};
///
/// let inner = ComboAction::new(vec![
///     MonsterAction::atomic(ActionKind::Attack, 5, "jab"),
/// ]).with_repeat(2);
/// let outer = ComboAction::new(vec![
///     MonsterAction::atomic(ActionKind::Defend, 3, "guard"),
///     inner.into(),
/// ]);
///
/// let steps = flatten_combo(&outer, 8);
/// let kinds: Vec<_> = steps.iter().map(|s| s.kind).collect();
/// assert_eq!(kinds, [ActionKind::Defend, ActionKind::Attack, ActionKind::Attack]);
/// ```
#[must_use]
pub fn flatten_combo(combo: &ComboAction, max_depth: usize) -> Vec<AtomicAction> {
    let mut out = Vec::new();
    flatten_into(combo, 1, max_depth, &mut out);
    out
}

/// Returns `false` once `out` holds `MAX_COMBO_STEPS` steps.
fn flatten_into(combo: &ComboAction, depth: usize, max_depth: usize, out: &mut Vec<AtomicAction>) -> bool {
    if depth > max_depth {
        warn!(depth, max_depth, description = %combo.description, "combo nested too deep, dropping");
        return true;
    }

    let start = out.len();
    for step in &combo.steps {
        match step {
            MonsterAction::Atomic(action) => {
                if out.len() >= MAX_COMBO_STEPS {
                    warn!(description = %combo.description, "combo expansion truncated");
                    return false;
                }
                out.push(action.clone());
            }
            MonsterAction::Combo(inner) => {
                if !flatten_into(inner, depth + 1, max_depth, out) {
                    return false;
                }
            }
        }
    }

    // Later repeats copy the first pass.
    let end = out.len();
    if end == start {
        return true;
    }
    for _ in 1..combo.repeat.max(1) {
        for i in start..end {
            if out.len() >= MAX_COMBO_STEPS {
                warn!(description = %combo.description, "combo expansion truncated");
                return false;
            }
            out.push(out[i].clone());
        }
    }
    true
}

/// First atomic step of a combo, without expanding it.
///
/// Agrees with `flatten_combo(combo, max_depth).first()`.
#[must_use]
pub fn first_step(combo: &ComboAction, max_depth: usize) -> Option<AtomicAction> {
    first_step_at(combo, 1, max_depth)
}

fn first_step_at(combo: &ComboAction, depth: usize, max_depth: usize) -> Option<AtomicAction> {
    if depth > max_depth {
        return None;
    }
    combo.steps.iter().find_map(|step| match step {
        MonsterAction::Atomic(action) => Some(action.clone()),
        MonsterAction::Combo(inner) => first_step_at(inner, depth + 1, max_depth),
    })
}

// Wire representation shared by atomic and combo entries.

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
enum ComboTag {
    #[serde(rename = "combo")]
    Combo,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RawKind {
    Combo(ComboTag),
    Atomic(ActionKind),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAction {
    #[serde(rename = "type")]
    kind: RawKind,
    #[serde(default)]
    value: i64,
    #[serde(default)]
    description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    steps: Vec<MonsterAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    repeat: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delay_ms: Option<u64>,
}

impl From<RawAction> for MonsterAction {
    fn from(raw: RawAction) -> Self {
        match raw.kind {
            RawKind::Combo(_) => MonsterAction::Combo(ComboAction {
                steps: raw.steps,
                repeat: raw.repeat.unwrap_or(1),
                delay_ms: raw.delay_ms.unwrap_or(0),
                description: raw.description,
            }),
            RawKind::Atomic(kind) => MonsterAction::Atomic(AtomicAction {
                kind,
                value: raw.value,
                description: raw.description,
            }),
        }
    }
}

impl From<MonsterAction> for RawAction {
    fn from(action: MonsterAction) -> Self {
        match action {
            MonsterAction::Atomic(a) => RawAction {
                kind: RawKind::Atomic(a.kind),
                value: a.value,
                description: a.description,
                steps: Vec::new(),
                repeat: None,
                delay_ms: None,
            },
            MonsterAction::Combo(c) => RawAction {
                kind: RawKind::Combo(ComboTag::Combo),
                value: 0,
                description: c.description,
                steps: c.steps,
                repeat: Some(c.repeat),
                delay_ms: Some(c.delay_ms),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attack(value: i64) -> MonsterAction {
        MonsterAction::atomic(ActionKind::Attack, value, "hit")
    }

    #[test]
    fn test_parse_atomic() {
        let json = r#"{ "type": "StealPercent", "value": 10, "description": "Pickpocket" }"#;
        let action: MonsterAction = serde_json::from_str(json).unwrap();

        assert_eq!(
            action,
            MonsterAction::atomic(ActionKind::StealPercent, 10, "Pickpocket")
        );
    }

    #[test]
    fn test_parse_lowercase_steal_alias() {
        let json = r#"{ "type": "stealPercent", "value": 5 }"#;
        let action: MonsterAction = serde_json::from_str(json).unwrap();
        assert!(matches!(action, MonsterAction::Atomic(a) if a.kind == ActionKind::StealPercent));
    }

    #[test]
    fn test_parse_combo() {
        let json = r#"{
            "type": "combo", "value": 0, "description": "Flurry", "delayMs": 10, "repeat": 2,
            "steps": [
                { "type": "transform", "value": 2, "description": "Windup" },
                { "type": "attack", "value": 5, "description": "Strike" }
            ]
        }"#;
        let action: MonsterAction = serde_json::from_str(json).unwrap();
        assert!(action.is_combo());

        let MonsterAction::Combo(combo) = action else {
            panic!("expected combo");
        };
        assert_eq!(combo.repeat, 2);
        assert_eq!(combo.delay_ms, 10);
        assert_eq!(combo.steps.len(), 2);
        assert_eq!(flatten_combo(&combo, 8).len(), 4);
    }

    #[test]
    fn test_combo_json_round_trip() {
        let combo: MonsterAction = ComboAction::new(vec![attack(1), attack(2)])
            .with_repeat(3)
            .with_description("triple")
            .into();

        let json = serde_json::to_string(&combo).unwrap();
        assert!(json.contains(r#""type":"combo""#));
        assert!(json.contains(r#""delayMs":0"#));

        let back: MonsterAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, combo);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{ "type": "explode", "value": 1 }"#;
        assert!(serde_json::from_str::<MonsterAction>(json).is_err());
    }

    #[test]
    fn test_flatten_repeat_zero_counts_once() {
        let combo = ComboAction::new(vec![attack(1), attack(2)]).with_repeat(0);
        assert_eq!(flatten_combo(&combo, 8).len(), 2);
    }

    #[test]
    fn test_flatten_nested_repeats_multiply() {
        let inner = ComboAction::new(vec![attack(1), attack(2)]).with_repeat(2);
        let outer = ComboAction::new(vec![inner.into(), attack(3)]).with_repeat(3);

        let values: Vec<_> = flatten_combo(&outer, 8).iter().map(|a| a.value).collect();
        assert_eq!(values, [1, 2, 1, 2, 3, 1, 2, 1, 2, 3, 1, 2, 1, 2, 3]);
    }

    #[test]
    fn test_flatten_depth_limit() {
        let deepest = ComboAction::new(vec![attack(9)]);
        let middle = ComboAction::new(vec![deepest.into(), attack(2)]);
        let top = ComboAction::new(vec![attack(1), middle.into()]);

        let values: Vec<_> = flatten_combo(&top, 2).iter().map(|a| a.value).collect();
        assert_eq!(values, [1, 2]);

        let values: Vec<_> = flatten_combo(&top, 3).iter().map(|a| a.value).collect();
        assert_eq!(values, [1, 9, 2]);
    }

    #[test]
    fn test_flatten_stops_at_step_cap() {
        let combo = ComboAction::new(vec![attack(1), attack(2), attack(3)]).with_repeat(u32::MAX);
        let steps = flatten_combo(&combo, 8);

        assert_eq!(steps.len(), MAX_COMBO_STEPS);
        assert_eq!(steps[3].value, 1);
    }

    #[test]
    fn test_first_step_is_lazy() {
        let inner = ComboAction::new(vec![attack(7), attack(8)]).with_repeat(u32::MAX);
        let outer = ComboAction::new(vec![ComboAction::new(Vec::new()).into(), inner.into()])
            .with_repeat(u32::MAX);

        assert_eq!(first_step(&outer, 8).map(|a| a.value), Some(7));
        assert_eq!(first_step(&outer, 1), None);
        assert_eq!(first_step(&ComboAction::new(Vec::new()), 8), None);
    }

    #[test]
    fn test_expanded_len() {
        let inner = ComboAction::new(vec![attack(1), attack(2)]).with_repeat(2);
        let outer = ComboAction::new(vec![inner.into(), attack(3)]).with_repeat(3);
        assert_eq!(outer.expanded_len(), 15);
        assert_eq!(ComboAction::new(Vec::new()).with_repeat(9).expanded_len(), 0);

        let huge = ComboAction::new(vec![attack(1)]).with_repeat(u32::MAX);
        let nested = ComboAction::new(vec![huge.into()]).with_repeat(u32::MAX);
        assert_eq!(nested.expanded_len(), (u32::MAX as usize).saturating_mul(u32::MAX as usize));
    }

    #[test]
    fn test_intent_labels() {
        let steal = Intent {
            kind: ActionKind::StealPercent,
            value: 20,
        };
        assert_eq!(steal.value_label(), "20%");
        assert_eq!(steal.glyph(), "💰");

        let attack = AtomicAction::new(ActionKind::Attack, 15).intent();
        assert_eq!(attack.value_label(), "15");
    }

    #[test]
    fn test_kind_names_match_serde() {
        for kind in ActionKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }
}
