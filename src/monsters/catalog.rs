//! Monster catalog and encounter selection.
//!
//! The catalog is plain data: three tiers of `MonsterDefinition`s. It ships
//! with a built-in roster and can be loaded from JSON in the wire shape
//!
//! ```json
//! {
//!   "normal": [{ "name": "arnak", "texture": "arnak", "maxHP": 400,
//!                "actionsPerTurn": 2, "actions": [...],
//!                "goldReward": { "min": 3, "max": 6 } }],
//!   "elite": [],
//!   "boss": []
//! }
//! ```
//!
//! `goldReward` is either a number or a `{min, max}` range.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{GameRng, LoadError, MAX_COMBO_STEPS};

use super::action::{ActionKind, MonsterAction};
use super::defeated::DefeatedPools;

/// Encounter tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Normal,
    Elite,
    Boss,
}

impl Tier {
    /// Tier for a map node type. Plain fights are normal encounters.
    #[must_use]
    pub fn from_node_type(node_type: &str) -> Option<Self> {
        match node_type {
            "fight" | "normal" => Some(Tier::Normal),
            "elite" => Some(Tier::Elite),
            "boss" => Some(Tier::Boss),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Tier::Normal => "normal",
            Tier::Elite => "elite",
            Tier::Boss => "boss",
        }
    }
}

/// Gold granted when the monster dies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GoldReward {
    Fixed(i64),
    Range { min: i64, max: i64 },
}

impl Default for GoldReward {
    fn default() -> Self {
        GoldReward::Fixed(0)
    }
}

impl GoldReward {
    /// Draw the reward. Never negative.
    pub fn roll(&self, rng: &mut GameRng) -> i64 {
        let amount = match *self {
            GoldReward::Fixed(amount) => amount,
            GoldReward::Range { min, max } => rng.gen_between(min, max),
        };
        amount.max(0)
    }
}

fn default_actions_per_turn() -> u32 {
    1
}

fn default_weight() -> f32 {
    1.0
}

/// One monster's stats and script.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterDefinition {
    pub name: String,

    /// Sprite key. Defaults to the name.
    #[serde(default)]
    pub texture: String,

    #[serde(rename = "maxHP")]
    pub max_hp: i64,

    /// High-level actions per monster turn. Values below 1 count as 1.
    #[serde(default = "default_actions_per_turn")]
    pub actions_per_turn: u32,

    #[serde(default)]
    pub actions: Vec<MonsterAction>,

    #[serde(default)]
    pub gold_reward: GoldReward,

    /// Relative selection weight inside the tier.
    #[serde(default = "default_weight")]
    pub weight: f32,
}

impl MonsterDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, max_hp: i64) -> Self {
        let name = name.into();
        Self {
            texture: name.clone(),
            name,
            max_hp,
            actions_per_turn: 1,
            actions: Vec::new(),
            gold_reward: GoldReward::default(),
            weight: 1.0,
        }
    }

    #[must_use]
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = texture.into();
        self
    }

    #[must_use]
    pub fn with_actions_per_turn(mut self, count: u32) -> Self {
        self.actions_per_turn = count;
        self
    }

    #[must_use]
    pub fn with_actions(mut self, actions: Vec<MonsterAction>) -> Self {
        self.actions = actions;
        self
    }

    #[must_use]
    pub fn with_gold_reward(mut self, reward: GoldReward) -> Self {
        self.gold_reward = reward;
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Effective high-level actions per turn.
    #[must_use]
    pub fn turn_actions(&self) -> u32 {
        self.actions_per_turn.max(1)
    }

    fn validate(&self, tier: Tier) -> Result<(), LoadError> {
        let invalid = |what: &str| {
            LoadError::Invalid(format!("{} monster {:?}: {what}", tier.name(), self.name))
        };

        if self.name.is_empty() {
            return Err(LoadError::Invalid(format!("{} monster without a name", tier.name())));
        }
        if self.max_hp <= 0 {
            return Err(invalid("maxHP must be positive"));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(invalid("weight must be a non-negative number"));
        }
        for action in &self.actions {
            if let MonsterAction::Combo(combo) = action {
                if combo.expanded_len() > MAX_COMBO_STEPS {
                    return Err(invalid(&format!(
                        "combo {:?} expands past {MAX_COMBO_STEPS} steps",
                        combo.description
                    )));
                }
            }
        }
        Ok(())
    }
}

/// All monsters, by tier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterCatalog {
    pub normal: Vec<MonsterDefinition>,
    pub elite: Vec<MonsterDefinition>,
    pub boss: Vec<MonsterDefinition>,
}

impl MonsterCatalog {
    /// Parse and validate a JSON catalog.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let mut catalog: Self = serde_json::from_str(json)?;

        for tier in [Tier::Normal, Tier::Elite, Tier::Boss] {
            for def in catalog.pool_mut(tier) {
                if def.texture.is_empty() {
                    def.texture = def.name.clone();
                }
            }
        }

        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        for tier in [Tier::Normal, Tier::Elite, Tier::Boss] {
            for def in self.pool(tier) {
                def.validate(tier)?;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn pool(&self, tier: Tier) -> &[MonsterDefinition] {
        match tier {
            Tier::Normal => &self.normal,
            Tier::Elite => &self.elite,
            Tier::Boss => &self.boss,
        }
    }

    fn pool_mut(&mut self, tier: Tier) -> &mut Vec<MonsterDefinition> {
        match tier {
            Tier::Normal => &mut self.normal,
            Tier::Elite => &mut self.elite,
            Tier::Boss => &mut self.boss,
        }
    }

    #[must_use]
    pub fn find(&self, tier: Tier, name: &str) -> Option<&MonsterDefinition> {
        self.pool(tier).iter().find(|m| m.name == name)
    }

    /// Pick the monster for an encounter of `tier`.
    ///
    /// Defeated monsters are skipped unless nothing else is left, and the
    /// monster fought last is avoided when there is an alternative. The
    /// final pick is weighted by `weight`. Returns `None` for an empty tier.
    pub fn select(
        &self,
        tier: Tier,
        defeated: &DefeatedPools,
        last: Option<&str>,
        rng: &mut GameRng,
    ) -> Option<&MonsterDefinition> {
        let raw = self.pool(tier);
        if raw.is_empty() {
            return None;
        }

        let mut candidates = defeated.filter(tier, raw);

        if let Some(last) = last {
            if candidates.len() > 1 {
                let alternatives: Vec<_> = candidates
                    .iter()
                    .copied()
                    .filter(|m| m.name != last)
                    .collect();
                if !alternatives.is_empty() {
                    candidates = alternatives;
                }
            }
        }

        if candidates.is_empty() {
            let alternatives: Vec<_> = raw.iter().filter(|m| Some(m.name.as_str()) != last).collect();
            candidates = if alternatives.is_empty() {
                raw.iter().collect()
            } else {
                alternatives
            };
        }

        let weights: Vec<f32> = candidates.iter().map(|m| m.weight).collect();
        let picked = match rng.choose_weighted(&weights) {
            Some(index) => candidates.get(index).copied(),
            None => rng.choose(&candidates).copied(),
        };

        if let Some(monster) = picked {
            debug!(tier = tier.name(), monster = %monster.name, candidates = candidates.len(), "selected monster");
        }
        picked
    }

    /// The shipped roster.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            normal: vec![bluff_chips(), arnak(), low_rollers(), devil_roulette()],
            elite: vec![yunder_a()],
            boss: vec![spade_boss()],
        }
    }
}

fn act(kind: ActionKind, value: i64, description: &str) -> MonsterAction {
    MonsterAction::atomic(kind, value, description)
}

fn bluff_chips() -> MonsterDefinition {
    use ActionKind::{Attack, Defend};
    MonsterDefinition::new("bluffChips", 350)
        .with_actions(vec![
            act(Attack, 10, "Attack"),
            act(Defend, 10, "Guard"),
            act(Attack, 15, "Attack+"),
            act(Defend, 15, "Guard+"),
            act(Attack, 20, "Attack++"),
            act(Defend, 20, "Guard++"),
        ])
        .with_gold_reward(GoldReward::Range { min: 1, max: 4 })
}

fn arnak() -> MonsterDefinition {
    use ActionKind::{Attack, StealPercent, Waiting};
    MonsterDefinition::new("arnak", 400)
        .with_actions_per_turn(2)
        .with_actions(vec![
            act(Attack, 5, "Attack"),
            act(StealPercent, 10, "Pickpocket"),
            act(Attack, 5, "Attack"),
            act(StealPercent, 15, "Pickpocket"),
            act(Waiting, 0, "Waiting"),
            act(Attack, 50, "Attack"),
            act(StealPercent, 25, "Pickpocket"),
        ])
        .with_gold_reward(GoldReward::Range { min: 3, max: 6 })
}

fn low_rollers() -> MonsterDefinition {
    use ActionKind::{Attack, Defend};
    MonsterDefinition::new("lowRollers", 300)
        .with_actions_per_turn(2)
        .with_actions(vec![act(Attack, 15, "Attack"), act(Defend, 15, "Guard")])
        .with_gold_reward(GoldReward::Range { min: 2, max: 2 })
}

fn devil_roulette() -> MonsterDefinition {
    use ActionKind::{Attack, DoubleAtk};
    let mut actions = vec![act(Attack, 5, "Attack")];
    for value in [10, 20, 40, 80, 160] {
        actions.push(act(DoubleAtk, 2, "Double or nothing"));
        actions.push(act(Attack, value, "Attack"));
    }
    MonsterDefinition::new("devilRoulette", 350)
        .with_actions(actions)
        .with_gold_reward(GoldReward::Range { min: 1, max: 5 })
}

fn yunder_a() -> MonsterDefinition {
    use ActionKind::{Attack, Charm, Transform, Waiting};
    let mut actions = vec![
        act(Charm, 1, "Charm"),
        act(Waiting, 1, "Waiting"),
        act(Waiting, 1, "Waiting"),
        act(Charm, 1, "Charm"),
        act(Transform, 2, "First form"),
        act(Attack, 10, "Claw"),
        act(Charm, 1, "Charm"),
        act(Waiting, 1, "Waiting"),
        act(Waiting, 1, "Waiting"),
        act(Charm, 1, "Charm"),
        act(Transform, 3, "Second form"),
        act(Attack, 25, "Claw"),
    ];
    for _ in 0..4 {
        actions.push(act(Charm, 1, "Charm"));
        actions.push(act(Attack, 15, "Double claw"));
        actions.push(act(Attack, 15, "Double claw"));
    }
    MonsterDefinition::new("yunderA", 700)
        .with_actions_per_turn(3)
        .with_actions(actions)
        .with_gold_reward(GoldReward::Range { min: 15, max: 25 })
}

fn spade_boss() -> MonsterDefinition {
    use ActionKind::{Attack, Defend, StealPercent, Waiting};
    MonsterDefinition::new("spadeBoss", 750)
        .with_actions_per_turn(2)
        .with_actions(vec![
            act(Attack, 20, "Godfather's blow"),
            act(Defend, 15, "Cigar shield"),
            act(Attack, 30, "Spade assault"),
            act(Waiting, 0, "Menacing stare"),
            act(StealPercent, 20, "Sweep the table"),
            act(Waiting, 0, "Menacing stare"),
        ])
        .with_gold_reward(GoldReward::Range { min: 150, max: 250 })
}
