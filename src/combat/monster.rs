//! Monster combatant.
//!
//! Incoming damage hits the shield first; only the remainder reaches HP,
//! and HP never drops below zero. The first hit that brings HP to zero is
//! reported as the kill, later hits are not.

use serde::{Deserialize, Serialize};

use crate::monsters::MonsterDefinition;

/// Breakdown of one hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    /// Taken off the shield.
    pub absorbed: i64,
    /// Taken off HP.
    pub hp_loss: i64,
    /// This hit killed the monster.
    pub killed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterState {
    name: String,
    texture: String,
    hp: i64,
    max_hp: i64,
    shield: i64,
    form: u32,
    dead: bool,
}

impl MonsterState {
    #[must_use]
    pub fn new(name: impl Into<String>, texture: impl Into<String>, max_hp: i64) -> Self {
        let max_hp = max_hp.max(0);
        Self {
            name: name.into(),
            texture: texture.into(),
            hp: max_hp,
            max_hp,
            shield: 0,
            form: 0,
            dead: max_hp == 0,
        }
    }

    #[must_use]
    pub fn from_definition(def: &MonsterDefinition) -> Self {
        Self::new(def.name.clone(), def.texture.clone(), def.max_hp)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base sprite key.
    #[must_use]
    pub fn texture(&self) -> &str {
        &self.texture
    }

    /// Sprite key of the current form: the base key, or the base key with
    /// the form index appended.
    #[must_use]
    pub fn form_texture(&self) -> String {
        if self.form == 0 {
            self.texture.clone()
        } else {
            format!("{}{}", self.texture, self.form)
        }
    }

    #[must_use]
    pub fn hp(&self) -> i64 {
        self.hp
    }

    #[must_use]
    pub fn max_hp(&self) -> i64 {
        self.max_hp
    }

    #[must_use]
    pub fn shield(&self) -> i64 {
        self.shield
    }

    #[must_use]
    pub fn form(&self) -> u32 {
        self.form
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn take_damage(&mut self, incoming: i64) -> DamageReport {
        let incoming = incoming.max(0);
        let absorbed = self.shield.min(incoming);
        self.shield -= absorbed;

        let before = self.hp;
        self.hp = (self.hp - (incoming - absorbed)).max(0);

        let killed = self.hp == 0 && !self.dead;
        if killed {
            self.dead = true;
        }

        DamageReport {
            absorbed,
            hp_loss: before - self.hp,
            killed,
        }
    }

    pub fn add_shield(&mut self, amount: i64) {
        self.shield = self.shield.saturating_add(amount.max(0));
    }

    /// Self-heal. Returns the HP gained.
    ///
    /// Overheal past `max_hp` is allowed unless `cap` is set.
    pub fn milk(&mut self, amount: i64, cap: bool) -> i64 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount.max(0));
        if cap {
            self.hp = self.hp.min(self.max_hp.max(before));
        }
        self.hp - before
    }

    /// Switch to another visual form. Negative indices mean the base form.
    pub fn transform(&mut self, form: i64) {
        self.form = u32::try_from(form).unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extreme_values_saturate() {
        let mut monster = MonsterState::new("m", "m", 50);
        monster.add_shield(i64::MAX);
        monster.add_shield(i64::MAX);
        assert_eq!(monster.shield(), i64::MAX);

        assert_eq!(monster.milk(i64::MAX, false), i64::MAX - 50);
        assert_eq!(monster.milk(i64::MAX, false), 0);
        assert_eq!(monster.hp(), i64::MAX);

        let report = monster.take_damage(i64::MAX);
        assert_eq!(report.absorbed, i64::MAX);
        assert_eq!(report.hp_loss, 0);
    }

    #[test]
    fn test_shield_absorbs_first() {
        let mut monster = MonsterState::new("m", "m", 100);
        monster.add_shield(15);

        let report = monster.take_damage(40);

        assert_eq!(report.absorbed, 15);
        assert_eq!(report.hp_loss, 25);
        assert!(!report.killed);
        assert_eq!(monster.shield(), 0);
        assert_eq!(monster.hp(), 75);
    }

    #[test]
    fn test_shield_covers_whole_hit() {
        let mut monster = MonsterState::new("m", "m", 100);
        monster.add_shield(50);

        let report = monster.take_damage(20);
        assert_eq!(report, DamageReport { absorbed: 20, hp_loss: 0, killed: false });
        assert_eq!(monster.shield(), 30);
    }

    #[test]
    fn test_kill_reported_once() {
        let mut monster = MonsterState::new("m", "m", 30);

        assert!(monster.take_damage(50).killed);
        assert_eq!(monster.hp(), 0);
        assert!(!monster.take_damage(10).killed);
        assert!(monster.is_dead());
    }

    #[test]
    fn test_milk_uncapped_by_default() {
        let mut monster = MonsterState::new("m", "m", 100);
        assert_eq!(monster.milk(50, false), 50);
        assert_eq!(monster.hp(), 150);
    }

    #[test]
    fn test_milk_capped() {
        let mut monster = MonsterState::new("m", "m", 100);
        monster.take_damage(30);
        assert_eq!(monster.milk(50, true), 30);
        assert_eq!(monster.hp(), 100);
    }

    #[test]
    fn test_transform_texture() {
        let mut monster = MonsterState::new("yunderA", "yunderA", 700);
        assert_eq!(monster.form_texture(), "yunderA");
        monster.transform(2);
        assert_eq!(monster.form(), 2);
        assert_eq!(monster.form_texture(), "yunderA2");
        monster.transform(0);
        assert_eq!(monster.form_texture(), "yunderA");
    }
}
