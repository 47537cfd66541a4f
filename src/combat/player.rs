//! Player combatant.

use serde::{Deserialize, Serialize};

/// Player HP and gold. Neither ever goes below zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    hp: i64,
    gold: i64,
}

impl PlayerState {
    #[must_use]
    pub fn new(hp: i64, gold: i64) -> Self {
        Self {
            hp: hp.max(0),
            gold: gold.max(0),
        }
    }

    #[must_use]
    pub fn hp(&self) -> i64 {
        self.hp
    }

    #[must_use]
    pub fn gold(&self) -> i64 {
        self.gold
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Lose HP. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        let before = self.hp;
        self.hp = (self.hp - amount.max(0)).max(0);
        before - self.hp
    }

    /// Add (or with a negative amount, remove) gold.
    pub fn add_gold(&mut self, amount: i64) {
        self.gold = self.gold.saturating_add(amount).max(0);
    }

    /// Take `percent`% of the purse, rounded down. Returns the amount taken.
    ///
    /// `percent` is clamped to `0..=100`.
    pub fn steal_gold_percent(&mut self, percent: i64) -> i64 {
        let percent = percent.clamp(0, 100);
        let stolen = i128::from(self.gold) * i128::from(percent) / 100;
        let stolen = i64::try_from(stolen).unwrap_or(self.gold);
        self.gold -= stolen;
        stolen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_floors_at_zero() {
        let mut player = PlayerState::new(10, 0);
        assert_eq!(player.take_damage(4), 4);
        assert_eq!(player.take_damage(50), 6);
        assert_eq!(player.hp(), 0);
        assert!(player.is_defeated());
    }

    #[test]
    fn test_negative_damage_ignored() {
        let mut player = PlayerState::new(10, 0);
        assert_eq!(player.take_damage(-5), 0);
        assert_eq!(player.hp(), 10);
    }

    #[test]
    fn test_steal_gold_percent() {
        let mut player = PlayerState::new(100, 47);
        assert_eq!(player.steal_gold_percent(10), 4);
        assert_eq!(player.gold(), 43);

        assert_eq!(player.steal_gold_percent(250), 43);
        assert_eq!(player.gold(), 0);

        assert_eq!(player.steal_gold_percent(50), 0);
    }

    #[test]
    fn test_large_purse_saturates() {
        let mut player = PlayerState::new(100, i64::MAX - 1);
        player.add_gold(i64::MAX);
        assert_eq!(player.gold(), i64::MAX);

        assert_eq!(player.steal_gold_percent(50), i64::MAX / 2);
        assert_eq!(player.gold(), i64::MAX - i64::MAX / 2);
    }

    #[test]
    fn test_gold_floors_at_zero() {
        let mut player = PlayerState::new(100, 5);
        player.add_gold(-20);
        assert_eq!(player.gold(), 0);
        assert_eq!(PlayerState::new(100, -1).gold(), 0);
    }
}
