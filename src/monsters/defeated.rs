//! Repeat avoidance across encounters.

use serde::{Deserialize, Serialize};

use super::catalog::{MonsterDefinition, Tier};

/// Monsters already beaten on the current floor, per tier.
///
/// Bosses are never tracked; beating one clears both pools.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefeatedPools {
    pub normal: Vec<String>,
    pub elite: Vec<String>,
}

impl DefeatedPools {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn pool(&self, tier: Tier) -> Option<&Vec<String>> {
        match tier {
            Tier::Normal => Some(&self.normal),
            Tier::Elite => Some(&self.elite),
            Tier::Boss => None,
        }
    }

    #[must_use]
    pub fn is_defeated(&self, tier: Tier, name: &str) -> bool {
        self.pool(tier).is_some_and(|p| p.iter().any(|n| n == name))
    }

    /// Drop defeated monsters from `pool`.
    ///
    /// Boss pools pass through untouched, and a pool that would end up empty
    /// is returned whole.
    #[must_use]
    pub fn filter<'a>(&self, tier: Tier, pool: &'a [MonsterDefinition]) -> Vec<&'a MonsterDefinition> {
        let all: Vec<_> = pool.iter().collect();
        if tier == Tier::Boss {
            return all;
        }

        let filtered: Vec<_> = pool
            .iter()
            .filter(|m| !self.is_defeated(tier, &m.name))
            .collect();

        if filtered.is_empty() {
            all
        } else {
            filtered
        }
    }

    /// Record a win. No-op for bosses.
    pub fn mark(&mut self, tier: Tier, name: &str) {
        let pool = match tier {
            Tier::Normal => &mut self.normal,
            Tier::Elite => &mut self.elite,
            Tier::Boss => return,
        };
        if !pool.iter().any(|n| n == name) {
            pool.push(name.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.normal.clear();
        self.elite.clear();
    }
}
