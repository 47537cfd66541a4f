//! Run-scoped context shared between encounters.
//!
//! `EncounterSession` carries what outlives a single fight: player HP and
//! gold, the defeated pools, the last monster seen and the run seed. The
//! caller creates one per run and passes it by reference into each
//! encounter; the turn controller writes the results back when the
//! encounter resolves.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{CombatConfig, GameRng, LoadError, SessionError};
use crate::monsters::{DefeatedPools, MonsterCatalog, Tier};
use crate::turn::{Collaborators, TurnController};

/// HP and gold as stored by the save backend. Missing fields keep the
/// session's current values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSnapshot {
    #[serde(default, alias = "currentHp")]
    pub player_hp: Option<i64>,
    #[serde(default)]
    pub gold: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSession {
    /// Save slot on the remote store. Without one nothing is persisted.
    pub save_id: Option<String>,
    pub seed: u64,
    pub encounters_started: u64,
    /// Unset until a save, a builder or a finished encounter provides it;
    /// the next encounter then starts at `CombatConfig::starting_hp`.
    pub player_hp: Option<i64>,
    pub gold: i64,
    /// Tier of the next (or current) encounter.
    pub encounter_type: Tier,
    /// The next encounter continues a saved run.
    pub resume_from_save: bool,
    pub defeated: DefeatedPools,
    pub last_monster: Option<String>,
}

impl EncounterSession {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            save_id: None,
            seed,
            encounters_started: 0,
            player_hp: None,
            gold: 0,
            encounter_type: Tier::Normal,
            resume_from_save: false,
            defeated: DefeatedPools::new(),
            last_monster: None,
        }
    }

    #[must_use]
    pub fn with_save_id(mut self, save_id: impl Into<String>) -> Self {
        self.save_id = Some(save_id.into());
        self
    }

    #[must_use]
    pub fn with_player_hp(mut self, hp: i64) -> Self {
        self.player_hp = Some(hp.max(0));
        self
    }

    /// Set up the next encounter's tier.
    pub fn prepare_encounter(&mut self, tier: Tier, resume_from_save: bool) {
        self.encounter_type = tier;
        self.resume_from_save = resume_from_save;
    }

    /// Take HP and gold from a loaded save.
    pub fn apply_save_snapshot(&mut self, snapshot: SaveSnapshot) {
        if let Some(hp) = snapshot.player_hp {
            self.player_hp = Some(hp.max(0));
        }
        if let Some(gold) = snapshot.gold {
            self.gold = gold.max(0);
        }
    }

    /// RNG root of the next encounter, derived from `(seed, encounters_started)`.
    #[must_use]
    pub fn encounter_rng(&self) -> GameRng {
        GameRng::new(self.seed).for_context(&format!("encounter-{}", self.encounters_started))
    }

    /// Record a win against `monster` with the final HP and gold.
    pub(crate) fn record_win(&mut self, tier: Tier, monster: &str, player_hp: i64, gold: i64) {
        self.player_hp = Some(player_hp);
        self.gold = gold;
        if tier == Tier::Boss {
            self.defeated.clear();
            self.last_monster = None;
        } else {
            self.defeated.mark(tier, monster);
        }
    }

    pub(crate) fn record_loss(&mut self, gold: i64) {
        self.player_hp = Some(0);
        self.gold = gold;
    }

    /// Compact binary form for the save store.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SessionError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SessionError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Start the next encounter of the session.
///
/// Picks a monster for `session.encounter_type`, records it as the last
/// monster seen, deals the opening hand and hands back a controller in the
/// player's turn. A session without HP yet starts at `config.starting_hp`. Fails if the configuration is invalid or the tier has no
/// monsters.
///
/// ```
/// use poker_crawl::core::CombatConfig;
/// use poker_crawl::monsters::{MonsterCatalog, Tier};
/// use poker_crawl::session::{begin_encounter, EncounterSession};
/// use poker_crawl::turn::{Collaborators, Phase};
///
/// let mut session = EncounterSession::new(7);
/// session.prepare_encounter(Tier::Boss, false);
///
/// let catalog = MonsterCatalog::builtin();
/// let controller = begin_encounter(
///     &mut session,
///     &catalog,
///     CombatConfig::default(),
///     Collaborators::detached(),
/// )
/// .unwrap();
///
/// assert_eq!(controller.phase(), Phase::PlayerTurn);
/// assert_eq!(controller.monster().name(), "spadeBoss");
/// assert_eq!(controller.hand().len(), 8);
/// ```
pub fn begin_encounter<'s>(
    session: &'s mut EncounterSession,
    catalog: &MonsterCatalog,
    config: CombatConfig,
    collaborators: Collaborators,
) -> Result<TurnController<'s>, LoadError> {
    config.validate()?;

    let tier = session.encounter_type;
    let rng = session.encounter_rng();
    let mut catalog_rng = rng.for_context("catalog");

    let monster = catalog
        .select(
            tier,
            &session.defeated,
            session.last_monster.as_deref(),
            &mut catalog_rng,
        )
        .ok_or_else(|| LoadError::Invalid(format!("no {} monsters in catalog", tier.name())))?
        .clone();

    info!(
        encounter = session.encounters_started,
        tier = tier.name(),
        monster = %monster.name,
        resumed = session.resume_from_save,
        "encounter started"
    );

    session.encounters_started += 1;
    session.last_monster = Some(monster.name.clone());
    session.resume_from_save = false;
    if session.player_hp.is_none() {
        session.player_hp = Some(config.starting_hp);
    }

    Ok(TurnController::new(
        session,
        &monster,
        tier,
        config,
        collaborators,
        &rng,
    ))
}
