//! Encounter state machine.
//!
//! `TurnController` owns one encounter from the opening hand to its
//! resolution:
//!
//! ```text
//! PlayerTurn --play--> MonsterTurn --last action--> PlayerTurn
//!      \                    |
//!       +---monster dies----+---player dies---> Resolved(Won | Lost)
//! ```
//!
//! Player operations return `Err(ActionRefused)` and change nothing when the
//! move is not allowed. The monster turn runs on virtual-time timers that
//! the caller drives with `advance` or `run_until_idle`; each timer runs to
//! completion before the next one fires. Resolution is one-shot: it cancels
//! every timer and later attempts to resolve again are ignored.

use tracing::{debug, info, warn};

use crate::cards::{Card, SortMode};
use crate::combat::{ActionOutcome, CombatState, DamageReport, EffectResolver, MonsterState, PlayerState};
use crate::core::{ActionRefused, CombatConfig, GameRng};
use crate::monsters::{ActionQueue, GoldReward, Intent, MonsterDefinition, Tier};
use crate::scoring::{HandEvaluation, ScoringRule};
use crate::session::EncounterSession;
use crate::zones::{DeckManager, PlayZone, Zone};

use super::collaborators::{CombatReport, CombatResult, Collaborators};
use super::events::{CombatEvent, Outcome, Phase, Side};
use super::scheduler::{Scheduler, Task};

pub struct TurnController<'s> {
    session: &'s mut EncounterSession,
    config: CombatConfig,
    tier: Tier,
    gold_reward: GoldReward,
    actions_per_turn: u32,
    state: CombatState,
    deck_rng: GameRng,
    queue: ActionQueue,
    scheduler: Scheduler,
    collaborators: Collaborators,
    events: Vec<CombatEvent>,
    phase: Phase,
    resolved: bool,
}

impl<'s> TurnController<'s> {
    /// Set up an encounter against `monster` and deal the opening hand.
    ///
    /// `rng` is the encounter's root stream; the deck and combat streams
    /// are derived from it.
    pub fn new(
        session: &'s mut EncounterSession,
        monster: &MonsterDefinition,
        tier: Tier,
        config: CombatConfig,
        collaborators: Collaborators,
        rng: &GameRng,
    ) -> Self {
        let mut deck_rng = rng.for_context("deck");
        let mut deck = DeckManager::new(&config);
        let refill = deck.refill(&mut deck_rng);

        let state = CombatState {
            player: PlayerState::new(
                session.player_hp.unwrap_or(config.starting_hp),
                session.gold,
            ),
            monster: MonsterState::from_definition(monster),
            deck,
            play_zone: PlayZone::new(
                config.play_zone_capacity,
                ScoringRule::for_monster(&monster.texture),
            ),
            rng: rng.for_context("combat"),
        };

        let mut controller = Self {
            session,
            tier,
            gold_reward: monster.gold_reward,
            actions_per_turn: monster.turn_actions(),
            queue: ActionQueue::new(monster.actions.clone(), config.max_combo_depth),
            config,
            state,
            deck_rng,
            scheduler: Scheduler::new(),
            collaborators,
            events: Vec::new(),
            phase: Phase::PlayerTurn,
            resolved: false,
        };

        let display = &mut controller.collaborators.display;
        display.set_hp(controller.state.player.hp());
        display.set_gold(controller.state.player.gold());
        display.set_discard_count(controller.state.deck.discards_remaining());
        display.set_score("", 0);

        controller.events.push(CombatEvent::HandRefilled(refill));
        controller.events.push(CombatEvent::IntentChanged(controller.intent()));
        controller.events.push(CombatEvent::TurnStarted(Side::Player));
        controller
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    #[must_use]
    pub fn state(&self) -> &CombatState {
        &self.state
    }

    #[must_use]
    pub fn player(&self) -> &PlayerState {
        &self.state.player
    }

    #[must_use]
    pub fn monster(&self) -> &MonsterState {
        &self.state.monster
    }

    #[must_use]
    pub fn hand(&self) -> Vec<Card> {
        self.state.deck.hand()
    }

    #[must_use]
    pub fn staked(&self) -> Vec<Card> {
        self.state.play_zone.staked(&self.state.deck)
    }

    #[must_use]
    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    /// The monster's next atomic action.
    #[must_use]
    pub fn intent(&self) -> Intent {
        self.queue.peek_next().intent()
    }

    #[must_use]
    pub fn discards_remaining(&self) -> u32 {
        self.state.deck.discards_remaining()
    }

    /// Evaluation of the current stake.
    #[must_use]
    pub fn score(&self) -> Option<HandEvaluation> {
        self.state.play_zone.last_evaluation()
    }

    #[must_use]
    pub fn session(&self) -> &EncounterSession {
        &*self.session
    }

    /// Virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Take the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    // === Player operations ===

    /// Stake a hand card.
    pub fn stake(&mut self, card: Card) -> Result<Option<HandEvaluation>, ActionRefused> {
        self.ensure_player_turn()?;

        let evaluation = self
            .state
            .play_zone
            .add(&mut self.state.deck, card)
            .map_err(|reason| refused("stake", reason))?;

        self.events.push(CombatEvent::CardStaked(card));
        self.push_score(evaluation);
        Ok(evaluation)
    }

    /// Withdraw a staked card to the hand. Charm-locked cards stay put.
    pub fn unstake(&mut self, card: Card) -> Result<Option<HandEvaluation>, ActionRefused> {
        self.ensure_player_turn()?;

        match self.state.play_zone.remove(&mut self.state.deck, card) {
            Ok(evaluation) => {
                self.events.push(CombatEvent::CardUnstaked(card));
                self.push_score(evaluation);
                Ok(evaluation)
            }
            Err(ActionRefused::CharmLocked) => {
                self.events.push(CombatEvent::UnstakeVetoed(card));
                Err(refused("unstake", ActionRefused::CharmLocked))
            }
            Err(reason) => Err(refused("unstake", reason)),
        }
    }

    /// Throw the stake away and refill the hand. Spends one discard.
    pub fn discard(&mut self) -> Result<Vec<Card>, ActionRefused> {
        self.ensure_player_turn()?;

        if self.state.play_zone.has_charm_locked() {
            return Err(refused("discard", ActionRefused::CharmLocked));
        }
        if !self.state.deck.can_discard() {
            return Err(refused("discard", ActionRefused::DiscardBudgetExhausted));
        }
        if self.state.play_zone.is_empty(&self.state.deck) {
            return Err(refused("discard", ActionRefused::NothingStaked));
        }

        let cards = self.state.play_zone.clear(&mut self.state.deck, Zone::Discard);
        self.state.deck.consume_discard();
        let discards_remaining = self.state.deck.discards_remaining();

        self.collaborators.display.set_discard_count(discards_remaining);
        self.events.push(CombatEvent::Discarded {
            cards: cards.clone(),
            discards_remaining,
        });
        self.push_score(None);

        let refill = self.state.deck.refill(&mut self.deck_rng);
        self.events.push(CombatEvent::HandRefilled(refill));

        debug!(discarded = cards.len(), discards_remaining, "stake discarded");
        Ok(cards)
    }

    /// Score the stake, damage the monster and end the player's turn.
    ///
    /// A stake over capacity (only charm can cause one) is refused while
    /// the player can still withdraw a card; if every staked card is
    /// charm-locked the first `capacity` slots are scored.
    pub fn play(&mut self) -> Result<HandEvaluation, ActionRefused> {
        self.ensure_player_turn()?;

        let zone = &self.state.play_zone;
        if zone.is_overfull(&self.state.deck) && !zone.all_locked(&self.state.deck) {
            return Err(refused("play", ActionRefused::Overfull));
        }

        let Some(evaluation) = self.state.play_zone.evaluate(&self.state.deck) else {
            return Err(refused("play", ActionRefused::NothingStaked));
        };

        let cards = self.state.play_zone.clear(&mut self.state.deck, Zone::Used);
        debug!(?cards, category = %evaluation.category, score = evaluation.score, "stake played");
        self.events.push(CombatEvent::Played { cards, evaluation });
        self.push_score(None);

        let report = self.state.monster.take_damage(i64::from(evaluation.score));
        self.events.push(CombatEvent::MonsterDamaged(report));
        // A monster that entered at 0 HP never reports a kill.
        if self.state.monster.is_dead() {
            self.win();
            return Ok(evaluation);
        }

        let refill = self.state.deck.refill(&mut self.deck_rng);
        self.events.push(CombatEvent::HandRefilled(refill));

        self.phase = Phase::MonsterTurn {
            completed: 0,
            actions_per_turn: self.actions_per_turn,
        };
        self.events.push(CombatEvent::TurnEnded(Side::Player));
        self.scheduler
            .schedule(self.config.pacing.play_to_monster_ms, Task::BeginMonsterTurn);

        Ok(evaluation)
    }

    /// Reorder the hand. Allowed in any phase until the encounter resolves.
    pub fn sort_hand(&mut self, mode: SortMode) -> Result<(), ActionRefused> {
        if self.resolved {
            return Err(refused("sort", ActionRefused::Resolved));
        }
        self.state.deck.set_sort_mode(mode);
        Ok(())
    }

    /// Damage the monster from outside the player's play.
    pub fn damage_monster(&mut self, amount: i64) -> Result<DamageReport, ActionRefused> {
        if self.resolved {
            return Err(refused("damage", ActionRefused::Resolved));
        }

        let report = self.state.monster.take_damage(amount);
        self.events.push(CombatEvent::MonsterDamaged(report));
        if self.state.monster.is_dead() {
            self.win();
        }
        Ok(report)
    }

    // === Time ===

    /// Run every timer due within the next `ms` milliseconds.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now().saturating_add(ms);
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_task(task);
        }
        self.scheduler.advance_clock(until);
    }

    /// Run timers until none are left.
    pub fn run_until_idle(&mut self) {
        while let Some(task) = self.scheduler.pop_due(u64::MAX) {
            self.run_task(task);
        }
    }

    fn run_task(&mut self, task: Task) {
        if self.resolved {
            return;
        }

        let pacing = self.config.pacing;
        match task {
            Task::BeginMonsterTurn => {
                self.events.push(CombatEvent::TurnStarted(Side::Monster));
                self.run_high_level();
            }
            Task::RunHighLevel => self.run_high_level(),
            Task::DrainCombo => {
                if self.queue.has_pending() {
                    self.act();
                    if !self.resolved {
                        self.scheduler.schedule(pacing.atomic_step_ms, Task::DrainCombo);
                    }
                    return;
                }

                let Phase::MonsterTurn {
                    completed,
                    actions_per_turn,
                } = self.phase
                else {
                    return;
                };

                let completed = completed + 1;
                self.phase = Phase::MonsterTurn {
                    completed,
                    actions_per_turn,
                };

                if completed >= actions_per_turn {
                    self.scheduler
                        .schedule(pacing.return_to_player_ms, Task::StartPlayerTurn);
                } else {
                    self.scheduler.schedule(pacing.high_level_ms, Task::RunHighLevel);
                }
            }
            Task::StartPlayerTurn => {
                self.phase = Phase::PlayerTurn;
                self.events.push(CombatEvent::TurnEnded(Side::Monster));
                self.events.push(CombatEvent::TurnStarted(Side::Player));
            }
        }
    }

    /// Start one high-level action; its combo steps drain on later timers.
    fn run_high_level(&mut self) {
        self.act();
        if !self.resolved {
            self.scheduler
                .schedule(self.config.pacing.atomic_step_ms, Task::DrainCombo);
        }
    }

    /// Dequeue and resolve one atomic monster action.
    fn act(&mut self) {
        let action = self.queue.dequeue_next();
        let outcome = EffectResolver::resolve(&mut self.state, &action, &self.config);

        match &outcome {
            ActionOutcome::PlayerDamaged { .. } => {
                self.collaborators.display.set_hp(self.state.player.hp());
            }
            ActionOutcome::GoldStolen { .. } => {
                self.collaborators.display.set_gold(self.state.player.gold());
            }
            ActionOutcome::Charmed { cards } if !cards.is_empty() => {
                let evaluation = self.state.play_zone.last_evaluation();
                self.push_score(evaluation);
            }
            _ => {}
        }

        self.events.push(CombatEvent::MonsterActed { action, outcome });
        self.events.push(CombatEvent::IntentChanged(self.intent()));
        self.check_resolution();
    }

    // === Resolution ===

    /// Resolve the encounter if either side is down. Safe to call any time.
    pub fn check_resolution(&mut self) {
        if self.state.monster.is_dead() {
            self.win();
        } else if self.state.player.is_defeated() {
            self.lose();
        }
    }

    fn begin_resolution(&mut self, outcome: Outcome) -> bool {
        if self.resolved {
            return false;
        }
        self.resolved = true;
        self.phase = Phase::Resolved(outcome);

        let cancelled = self.scheduler.cancel_all();
        debug!(cancelled, ?outcome, "encounter resolving, timers cancelled");
        true
    }

    fn win(&mut self) {
        if !self.begin_resolution(Outcome::Won) {
            return;
        }

        let gold_delta = self.gold_reward.roll(&mut self.state.rng);
        if gold_delta > 0 {
            self.state.player.add_gold(gold_delta);
            self.collaborators.display.set_gold(self.state.player.gold());
        }

        let hp = self.state.player.hp();
        let gold = self.state.player.gold();
        self.session
            .record_win(self.tier, self.state.monster.name(), hp, gold);

        self.persist(CombatReport {
            result: CombatResult::Won,
            player_hp: hp,
            gold_delta,
        });
        self.collaborators.map.hp_updated(hp);
        self.collaborators.map.gold_updated(gold);

        info!(monster = self.state.monster.name(), hp, gold_delta, "encounter won");
        self.events.push(CombatEvent::MonsterDied);
        self.events.push(CombatEvent::CombatWon { gold_delta });
    }

    fn lose(&mut self) {
        if !self.begin_resolution(Outcome::Lost) {
            return;
        }

        let gold = self.state.player.gold();
        self.session.record_loss(gold);

        self.persist(CombatReport {
            result: CombatResult::Lost,
            player_hp: 0,
            gold_delta: 0,
        });
        self.collaborators.map.hp_updated(0);
        self.collaborators.map.gold_updated(gold);

        info!(monster = self.state.monster.name(), "encounter lost");
        self.events.push(CombatEvent::PlayerDefeated);
        self.events.push(CombatEvent::CombatLost);
    }

    fn persist(&mut self, report: CombatReport) {
        let Some(save_id) = self.session.save_id.as_deref() else {
            return;
        };
        if let Err(error) = self.collaborators.persistence.end_combat(save_id, &report) {
            warn!(%error, save_id, "end of combat not saved, continuing");
        }
    }

    // === Helpers ===

    fn ensure_player_turn(&self) -> Result<(), ActionRefused> {
        match self.phase {
            Phase::PlayerTurn => Ok(()),
            Phase::Resolved(_) => Err(refused("player action", ActionRefused::Resolved)),
            Phase::MonsterTurn { .. } => Err(refused("player action", ActionRefused::NotPlayerTurn)),
        }
    }

    fn push_score(&mut self, evaluation: Option<HandEvaluation>) {
        match evaluation {
            Some(eval) => self
                .collaborators
                .display
                .set_score(eval.category.label(), eval.score),
            None => self.collaborators.display.set_score("", 0),
        }
        self.events.push(CombatEvent::ScoreChanged(evaluation));
    }
}

fn refused(operation: &str, reason: ActionRefused) -> ActionRefused {
    debug!(operation, %reason, "player action refused");
    reason
}
