//! The turn loop for a single player-versus-enemy battle.
//!
//! A battle alternates half-turns: the player plays one card, statuses tick,
//! the enemy plays one card, statuses tick, repeat. [`BattleManager::step`]
//! advances exactly one phase so drivers can interleave their own work;
//! [`BattleManager::run`] loops until a terminal phase.
//!
//! ## Example
//!
//! ```
//! use deckfight::battle::{BattleManager, NullRenderer, ScriptedInput};
//! use deckfight::cards::Card;
//! use deckfight::character::{Enemy, Player};
//! use deckfight::policy::Archetype;
//!
//! let mut player = Player::with_deck("Scav", vec![Card::attack("Jab", 0, 30, "")]);
//! let mut enemy = Enemy::new("Rat", 20, 4, 5, 50, Archetype::Basic);
//!
//! let outcome = BattleManager::new(&mut player, &mut enemy, 110)
//!     .run(&mut ScriptedInput::new(["1"]), &mut NullRenderer);
//!
//! assert!(outcome.is_victory());
//! assert_eq!(player.xp, 50);
//! ```

use super::events::{BattleEvent, BattleView, ChoiceError, PlayerCommand, Prompt, Side};
use super::io::{BattleInput, BattleRenderer};
use crate::character::{Enemy, Player};
use crate::core::{BattleConfig, BattleRng, EngineConfig, ProgressionConfig};
use crate::effects::resolve;
use crate::policy::EnemyPolicy;

/// Where a battle currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BattlePhase {
    AwaitingPlayerAction,
    PlayerActionResolved,
    EnemyActionResolved,
    Victory,
    Defeat,
    Surrendered,
    /// The enemy had no legal action.
    Abandoned,
}

impl BattlePhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.outcome().is_some()
    }

    #[must_use]
    pub fn outcome(self) -> Option<BattleOutcome> {
        match self {
            BattlePhase::Victory => Some(BattleOutcome::Victory),
            BattlePhase::Defeat => Some(BattleOutcome::Defeat),
            BattlePhase::Surrendered => Some(BattleOutcome::Surrendered),
            BattlePhase::Abandoned => Some(BattleOutcome::Abandoned),
            _ => None,
        }
    }
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Surrendered,
    Abandoned,
}

impl BattleOutcome {
    #[must_use]
    pub fn is_victory(self) -> bool {
        self == BattleOutcome::Victory
    }
}

/// Runs one battle between a player and an enemy.
///
/// Holds both sides exclusively for the battle's duration. All battle-scoped
/// state (statuses, fortification, combo tag, hand and discard) is reset
/// when a terminal phase is reached, whichever one it is.
pub struct BattleManager<'a> {
    player: &'a mut Player,
    enemy: &'a mut Enemy,
    xp_threshold: u32,
    config: BattleConfig,
    progression: ProgressionConfig,
    rng: BattleRng,
    policy: Option<Box<dyn EnemyPolicy + 'a>>,
    phase: BattlePhase,
    turn: u32,
    started: bool,
}

impl<'a> BattleManager<'a> {
    /// `xp_threshold` is the XP the current encounter requires for the
    /// player's next level.
    pub fn new(player: &'a mut Player, enemy: &'a mut Enemy, xp_threshold: u32) -> Self {
        let config = BattleConfig::default();
        let rng = BattleRng::new(config.seed);
        Self {
            player,
            enemy,
            xp_threshold,
            config,
            progression: ProgressionConfig::default(),
            rng,
            policy: None,
            phase: BattlePhase::AwaitingPlayerAction,
            turn: 1,
            started: false,
        }
    }

    /// Use both halves of an engine config. Reseeds the RNG.
    pub fn with_config(self, config: EngineConfig) -> Self {
        self.with_battle_config(config.battle)
            .with_progression(config.progression)
    }

    /// Reseeds the RNG from the config's seed.
    pub fn with_battle_config(mut self, config: BattleConfig) -> Self {
        self.rng = BattleRng::new(config.seed);
        self.config = config;
        self
    }

    pub fn with_progression(mut self, progression: ProgressionConfig) -> Self {
        self.progression = progression;
        self
    }

    /// Replace the enemy's archetype policy for this battle.
    pub fn with_policy(mut self, policy: impl EnemyPolicy + 'a) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    /// Continue an existing random stream instead of seeding from config.
    pub fn with_rng(mut self, rng: BattleRng) -> Self {
        self.rng = rng;
        self
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    #[must_use]
    pub fn rng(&self) -> &BattleRng {
        &self.rng
    }

    /// Run to completion and report whether the player won.
    pub fn start_battle(&mut self, input: &mut dyn BattleInput, renderer: &mut dyn BattleRenderer) -> bool {
        self.run(input, renderer).is_victory()
    }

    /// Step until a terminal phase is reached.
    pub fn run(&mut self, input: &mut dyn BattleInput, renderer: &mut dyn BattleRenderer) -> BattleOutcome {
        loop {
            if let Some(outcome) = self.step(input, renderer).outcome() {
                return outcome;
            }
        }
    }

    /// Advance one phase. Terminal phases are sticky.
    pub fn step(&mut self, input: &mut dyn BattleInput, renderer: &mut dyn BattleRenderer) -> BattlePhase {
        if self.phase.is_terminal() {
            return self.phase;
        }
        if !self.started {
            self.begin(input, renderer);
        }

        let next = match self.phase {
            BattlePhase::AwaitingPlayerAction => self.player_turn(input, renderer),
            BattlePhase::PlayerActionResolved => self.enemy_turn(input, renderer),
            BattlePhase::EnemyActionResolved => {
                self.turn += 1;
                BattlePhase::AwaitingPlayerAction
            }
            terminal => terminal,
        };

        self.phase = next;
        if next.is_terminal() {
            self.finish(next, input, renderer);
        }
        next
    }

    fn view(&self, show_hand: bool) -> BattleView<'_> {
        BattleView {
            turn: self.turn,
            player: &*self.player,
            enemy: &*self.enemy,
            show_hand,
        }
    }

    fn begin(&mut self, input: &mut dyn BattleInput, renderer: &mut dyn BattleRenderer) {
        self.started = true;

        tracing::info!(
            player = %self.player.name(),
            enemy = %self.enemy.name(),
            boss = self.enemy.is_boss(),
            "battle started"
        );
        renderer.event(&BattleEvent::Started {
            player: self.player.name().to_string(),
            enemy: self.enemy.name().to_string(),
            boss: self.enemy.is_boss(),
        });
        input.acknowledge(Prompt::BeginBattle);
    }

    // =========================================================================
    // Player half-turn
    // =========================================================================

    fn player_turn(&mut self, input: &mut dyn BattleInput, renderer: &mut dyn BattleRenderer) -> BattlePhase {
        self.player.combatant.recompute_stats();
        if self.config.reset_combo_each_turn {
            self.player.combatant.last_played_tag = None;
        }
        if self.player.hand.is_empty() {
            self.player.draw(self.config.opening_hand, &mut self.rng);
        }

        renderer.event(&BattleEvent::TurnStarted {
            turn: self.turn,
            side: Side::Player,
        });
        renderer.render(&self.view(true));

        if self.player.combatant.can_act() {
            let index = match self.read_choice(input, renderer) {
                Some(index) => index,
                None => return BattlePhase::Surrendered,
            };
            self.play_card(index, renderer);
            input.acknowledge(Prompt::EndPlayerTurn);
        } else {
            renderer.event(&BattleEvent::CannotAct {
                side: Side::Player,
                name: self.player.name().to_string(),
            });
            if !self.read_pass(input, renderer) {
                return BattlePhase::Surrendered;
            }
            input.acknowledge(Prompt::EndPlayerTurn);
        }

        let report = self.player.combatant.tick_end_of_turn();
        renderer.event(&BattleEvent::StatusTick {
            side: Side::Player,
            report,
        });

        if !self.enemy.combatant.is_alive() {
            BattlePhase::Victory
        } else {
            BattlePhase::PlayerActionResolved
        }
    }

    /// Read commands until one names an affordable card. `None` on surrender
    /// or closed input.
    fn read_choice(&mut self, input: &mut dyn BattleInput, renderer: &mut dyn BattleRenderer) -> Option<usize> {
        loop {
            let raw = input.read_command(&self.view(true))?;

            match self.validate(&raw) {
                Ok(PlayerCommand::Play(index)) => return Some(index),
                Ok(PlayerCommand::Surrender) => return None,
                Err(err) => {
                    tracing::debug!(%raw, %err, "choice rejected");
                    renderer.event(&BattleEvent::Rejected(err));
                }
            }
        }
    }

    /// While paralyzed only an empty command (pass) or surrender is
    /// accepted. Returns false on surrender or closed input.
    fn read_pass(&mut self, input: &mut dyn BattleInput, renderer: &mut dyn BattleRenderer) -> bool {
        loop {
            let Some(raw) = input.read_command(&self.view(true)) else {
                return false;
            };
            if raw.trim().is_empty() {
                return true;
            }
            if let Ok(PlayerCommand::Surrender) = PlayerCommand::parse(&raw, 0) {
                return false;
            }
            renderer.event(&BattleEvent::Rejected(ChoiceError::Paralyzed));
        }
    }

    fn validate(&self, raw: &str) -> Result<PlayerCommand, ChoiceError> {
        let command = PlayerCommand::parse(raw, self.player.hand.len())?;
        if let PlayerCommand::Play(index) = command {
            let card = &self.player.hand[index];
            if !self.player.can_afford(card) {
                return Err(ChoiceError::InsufficientEnergy {
                    card: card.name.clone(),
                    cost: card.energy_cost,
                    available: self.player.energy.current(),
                });
            }
        }
        Ok(command)
    }

    fn play_card(&mut self, index: usize, renderer: &mut dyn BattleRenderer) {
        let Some(card) = self.player.take_from_hand(index) else {
            return;
        };

        let resolution = resolve(&card, &mut *self.player, &mut *self.enemy, &self.config);
        self.player.energy.drain(card.energy_cost);

        renderer.event(&BattleEvent::CardPlayed {
            side: Side::Player,
            card: card.name.clone(),
            resolution,
        });

        self.player.discard.push(card);
        self.player.draw(self.config.draw_after_play, &mut self.rng);
    }

    // =========================================================================
    // Enemy half-turn
    // =========================================================================

    fn enemy_turn(&mut self, input: &mut dyn BattleInput, renderer: &mut dyn BattleRenderer) -> BattlePhase {
        self.enemy.combatant.recompute_stats();

        renderer.event(&BattleEvent::TurnStarted {
            turn: self.turn,
            side: Side::Enemy,
        });
        renderer.render(&self.view(false));

        if self.enemy.combatant.can_act() {
            let action = match &self.policy {
                Some(policy) => policy.next_action(&*self.enemy, &*self.player, &mut self.rng),
                None => {
                    let archetype = self.enemy.archetype;
                    archetype.next_action(&*self.enemy, &*self.player, &mut self.rng)
                }
            };

            let Some(card) = action else {
                tracing::warn!(enemy = %self.enemy.name(), "enemy has no legal action");
                return BattlePhase::Abandoned;
            };

            let resolution = resolve(&card, &mut *self.enemy, &mut *self.player, &self.config);
            renderer.event(&BattleEvent::CardPlayed {
                side: Side::Enemy,
                card: card.name,
                resolution,
            });
        } else {
            renderer.event(&BattleEvent::CannotAct {
                side: Side::Enemy,
                name: self.enemy.name().to_string(),
            });
        }

        let report = self.enemy.combatant.tick_end_of_turn();
        renderer.event(&BattleEvent::StatusTick {
            side: Side::Enemy,
            report,
        });
        input.acknowledge(Prompt::EndEnemyTurn);

        if !self.player.combatant.is_alive() {
            BattlePhase::Defeat
        } else if !self.enemy.combatant.is_alive() {
            BattlePhase::Victory
        } else {
            BattlePhase::EnemyActionResolved
        }
    }

    // =========================================================================
    // Terminal phases
    // =========================================================================

    fn finish(&mut self, phase: BattlePhase, input: &mut dyn BattleInput, renderer: &mut dyn BattleRenderer) {
        match phase {
            BattlePhase::Victory => self.handle_victory(input, renderer),
            BattlePhase::Defeat => {
                self.player.combatant.health.set(self.config.defeat_health_floor);
                self.player.money = 0;
                renderer.event(&BattleEvent::Defeat {
                    player: self.player.name().to_string(),
                });
            }
            BattlePhase::Surrendered => renderer.event(&BattleEvent::Surrendered),
            BattlePhase::Abandoned => renderer.event(&BattleEvent::Abandoned),
            _ => {}
        }

        self.cleanup();
        tracing::info!(outcome = ?phase, turns = self.turn, "battle finished");
    }

    fn handle_victory(&mut self, input: &mut dyn BattleInput, renderer: &mut dyn BattleRenderer) {
        let xp = self.enemy.exp_reward;
        let levels = self
            .player
            .gain_xp(xp, Some(self.xp_threshold), &self.progression);

        renderer.event(&BattleEvent::Victory {
            enemy: self.enemy.name().to_string(),
            xp,
            levels: levels.clone(),
        });

        for level in levels {
            self.offer_unlocks(level, input, renderer);
        }
        input.acknowledge(Prompt::AfterVictory);
    }

    fn offer_unlocks(&mut self, level: u32, input: &mut dyn BattleInput, renderer: &mut dyn BattleRenderer) {
        let options = self.player.unlock_options(level);
        if options.is_empty() {
            return;
        }

        // Out-of-range answers are asked again; `None` declines.
        let chosen = loop {
            match input.choose_unlock(&options) {
                Some(index) if index < options.len() => break Some(index),
                Some(index) => tracing::debug!(index, "unlock choice out of range"),
                None => break None,
            }
        };

        if let Some(index) = chosen {
            let card = options[index].clone();
            renderer.event(&BattleEvent::Unlocked {
                card: card.name.clone(),
            });
            self.player.unlock(card);
        }
    }

    fn cleanup(&mut self) {
        self.player.combatant.reset_battle_state();
        self.enemy.combatant.reset_battle_state();
        self.player.return_cards_to_deck();
    }
}
