//! The player character: energy, card piles and progression.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::combatant::Combatant;
use super::meter::Meter;
use crate::cards::{starter_deck, unlocks_for_level, Card};
use crate::core::{BattleRng, ProgressionConfig};

/// Starting health of a new player.
pub const STARTING_HEALTH: i32 = 100;
/// Starting (and maximum) energy of a new player.
pub const STARTING_ENERGY: i32 = 100;
/// Starting base attack of every character.
pub const STARTING_ATTACK: i32 = 10;
/// Starting base defense of every character.
pub const STARTING_DEFENSE: i32 = 5;

/// The player character.
///
/// Every card the player owns sits in exactly one of `hand`, `deck` or
/// `discard`. Between battles hand and discard are empty.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub combatant: Combatant,
    pub energy: Meter,

    pub hand: Vec<Card>,
    pub deck: Vec<Card>,
    pub discard: Vec<Card>,

    pub level: u32,
    pub xp: u32,
    pub money: u32,

    /// Names of cards picked from level-up offers.
    #[serde(default)]
    pub unlocked: FxHashSet<String>,
}

impl Player {
    /// A level 1 player holding the shuffled starter deck.
    #[must_use]
    pub fn new(name: impl Into<String>, rng: &mut BattleRng) -> Self {
        let mut deck = starter_deck();
        rng.shuffle(&mut deck);
        Self::with_deck(name, deck)
    }

    /// A level 1 player holding `deck` in the given order.
    #[must_use]
    pub fn with_deck(name: impl Into<String>, deck: Vec<Card>) -> Self {
        Self {
            combatant: Combatant::new(name, STARTING_HEALTH, STARTING_ATTACK, STARTING_DEFENSE),
            energy: Meter::new(STARTING_ENERGY),
            hand: Vec::new(),
            deck,
            discard: Vec::new(),
            level: 1,
            xp: 0,
            money: 0,
            unlocked: FxHashSet::default(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.combatant.name
    }

    #[must_use]
    pub fn health(&self) -> Meter {
        self.combatant.health
    }

    /// Total cards owned across all three piles.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.len() + self.deck.len() + self.discard.len()
    }

    #[must_use]
    pub fn can_afford(&self, card: &Card) -> bool {
        self.energy.current() >= card.energy_cost
    }

    fn holds_in_hand(&self, name: &str) -> bool {
        self.hand.iter().any(|card| card.name == name)
    }

    /// Draw up to `count` cards into the hand.
    ///
    /// Takes the first card in deck order whose name is not already in hand.
    /// When the deck has nothing eligible left, the discard pile is shuffled
    /// under it and the search continues. Stops early once neither pile has
    /// an eligible card. Returns the number of cards drawn.
    pub fn draw(&mut self, count: usize, rng: &mut BattleRng) -> usize {
        let mut drawn = 0;

        while drawn < count {
            let eligible = self
                .deck
                .iter()
                .position(|card| !self.holds_in_hand(&card.name));

            match eligible {
                Some(index) => {
                    let card = self.deck.remove(index);
                    self.hand.push(card);
                    drawn += 1;
                }
                None if !self.discard.is_empty() => {
                    let mut refill = std::mem::take(&mut self.discard);
                    rng.shuffle(&mut refill);
                    self.deck.extend(refill);
                }
                None => break,
            }
        }

        drawn
    }

    /// Remove the card at `index` from the hand.
    pub fn take_from_hand(&mut self, index: usize) -> Option<Card> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }

    /// Move hand and discard pile back into the deck.
    pub fn return_cards_to_deck(&mut self) {
        self.deck.append(&mut self.hand);
        self.deck.append(&mut self.discard);
    }

    /// Add XP and level up while it covers the threshold.
    ///
    /// `threshold` overrides the requirement for the current level only
    /// (encounters carry their own); later levels use the progression table.
    /// Excess XP carries over. Returns every level reached.
    pub fn gain_xp(
        &mut self,
        amount: u32,
        threshold: Option<u32>,
        progression: &ProgressionConfig,
    ) -> Vec<u32> {
        let mut needed = threshold
            .unwrap_or_else(|| progression.threshold_for(self.level))
            .max(1);
        self.xp += amount;

        let mut reached = Vec::new();
        while self.xp >= needed {
            self.xp -= needed;
            self.level_up(progression);
            reached.push(self.level);
            needed = progression.threshold_for(self.level).max(1);
        }
        reached
    }

    /// Advance one level: more max health (fully healed), better base stats.
    pub fn level_up(&mut self, progression: &ProgressionConfig) {
        self.level += 1;

        let c = &mut self.combatant;
        c.health.raise_max(progression.health_per_level);
        c.health.fill();
        c.base_attack += progression.attack_per_level;
        c.base_defense += progression.defense_per_level;
        c.recompute_stats();

        tracing::info!(name = %c.name, level = self.level, "level up");
    }

    /// XP still missing for the next level.
    #[must_use]
    pub fn xp_to_next_level(&self, progression: &ProgressionConfig) -> u32 {
        progression.threshold_for(self.level).saturating_sub(self.xp)
    }

    /// Unlock cards offered at `level` that the player has not taken yet.
    #[must_use]
    pub fn unlock_options(&self, level: u32) -> Vec<Card> {
        unlocks_for_level(level)
            .into_iter()
            .filter(|card| !self.unlocked.contains(&card.name))
            .collect()
    }

    /// Add an unlocked card to the deck.
    pub fn unlock(&mut self, card: Card) {
        self.unlocked.insert(card.name.clone());
        self.deck.push(card);
    }

    pub fn earn_money(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    /// Spend money if the player has enough. Returns whether it was spent.
    pub fn spend_money(&mut self, amount: u32) -> bool {
        if self.money >= amount {
            self.money -= amount;
            true
        } else {
            false
        }
    }

    /// Rest in the bunker: energy back to full.
    pub fn rest(&mut self) {
        self.energy.fill();
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[Player] {} | HP: {} | Energy: {} | Level: {}",
            self.combatant.name, self.combatant.health, self.energy, self.level
        )
    }
}
