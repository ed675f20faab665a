//! State shared by every character in a battle.

use serde::{Deserialize, Serialize};

use super::meter::Meter;
use crate::status::{StatusKind, StatusTable, TickReport};

/// Health, stats and status effects common to players and enemies.
///
/// `attack` and `defense` are the effective values used in damage
/// resolution. They are rebuilt from the base stats by
/// [`Combatant::recompute_stats`] at the start of the owner's turn:
///
/// - `attack = base_attack + AttackUp`
/// - `defense = base_defense + DefenseUp + fortification`
///
/// `fortification` comes from Defense cards and lasts until the battle ends,
/// while `DefenseUp` is a timed status. The two never merge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub health: Meter,

    pub base_attack: i32,
    pub base_defense: i32,
    pub attack: i32,
    pub defense: i32,

    /// Defense granted by Defense cards this battle.
    #[serde(default)]
    pub fortification: i32,

    #[serde(default)]
    pub status: StatusTable,

    /// First tag of the last card this character played, for combos.
    #[serde(default)]
    pub last_played_tag: Option<String>,
}

impl Combatant {
    #[must_use]
    pub fn new(name: impl Into<String>, max_health: i32, base_attack: i32, base_defense: i32) -> Self {
        Self {
            name: name.into(),
            health: Meter::new(max_health),
            base_attack,
            base_defense,
            attack: base_attack,
            defense: base_defense,
            fortification: 0,
            status: StatusTable::new(),
            last_played_tag: None,
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }

    /// False when dead or paralyzed.
    #[must_use]
    pub fn can_act(&self) -> bool {
        self.is_alive() && !self.status.contains(StatusKind::Paralyzed)
    }

    /// Set a status effect, replacing any existing entry of that kind.
    pub fn add_status(&mut self, kind: StatusKind, duration: u32, amount: i32) {
        self.status.add_or_replace(kind, duration, amount);
    }

    /// Rebuild effective attack and defense from base stats and buffs.
    pub fn recompute_stats(&mut self) {
        self.attack = self
            .base_attack
            .saturating_add(self.status.amount(StatusKind::AttackUp));
        self.defense = self
            .base_defense
            .saturating_add(self.status.amount(StatusKind::DefenseUp))
            .saturating_add(self.fortification);
    }

    /// Raise defense for the rest of the battle. Takes effect immediately.
    pub fn fortify(&mut self, gain: i32) {
        let gain = gain.max(0);
        self.fortification = self.fortification.saturating_add(gain);
        self.defense = self.defense.saturating_add(gain);
    }

    /// Apply damage-over-time, then count every effect down by one turn.
    pub fn tick_end_of_turn(&mut self) -> TickReport {
        let damage = self.health.drain(self.status.pending_damage());
        let expired = self.status.decrement();

        if damage > 0 || !expired.is_empty() {
            tracing::debug!(
                name = %self.name,
                damage,
                ?expired,
                health = self.health.current(),
                "status tick"
            );
        }

        TickReport { damage, expired }
    }

    /// Drop everything that only lives for one battle.
    pub fn reset_battle_state(&mut self) {
        self.status.clear();
        self.fortification = 0;
        self.last_played_tag = None;
        self.recompute_stats();
    }
}

impl std::fmt::Display for Combatant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (HP: {})", self.name, self.health)
    }
}
