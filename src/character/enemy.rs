//! Enemy characters.

use serde::{Deserialize, Serialize};

use super::combatant::Combatant;
use crate::policy::Archetype;

/// An enemy: a plain combatant plus the policy that picks its moves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub combatant: Combatant,
    /// XP granted to the player for defeating this enemy.
    pub exp_reward: u32,
    pub archetype: Archetype,
}

impl Enemy {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        health: i32,
        attack: i32,
        defense: i32,
        exp_reward: u32,
        archetype: Archetype,
    ) -> Self {
        Self {
            combatant: Combatant::new(name, health, attack, defense),
            exp_reward,
            archetype,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.combatant.name
    }

    #[must_use]
    pub fn is_boss(&self) -> bool {
        self.archetype == Archetype::Boss
    }
}

impl std::fmt::Display for Enemy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = &self.combatant;
        write!(
            f,
            "[Enemy] {} | HP: {} | ATK: {} | DEF: {}",
            c.name,
            c.health.current(),
            c.attack,
            c.defense
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_enemy_uses_given_stats() {
        let enemy = Enemy::new("Raider", 40, 8, 3, 25, Archetype::Raider);
        assert_eq!(enemy.combatant.health.max(), 40);
        assert_eq!(enemy.combatant.base_attack, 8);
        assert_eq!(enemy.combatant.defense, 3);
        assert_eq!(enemy.exp_reward, 25);
        assert!(!enemy.is_boss());
    }

    #[test]
    fn test_display() {
        let enemy = Enemy::new("Warlord", 120, 12, 6, 100, Archetype::Boss);
        assert!(enemy.is_boss());
        assert_eq!(enemy.to_string(), "[Enemy] Warlord | HP: 120 | ATK: 12 | DEF: 6");
    }
}
