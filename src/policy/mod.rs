//! Enemy decision policies.
//!
//! Each enemy carries an [`Archetype`]; the archetype is a policy value,
//! not a subtype, so a new kind of enemy is a new variant (or a custom
//! [`EnemyPolicy`] handed to the battle manager) rather than a new type.
//!
//! Policies are stateless. Every roll is drawn fresh from the battle RNG,
//! and the only memory an enemy has is its own live stats and statuses.

use serde::{Deserialize, Serialize};

use crate::cards::{enemy_moves, Card};
use crate::character::{Enemy, Player};
use crate::core::BattleRng;

// =============================================================================
// Tuning
// =============================================================================

/// Raiders turn defensive below this fraction of their max health.
pub const RAIDER_DESPERATION: f64 = 0.4;
/// Chance a desperate raider braces instead of attacking.
pub const RAIDER_BRACE_CHANCE: f64 = 0.7;
/// Mutants frenzy while the player is above this fraction of max health.
pub const MUTANT_FRENZY_THRESHOLD: f64 = 0.5;
/// Chance a mutant frenzies when it may.
pub const MUTANT_FRENZY_CHANCE: f64 = 0.6;
/// Chance a boss uses one of its utility moves.
pub const BOSS_UTILITY_CHANCE: f64 = 0.2;
/// Chance a boss shells up against a player whose defense beats its attack.
pub const BOSS_SHELL_CHANCE: f64 = 0.5;

// =============================================================================
// Policy
// =============================================================================

/// Chooses an enemy's card for the coming turn.
pub trait EnemyPolicy {
    /// Pick the next card. `None` means the enemy has no legal action.
    fn next_action(&self, enemy: &Enemy, player: &Player, rng: &mut BattleRng) -> Option<Card>;
}

/// Built-in enemy behaviours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Always attacks.
    #[default]
    Basic,
    /// Braces when badly hurt, otherwise slashes.
    Raider,
    /// Frenzies while the player is healthy.
    Mutant,
    /// Mixes status moves, shelling up and heavy blows.
    Boss,
}

impl Archetype {
    /// Parse the type names used in location data (case-insensitive).
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "basic" | "enemy" => Some(Archetype::Basic),
            "raider" => Some(Archetype::Raider),
            "mutant" => Some(Archetype::Mutant),
            "boss" => Some(Archetype::Boss),
            _ => None,
        }
    }
}

impl EnemyPolicy for Archetype {
    fn next_action(&self, enemy: &Enemy, player: &Player, rng: &mut BattleRng) -> Option<Card> {
        let card = match self {
            Archetype::Basic => basic(enemy),
            Archetype::Raider => raider(enemy, rng),
            Archetype::Mutant => mutant(enemy, player, rng),
            Archetype::Boss => boss(enemy, player, rng),
        };
        Some(card)
    }
}

fn basic(enemy: &Enemy) -> Card {
    enemy_moves::basic_attack(enemy.name(), enemy.combatant.attack)
}

fn raider(enemy: &Enemy, rng: &mut BattleRng) -> Card {
    let c = &enemy.combatant;
    if c.health.below_fraction(RAIDER_DESPERATION) && rng.chance(RAIDER_BRACE_CHANCE) {
        return enemy_moves::brace();
    }
    enemy_moves::slash(c.attack)
}

fn mutant(enemy: &Enemy, player: &Player, rng: &mut BattleRng) -> Card {
    let attack = enemy.combatant.attack;
    if player.health().above_fraction(MUTANT_FRENZY_THRESHOLD) && rng.chance(MUTANT_FRENZY_CHANCE) {
        return enemy_moves::frenzy(attack);
    }
    enemy_moves::contaminate(attack)
}

fn boss(enemy: &Enemy, player: &Player, rng: &mut BattleRng) -> Card {
    let c = &enemy.combatant;

    if rng.chance(BOSS_UTILITY_CHANCE) {
        let utilities = enemy_moves::boss_utilities();
        if let Some(card) = rng.choose(&utilities) {
            return card.clone();
        }
    }

    if player.combatant.defense > c.attack && rng.chance(BOSS_SHELL_CHANCE) {
        return enemy_moves::iron_shell(c.defense);
    }

    enemy_moves::devastating_blow(c.attack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;

    fn player() -> Player {
        Player::with_deck("P", Vec::new())
    }

    fn names_over(
        archetype: Archetype,
        enemy: &Enemy,
        player: &Player,
        rolls: usize,
    ) -> Vec<String> {
        let mut rng = BattleRng::new(11);
        (0..rolls)
            .map(|_| archetype.next_action(enemy, player, &mut rng).unwrap().name)
            .collect()
    }

    #[test]
    fn test_basic_always_attacks_with_current_attack() {
        let mut enemy = Enemy::new("Rat", 20, 4, 1, 5, Archetype::Basic);
        enemy.combatant.attack = 7;
        let mut rng = BattleRng::new(0);

        let card = Archetype::Basic.next_action(&enemy, &player(), &mut rng).unwrap();
        assert_eq!(card.name, "Basic Attack");
        assert_eq!(card.energy_cost, 0);
        assert!(matches!(card.kind, CardKind::Attack { damage: 7, .. }));
    }

    #[test]
    fn test_healthy_raider_only_slashes() {
        let enemy = Enemy::new("Raider", 50, 8, 3, 20, Archetype::Raider);
        let names = names_over(Archetype::Raider, &enemy, &player(), 50);
        assert!(names.iter().all(|n| n == "Slash"));
    }

    #[test]
    fn test_desperate_raider_mostly_braces() {
        let mut enemy = Enemy::new("Raider", 50, 8, 3, 20, Archetype::Raider);
        enemy.combatant.health.set(19);

        let names = names_over(Archetype::Raider, &enemy, &player(), 1000);
        let braces = names.iter().filter(|n| *n == "Brace").count();
        assert!((600..800).contains(&braces), "braces = {braces}");
        assert!(names.iter().all(|n| n == "Brace" || n == "Slash"));
    }

    #[test]
    fn test_mutant_frenzy_depends_on_player_health() {
        let enemy = Enemy::new("Mutant", 40, 7, 2, 20, Archetype::Mutant);

        let healthy = player();
        let names = names_over(Archetype::Mutant, &enemy, &healthy, 1000);
        let frenzies = names.iter().filter(|n| *n == "Frenzy").count();
        assert!((500..700).contains(&frenzies), "frenzies = {frenzies}");

        let mut hurt = player();
        hurt.combatant.health.set(50);
        let names = names_over(Archetype::Mutant, &enemy, &hurt, 100);
        assert!(names.iter().all(|n| n == "Contaminate"));
    }

    #[test]
    fn test_boss_shell_only_against_tanky_player() {
        let enemy = Enemy::new("Warlord", 100, 6, 4, 80, Archetype::Boss);

        let soft = player();
        let names = names_over(Archetype::Boss, &enemy, &soft, 300);
        assert!(!names.iter().any(|n| n == "Iron Shell"));

        let mut tank = player();
        tank.combatant.defense = 20;
        let names = names_over(Archetype::Boss, &enemy, &tank, 300);
        assert!(names.iter().any(|n| n == "Iron Shell"));
    }

    #[test]
    fn test_boss_mix() {
        let enemy = Enemy::new("Warlord", 100, 6, 4, 80, Archetype::Boss);
        let names = names_over(Archetype::Boss, &enemy, &player(), 2000);

        let utilities = names
            .iter()
            .filter(|n| matches!(n.as_str(), "Battle Roar" | "Toxic Pulse" | "Corrosive Shout"))
            .count();
        assert!((300..500).contains(&utilities), "utilities = {utilities}");
        for name in ["Battle Roar", "Toxic Pulse", "Corrosive Shout", "Devastating Blow"] {
            assert!(names.iter().any(|n| n == name), "{name} never chosen");
        }
    }

    #[test]
    fn test_boss_blow_is_double_attack() {
        let mut rng = BattleRng::new(5);
        let enemy = Enemy::new("Warlord", 100, 6, 4, 80, Archetype::Boss);
        let blow = (0..100)
            .filter_map(|_| Archetype::Boss.next_action(&enemy, &player(), &mut rng))
            .find(|c| c.name == "Devastating Blow")
            .unwrap();
        assert!(matches!(blow.kind, CardKind::Attack { damage: 12, .. }));
    }

    #[test]
    fn test_from_type_name() {
        assert_eq!(Archetype::from_type_name("Raider"), Some(Archetype::Raider));
        assert_eq!(Archetype::from_type_name("MUTANT"), Some(Archetype::Mutant));
        assert_eq!(Archetype::from_type_name("boss"), Some(Archetype::Boss));
        assert_eq!(Archetype::from_type_name("dragon"), None);
    }
}
