//! Card resolution - applying a card from a source to a target.
//!
//! The resolver only mutates the two fighters. Paying energy, moving the
//! card to the discard pile and drawing a replacement belong to the battle
//! manager, which also checks the preconditions (the source can act and can
//! afford the card) before calling in.

use crate::cards::{Card, CardKind, Condition, Recipient, UtilityEffect};
use crate::character::Fighter;
use crate::core::BattleConfig;

/// What a resolved card did, for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// An attack landed.
    Damage {
        /// Card damage + attack + combo bonus.
        raw: i32,
        /// Portion absorbed by the target's defense.
        blocked: i32,
        /// `max(0, raw - defense)`.
        dealt: i32,
        combo: bool,
    },
    /// A defense card raised the source's defense.
    Fortified { before: i32, after: i32 },
    /// A utility effect ran. `applied` is false when its condition failed
    /// or the source had nothing to restore into.
    Utility { applied: bool },
}

/// Resolve `card` played by `source` against `target`.
///
/// ## Attack
///
/// `dealt = max(0, damage + source.attack + combo - target.defense)`. The
/// combo bonus applies when the card carries the combo tag and the source's
/// last played tag is that same tag. After the hit, the card's first tag (if
/// any) becomes the source's last played tag.
///
/// ## Defense
///
/// The gain goes straight into the source's effective defense and stays for
/// the rest of the battle.
pub fn resolve<S, T>(card: &Card, source: &mut S, target: &mut T, config: &BattleConfig) -> Resolution
where
    S: Fighter + ?Sized,
    T: Fighter + ?Sized,
{
    let resolution = match &card.kind {
        CardKind::Attack { damage, .. } => {
            let attacker = source.combatant_mut();
            let combo = card.has_tag(&config.combo_tag)
                && attacker.last_played_tag.as_deref() == Some(config.combo_tag.as_str());
            let bonus = if combo { config.combo_bonus } else { 0 };

            let raw = damage.saturating_add(attacker.attack).saturating_add(bonus);
            if let Some(tag) = card.first_tag() {
                attacker.last_played_tag = Some(tag.to_string());
            }

            let defender = target.combatant_mut();
            let dealt = raw.saturating_sub(defender.defense).max(0);
            defender.health.drain(dealt);

            Resolution::Damage {
                raw,
                blocked: raw.saturating_sub(dealt),
                dealt,
                combo,
            }
        }

        CardKind::Defense { defense_gain } => {
            let defender = source.combatant_mut();
            let before = defender.defense;
            defender.fortify(*defense_gain);
            Resolution::Fortified {
                before,
                after: defender.defense,
            }
        }

        CardKind::Utility { effect } => Resolution::Utility {
            applied: apply_utility(effect, source, target),
        },
    };

    tracing::debug!(
        card = %card.name,
        source = %source.combatant().name,
        target = %target.combatant().name,
        ?resolution,
        "card resolved"
    );

    resolution
}

fn apply_utility<S, T>(effect: &UtilityEffect, source: &mut S, target: &mut T) -> bool
where
    S: Fighter + ?Sized,
    T: Fighter + ?Sized,
{
    match effect {
        UtilityEffect::ApplyStatus {
            recipient,
            kind,
            duration,
            amount,
            condition,
        } => {
            if let Some(gate) = condition {
                if !condition_holds(*gate, &*source, &*target) {
                    return false;
                }
            }
            let holder = match recipient {
                Recipient::Source => source.combatant_mut(),
                Recipient::Target => target.combatant_mut(),
            };
            holder.add_status(*kind, *duration, *amount);
            true
        }

        UtilityEffect::Heal { amount } => {
            source.combatant_mut().health.restore(*amount);
            true
        }

        UtilityEffect::RestoreEnergy { amount } => match source.energy_mut() {
            Some(energy) => {
                energy.restore(*amount);
                true
            }
            None => false,
        },
    }
}

fn condition_holds<S, T>(condition: Condition, source: &S, target: &T) -> bool
where
    S: Fighter + ?Sized,
    T: Fighter + ?Sized,
{
    match condition {
        Condition::TargetHealthExceedsSource => {
            target.combatant().health.current() > source.combatant().health.current()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Combatant, Player};
    use crate::status::StatusKind;

    fn config() -> BattleConfig {
        BattleConfig::default()
    }

    fn strike() -> Card {
        Card::attack("Strike", 12, 6, "").with_tags(["strike"])
    }

    #[test]
    fn test_attack_formula() {
        let mut source = Combatant::new("P", 100, 10, 5);
        let mut target = Combatant::new("E", 20, 4, 5);

        let card = Card::attack("Jab", 0, 6, "");
        let result = resolve(&card, &mut source, &mut target, &config());

        assert_eq!(
            result,
            Resolution::Damage { raw: 16, blocked: 5, dealt: 11, combo: false }
        );
        assert_eq!(target.health.current(), 9);
    }

    #[test]
    fn test_attack_never_heals() {
        let mut source = Combatant::new("P", 100, 1, 0);
        let mut target = Combatant::new("E", 20, 0, 50);

        let result = resolve(&Card::attack("Tap", 0, 2, ""), &mut source, &mut target, &config());
        assert!(matches!(result, Resolution::Damage { dealt: 0, .. }));
        assert_eq!(target.health.current(), 20);
    }

    #[test]
    fn test_overkill_clamps_health() {
        let mut source = Combatant::new("P", 100, 50, 0);
        let mut target = Combatant::new("E", 10, 0, 0);

        resolve(&strike(), &mut source, &mut target, &config());
        assert_eq!(target.health.current(), 0);
        assert!(!target.is_alive());
    }

    #[test]
    fn test_combo_requires_previous_strike() {
        let mut source = Combatant::new("P", 100, 10, 0);
        let mut target = Combatant::new("E", 200, 0, 0);

        let first = resolve(&strike(), &mut source, &mut target, &config());
        assert!(matches!(first, Resolution::Damage { dealt: 16, combo: false, .. }));
        assert_eq!(source.last_played_tag.as_deref(), Some("strike"));

        let second = resolve(&strike(), &mut source, &mut target, &config());
        assert!(matches!(second, Resolution::Damage { dealt: 18, combo: true, .. }));

        // Long chains stay at a single bonus.
        let third = resolve(&strike(), &mut source, &mut target, &config());
        assert!(matches!(third, Resolution::Damage { dealt: 18, combo: true, .. }));
    }

    #[test]
    fn test_combo_broken_by_other_tag() {
        let mut source = Combatant::new("P", 100, 10, 0);
        let mut target = Combatant::new("E", 200, 0, 0);
        let heavy = Card::attack("Heavy Blow", 0, 10, "").with_tags(["power"]);

        resolve(&strike(), &mut source, &mut target, &config());
        resolve(&heavy, &mut source, &mut target, &config());
        assert_eq!(source.last_played_tag.as_deref(), Some("power"));

        let result = resolve(&strike(), &mut source, &mut target, &config());
        assert!(matches!(result, Resolution::Damage { combo: false, .. }));
    }

    #[test]
    fn test_untagged_attack_keeps_last_tag() {
        let mut source = Combatant::new("P", 100, 10, 0);
        let mut target = Combatant::new("E", 200, 0, 0);

        resolve(&strike(), &mut source, &mut target, &config());
        resolve(&Card::attack("Jab", 0, 1, ""), &mut source, &mut target, &config());
        assert_eq!(source.last_played_tag.as_deref(), Some("strike"));
    }

    #[test]
    fn test_huge_numbers_saturate() {
        let mut source = Combatant::new("P", 100, i32::MAX, 0);
        let mut target = Combatant::new("E", 100, 0, i32::MIN + 1);

        let result = resolve(&Card::attack("Hit", 0, 50, ""), &mut source, &mut target, &config());
        assert!(matches!(result, Resolution::Damage { raw: i32::MAX, dealt: i32::MAX, .. }));
        assert_eq!(target.health.current(), 0);

        let mut wall = Combatant::new("W", 100, 0, 0);
        for _ in 0..3 {
            resolve(&Card::defense("Wall", 0, i32::MAX, ""), &mut wall, &mut source, &config());
        }
        assert_eq!(wall.defense, i32::MAX);
        assert_eq!(wall.fortification, i32::MAX);
        wall.recompute_stats();
        assert_eq!(wall.defense, i32::MAX);
    }

    #[test]
    fn test_defense_card_raises_defense_immediately() {
        let mut source = Combatant::new("P", 100, 10, 5);
        let mut target = Combatant::new("E", 100, 10, 0);

        let result = resolve(&Card::defense("Guard", 10, 5, ""), &mut source, &mut target, &config());
        assert_eq!(result, Resolution::Fortified { before: 5, after: 10 });

        // The raised defense is what the next hit sees.
        let hit = resolve(&Card::attack("Hit", 0, 0, ""), &mut target, &mut source, &config());
        assert!(matches!(hit, Resolution::Damage { dealt: 0, .. }));
    }

    #[test]
    fn test_utility_status_on_target() {
        let mut source = Combatant::new("Boss", 100, 10, 5);
        let mut target = Combatant::new("P", 100, 10, 5);
        let card = Card::utility(
            "Toxic Pulse",
            0,
            UtilityEffect::status(Recipient::Target, StatusKind::Burned, 3, 2),
            "",
        );

        assert_eq!(
            resolve(&card, &mut source, &mut target, &config()),
            Resolution::Utility { applied: true }
        );
        assert_eq!(target.status.amount(StatusKind::Burned), 2);
        assert!(source.status.is_empty());
    }

    #[test]
    fn test_conditional_status() {
        let card = Card::utility(
            "Precision",
            24,
            UtilityEffect::status(Recipient::Target, StatusKind::Burned, 2, 1)
                .when(Condition::TargetHealthExceedsSource),
            "",
        );

        let mut source = Combatant::new("P", 100, 10, 5);
        let mut healthier = Combatant::new("E", 150, 10, 5);
        let mut weaker = Combatant::new("E", 50, 10, 5);

        assert_eq!(
            resolve(&card, &mut source, &mut weaker, &config()),
            Resolution::Utility { applied: false }
        );
        assert!(weaker.status.is_empty());

        assert_eq!(
            resolve(&card, &mut source, &mut healthier, &config()),
            Resolution::Utility { applied: true }
        );
        assert!(healthier.status.contains(StatusKind::Burned));
    }

    #[test]
    fn test_restore_energy_only_for_player() {
        let card = Card::utility("Adrenaline", 1, UtilityEffect::RestoreEnergy { amount: 20 }, "");

        let mut player = Player::with_deck("P", Vec::new());
        player.energy.drain(50);
        let mut enemy = Combatant::new("E", 10, 1, 1);

        assert_eq!(
            resolve(&card, &mut player, &mut enemy, &config()),
            Resolution::Utility { applied: true }
        );
        assert_eq!(player.energy.current(), 70);

        assert_eq!(
            resolve(&card, &mut enemy, &mut player, &config()),
            Resolution::Utility { applied: false }
        );
    }

    #[test]
    fn test_heal_clamps() {
        let mut source = Combatant::new("P", 30, 1, 1);
        source.health.drain(5);
        let mut target = Combatant::new("E", 10, 1, 1);

        resolve(&Card::utility("Patch", 0, UtilityEffect::Heal { amount: 50 }, ""), &mut source, &mut target, &config());
        assert!(source.health.is_full());
    }
}
