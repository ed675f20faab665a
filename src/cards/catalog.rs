//! The game's card pool.
//!
//! Holds the player's starter deck, the cards unlocked on level-up, and the
//! moves enemies improvise each turn. `CardCatalog` indexes the player-side
//! cards by name for lookups from saved decks and tooling.

use rustc_hash::FxHashMap;

use super::definition::{Card, Condition, Recipient, UtilityEffect};
use crate::status::StatusKind;

/// The eight cards every new player starts with, in catalog order.
#[must_use]
pub fn starter_deck() -> Vec<Card> {
    vec![
        Card::attack("Strike", 12, 6, "Deal 6 damage. [strike]").with_tags(["strike"]),
        Card::attack("Combo Slash", 14, 5, "Deal 5 damage. +2 if last card was a strike.")
            .with_tags(["strike"]),
        Card::attack("Heavy Blow", 22, 10, "Big hit. Costly but strong.").with_tags(["power"]),
        Card::defense("Guard", 10, 5, "Gain +5 defense."),
        Card::defense("Iron Wall", 18, 8, "Gain +8 defense."),
        Card::utility(
            "Focus",
            15,
            UtilityEffect::status(Recipient::Source, StatusKind::AttackUp, 2, 2),
            "Gain +2 attack for 2 turns.",
        ),
        Card::utility(
            "Regenerate",
            15,
            UtilityEffect::status(Recipient::Source, StatusKind::DefenseUp, 2, 2),
            "Gain +2 defense for 2 turns.",
        ),
        Card::utility(
            "Precision",
            24,
            UtilityEffect::status(Recipient::Target, StatusKind::Burned, 2, 1)
                .when(Condition::TargetHealthExceedsSource),
            "Burn target if it has more HP than you.",
        ),
    ]
}

/// Cards offered when the player reaches `level`. Empty for levels without
/// unlocks.
#[must_use]
pub fn unlocks_for_level(level: u32) -> Vec<Card> {
    match level {
        2 => vec![
            Card::attack("Lunge", 1, 7, "Deal 7 damage. Cheap and fast.").with_tags(["strike"]),
            Card::utility(
                "Adrenaline",
                1,
                UtilityEffect::RestoreEnergy { amount: 20 },
                "Gain 20 energy.",
            ),
        ],
        3 => vec![
            Card::defense("Fortify", 2, 10, "Gain 10 defense."),
            Card::utility(
                "Overclock",
                2,
                UtilityEffect::status(Recipient::Source, StatusKind::AttackUp, 3, 3),
                "Boost attack +3 for 3 turns.",
            ),
        ],
        4 => vec![Card::attack(
            "Exploit Weakness",
            2,
            6,
            "Deal 6 damage and Burn if enemy has less defense.",
        )
        .with_tags(["tactic"])],
        _ => Vec::new(),
    }
}

/// Moves enemies build on the fly. None of them cost energy.
pub mod enemy_moves {
    use super::*;

    pub fn basic_attack(enemy_name: &str, attack: i32) -> Card {
        Card::attack("Basic Attack", 0, attack, format!("{enemy_name} attacks."))
    }

    pub fn slash(attack: i32) -> Card {
        Card::attack("Slash", 0, attack, "A slashing attack.")
    }

    pub fn brace() -> Card {
        Card::defense("Brace", 0, 2, "Defends in desperation.")
    }

    /// One and a half times `attack`, truncated toward zero.
    pub fn frenzy(attack: i32) -> Card {
        Card::attack("Frenzy", 0, attack.saturating_mul(3) / 2, "A wild, frenzied attack.")
    }

    pub fn contaminate(attack: i32) -> Card {
        Card::attack("Contaminate", 0, attack, "A toxic hit.")
    }

    pub fn iron_shell(defense: i32) -> Card {
        Card::defense("Iron Shell", 0, defense.saturating_add(4), "Fortifies defenses.")
    }

    pub fn devastating_blow(attack: i32) -> Card {
        Card::attack("Devastating Blow", 0, attack.saturating_mul(2), "A powerful strike.")
    }

    /// The boss's utility repertoire, drawn from uniformly.
    pub fn boss_utilities() -> [Card; 3] {
        [
            Card::utility(
                "Battle Roar",
                0,
                UtilityEffect::status(Recipient::Source, StatusKind::AttackUp, 3, 3),
                "Boosts its attack power for 3 turns.",
            ),
            Card::utility(
                "Toxic Pulse",
                0,
                UtilityEffect::status(Recipient::Target, StatusKind::Burned, 3, 2),
                "Applies burn for 3 turns (2 dmg/turn).",
            ),
            Card::utility(
                "Corrosive Shout",
                0,
                UtilityEffect::status(Recipient::Target, StatusKind::Poisoned, 2, 3),
                "Poisons the player for 2 turns.",
            ),
        ]
    }
}

/// Player-side cards indexed by name.
///
/// ## Example
///
/// ```
/// use deckfight::cards::CardCatalog;
///
/// let catalog = CardCatalog::standard();
/// assert_eq!(catalog.get("Guard").unwrap().energy_cost, 10);
/// assert_eq!(catalog.unlock_level("Lunge"), Some(2));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<String, Card>,
    unlock_levels: FxHashMap<String, u32>,
}

impl CardCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starter deck plus every level-up unlock.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for card in starter_deck() {
            catalog.register(card);
        }
        for level in 2..=4 {
            for card in unlocks_for_level(level) {
                catalog.unlock_levels.insert(card.name.clone(), level);
                catalog.register(card);
            }
        }
        catalog
    }

    /// Register a card. A card with the same name is replaced and returned.
    pub fn register(&mut self, card: Card) -> Option<Card> {
        self.cards.insert(card.name.clone(), card)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Card> {
        self.cards.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(name)
    }

    /// Level at which a card is offered, if it is an unlock.
    #[must_use]
    pub fn unlock_level(&self, name: &str) -> Option<u32> {
        self.unlock_levels.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Rebuild cards from a list of names, skipping unknown ones.
    pub fn resolve_names<'n>(&self, names: impl IntoIterator<Item = &'n str>) -> Vec<Card> {
        names
            .into_iter()
            .filter_map(|name| self.get(name).cloned())
            .collect()
    }
}
