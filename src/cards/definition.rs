//! Card definitions.
//!
//! A `Card` is an immutable value. What it does is described by its
//! [`CardKind`]; utility cards carry a [`UtilityEffect`] instead of a
//! callback so every card can be cloned, compared and serialized.
//!
//! ```
//! use deckfight::cards::{Card, CardKind};
//!
//! let strike = Card::attack("Strike", 12, 6, "Deal 6 damage.").with_tags(["strike"]);
//!
//! assert_eq!(strike.first_tag(), Some("strike"));
//! assert!(matches!(strike.kind, CardKind::Attack { damage: 6, .. }));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::status::StatusKind;

/// Combo tags on an attack card. Almost always zero or one.
pub type Tags = SmallVec<[String; 2]>;

/// Which side of a resolution a utility effect lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recipient {
    /// The character playing the card.
    Source,
    /// The opposing character.
    Target,
}

/// Gate on a utility effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// Only when the target currently has more health than the source.
    TargetHealthExceedsSource,
}

/// Effect primitives available to utility cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UtilityEffect {
    /// Put a status effect on one side, replacing any entry of that kind.
    ApplyStatus {
        recipient: Recipient,
        kind: StatusKind,
        duration: u32,
        amount: i32,
        #[serde(default)]
        condition: Option<Condition>,
    },

    /// Restore the source's health, up to its maximum.
    Heal { amount: i32 },

    /// Restore the source's energy, up to its maximum. Does nothing for
    /// characters without energy.
    RestoreEnergy { amount: i32 },
}

impl UtilityEffect {
    /// Unconditional status effect.
    #[must_use]
    pub fn status(recipient: Recipient, kind: StatusKind, duration: u32, amount: i32) -> Self {
        UtilityEffect::ApplyStatus {
            recipient,
            kind,
            duration,
            amount,
            condition: None,
        }
    }

    /// Attach a condition. Only status effects can be gated; other effects
    /// are returned unchanged.
    #[must_use]
    pub fn when(self, gate: Condition) -> Self {
        match self {
            UtilityEffect::ApplyStatus {
                recipient,
                kind,
                duration,
                amount,
                ..
            } => UtilityEffect::ApplyStatus {
                recipient,
                kind,
                duration,
                amount,
                condition: Some(gate),
            },
            other => other,
        }
    }
}

/// What a card does when it resolves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Attack {
        damage: i32,
        #[serde(default)]
        tags: Tags,
    },
    Defense {
        defense_gain: i32,
    },
    Utility {
        effect: UtilityEffect,
    },
}

/// Immutable card value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub energy_cost: i32,
    pub description: String,
    pub kind: CardKind,
}

impl Card {
    fn new(name: impl Into<String>, energy_cost: i32, description: impl Into<String>, kind: CardKind) -> Self {
        Self {
            name: name.into(),
            energy_cost: energy_cost.max(0),
            description: description.into(),
            kind,
        }
    }

    /// Attack card without tags. Negative damage is clamped to 0.
    #[must_use]
    pub fn attack(
        name: impl Into<String>,
        energy_cost: i32,
        damage: i32,
        description: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            energy_cost,
            description,
            CardKind::Attack {
                damage: damage.max(0),
                tags: Tags::new(),
            },
        )
    }

    /// Defense card. Negative gains are clamped to 0.
    #[must_use]
    pub fn defense(
        name: impl Into<String>,
        energy_cost: i32,
        defense_gain: i32,
        description: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            energy_cost,
            description,
            CardKind::Defense {
                defense_gain: defense_gain.max(0),
            },
        )
    }

    #[must_use]
    pub fn utility(
        name: impl Into<String>,
        energy_cost: i32,
        effect: UtilityEffect,
        description: impl Into<String>,
    ) -> Self {
        Self::new(name, energy_cost, description, CardKind::Utility { effect })
    }

    /// Replace the tags of an attack card (builder pattern). Other kinds
    /// carry no tags and are returned unchanged.
    #[must_use]
    pub fn with_tags<I, S>(mut self, new_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let CardKind::Attack { tags, .. } = &mut self.kind {
            *tags = new_tags.into_iter().map(Into::into).collect();
        }
        self
    }

    /// Tags of an attack card; empty for every other kind.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        match &self.kind {
            CardKind::Attack { tags, .. } => tags,
            _ => &[],
        }
    }

    #[must_use]
    pub fn first_tag(&self) -> Option<&str> {
        self.tags().first().map(String::as_str)
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }

    #[must_use]
    pub fn is_attack(&self) -> bool {
        matches!(self.kind, CardKind::Attack { .. })
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (Cost: {})", self.name, self.energy_cost)
    }
}
