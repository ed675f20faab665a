//! Per-character table of timed status effects.
//!
//! A table holds at most one entry per [`StatusKind`]. Adding an effect
//! that is already present replaces it outright: durations and amounts never
//! stack.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Kinds of timed effect a character can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusKind {
    /// Loses `amount` health at the end of each owning turn.
    Poisoned,
    /// Loses `amount` health at the end of each owning turn.
    Burned,
    /// Cannot play cards.
    Paralyzed,
    /// Effective attack raised by `amount`.
    AttackUp,
    /// Effective defense raised by `amount`.
    DefenseUp,
}

impl StatusKind {
    /// Every kind, in display and tick order.
    pub const ALL: [StatusKind; 5] = [
        StatusKind::Poisoned,
        StatusKind::Burned,
        StatusKind::Paralyzed,
        StatusKind::AttackUp,
        StatusKind::DefenseUp,
    ];

    /// Whether this effect deals damage when it ticks.
    #[must_use]
    pub const fn deals_damage(self) -> bool {
        matches!(self, StatusKind::Poisoned | StatusKind::Burned)
    }

    /// Display label, as shown in the battle panels.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            StatusKind::Poisoned => "POISONED",
            StatusKind::Burned => "BURNED",
            StatusKind::Paralyzed => "PARALYZED",
            StatusKind::AttackUp => "ATTACK_UP",
            StatusKind::DefenseUp => "DEFENSE_UP",
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Remaining duration and magnitude of one active effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    /// Owning turns left. Always at least 1 while the entry is stored.
    pub duration: u32,
    /// Damage per tick or buff size, depending on the kind.
    pub amount: i32,
}

/// Outcome of one end-of-turn tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Health lost to damage-over-time effects.
    pub damage: i32,
    /// Effects that ran out during this tick.
    pub expired: Vec<StatusKind>,
}

/// Active effects keyed by kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTable {
    entries: FxHashMap<StatusKind, StatusEntry>,
}

impl StatusTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an effect with the default amount of 1.
    pub fn add(&mut self, kind: StatusKind, duration: u32) {
        self.add_or_replace(kind, duration, 1);
    }

    /// Set an effect unconditionally, replacing any entry of the same kind.
    ///
    /// A zero duration would expire before it could ever tick, so it is
    /// ignored.
    pub fn add_or_replace(&mut self, kind: StatusKind, duration: u32, amount: i32) {
        if duration == 0 {
            return;
        }
        self.entries.insert(kind, StatusEntry { duration, amount });
    }

    #[must_use]
    pub fn get(&self, kind: StatusKind) -> Option<StatusEntry> {
        self.entries.get(&kind).copied()
    }

    #[must_use]
    pub fn contains(&self, kind: StatusKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Amount of `kind`, or 0 when it is not active.
    #[must_use]
    pub fn amount(&self, kind: StatusKind) -> i32 {
        self.get(kind).map_or(0, |entry| entry.amount)
    }

    pub fn remove(&mut self, kind: StatusKind) -> Option<StatusEntry> {
        self.entries.remove(&kind)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Active effects in [`StatusKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (StatusKind, StatusEntry)> + '_ {
        StatusKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|entry| (kind, entry)))
    }

    /// Total damage-over-time the table would deal on its next tick.
    #[must_use]
    pub fn pending_damage(&self) -> i32 {
        self.iter()
            .filter(|(kind, _)| kind.deals_damage())
            .fold(0i32, |total, (_, entry)| total.saturating_add(entry.amount))
    }

    /// Decrement every duration by one and drop entries that reach zero.
    ///
    /// Returns the kinds that expired. Damage is not applied here; the
    /// owner reads [`StatusTable::pending_damage`] before calling this.
    pub fn decrement(&mut self) -> Vec<StatusKind> {
        let mut expired = Vec::new();
        for kind in StatusKind::ALL {
            if let Some(entry) = self.entries.get_mut(&kind) {
                entry.duration -= 1;
                if entry.duration == 0 {
                    expired.push(kind);
                }
            }
        }
        for kind in &expired {
            self.entries.remove(kind);
        }
        expired
    }
}
