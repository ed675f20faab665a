//! Timed status effects (poison, burn, paralysis, stat buffs).
//!
//! The table is pure data. Applying damage and recomputing stats from it is
//! the job of [`crate::character::Combatant`].

mod table;

pub use table::{StatusEntry, StatusKind, StatusTable, TickReport};
