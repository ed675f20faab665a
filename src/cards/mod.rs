//! Card system: definitions and the game's card pool.
//!
//! - `Card`: immutable card value with a `CardKind` payload
//! - `UtilityEffect`: fixed set of effect primitives for utility cards
//! - `CardCatalog`: player-side cards indexed by name

pub mod definition;
pub mod catalog;

pub use definition::{Card, CardKind, Condition, Recipient, Tags, UtilityEffect};
pub use catalog::{enemy_moves, starter_deck, unlocks_for_level, CardCatalog};
