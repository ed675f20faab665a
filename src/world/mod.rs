//! The world outside battles: locations and their encounters.

pub mod location;

pub use location::{
    Completion, EnemyDef, EnemySlot, EntryResult, Location, LocationDef, LocationManager,
};
