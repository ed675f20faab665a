//! Core engine types: RNG, configuration, errors.

pub mod rng;
pub mod config;
pub mod error;

pub use rng::{BattleRng, BattleRngState};
pub use config::{BattleConfig, EngineConfig, ProgressionConfig};
pub use error::EngineError;
