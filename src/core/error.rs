//! Errors raised before a battle starts.
//!
//! The battle loop itself never fails: bad player input is a `ChoiceError`
//! reported back to the player, and numeric overflow is clamped. Everything
//! here is a precondition violation caught while loading data.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid enemy '{name}': {reason}")]
    InvalidEnemy { name: String, reason: String },

    #[error("unknown location: {0}")]
    UnknownLocation(u32),
}
