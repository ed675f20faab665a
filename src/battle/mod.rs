//! Battles: the turn loop and its seams to the outside world.
//!
//! - [`manager`] owns the phase machine.
//! - [`events`] holds commands, rejections and display events.
//! - [`io`] defines the input and renderer traits plus stock implementations.

pub mod events;
pub mod io;
pub mod manager;

pub use events::{BattleEvent, BattleView, ChoiceError, PlayerCommand, Prompt, Side, SURRENDER_TOKEN};
pub use io::{BattleInput, BattleRenderer, EventLog, NullRenderer, ScriptedInput, TextRenderer};
pub use manager::{BattleManager, BattleOutcome, BattlePhase};
