//! # deckfight
//!
//! A turn-based, single-player card battle engine: a player with a deck,
//! energy and health fights one enemy at a time, with timed status effects,
//! a combo rule for tagged attacks and per-archetype enemy behaviour.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: every random decision (shuffles, enemy rolls) comes
//!    from a seeded [`BattleRng`], so a battle replays exactly from its seed.
//!
//! 2. **Data, not subclasses**: card behaviour is a [`CardKind`] payload and
//!    enemy behaviour an [`Archetype`] value. Both serialize.
//!
//! 3. **No I/O in the engine**: the battle loop talks to the outside world
//!    only through the [`BattleInput`] and [`BattleRenderer`] traits.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `status`: timed status effects
//! - `cards`: card definitions, starter deck, unlocks, enemy moves
//! - `character`: combatants, the player, enemies
//! - `effects`: card resolution
//! - `policy`: enemy decision policies
//! - `battle`: the turn loop and its input/render seams
//! - `world`: locations and encounter progression
//!
//! ## Example
//!
//! ```
//! use deckfight::{BattleManager, BattleRng, Enemy, NullRenderer, Player, ScriptedInput};
//! use deckfight::policy::Archetype;
//!
//! let mut rng = BattleRng::new(7);
//! let mut player = Player::new("Scav", &mut rng);
//! let mut enemy = Enemy::new("Raider", 40, 6, 2, 30, Archetype::Raider);
//!
//! let mut input = ScriptedInput::new(["q"]);
//! let outcome = BattleManager::new(&mut player, &mut enemy, 110)
//!     .with_rng(rng)
//!     .run(&mut input, &mut NullRenderer);
//!
//! assert!(!outcome.is_victory());
//! assert_eq!(player.card_count(), 8);
//! ```

pub mod core;
pub mod status;
pub mod cards;
pub mod character;
pub mod effects;
pub mod policy;
pub mod battle;
pub mod world;

// Re-export commonly used types
pub use crate::core::{
    BattleConfig, BattleRng, BattleRngState, EngineConfig, EngineError, ProgressionConfig,
};

pub use crate::status::{StatusEntry, StatusKind, StatusTable, TickReport};

pub use crate::cards::{Card, CardCatalog, CardKind, Condition, Recipient, UtilityEffect};

pub use crate::character::{Combatant, Enemy, Fighter, Meter, Player};

pub use crate::effects::{resolve, Resolution};

pub use crate::policy::{Archetype, EnemyPolicy};

pub use crate::battle::{
    BattleEvent, BattleInput, BattleManager, BattleOutcome, BattlePhase, BattleRenderer,
    BattleView, ChoiceError, EventLog, NullRenderer, PlayerCommand, Prompt, ScriptedInput, Side,
    TextRenderer,
};

pub use crate::world::{EntryResult, Location, LocationManager};
