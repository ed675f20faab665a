//! Commands, rejections and events exchanged with the outside world.

use thiserror::Error;

use crate::character::{Enemy, Player};
use crate::effects::Resolution;
use crate::status::TickReport;

/// Which side of the battle something concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Enemy,
}

/// A parsed player decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Play the hand card at this 0-based index.
    Play(usize),
    Surrender,
}

/// Token that surrenders the battle.
pub const SURRENDER_TOKEN: &str = "q";

impl PlayerCommand {
    /// Parse a raw command: a 1-based hand index or the surrender token.
    ///
    /// ```
    /// use deckfight::battle::{ChoiceError, PlayerCommand};
    ///
    /// assert_eq!(PlayerCommand::parse(" 2 ", 3), Ok(PlayerCommand::Play(1)));
    /// assert_eq!(PlayerCommand::parse("Q", 3), Ok(PlayerCommand::Surrender));
    /// assert!(matches!(PlayerCommand::parse("4", 3), Err(ChoiceError::OutOfRange { .. })));
    /// ```
    pub fn parse(raw: &str, hand_len: usize) -> Result<Self, ChoiceError> {
        let token = raw.trim();
        if token.eq_ignore_ascii_case(SURRENDER_TOKEN) {
            return Ok(PlayerCommand::Surrender);
        }

        let number: usize = token
            .parse()
            .map_err(|_| ChoiceError::Malformed(token.to_string()))?;

        if number == 0 || number > hand_len {
            return Err(ChoiceError::OutOfRange {
                choice: number,
                hand_len,
            });
        }
        Ok(PlayerCommand::Play(number - 1))
    }
}

/// Why a player decision was refused. The decision point is retried.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChoiceError {
    #[error("invalid choice '{0}': enter a card number or 'q'")]
    Malformed(String),

    #[error("no card number {choice} (hand holds {hand_len})")]
    OutOfRange { choice: usize, hand_len: usize },

    #[error("cannot play cards while paralyzed: press enter to pass or 'q' to surrender")]
    Paralyzed,

    #[error("not enough energy for {card}: costs {cost}, have {available}")]
    InsufficientEnergy {
        card: String,
        cost: i32,
        available: i32,
    },
}

/// Acknowledgment points between phases. Purely presentational.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    BeginBattle,
    EndPlayerTurn,
    EndEnemyTurn,
    AfterVictory,
}

/// Something that happened during a battle, for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleEvent {
    Started {
        player: String,
        enemy: String,
        boss: bool,
    },
    TurnStarted {
        turn: u32,
        side: Side,
    },
    Rejected(ChoiceError),
    /// The side is paralyzed (or otherwise unable to act) this turn.
    CannotAct {
        side: Side,
        name: String,
    },
    CardPlayed {
        side: Side,
        card: String,
        resolution: Resolution,
    },
    StatusTick {
        side: Side,
        report: TickReport,
    },
    Victory {
        enemy: String,
        xp: u32,
        levels: Vec<u32>,
    },
    Unlocked {
        card: String,
    },
    Defeat {
        player: String,
    },
    Surrendered,
    /// The enemy had no legal action; the battle ends without a winner.
    Abandoned,
}

/// Read-only view of a battle handed to renderers and input sources.
#[derive(Clone, Copy, Debug)]
pub struct BattleView<'a> {
    pub turn: u32,
    pub player: &'a Player,
    pub enemy: &'a Enemy,
    /// Whether the player's hand should be shown.
    pub show_hand: bool,
}
