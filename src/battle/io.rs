//! Input and rendering seams.
//!
//! The battle manager never reads a terminal or prints anything itself. It
//! asks a [`BattleInput`] for decisions and tells a [`BattleRenderer`] what
//! happened. Renderers only ever receive shared references.

use std::collections::VecDeque;
use std::io::Write;

use super::events::{BattleEvent, BattleView, Prompt, Side};
use crate::cards::Card;
use crate::character::Combatant;
use crate::effects::Resolution;

// =============================================================================
// Input
// =============================================================================

/// Source of player decisions.
pub trait BattleInput {
    /// Next raw command: a 1-based card number or `q`. `None` means the
    /// input is closed, which the battle treats as a surrender.
    fn read_command(&mut self, view: &BattleView<'_>) -> Option<String>;

    /// Pause between phases. Has no effect on battle state.
    fn acknowledge(&mut self, _prompt: Prompt) {}

    /// Pick one of the cards offered on level-up, by 0-based index. `None`
    /// declines the offer.
    fn choose_unlock(&mut self, options: &[Card]) -> Option<usize> {
        (!options.is_empty()).then_some(0)
    }
}

/// Input that replays a fixed list of commands.
///
/// ```
/// use deckfight::battle::ScriptedInput;
///
/// let input = ScriptedInput::new(["1", "2", "q"]);
/// assert_eq!(input.remaining(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    commands: VecDeque<String>,
    unlock_choices: VecDeque<usize>,
    acknowledged: Vec<Prompt>,
}

impl ScriptedInput {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Answers for level-up offers, consumed in order. Once exhausted the
    /// first option is taken.
    pub fn with_unlock_choices(mut self, choices: impl IntoIterator<Item = usize>) -> Self {
        self.unlock_choices = choices.into_iter().collect();
        self
    }

    /// Commands not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.commands.len()
    }

    /// Every prompt acknowledged so far.
    #[must_use]
    pub fn acknowledged(&self) -> &[Prompt] {
        &self.acknowledged
    }
}

impl BattleInput for ScriptedInput {
    fn read_command(&mut self, _view: &BattleView<'_>) -> Option<String> {
        self.commands.pop_front()
    }

    fn acknowledge(&mut self, prompt: Prompt) {
        self.acknowledged.push(prompt);
    }

    fn choose_unlock(&mut self, options: &[Card]) -> Option<usize> {
        match self.unlock_choices.pop_front() {
            Some(choice) => Some(choice),
            None => (!options.is_empty()).then_some(0),
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Display sink for battle state and events.
pub trait BattleRenderer {
    /// Show the current state of both sides.
    fn render(&mut self, view: &BattleView<'_>);

    /// Report something that just happened.
    fn event(&mut self, event: &BattleEvent);
}

/// Renderer that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl BattleRenderer for NullRenderer {
    fn render(&mut self, _view: &BattleView<'_>) {}

    fn event(&mut self, _event: &BattleEvent) {}
}

/// Renderer that records events, for drivers that post-process a battle.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events: Vec<BattleEvent>,
    pub renders: usize,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&BattleEvent) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(event)).count()
    }
}

impl BattleRenderer for EventLog {
    fn render(&mut self, _view: &BattleView<'_>) {
        self.renders += 1;
    }

    fn event(&mut self, event: &BattleEvent) {
        self.events.push(event.clone());
    }
}

/// Plain line-oriented renderer writing to any `io::Write`.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_panel(&mut self, c: &Combatant, label: &str, energy: Option<String>) -> std::io::Result<()> {
        writeln!(self.out, "{label}")?;
        writeln!(self.out, "HP: {}", c.health)?;
        if let Some(energy) = energy {
            writeln!(self.out, "EN: {energy}")?;
        }

        let status: Vec<String> = c
            .status
            .iter()
            .map(|(kind, entry)| format!("{kind}({})", entry.duration))
            .collect();
        let status = if status.is_empty() {
            "None".to_string()
        } else {
            status.join(", ")
        };
        writeln!(self.out, "Status Effects: {status}")?;
        writeln!(self.out, "ATK: {} | DEF: {}", c.attack, c.defense)
    }

    fn write_view(&mut self, view: &BattleView<'_>) -> std::io::Result<()> {
        let rule = "=".repeat(50);
        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "Turn {}", view.turn)?;
        writeln!(self.out, "{rule}")?;

        let player = view.player;
        self.write_panel(&player.combatant, &player.combatant.name, Some(player.energy.to_string()))?;

        let enemy = view.enemy;
        let label = if enemy.is_boss() {
            format!("BOSS: {}", enemy.name())
        } else {
            enemy.name().to_string()
        };
        self.write_panel(&enemy.combatant, &label, None)?;

        if view.show_hand {
            writeln!(self.out, "Cards in Hand:")?;
            for (i, card) in player.hand.iter().enumerate() {
                let lock = if player.can_afford(card) { "" } else { " [locked]" };
                writeln!(
                    self.out,
                    "  {}. {}{} - {}",
                    i + 1,
                    card,
                    lock,
                    card.description
                )?;
            }
        }
        writeln!(self.out, "{rule}")
    }

    fn write_event(&mut self, event: &BattleEvent) -> std::io::Result<()> {
        match event {
            BattleEvent::Started { player, enemy, boss } => {
                let enemy = if *boss { format!("BOSS: {enemy}") } else { enemy.clone() };
                writeln!(self.out, "Battle Start: {player} vs {enemy}!")
            }
            BattleEvent::TurnStarted { turn, side } => match side {
                Side::Player => writeln!(self.out, "--- Your Turn #{turn} ---"),
                Side::Enemy => writeln!(self.out, "--- Enemy Turn #{turn} ---"),
            },
            BattleEvent::Rejected(err) => writeln!(self.out, "{err}"),
            BattleEvent::CannotAct { name, .. } => writeln!(self.out, "{name} cannot act!"),
            BattleEvent::CardPlayed { card, resolution, .. } => {
                writeln!(self.out, "{card} used.")?;
                match resolution {
                    Resolution::Damage { raw, blocked, dealt, combo } => {
                        if *combo {
                            writeln!(self.out, "Combo!")?;
                        }
                        writeln!(self.out, "Would deal {raw} damage, {blocked} blocked, {dealt} taken.")
                    }
                    Resolution::Fortified { before, after } => {
                        writeln!(self.out, "Defense increased: {before} -> {after}")
                    }
                    Resolution::Utility { applied: true } => Ok(()),
                    Resolution::Utility { applied: false } => writeln!(self.out, "It had no effect."),
                }
            }
            BattleEvent::StatusTick { report, .. } => {
                if report.damage > 0 {
                    writeln!(self.out, "Status effects deal {} damage.", report.damage)?;
                }
                for kind in &report.expired {
                    writeln!(self.out, "{kind} wore off.")?;
                }
                Ok(())
            }
            BattleEvent::Victory { enemy, xp, levels } => {
                writeln!(self.out, "{enemy} has been defeated! Gained {xp} XP!")?;
                for level in levels {
                    writeln!(self.out, "Level Up! Now level {level}!")?;
                }
                Ok(())
            }
            BattleEvent::Unlocked { card } => writeln!(self.out, "Added {card} to your deck!"),
            BattleEvent::Defeat { player } => writeln!(self.out, "{player} has been defeated!"),
            BattleEvent::Surrendered => writeln!(self.out, "You surrendered."),
            BattleEvent::Abandoned => writeln!(self.out, "The enemy could not act. Battle abandoned."),
        }
    }
}

impl<W: Write> BattleRenderer for TextRenderer<W> {
    fn render(&mut self, view: &BattleView<'_>) {
        if let Err(err) = self.write_view(view) {
            tracing::warn!(%err, "failed to render battle view");
        }
    }

    fn event(&mut self, event: &BattleEvent) {
        if let Err(err) = self.write_event(event) {
            tracing::warn!(%err, "failed to render battle event");
        }
    }
}
