//! Character model: the player, enemies, and what they share.
//!
//! Card resolution works on anything implementing [`Fighter`], which exposes
//! the shared [`Combatant`] and, for the player, the energy meter.

pub mod meter;
pub mod combatant;
pub mod player;
pub mod enemy;

pub use meter::Meter;
pub use combatant::Combatant;
pub use player::Player;
pub use enemy::Enemy;

/// A participant in a battle.
pub trait Fighter {
    fn combatant(&self) -> &Combatant;

    fn combatant_mut(&mut self) -> &mut Combatant;

    /// Energy meter, for characters that pay for their cards.
    fn energy_mut(&mut self) -> Option<&mut Meter> {
        None
    }
}

impl Fighter for Combatant {
    fn combatant(&self) -> &Combatant {
        self
    }

    fn combatant_mut(&mut self) -> &mut Combatant {
        self
    }
}

impl Fighter for Player {
    fn combatant(&self) -> &Combatant {
        &self.combatant
    }

    fn combatant_mut(&mut self) -> &mut Combatant {
        &mut self.combatant
    }

    fn energy_mut(&mut self) -> Option<&mut Meter> {
        Some(&mut self.energy)
    }
}

impl Fighter for Enemy {
    fn combatant(&self) -> &Combatant {
        &self.combatant
    }

    fn combatant_mut(&mut self) -> &mut Combatant {
        &mut self.combatant
    }
}
