//! Locations: ordered runs of encounters ending in a boss.
//!
//! Location data is loaded from JSON and validated up front, so a bad enemy
//! definition fails at load time rather than in the middle of a battle.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::character::Enemy;
use crate::core::EngineError;
use crate::policy::Archetype;

// =============================================================================
// JSON format
// =============================================================================

/// One enemy as written in location data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyDef {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    pub exp_reward: u32,
}

impl EnemyDef {
    fn validate(&self) -> Result<(), EngineError> {
        if self.health <= 0 {
            return Err(EngineError::InvalidEnemy {
                name: self.name.clone(),
                reason: format!("health must be positive, got {}", self.health),
            });
        }
        Ok(())
    }

    fn build(&self, archetype: Archetype) -> Enemy {
        Enemy::new(
            self.name.clone(),
            self.health,
            self.attack,
            self.defense,
            self.exp_reward,
            archetype,
        )
    }
}

/// One location as written in location data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDef {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to `id * 100`.
    #[serde(default)]
    pub xp_threshold: Option<u32>,
    #[serde(default)]
    pub enemies: Vec<EnemyDef>,
    pub boss: EnemyDef,
}

// =============================================================================
// Runtime
// =============================================================================

/// Regular encounters are raiders or mutants only.
fn regular_archetype(kind: &str) -> Option<Archetype> {
    match Archetype::from_type_name(kind)? {
        archetype @ (Archetype::Raider | Archetype::Mutant) => Some(archetype),
        _ => None,
    }
}

/// Position of an enemy within a location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemySlot {
    Regular(usize),
    Boss,
}

/// Progress through a location.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Completion {
    pub total_enemies: usize,
    pub defeated_enemies: usize,
    pub boss_defeated: bool,
    pub is_completed: bool,
}

#[derive(Clone, Debug)]
pub struct Location {
    pub id: u32,
    pub name: String,
    /// Minimum player level to enter.
    pub level: u32,
    pub description: String,
    pub xp_threshold: u32,
    enemies: Vec<Enemy>,
    boss: Enemy,
    defeated: Vec<bool>,
    boss_defeated: bool,
}

impl Location {
    /// Build a location from its definition.
    ///
    /// Regular enemies must be raiders or mutants; any other type is
    /// skipped. A boss of unknown type fights as a [`Archetype::Boss`].
    pub fn from_def(def: &LocationDef) -> Result<Self, EngineError> {
        let mut enemies = Vec::with_capacity(def.enemies.len());
        for enemy in &def.enemies {
            enemy.validate()?;
            match regular_archetype(&enemy.kind) {
                Some(archetype) => enemies.push(enemy.build(archetype)),
                None => tracing::warn!(
                    location = def.id,
                    enemy = %enemy.name,
                    kind = %enemy.kind,
                    "skipping enemy of unknown type"
                ),
            }
        }

        def.boss.validate()?;
        let boss_archetype = Archetype::from_type_name(&def.boss.kind).unwrap_or(Archetype::Boss);
        let boss = def.boss.build(boss_archetype);

        Ok(Self {
            id: def.id,
            name: def.name.clone(),
            level: def.id,
            description: def.description.clone(),
            xp_threshold: def.xp_threshold.unwrap_or(def.id * 100),
            defeated: vec![false; enemies.len()],
            enemies,
            boss,
            boss_defeated: false,
        })
    }

    /// The first undefeated regular enemy, then the boss, then nothing.
    #[must_use]
    pub fn next_slot(&self) -> Option<EnemySlot> {
        if let Some(index) = self.defeated.iter().position(|done| !done) {
            return Some(EnemySlot::Regular(index));
        }
        (!self.boss_defeated).then_some(EnemySlot::Boss)
    }

    #[must_use]
    pub fn next_enemy(&self) -> Option<&Enemy> {
        self.next_slot().and_then(|slot| self.enemy(slot))
    }

    #[must_use]
    pub fn enemy(&self, slot: EnemySlot) -> Option<&Enemy> {
        match slot {
            EnemySlot::Regular(index) => self.enemies.get(index),
            EnemySlot::Boss => Some(&self.boss),
        }
    }

    pub fn enemy_mut(&mut self, slot: EnemySlot) -> Option<&mut Enemy> {
        match slot {
            EnemySlot::Regular(index) => self.enemies.get_mut(index),
            EnemySlot::Boss => Some(&mut self.boss),
        }
    }

    pub fn mark_defeated(&mut self, slot: EnemySlot) {
        match slot {
            EnemySlot::Regular(index) => {
                if let Some(done) = self.defeated.get_mut(index) {
                    *done = true;
                }
            }
            EnemySlot::Boss => self.boss_defeated = true,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.boss_defeated && self.defeated.iter().all(|done| *done)
    }

    #[must_use]
    pub fn completion(&self) -> Completion {
        Completion {
            total_enemies: self.enemies.len(),
            defeated_enemies: self.defeated.iter().filter(|done| **done).count(),
            boss_defeated: self.boss_defeated,
            is_completed: self.is_completed(),
        }
    }
}

/// Result of trying to enter a location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryResult {
    Success,
    LevelMismatch,
    AlreadyCompleted,
}

// =============================================================================
// Manager
// =============================================================================

/// All locations, ordered by id, plus the one the player is in.
#[derive(Clone, Debug, Default)]
pub struct LocationManager {
    locations: Vec<Location>,
    current: Option<u32>,
}

impl LocationManager {
    /// Build from definitions. Fails on the first invalid enemy or a
    /// duplicated id.
    pub fn from_defs(defs: &[LocationDef]) -> Result<Self, EngineError> {
        let mut locations = defs
            .iter()
            .map(Location::from_def)
            .collect::<Result<Vec<_>, _>>()?;
        locations.sort_by_key(|location| location.id);

        if let Some(pair) = locations.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(EngineError::InvalidConfig(format!(
                "duplicate location id {}",
                pair[0].id
            )));
        }

        tracing::info!(count = locations.len(), "locations loaded");
        Ok(Self {
            locations,
            current: None,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let defs: Vec<LocationDef> = serde_json::from_str(json)?;
        Self::from_defs(&defs)
    }

    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    #[must_use]
    pub fn all(&self) -> &[Location] {
        &self.locations
    }

    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Location> {
        self.locations.iter_mut().find(|location| location.id == id)
    }

    /// Locations the player's level allows that are not yet completed.
    pub fn available(&self, player_level: u32) -> impl Iterator<Item = &Location> + '_ {
        self.locations
            .iter()
            .filter(move |location| location.level <= player_level && !location.is_completed())
    }

    /// Try to enter location `id`. Only `Success` changes the current location.
    pub fn enter(&mut self, id: u32, player_level: u32) -> Result<EntryResult, EngineError> {
        let location = self.get(id).ok_or(EngineError::UnknownLocation(id))?;

        if location.level > player_level {
            return Ok(EntryResult::LevelMismatch);
        }
        if location.is_completed() {
            return Ok(EntryResult::AlreadyCompleted);
        }

        self.current = Some(id);
        tracing::debug!(location = id, "entered location");
        Ok(EntryResult::Success)
    }

    #[must_use]
    pub fn current(&self) -> Option<&Location> {
        self.current.and_then(|id| self.get(id))
    }

    pub fn current_mut(&mut self) -> Option<&mut Location> {
        let id = self.current?;
        self.get_mut(id)
    }

    /// Leave the current location.
    pub fn leave(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"[
        {
            "id": 2,
            "name": "Ruined Mall",
            "description": "Collapsed storefronts.",
            "enemies": [
                { "name": "Looter", "type": "raider", "health": 40, "attack": 7, "defense": 2, "exp_reward": 30 }
            ],
            "boss": { "name": "Mall King", "type": "boss", "health": 150, "attack": 14, "defense": 6, "exp_reward": 120 }
        },
        {
            "id": 1,
            "name": "Outskirts",
            "description": "Quiet, mostly.",
            "xp_threshold": 110,
            "enemies": [
                { "name": "Scavenger", "type": "Raider", "health": 30, "attack": 5, "defense": 1, "exp_reward": 20 },
                { "name": "Ghoul", "type": "dragon", "health": 30, "attack": 5, "defense": 1, "exp_reward": 20 },
                { "name": "Sludge", "type": "mutant", "health": 35, "attack": 6, "defense": 2, "exp_reward": 25 }
            ],
            "boss": { "name": "Road Boss", "type": "raider", "health": 80, "attack": 9, "defense": 3, "exp_reward": 60 }
        }
    ]"#;

    #[test]
    fn test_load_and_order() {
        let manager = LocationManager::from_json(DATA).unwrap();
        let ids: Vec<u32> = manager.all().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let outskirts = manager.get(1).unwrap();
        assert_eq!(outskirts.xp_threshold, 110);
        assert_eq!(outskirts.completion().total_enemies, 2);
        assert_eq!(outskirts.enemy(EnemySlot::Boss).unwrap().archetype, Archetype::Raider);

        let mall = manager.get(2).unwrap();
        assert_eq!(mall.xp_threshold, 200);
        assert_eq!(mall.level, 2);
    }

    #[test]
    fn test_regular_slots_only_take_raiders_and_mutants() {
        let json = r#"[{ "id": 1, "name": "X", "description": "",
            "enemies": [
                { "name": "Grunt", "type": "basic", "health": 10, "attack": 1, "defense": 1, "exp_reward": 1 },
                { "name": "Drifter", "type": "enemy", "health": 10, "attack": 1, "defense": 1, "exp_reward": 1 },
                { "name": "Tyrant", "type": "boss", "health": 10, "attack": 1, "defense": 1, "exp_reward": 1 },
                { "name": "Looter", "type": "RAIDER", "health": 10, "attack": 1, "defense": 1, "exp_reward": 1 },
                { "name": "Sludge", "type": "mutant", "health": 10, "attack": 1, "defense": 1, "exp_reward": 1 }
            ],
            "boss": { "name": "B", "type": "boss", "health": 10, "attack": 1, "defense": 1, "exp_reward": 1 } }]"#;
        let manager = LocationManager::from_json(json).unwrap();
        let location = manager.get(1).unwrap();

        assert_eq!(location.completion().total_enemies, 2);
        let first = location.enemy(EnemySlot::Regular(0)).unwrap();
        assert_eq!((first.name(), first.archetype), ("Looter", Archetype::Raider));
        let second = location.enemy(EnemySlot::Regular(1)).unwrap();
        assert_eq!((second.name(), second.archetype), ("Sludge", Archetype::Mutant));
        assert!(location.enemy(EnemySlot::Regular(2)).is_none());
    }

    #[test]
    fn test_unknown_boss_type_becomes_boss() {
        let json = r#"[{ "id": 1, "name": "X", "description": "",
            "boss": { "name": "Thing", "type": "eldritch", "health": 10, "attack": 1, "defense": 1, "exp_reward": 1 } }]"#;
        let manager = LocationManager::from_json(json).unwrap();
        assert!(manager.get(1).unwrap().enemy(EnemySlot::Boss).unwrap().is_boss());
    }

    #[test]
    fn test_rejects_nonpositive_health() {
        let json = r#"[{ "id": 1, "name": "X", "description": "",
            "enemies": [{ "name": "Husk", "type": "raider", "health": 0, "attack": 1, "defense": 1, "exp_reward": 1 }],
            "boss": { "name": "B", "type": "boss", "health": 10, "attack": 1, "defense": 1, "exp_reward": 1 } }]"#;
        let err = LocationManager::from_json(json).unwrap_err();
        assert!(matches!(err, EngineError::InvalidEnemy { ref name, .. } if name == "Husk"));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = r#"[
            { "id": 1, "name": "A", "boss": { "name": "B", "type": "boss", "health": 10, "attack": 1, "defense": 1, "exp_reward": 1 } },
            { "id": 1, "name": "B", "boss": { "name": "B", "type": "boss", "health": 10, "attack": 1, "defense": 1, "exp_reward": 1 } }
        ]"#;
        assert!(matches!(
            LocationManager::from_json(json),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(LocationManager::from_json("{"), Err(EngineError::Json(_))));
    }

    #[test]
    fn test_next_enemy_progression() {
        let mut manager = LocationManager::from_json(DATA).unwrap();
        let location = manager.get_mut(1).unwrap();

        assert_eq!(location.next_slot(), Some(EnemySlot::Regular(0)));
        assert_eq!(location.next_enemy().unwrap().name(), "Scavenger");

        location.mark_defeated(EnemySlot::Regular(0));
        assert_eq!(location.next_enemy().unwrap().name(), "Sludge");

        location.mark_defeated(EnemySlot::Regular(1));
        assert_eq!(location.next_slot(), Some(EnemySlot::Boss));
        assert!(!location.is_completed());

        location.mark_defeated(EnemySlot::Boss);
        assert_eq!(location.next_slot(), None);
        assert_eq!(
            location.completion(),
            Completion {
                total_enemies: 2,
                defeated_enemies: 2,
                boss_defeated: true,
                is_completed: true,
            }
        );
    }

    #[test]
    fn test_enter_and_available() {
        let mut manager = LocationManager::from_json(DATA).unwrap();

        let names: Vec<&str> = manager.available(1).map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Outskirts"]);
        assert_eq!(manager.available(2).count(), 2);

        assert_eq!(manager.enter(2, 1).unwrap(), EntryResult::LevelMismatch);
        assert!(manager.current().is_none());

        assert_eq!(manager.enter(1, 1).unwrap(), EntryResult::Success);
        assert_eq!(manager.current().unwrap().id, 1);

        let current = manager.current_mut().unwrap();
        current.mark_defeated(EnemySlot::Regular(0));
        current.mark_defeated(EnemySlot::Regular(1));
        current.mark_defeated(EnemySlot::Boss);

        assert_eq!(manager.enter(1, 3).unwrap(), EntryResult::AlreadyCompleted);
        assert_eq!(manager.available(3).count(), 1);
        assert!(matches!(manager.enter(9, 1), Err(EngineError::UnknownLocation(9))));
    }
}
