//! Immutable per-level descriptor consumed by the world.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{DoorId, EnemyId, GateId, MazeGrid, TileGeometry};

/// Identifier of a level: built-in levels are numbered, user levels are named.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelId {
    /// Numeric identifier.
    Number(u32),
    /// Free-form identifier.
    Name(String),
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Name(value) => f.write_str(value),
        }
    }
}

/// Click-door definition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorSpec {
    /// Identifier assigned in scan order.
    pub id: DoorId,
    /// Pixel centre of the door's cell.
    pub position: Vec2,
    /// Clicks needed to open the door; always positive.
    pub required_clicks: u32,
}

/// Verification gate definition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GateSpec {
    /// Identifier assigned in scan order.
    pub id: GateId,
    /// Pixel centre of the gate's cell.
    pub position: Vec2,
}

/// Patrolling enemy definition.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySpec {
    /// Identifier assigned in declaration order.
    pub id: EnemyId,
    /// Pixel centre of the spawn cell.
    pub spawn: Vec2,
    /// Cyclic waypoint list in pixel space. A single point means stationary.
    pub path: Vec<Vec2>,
}

impl EnemySpec {
    /// Position the enemy occupies at the start of every attempt.
    ///
    /// This is the first waypoint, or the spawn when the path is empty.
    #[must_use]
    pub fn initial_position(&self) -> Vec2 {
        self.path.first().copied().unwrap_or(self.spawn)
    }
}

/// Grid plus derived entity lists for one level.
///
/// The descriptor never changes while the level is played; door clicks,
/// enemy liveness and the player position live in the world's runtime overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelDescriptor {
    /// Identifier reported on completion.
    pub id: LevelId,
    /// Display name.
    pub name: String,
    /// Static geometry.
    pub grid: MazeGrid,
    /// Pixel extent and tile size.
    pub geometry: TileGeometry,
    /// Pixel centre of the start cell.
    pub start: Vec2,
    /// Pixel centre of the plain exit cell.
    pub exit: Vec2,
    /// Click-doors in scan order.
    pub doors: Vec<DoorSpec>,
    /// Verification gates in scan order.
    pub gates: Vec<GateSpec>,
    /// Patrolling enemies.
    pub enemies: Vec<EnemySpec>,
    /// Pixel centre of the key, if the level has one.
    pub key: Option<Vec2>,
    /// Pixel centre of the locked exit, if the level has one.
    pub locked_exit: Option<Vec2>,
}

impl LevelDescriptor {
    /// Goal the player must reach, and whether it requires the key.
    ///
    /// A locked exit only replaces the plain exit when the level also has a key.
    #[must_use]
    pub fn goal(&self) -> (Vec2, bool) {
        match (self.locked_exit, self.key) {
            (Some(locked), Some(_)) => (locked, true),
            _ => (self.exit, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_level() -> LevelDescriptor {
        LevelDescriptor {
            id: LevelId::Number(1),
            name: "open".to_owned(),
            grid: MazeGrid::with_outer_walls(10, 10),
            geometry: TileGeometry::new(10, 10, 20.0),
            start: Vec2::new(30.0, 30.0),
            exit: Vec2::new(170.0, 170.0),
            doors: Vec::new(),
            gates: Vec::new(),
            enemies: Vec::new(),
            key: None,
            locked_exit: None,
        }
    }

    #[test]
    fn plain_exit_without_lock() {
        assert_eq!(open_level().goal(), (Vec2::new(170.0, 170.0), false));
    }

    #[test]
    fn locked_exit_requires_a_key_to_apply() {
        let mut level = open_level();
        level.locked_exit = Some(Vec2::new(110.0, 30.0));
        assert_eq!(level.goal(), (Vec2::new(170.0, 170.0), false));

        level.key = Some(Vec2::new(50.0, 50.0));
        assert_eq!(level.goal(), (Vec2::new(110.0, 30.0), true));
    }

    #[test]
    fn enemies_without_waypoints_start_at_spawn() {
        let mut enemy = EnemySpec {
            id: EnemyId::new(0),
            spawn: Vec2::new(50.0, 50.0),
            path: Vec::new(),
        };
        assert_eq!(enemy.initial_position(), Vec2::new(50.0, 50.0));

        enemy.path = vec![Vec2::new(90.0, 50.0), Vec2::new(50.0, 50.0)];
        assert_eq!(enemy.initial_position(), Vec2::new(90.0, 50.0));
    }

    #[test]
    fn level_ids_display_their_value() {
        assert_eq!(LevelId::Number(3).to_string(), "3");
        assert_eq!(LevelId::Name("community-7".to_owned()).to_string(), "community-7");
    }
}
