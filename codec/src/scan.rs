//! Encoding of a live grid back into a portable descriptor.

use std::collections::BTreeMap;

use maze_runner_core::{CellCoord, CellKind, MazeGrid};

use crate::{
    default_door_clicks, default_patrol, DoorConfig, EnemyConfig, GateConfig, GridPoint, KeyConfig,
    MazeConfig,
};

const KEY_ID: &str = "key-1";

/// Per-cell entity data that the grid alone cannot express.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityOverrides {
    /// Required clicks keyed by door cell.
    pub door_clicks: BTreeMap<CellCoord, u32>,
    /// Patrol paths keyed by enemy spawn cell.
    pub enemy_paths: BTreeMap<CellCoord, Vec<GridPoint>>,
}

/// Scans every cell once and reconstructs the descriptor's entity lists.
///
/// Doors without an override receive the per-index default click count and
/// enemies without an override receive the default square patrol.
#[must_use]
pub fn scan_grid(grid: &MazeGrid, overrides: &EntityOverrides) -> MazeConfig {
    let mut config = MazeConfig::new(grid.columns(), grid.rows());
    config.matrix = Some(
        grid.to_codes()
            .into_iter()
            .map(|row| row.into_iter().map(i64::from).collect())
            .collect(),
    );

    let mut enemies = Vec::new();
    let mut door_index = 0u32;
    for (cell, kind) in grid.iter() {
        let point = GridPoint::from(cell);
        match kind {
            CellKind::Start => config.start = Some(point),
            CellKind::Exit => config.exit = Some(point),
            CellKind::Key => {
                config.key = Some(KeyConfig {
                    id: Some(KEY_ID.to_owned()),
                    position: point,
                });
            }
            CellKind::LockedExit => config.locked_exit = Some(point),
            CellKind::ClickDoor => {
                door_index += 1;
                let required_clicks = overrides
                    .door_clicks
                    .get(&cell)
                    .copied()
                    .unwrap_or_else(|| default_door_clicks(door_index));
                config.doors.push(DoorConfig {
                    position: point,
                    required_clicks: Some(required_clicks),
                });
            }
            CellKind::VerificationGate => {
                config.verification_doors.push(GateConfig { position: point });
            }
            CellKind::EnemySpawn => {
                let path = overrides
                    .enemy_paths
                    .get(&cell)
                    .cloned()
                    .unwrap_or_else(|| default_patrol(point));
                enemies.push(EnemyConfig {
                    position: point,
                    path,
                });
            }
            CellKind::Empty | CellKind::Wall | CellKind::HazardWall => {}
        }
    }
    config.enemies = Some(enemies);

    config
}
