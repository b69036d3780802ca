//! Construction of playable levels from descriptors.

use glam::Vec2;
use maze_runner_core::{
    CellCoord, CellKind, DoorId, DoorSpec, EnemyId, EnemySpec, GateId, GateSpec, LevelDescriptor,
    LevelId, MazeGrid, TileGeometry,
};
use tracing::debug;

use crate::{CodecError, GridPoint, MazeConfig};

/// Clicks required by a door listed in a descriptor without an explicit count.
pub const DEFAULT_DOOR_CLICKS: u32 = 10;

/// Clicks synthesised for the `index`-th door (1-based, row-major) when the
/// door exists only in the grid.
#[must_use]
pub const fn default_door_clicks(index: u32) -> u32 {
    6 + 2 * index
}

/// Square patrol assigned to an enemy spawn that has no explicit path.
#[must_use]
pub fn default_patrol(spawn: GridPoint) -> Vec<GridPoint> {
    vec![
        spawn,
        GridPoint::new(spawn.x + 2, spawn.y),
        GridPoint::new(spawn.x + 2, spawn.y + 2),
        GridPoint::new(spawn.x, spawn.y + 2),
    ]
}

/// Builds the immutable level descriptor for a validated maze.
///
/// Tiles are square and sized so `width` columns span `map_width` pixels.
/// Missing start and exit cells fall back to `(1, 1)` and
/// `(width - 2, height - 2)`.
pub fn build_level(
    id: LevelId,
    name: &str,
    config: &MazeConfig,
    map_width: f32,
) -> Result<LevelDescriptor, CodecError> {
    config.validate()?;
    if !map_width.is_finite() || map_width <= 0.0 {
        return Err(CodecError::InvalidMapWidth(map_width));
    }

    let grid = config.to_grid();
    let geometry = TileGeometry::fit_width(config.width, config.height, map_width);
    let tile_size = geometry.tile_size();

    let start = grid.find(CellKind::Start).unwrap_or(CellCoord::new(1, 1));
    let exit = grid.find(CellKind::Exit).unwrap_or(CellCoord::new(
        config.width.saturating_sub(2),
        config.height.saturating_sub(2),
    ));

    let doors = door_specs(&grid, config, &geometry);
    let gates: Vec<GateSpec> = grid
        .cells_of(CellKind::VerificationGate)
        .zip(0u32..)
        .map(|(cell, index)| GateSpec {
            id: GateId::new(index),
            position: geometry.cell_center(cell),
        })
        .collect();
    let enemies = enemy_specs(&grid, config, tile_size);
    let key = grid
        .find(CellKind::Key)
        .map(|cell| geometry.cell_center(cell));
    let locked_exit = grid
        .find(CellKind::LockedExit)
        .map(|cell| geometry.cell_center(cell));

    debug!(
        level = %id,
        doors = doors.len(),
        gates = gates.len(),
        enemies = enemies.len(),
        has_key = key.is_some(),
        tile_size,
        "level built"
    );

    Ok(LevelDescriptor {
        id,
        name: name.to_owned(),
        start: geometry.cell_center(start),
        exit: geometry.cell_center(exit),
        grid,
        geometry,
        doors,
        gates,
        enemies,
        key,
        locked_exit,
    })
}

fn door_specs(grid: &MazeGrid, config: &MazeConfig, geometry: &TileGeometry) -> Vec<DoorSpec> {
    grid.cells_of(CellKind::ClickDoor)
        .zip(0u32..)
        .map(|(cell, index)| {
            let point = GridPoint::from(cell);
            let required_clicks = config
                .doors
                .iter()
                .find(|door| door.position == point)
                .map_or_else(
                    || default_door_clicks(index + 1),
                    |door| door.required_clicks.unwrap_or(DEFAULT_DOOR_CLICKS),
                )
                .max(1);
            DoorSpec {
                id: DoorId::new(index),
                position: geometry.cell_center(cell),
                required_clicks,
            }
        })
        .collect()
}

fn enemy_specs(grid: &MazeGrid, config: &MazeConfig, tile_size: f32) -> Vec<EnemySpec> {
    let patrols: Vec<(GridPoint, Vec<GridPoint>)> = match &config.enemies {
        Some(enemies) => enemies
            .iter()
            .map(|enemy| {
                let path = if enemy.path.is_empty() {
                    vec![enemy.position]
                } else {
                    enemy.path.clone()
                };
                (enemy.position, path)
            })
            .collect(),
        None => grid
            .cells_of(CellKind::EnemySpawn)
            .map(|cell| {
                let spawn = GridPoint::from(cell);
                (spawn, default_patrol(spawn))
            })
            .collect(),
    };

    patrols
        .into_iter()
        .zip(0u32..)
        .map(|((spawn, path), index)| EnemySpec {
            id: EnemyId::new(index),
            spawn: point_center(spawn, tile_size),
            path: path
                .into_iter()
                .map(|point| point_center(point, tile_size))
                .collect(),
        })
        .collect()
}

// Waypoints may lie outside the grid, so this cannot go through `CellCoord`.
fn point_center(point: GridPoint, tile_size: f32) -> Vec2 {
    Vec2::new(
        point.x as f32 * tile_size + tile_size / 2.0,
        point.y as f32 * tile_size + tile_size / 2.0,
    )
}
