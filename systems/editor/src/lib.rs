#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Editable maze draft backing the level editor.
//!
//! The draft owns a grid plus the per-cell data the grid cannot express:
//! click counts for doors and patrol paths for enemies. It converts to and
//! from the portable [`MazeConfig`] descriptor.

use maze_runner_codec::{
    default_door_clicks, default_patrol, scan_grid, EntityOverrides, GridPoint, MazeConfig,
    DEFAULT_DOOR_CLICKS,
};
use maze_runner_core::{CellCoord, CellKind, MazeGrid};
use tracing::debug;

/// Smallest width or height the editor accepts.
pub const MIN_SIDE: u32 = 10;
/// Largest width or height the editor accepts.
pub const MAX_SIDE: u32 = 100;
/// Clicks assigned to a freshly painted door.
pub const NEW_DOOR_CLICKS: u32 = 10;
/// Largest click count a door may require.
pub const MAX_DOOR_CLICKS: u32 = 100;

/// Maze under construction in the editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeDraft {
    grid: MazeGrid,
    overrides: EntityOverrides,
    selected_enemy: Option<CellCoord>,
}

impl MazeDraft {
    /// Creates an empty walled draft, clamping each side to the accepted range.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid: walled(width, height),
            overrides: EntityOverrides::default(),
            selected_enemy: None,
        }
    }

    /// Restores a draft from a descriptor.
    ///
    /// Doors and enemies receive the same click counts and patrols a playable
    /// level built from the descriptor would use.
    #[must_use]
    pub fn load(config: &MazeConfig) -> Self {
        let grid = config.to_grid();
        let mut overrides = EntityOverrides::default();

        for (cell, index) in grid.cells_of(CellKind::ClickDoor).zip(1u32..) {
            let point = GridPoint::from(cell);
            let clicks = config
                .doors
                .iter()
                .find(|door| door.position == point)
                .map_or_else(
                    || default_door_clicks(index),
                    |door| door.required_clicks.unwrap_or(DEFAULT_DOOR_CLICKS),
                );
            let _ = overrides
                .door_clicks
                .insert(cell, clicks.clamp(1, MAX_DOOR_CLICKS));
        }

        for cell in grid.cells_of(CellKind::EnemySpawn) {
            let spawn = GridPoint::from(cell);
            let path = match &config.enemies {
                Some(enemies) => enemies
                    .iter()
                    .find(|enemy| enemy.position == spawn)
                    .map(|enemy| enemy.path.clone())
                    .filter(|path| !path.is_empty())
                    .unwrap_or_else(|| vec![spawn]),
                None => default_patrol(spawn),
            };
            let _ = overrides.enemy_paths.insert(cell, path);
        }

        debug!(
            width = grid.columns(),
            height = grid.rows(),
            doors = overrides.door_clicks.len(),
            enemies = overrides.enemy_paths.len(),
            "draft loaded"
        );

        Self {
            grid,
            overrides,
            selected_enemy: None,
        }
    }

    /// Current grid.
    #[must_use]
    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    /// Paints `tool` onto `cell`, or edits the selected enemy's path.
    ///
    /// Painting a cell with its own type clears it. While an enemy is selected
    /// the grid is left untouched and the cell is toggled in that enemy's path.
    pub fn paint(&mut self, cell: CellCoord, tool: CellKind) {
        if !self.grid.contains(cell) {
            return;
        }
        if let Some(enemy) = self.selected_enemy {
            self.toggle_path_point(enemy, cell);
            return;
        }

        let current = self.grid.get(cell).unwrap_or_default();
        if current == CellKind::EnemySpawn {
            let _ = self.overrides.enemy_paths.remove(&cell);
        }
        if current == CellKind::ClickDoor {
            let _ = self.overrides.door_clicks.remove(&cell);
        }

        if current == tool {
            self.grid.set(cell, CellKind::Empty);
            return;
        }

        self.grid.place(cell, tool);
        match tool {
            CellKind::EnemySpawn => {
                let _ = self
                    .overrides
                    .enemy_paths
                    .insert(cell, vec![GridPoint::from(cell)]);
            }
            CellKind::ClickDoor => {
                let _ = self.overrides.door_clicks.insert(cell, NEW_DOOR_CLICKS);
            }
            _ => {}
        }
    }

    /// Toggles path editing for the enemy at `cell` and reports whether it is now active.
    ///
    /// Selecting another enemy switches the selection; cells without an enemy
    /// leave the selection unchanged.
    pub fn select_enemy(&mut self, cell: CellCoord) -> bool {
        if self.grid.get(cell) == Some(CellKind::EnemySpawn) {
            self.selected_enemy = if self.selected_enemy == Some(cell) {
                None
            } else {
                Some(cell)
            };
        }
        self.selected_enemy.is_some()
    }

    /// Enemy whose path is being edited, if any.
    #[must_use]
    pub fn selected_enemy(&self) -> Option<CellCoord> {
        self.selected_enemy
    }

    /// Patrol path of the enemy spawning at `cell`.
    #[must_use]
    pub fn enemy_path(&self, cell: CellCoord) -> Option<&[GridPoint]> {
        self.overrides.enemy_paths.get(&cell).map(Vec::as_slice)
    }

    /// Clicks required by the door at `cell`.
    #[must_use]
    pub fn door_clicks(&self, cell: CellCoord) -> Option<u32> {
        self.overrides.door_clicks.get(&cell).copied()
    }

    /// Sets the clicks required by the door at `cell`, clamped to `[1, 100]`.
    ///
    /// Returns `false` when the cell holds no door.
    pub fn set_door_clicks(&mut self, cell: CellCoord, clicks: u32) -> bool {
        if self.grid.get(cell) != Some(CellKind::ClickDoor) {
            return false;
        }
        let _ = self
            .overrides
            .door_clicks
            .insert(cell, clicks.clamp(1, MAX_DOOR_CLICKS));
        true
    }

    /// Replaces the draft with an empty walled grid of the new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
        debug!(
            width = self.grid.columns(),
            height = self.grid.rows(),
            "draft resized"
        );
    }

    /// Empties the draft while keeping its size.
    pub fn clear(&mut self) {
        *self = Self {
            grid: MazeGrid::with_outer_walls(self.grid.columns(), self.grid.rows()),
            overrides: EntityOverrides::default(),
            selected_enemy: None,
        };
    }

    /// Encodes the draft as a descriptor with every door and enemy listed explicitly.
    #[must_use]
    pub fn to_config(&self) -> MazeConfig {
        let mut overrides = EntityOverrides::default();
        for cell in self.grid.cells_of(CellKind::ClickDoor) {
            let clicks = self.door_clicks(cell).unwrap_or(NEW_DOOR_CLICKS);
            let _ = overrides.door_clicks.insert(cell, clicks);
        }
        for cell in self.grid.cells_of(CellKind::EnemySpawn) {
            let path = self
                .enemy_path(cell)
                .map_or_else(|| vec![GridPoint::from(cell)], <[GridPoint]>::to_vec);
            let _ = overrides.enemy_paths.insert(cell, path);
        }
        scan_grid(&self.grid, &overrides)
    }

    fn toggle_path_point(&mut self, enemy: CellCoord, cell: CellCoord) {
        let spawn = GridPoint::from(enemy);
        let point = GridPoint::from(cell);
        let path = self.overrides.enemy_paths.entry(enemy).or_default();
        if path.contains(&point) {
            path.retain(|existing| *existing != point);
            if path.is_empty() {
                path.push(spawn);
            }
        } else {
            path.push(point);
        }
    }
}

impl Default for MazeDraft {
    fn default() -> Self {
        Self::new(40, 40)
    }
}

fn walled(width: u32, height: u32) -> MazeGrid {
    MazeGrid::with_outer_walls(
        width.clamp(MIN_SIDE, MAX_SIDE),
        height.clamp(MIN_SIDE, MAX_SIDE),
    )
}
