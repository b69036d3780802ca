//! Seeded random maze generation for the editor.

use maze_runner_core::{CellCoord, CellKind, MazeGrid};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{scan_grid, EntityOverrides, MazeConfig, MAX_DIMENSION};

/// Parameters of a random maze.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Fraction of interior cells that receive a wall placement, clamped to `[0, 1]`.
    pub complexity: f64,
    /// Seed for the random number generator.
    pub seed: u64,
}

/// Generates a walled maze with random interior walls.
///
/// The start sits at `(1, 1)` and the exit at `(width - 2, height - 2)`;
/// neither is overwritten. Placements may land on the same cell twice and the
/// result is not guaranteed to be solvable.
#[must_use]
pub fn generate_maze(config: &GeneratorConfig) -> MazeConfig {
    let width = config.width.clamp(1, MAX_DIMENSION);
    let height = config.height.clamp(1, MAX_DIMENSION);
    let mut grid = MazeGrid::with_outer_walls(width, height);

    if width < 3 || height < 3 {
        return scan_grid(&grid, &EntityOverrides::default());
    }

    grid.place(CellCoord::new(1, 1), CellKind::Start);
    grid.place(CellCoord::new(width - 2, height - 2), CellKind::Exit);

    let interior = f64::from(width - 2) * f64::from(height - 2);
    let wall_count = (interior * config.complexity.clamp(0.0, 1.0)).floor() as u64;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    for _ in 0..wall_count {
        let cell = CellCoord::new(rng.gen_range(1..width - 1), rng.gen_range(1..height - 1));
        if !matches!(grid.get(cell), Some(CellKind::Start | CellKind::Exit)) {
            grid.set(cell, CellKind::Wall);
        }
    }

    debug!(width, height, wall_count, seed = config.seed, "maze generated");
    scan_grid(&grid, &EntityOverrides::default())
}
