//! Corner-sampled wall collision against the maze grid.

use glam::Vec2;

use crate::{pixel_to_grid, CellKind, MazeGrid};

/// Reports whether an actor centred at `position` intersects a wall.
///
/// The actor is approximated by an axis-aligned square of half-width
/// `radius`. The centre cell and each of the four corners must map to an
/// in-bounds cell that is not [`CellKind::Wall`]. Every other cell type,
/// hazards and doors included, is passable here.
#[must_use]
pub fn is_blocked(grid: &MazeGrid, position: Vec2, tile_size: f32, radius: f32) -> bool {
    let samples = [
        position,
        Vec2::new(position.x - radius, position.y - radius),
        Vec2::new(position.x + radius, position.y - radius),
        Vec2::new(position.x - radius, position.y + radius),
        Vec2::new(position.x + radius, position.y + radius),
    ];

    samples.iter().any(|sample| {
        !matches!(
            grid.kind_at(pixel_to_grid(*sample, tile_size)),
            Some(kind) if kind != CellKind::Wall
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grid_to_pixel, CellCoord};
    use proptest::prelude::*;

    const TILE: f32 = 20.0;

    fn corridor() -> MazeGrid {
        let mut grid = MazeGrid::with_outer_walls(5, 5);
        grid.set(CellCoord::new(2, 2), CellKind::Wall);
        grid.set(CellCoord::new(3, 1), CellKind::HazardWall);
        grid.set(CellCoord::new(1, 3), CellKind::ClickDoor);
        grid
    }

    #[test]
    fn open_cell_center_is_free() {
        let grid = corridor();
        let center = grid_to_pixel(CellCoord::new(1, 1), TILE);
        assert!(!is_blocked(&grid, center, TILE, 6.0));
    }

    #[test]
    fn wall_center_is_blocked() {
        let grid = corridor();
        let center = grid_to_pixel(CellCoord::new(2, 2), TILE);
        assert!(is_blocked(&grid, center, TILE, 0.0));
    }

    #[test]
    fn corner_overlapping_wall_blocks() {
        let grid = corridor();
        // Centre in (1,1), right edge reaching into the wall at (2,2) diagonally.
        let position = Vec2::new(37.0, 37.0);
        assert!(is_blocked(&grid, position, TILE, 4.0));
        assert!(!is_blocked(&grid, position, TILE, 2.0));
    }

    #[test]
    fn only_walls_block() {
        let grid = corridor();
        for cell in [CellCoord::new(3, 1), CellCoord::new(1, 3)] {
            assert!(!is_blocked(&grid, grid_to_pixel(cell, TILE), TILE, 6.0));
        }
    }

    #[test]
    fn leaving_the_grid_is_blocked() {
        let grid = MazeGrid::new(3, 3);
        assert!(is_blocked(&grid, Vec2::new(-1.0, 10.0), TILE, 0.0));
        assert!(is_blocked(&grid, Vec2::new(55.0, 30.0), TILE, 6.0));
        assert!(!is_blocked(&grid, Vec2::new(50.0, 30.0), TILE, 6.0));
    }

    fn arb_walls() -> impl Strategy<Value = Vec<bool>> {
        proptest::collection::vec(any::<bool>(), 64)
    }

    proptest! {
        #[test]
        fn prop_hitbox_inside_open_cell_is_never_blocked(
            walls in arb_walls(),
            column in 0u32..8,
            row in 0u32..8,
            radius in 0.0f32..9.0,
            fx in 0.0f32..1.0,
            fy in 0.0f32..1.0,
        ) {
            let cells = walls
                .iter()
                .map(|wall| if *wall { CellKind::Wall } else { CellKind::Empty })
                .collect();
            let mut grid = MazeGrid::from_cells(8, 8, cells).expect("8x8 cells");
            let cell = CellCoord::new(column, row);
            grid.set(cell, CellKind::Empty);

            let span = (TILE - 2.0 * radius) * 0.999;
            let position = Vec2::new(
                column as f32 * TILE + radius + fx * span,
                row as f32 * TILE + radius + fy * span,
            );

            prop_assert!(!is_blocked(&grid, position, TILE, radius));
        }

        #[test]
        fn prop_wall_center_is_always_blocked(
            walls in arb_walls(),
            column in 0u32..8,
            row in 0u32..8,
            radius in 0.0f32..10.0,
        ) {
            let cells = walls
                .iter()
                .map(|wall| if *wall { CellKind::Wall } else { CellKind::Empty })
                .collect();
            let mut grid = MazeGrid::from_cells(8, 8, cells).expect("8x8 cells");
            let cell = CellCoord::new(column, row);
            grid.set(cell, CellKind::Wall);

            prop_assert!(is_blocked(&grid, grid_to_pixel(cell, TILE), TILE, radius));
        }
    }
}
