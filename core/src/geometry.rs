//! Conversions between grid cells and continuous pixel space.

use glam::Vec2;

use crate::CellCoord;

/// Pixel width of the playable map when a level does not specify one.
pub const DEFAULT_MAP_SIZE: f32 = 800.0;

/// Signed grid index produced by flooring a pixel position.
///
/// Pixels left of or above the map floor to negative indices, which grid
/// lookups treat as out of bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileIndex {
    /// Column index, possibly negative.
    pub column: i64,
    /// Row index, possibly negative.
    pub row: i64,
}

impl TileIndex {
    /// Converts the index into a cell coordinate when it lies inside the grid.
    #[must_use]
    pub fn to_cell(self, columns: u32, rows: u32) -> Option<CellCoord> {
        let column = u32::try_from(self.column).ok()?;
        let row = u32::try_from(self.row).ok()?;
        (column < columns && row < rows).then(|| CellCoord::new(column, row))
    }
}

/// Pixel centre of the provided cell.
#[must_use]
pub fn grid_to_pixel(cell: CellCoord, tile_size: f32) -> Vec2 {
    Vec2::new(
        cell.column() as f32 * tile_size + tile_size / 2.0,
        cell.row() as f32 * tile_size + tile_size / 2.0,
    )
}

/// Grid index containing the provided pixel position.
///
/// The conversion is lossy: mapping the result back through [`grid_to_pixel`]
/// yields the cell centre, not the original position.
#[must_use]
pub fn pixel_to_grid(position: Vec2, tile_size: f32) -> TileIndex {
    TileIndex {
        column: (position.x / tile_size).floor() as i64,
        row: (position.y / tile_size).floor() as i64,
    }
}

/// Pixel extent and tile size of a level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGeometry {
    columns: u32,
    rows: u32,
    tile_size: f32,
}

impl TileGeometry {
    /// Creates a geometry with an explicit tile size.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, tile_size: f32) -> Self {
        Self {
            columns,
            rows,
            tile_size,
        }
    }

    /// Fits `columns` square tiles across `map_width` pixels.
    #[must_use]
    pub fn fit_width(columns: u32, rows: u32, map_width: f32) -> Self {
        let tile_size = if columns == 0 {
            0.0
        } else {
            map_width / columns as f32
        };
        Self::new(columns, rows, tile_size)
    }

    /// Number of grid columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of grid rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square tile in pixels.
    #[must_use]
    pub const fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Total map width in pixels.
    #[must_use]
    pub fn map_width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    /// Total map height in pixels.
    #[must_use]
    pub fn map_height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Pixel centre of the provided cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        grid_to_pixel(cell, self.tile_size)
    }

    /// Cell containing the provided pixel position, if it lies on the map.
    #[must_use]
    pub fn cell_at(&self, position: Vec2) -> Option<CellCoord> {
        pixel_to_grid(position, self.tile_size).to_cell(self.columns, self.rows)
    }
}
