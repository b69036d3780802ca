//! Cell types and the dense maze grid.

use std::fmt;

use crate::{CellCoord, TileIndex};

/// Discriminant values match the codes used in level descriptors; do not reorder.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Walkable floor.
    #[default]
    Empty = 0,
    /// Solid wall that blocks motion.
    Wall = 1,
    /// Player start cell.
    Start = 2,
    /// Plain exit cell.
    Exit = 3,
    /// Door that opens after enough clicks.
    ClickDoor = 4,
    /// Spawn cell of a patrolling enemy.
    EnemySpawn = 5,
    /// Gate that opens after one passed challenge.
    VerificationGate = 6,
    /// Key pickup.
    Key = 7,
    /// Exit that only accepts the player once the key is collected.
    LockedExit = 8,
    /// Terrain that resets the attempt on contact.
    HazardWall = 9,
}

impl CellKind {
    /// Every cell type in code order.
    pub const ALL: [CellKind; 10] = [
        Self::Empty,
        Self::Wall,
        Self::Start,
        Self::Exit,
        Self::ClickDoor,
        Self::EnemySpawn,
        Self::VerificationGate,
        Self::Key,
        Self::LockedExit,
        Self::HazardWall,
    ];

    /// Decodes a descriptor code. Unknown codes are treated as [`CellKind::Empty`].
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Wall,
            2 => Self::Start,
            3 => Self::Exit,
            4 => Self::ClickDoor,
            5 => Self::EnemySpawn,
            6 => Self::VerificationGate,
            7 => Self::Key,
            8 => Self::LockedExit,
            9 => Self::HazardWall,
            _ => Self::Empty,
        }
    }

    /// Descriptor code of the cell type.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Cell types that may occur at most once per grid.
    #[must_use]
    pub const fn is_singleton(self) -> bool {
        matches!(self, Self::Start | Self::Exit | Self::Key | Self::LockedExit)
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Wall => "wall",
            Self::Start => "start",
            Self::Exit => "exit",
            Self::ClickDoor => "click door",
            Self::EnemySpawn => "enemy spawn",
            Self::VerificationGate => "verification gate",
            Self::Key => "key",
            Self::LockedExit => "locked exit",
            Self::HazardWall => "hazard wall",
        };
        f.write_str(name)
    }
}

/// Rectangular grid of cell types stored in row-major order.
///
/// Out-of-bounds reads return `None`, writes are no-ops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    columns: u32,
    rows: u32,
    cells: Vec<CellKind>,
}

impl MazeGrid {
    /// Creates a grid filled with empty floor.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let count = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![CellKind::Empty; count],
        }
    }

    /// Creates an empty grid enclosed by walls on every edge.
    #[must_use]
    pub fn with_outer_walls(columns: u32, rows: u32) -> Self {
        let mut grid = Self::new(columns, rows);
        grid.add_outer_walls();
        grid
    }

    /// Wraps pre-classified cells; returns `None` when the length does not match.
    #[must_use]
    pub fn from_cells(columns: u32, rows: u32, cells: Vec<CellKind>) -> Option<Self> {
        let expected = usize::try_from(u64::from(columns) * u64::from(rows)).ok()?;
        (cells.len() == expected).then_some(Self {
            columns,
            rows,
            cells,
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Cell type at the provided coordinate.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<CellKind> {
        self.index(cell).and_then(|index| self.cells.get(index).copied())
    }

    /// Cell type at a signed index, `None` when outside the grid.
    #[must_use]
    pub fn kind_at(&self, index: TileIndex) -> Option<CellKind> {
        index
            .to_cell(self.columns, self.rows)
            .and_then(|cell| self.get(cell))
    }

    /// Overwrites the cell type at the provided coordinate.
    pub fn set(&mut self, cell: CellCoord, kind: CellKind) {
        if let Some(slot) = self.index(cell).and_then(|index| self.cells.get_mut(index)) {
            *slot = kind;
        }
    }

    /// Turns every edge cell into a wall.
    pub fn add_outer_walls(&mut self) {
        if self.columns == 0 || self.rows == 0 {
            return;
        }
        for column in 0..self.columns {
            self.set(CellCoord::new(column, 0), CellKind::Wall);
            self.set(CellCoord::new(column, self.rows - 1), CellKind::Wall);
        }
        for row in 0..self.rows {
            self.set(CellCoord::new(0, row), CellKind::Wall);
            self.set(CellCoord::new(self.columns - 1, row), CellKind::Wall);
        }
    }

    /// Replaces every occurrence of `kind` with empty floor.
    pub fn clear_kind(&mut self, kind: CellKind) {
        for slot in self.cells.iter_mut().filter(|slot| **slot == kind) {
            *slot = CellKind::Empty;
        }
    }

    /// Writes `kind`, first clearing prior occurrences when it is a singleton type.
    pub fn place(&mut self, cell: CellCoord, kind: CellKind) {
        if !self.contains(cell) {
            return;
        }
        if kind.is_singleton() {
            self.clear_kind(kind);
        }
        self.set(cell, kind);
    }

    /// First cell of the provided type in row-major order.
    #[must_use]
    pub fn find(&self, kind: CellKind) -> Option<CellCoord> {
        self.cells_of(kind).next()
    }

    /// Cells of the provided type in row-major order.
    pub fn cells_of(&self, kind: CellKind) -> impl Iterator<Item = CellCoord> + '_ {
        self.iter()
            .filter(move |(_, candidate)| *candidate == kind)
            .map(|(cell, _)| cell)
    }

    /// Iterates every cell with its coordinate in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellKind)> + '_ {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, kind)| {
            let index = index as u64;
            let column = (index % u64::from(columns)) as u32;
            let row = (index / u64::from(columns)) as u32;
            (CellCoord::new(column, row), *kind)
        })
    }

    /// Descriptor codes laid out as `rows` vectors of `columns` entries.
    #[must_use]
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        let width = usize::try_from(self.columns).unwrap_or(0).max(1);
        self.cells
            .chunks(width)
            .map(|row| row.iter().map(|kind| kind.code()).collect())
            .collect()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}
