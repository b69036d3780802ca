//! Portable maze descriptor exchanged with editors and storage.

use maze_runner_core::{CellCoord, CellKind, MazeGrid};
use serde::{Deserialize, Serialize};

use crate::CodecError;

/// Largest width or height a descriptor may declare.
pub const MAX_DIMENSION: u32 = 1000;

/// Grid coordinate as written in descriptors.
///
/// Components are signed so that malformed documents decode and fail
/// validation instead of failing to parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    /// Column index.
    pub x: i64,
    /// Row index.
    pub y: i64,
}

impl GridPoint {
    /// Creates a new grid point.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Converts the point into a cell coordinate when both components are non-negative.
    #[must_use]
    pub fn to_cell(self) -> Option<CellCoord> {
        Some(CellCoord::new(
            u32::try_from(self.x).ok()?,
            u32::try_from(self.y).ok()?,
        ))
    }
}

impl From<CellCoord> for GridPoint {
    fn from(cell: CellCoord) -> Self {
        Self::new(i64::from(cell.column()), i64::from(cell.row()))
    }
}

/// Click-door entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorConfig {
    /// Cell occupied by the door.
    pub position: GridPoint,
    /// Clicks needed to open the door; a per-index default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_clicks: Option<u32>,
}

/// Verification gate entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Cell occupied by the gate.
    pub position: GridPoint,
}

/// Enemy entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyConfig {
    /// Spawn cell.
    pub position: GridPoint,
    /// Cyclic patrol in grid coordinates; empty means stationary at the spawn.
    #[serde(default)]
    pub path: Vec<GridPoint>,
}

/// Key entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyConfig {
    /// Identifier assigned by the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Cell occupied by the key.
    pub position: GridPoint,
}

/// Width, height, optional raw matrix and entity lists of a maze.
///
/// Every section other than the dimensions is optional and decodes to an
/// empty or absent value when missing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeConfig {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Raw cell codes laid out as `height` rows of `width` entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Vec<Vec<i64>>>,
    /// Start cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<GridPoint>,
    /// Plain exit cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<GridPoint>,
    /// Key pickup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyConfig>,
    /// Exit that requires the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_exit: Option<GridPoint>,
    /// Click-doors.
    #[serde(default)]
    pub doors: Vec<DoorConfig>,
    /// Verification gates.
    #[serde(default)]
    pub verification_doors: Vec<GateConfig>,
    /// Enemies. When absent, every enemy spawn cell receives a default patrol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enemies: Option<Vec<EnemyConfig>>,
}

impl MazeConfig {
    /// Creates a descriptor with the provided dimensions and no other sections.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            matrix: None,
            start: None,
            exit: None,
            key: None,
            locked_exit: None,
            doors: Vec::new(),
            verification_doors: Vec::new(),
            enemies: None,
        }
    }

    /// Parses and validates a JSON descriptor.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises the descriptor as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks dimensions, matrix shape and entity placement.
    ///
    /// Enemy patrol waypoints are not checked; waypoints that leave the grid
    /// are skipped by the patrol at runtime.
    pub fn validate(&self) -> Result<(), CodecError> {
        let dimensions_valid = (1..=MAX_DIMENSION).contains(&self.width)
            && (1..=MAX_DIMENSION).contains(&self.height);
        if !dimensions_valid {
            return Err(CodecError::InvalidDimensions {
                width: self.width,
                height: self.height,
                max: MAX_DIMENSION,
            });
        }

        if let Some(matrix) = &self.matrix {
            let expected = matrix.first().map_or(0, Vec::len);
            if let Some((row, found)) = matrix
                .iter()
                .map(Vec::len)
                .enumerate()
                .find(|(_, len)| *len != expected)
            {
                return Err(CodecError::RaggedMatrix {
                    row,
                    expected,
                    found,
                });
            }

            let width_matches = usize::try_from(self.width).is_ok_and(|width| width == expected);
            let height_matches =
                usize::try_from(self.height).is_ok_and(|height| height == matrix.len());
            if !width_matches || !height_matches {
                return Err(CodecError::DimensionMismatch {
                    columns: expected,
                    rows: matrix.len(),
                    width: self.width,
                    height: self.height,
                });
            }
        }

        for (entity, point) in self.entity_positions() {
            if !self.contains(point) {
                return Err(CodecError::OutOfBounds {
                    entity,
                    x: point.x,
                    y: point.y,
                    width: self.width,
                    height: self.height,
                });
            }
        }

        Ok(())
    }

    /// Base geometry with every listed entity stamped on top.
    ///
    /// The raw matrix is used verbatim when present; otherwise the grid is
    /// empty floor enclosed by walls. Unknown codes decode as empty floor.
    #[must_use]
    pub fn to_grid(&self) -> MazeGrid {
        let mut grid = match &self.matrix {
            Some(matrix) => {
                let cells = matrix
                    .iter()
                    .flat_map(|row| row.iter().map(|code| CellKind::from_code(*code)))
                    .collect();
                MazeGrid::from_cells(self.width, self.height, cells)
                    .unwrap_or_else(|| MazeGrid::with_outer_walls(self.width, self.height))
            }
            None => MazeGrid::with_outer_walls(self.width, self.height),
        };

        let mut stamp = |point: GridPoint, kind: CellKind| {
            if let Some(cell) = point.to_cell() {
                grid.place(cell, kind);
            }
        };

        if let Some(start) = self.start {
            stamp(start, CellKind::Start);
        }
        if let Some(exit) = self.exit {
            stamp(exit, CellKind::Exit);
        }
        for door in &self.doors {
            stamp(door.position, CellKind::ClickDoor);
        }
        for enemy in self.enemies.iter().flatten() {
            stamp(enemy.position, CellKind::EnemySpawn);
        }
        for gate in &self.verification_doors {
            stamp(gate.position, CellKind::VerificationGate);
        }
        if let Some(key) = &self.key {
            stamp(key.position, CellKind::Key);
        }
        if let Some(locked_exit) = self.locked_exit {
            stamp(locked_exit, CellKind::LockedExit);
        }

        grid
    }

    fn contains(&self, point: GridPoint) -> bool {
        (0..i64::from(self.width)).contains(&point.x) && (0..i64::from(self.height)).contains(&point.y)
    }

    fn entity_positions(&self) -> Vec<(&'static str, GridPoint)> {
        let mut positions = Vec::new();
        if let Some(start) = self.start {
            positions.push(("start", start));
        }
        if let Some(exit) = self.exit {
            positions.push(("exit", exit));
        }
        if let Some(key) = &self.key {
            positions.push(("key", key.position));
        }
        if let Some(locked_exit) = self.locked_exit {
            positions.push(("locked exit", locked_exit));
        }
        positions.extend(self.doors.iter().map(|door| ("door", door.position)));
        positions.extend(
            self.verification_doors
                .iter()
                .map(|gate| ("verification gate", gate.position)),
        );
        positions.extend(
            self.enemies
                .iter()
                .flatten()
                .map(|enemy| ("enemy", enemy.position)),
        );
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_alone_decode() {
        let config = MazeConfig::from_json(r#"{ "width": 12, "height": 9 }"#).expect("decodes");
        assert_eq!(config, MazeConfig::new(12, 9));
        assert!(config.enemies.is_none());
    }

    #[test]
    fn missing_height_is_rejected() {
        let error = MazeConfig::from_json(r#"{ "width": 12 }"#).expect_err("height required");
        assert!(matches!(error, CodecError::Json(_)));
        assert!(error.to_string().contains("height"));
    }

    #[test]
    fn zero_width_is_rejected() {
        let error = MazeConfig::from_json(r#"{ "width": 0, "height": 9 }"#).expect_err("invalid");
        assert!(matches!(error, CodecError::InvalidDimensions { .. }));
    }

    #[test]
    fn ragged_matrix_is_rejected() {
        let json = r#"{ "width": 3, "height": 2, "matrix": [[1, 1, 1], [1, 0]] }"#;
        let error = MazeConfig::from_json(json).expect_err("ragged");
        assert!(matches!(
            error,
            CodecError::RaggedMatrix {
                row: 1,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn matrix_must_match_declared_dimensions() {
        let json = r#"{ "width": 4, "height": 2, "matrix": [[1, 1, 1], [1, 0, 1]] }"#;
        let error = MazeConfig::from_json(json).expect_err("mismatch");
        assert!(matches!(error, CodecError::DimensionMismatch { .. }));
    }

    #[test]
    fn entities_outside_the_grid_are_rejected() {
        let json = r#"{ "width": 5, "height": 5, "doors": [{ "position": { "x": 5, "y": 1 } }] }"#;
        let error = MazeConfig::from_json(json).expect_err("out of bounds");
        assert!(matches!(
            error,
            CodecError::OutOfBounds {
                entity: "door",
                x: 5,
                y: 1,
                ..
            }
        ));
    }

    #[test]
    fn grid_without_matrix_has_outer_walls_and_entities() {
        let mut config = MazeConfig::new(6, 6);
        config.start = Some(GridPoint::new(1, 1));
        config.doors.push(DoorConfig {
            position: GridPoint::new(3, 3),
            required_clicks: None,
        });
        let grid = config.to_grid();
        assert_eq!(grid.get(CellCoord::new(0, 3)), Some(CellKind::Wall));
        assert_eq!(grid.get(CellCoord::new(1, 1)), Some(CellKind::Start));
        assert_eq!(grid.get(CellCoord::new(3, 3)), Some(CellKind::ClickDoor));
        assert_eq!(grid.get(CellCoord::new(2, 2)), Some(CellKind::Empty));
    }

    #[test]
    fn listed_start_replaces_matrix_start() {
        let json = r#"{
            "width": 3, "height": 3,
            "matrix": [[2, 0, 0], [0, 42, 0], [0, 0, 0]],
            "start": { "x": 2, "y": 2 }
        }"#;
        let grid = MazeConfig::from_json(json).expect("decodes").to_grid();
        assert_eq!(grid.cells_of(CellKind::Start).collect::<Vec<_>>(), vec![CellCoord::new(2, 2)]);
        assert_eq!(grid.get(CellCoord::new(1, 1)), Some(CellKind::Empty));
    }

    #[test]
    fn json_uses_camel_case_section_names() {
        let mut config = MazeConfig::new(5, 5);
        config.locked_exit = Some(GridPoint::new(3, 3));
        config.verification_doors.push(GateConfig {
            position: GridPoint::new(2, 2),
        });
        let json = config.to_json_pretty().expect("serialises");
        assert!(json.contains("\"lockedExit\""));
        assert!(json.contains("\"verificationDoors\""));
        assert_eq!(MazeConfig::from_json(&json).expect("decodes"), config);
    }
}
