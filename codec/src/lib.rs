#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Conversion between portable maze descriptors and playable levels.
//!
//! A [`MazeConfig`] is the JSON document stored by editors and persistence
//! collaborators. [`build_level`] turns it into the immutable
//! [`LevelDescriptor`](maze_runner_core::LevelDescriptor) the world consumes,
//! and [`scan_grid`] encodes a live grid back into a descriptor. Share codes
//! wrap a descriptor in a single line for clipboard transfer.

mod config;
mod error;
mod generate;
mod level;
mod scan;
mod share;

pub use config::{DoorConfig, EnemyConfig, GateConfig, GridPoint, KeyConfig, MazeConfig, MAX_DIMENSION};
pub use error::{CodecError, ShareCodeError};
pub use generate::{generate_maze, GeneratorConfig};
pub use level::{build_level, default_door_clicks, default_patrol, DEFAULT_DOOR_CLICKS};
pub use scan::{scan_grid, EntityOverrides};
pub use share::{decode_share_code, encode_share_code, SHARE_CODE_HEADER};
