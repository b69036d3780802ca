#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Runner engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.
//!
//! Static maze geometry lives in [`MazeGrid`]; pixel and grid space only
//! interconvert through [`grid_to_pixel`] and [`pixel_to_grid`].

mod collision;
mod geometry;
mod grid;
mod level;
mod tuning;

use std::{fmt, time::Duration};

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use collision::is_blocked;
pub use geometry::{grid_to_pixel, pixel_to_grid, TileGeometry, TileIndex, DEFAULT_MAP_SIZE};
pub use grid::{CellKind, MazeGrid};
pub use level::{DoorSpec, EnemySpec, GateSpec, LevelDescriptor, LevelId};
pub use tuning::Tuning;

/// Glyph shown for the player when no preference has been persisted.
pub const DEFAULT_PLAYER_GLYPH: &str = "\u{1f464}";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the active level and starts a fresh attempt with a zeroed retry counter.
    LoadLevel {
        /// Immutable descriptor of the level to play.
        level: Box<LevelDescriptor>,
    },
    /// Restarts the current attempt on player request.
    Restart,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Marks a directional key as held.
    PressDirection {
        /// Direction whose key went down.
        direction: Direction,
    },
    /// Marks a directional key as released.
    ReleaseDirection {
        /// Direction whose key went up.
        direction: Direction,
    },
    /// Starts drawing a pointer path at the provided map position.
    BeginPath {
        /// Pointer location expressed in pixel space.
        at: Vec2,
    },
    /// Appends a point to the path currently being drawn.
    ExtendPath {
        /// Pointer location expressed in pixel space.
        at: Vec2,
    },
    /// Finishes the drawn path and queues it for the player to follow.
    FinishPath,
    /// Commits the player position computed by the motion system.
    MovePlayer {
        /// Resolved player position after collision handling.
        position: Vec2,
        /// Velocity carried into the next tick.
        velocity: Vec2,
        /// Whether the head of the queued path was reached this tick.
        reached_waypoint: bool,
    },
    /// Commits an enemy position computed by the patrol system.
    MoveEnemy {
        /// Identifier of the enemy that moved.
        enemy: EnemyId,
        /// Interpolated enemy position.
        position: Vec2,
        /// Index of the waypoint most recently reached.
        path_index: usize,
    },
    /// Registers a single click on a click-door.
    ClickDoor {
        /// Identifier of the clicked door.
        door: DoorId,
    },
    /// Pauses the attempt while a challenge is answered.
    BeginChallenge {
        /// Entity whose challenge was triggered.
        target: ChallengeTarget,
    },
    /// Reports the outcome of an enemy challenge.
    ResolveEnemyChallenge {
        /// Whether the player answered correctly.
        correct: bool,
    },
    /// Reports the outcome of a verification gate challenge.
    ResolveGateChallenge {
        /// Whether the player answered correctly.
        correct: bool,
    },
    /// Marks the level key as collected.
    CollectKey,
    /// Resets the attempt after a fatal game event.
    ResetAttempt {
        /// Reason the attempt ended.
        reason: ResetReason,
    },
    /// Finishes the attempt successfully.
    CompleteLevel,
    /// Adds one whole second to the attempt timer.
    AdvanceClock,
    /// Replaces cosmetic preferences that carry no gameplay effect.
    SetCosmetics {
        /// New cosmetic preferences.
        cosmetics: Cosmetics,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that a level was loaded and a fresh attempt began.
    LevelLoaded {
        /// Identifier of the loaded level.
        level: LevelId,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the first movement input of the attempt started the timer.
    TimerStarted,
    /// Confirms that the player moved.
    PlayerMoved {
        /// Position before the move.
        from: Vec2,
        /// Position after the move.
        to: Vec2,
    },
    /// Confirms that an enemy moved along its patrol.
    EnemyMoved {
        /// Identifier of the enemy.
        enemy: EnemyId,
        /// Position after the move.
        to: Vec2,
    },
    /// Confirms that a door registered a click.
    DoorClicked {
        /// Identifier of the door.
        door: DoorId,
        /// Clicks accumulated so far in this attempt.
        clicks: u32,
        /// Clicks needed to open the door.
        required: u32,
    },
    /// Announces that a door became permanently passable.
    DoorOpened {
        /// Identifier of the opened door.
        door: DoorId,
    },
    /// Announces that a challenge paused the attempt.
    ChallengeStarted {
        /// Entity whose challenge is active.
        target: ChallengeTarget,
    },
    /// Announces that a challenge was answered.
    ChallengeResolved {
        /// Entity whose challenge was answered.
        target: ChallengeTarget,
        /// Whether the answer was correct.
        correct: bool,
    },
    /// Announces that the key was picked up.
    KeyCollected,
    /// Announces that the attempt was reset to its initial state.
    AttemptReset {
        /// Reason the attempt ended.
        reason: ResetReason,
        /// Retry counter after the reset.
        retries: u32,
    },
    /// Reports the attempt timer after a whole second elapsed.
    ClockAdvanced {
        /// Whole seconds elapsed in the attempt.
        elapsed_seconds: u32,
    },
    /// Announces that the level was completed.
    LevelCompleted {
        /// Identifier of the completed level.
        level: LevelId,
        /// Frozen attempt time in whole seconds.
        elapsed_seconds: u32,
    },
    /// Announces that the attempt entered a new play state.
    PlayStateChanged {
        /// State that became active.
        state: PlayState,
    },
}

/// Lifecycle state of the current attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayState {
    /// Player and enemies advance every tick.
    Running,
    /// A modal challenge is active and the simulation is frozen.
    Challenge(ChallengeTarget),
    /// The exit was reached; elapsed time is frozen.
    Completed,
}

impl PlayState {
    /// Reports whether the per-tick loops should advance.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Entity whose challenge pauses the attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChallengeTarget {
    /// A live enemy touched the player.
    Enemy(EnemyId),
    /// The player approached a closed verification gate.
    Gate(GateId),
}

/// Reasons an attempt may be reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResetReason {
    /// The player entered a hazard wall.
    Hazard,
    /// The player answered a challenge incorrectly.
    FailedChallenge,
    /// The player asked to start over.
    Restart,
}

impl fmt::Display for ResetReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hazard => write!(f, "hazard"),
            Self::FailedChallenge => write!(f, "failed challenge"),
            Self::Restart => write!(f, "restart"),
        }
    }
}

/// Directional inputs available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    const fn bit(self) -> u8 {
        match self {
            Self::North => 0b0001,
            Self::East => 0b0010,
            Self::South => 0b0100,
            Self::West => 0b1000,
        }
    }
}

/// Set of directional keys currently held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HeldDirections {
    bits: u8,
}

impl HeldDirections {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Adds a direction to the set.
    pub fn press(&mut self, direction: Direction) {
        self.bits |= direction.bit();
    }

    /// Removes a direction from the set.
    pub fn release(&mut self, direction: Direction) {
        self.bits &= !direction.bit();
    }

    /// Reports whether the direction is held.
    #[must_use]
    pub const fn contains(&self, direction: Direction) -> bool {
        self.bits & direction.bit() != 0
    }

    /// Reports whether no direction is held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Releases every direction.
    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Net axis contributions of the held keys in screen space.
    ///
    /// Opposing keys cancel, so holding west and east yields zero on the x axis.
    #[must_use]
    pub fn axes(&self) -> Vec2 {
        let mut axes = Vec2::ZERO;
        if self.contains(Direction::North) {
            axes.y -= 1.0;
        }
        if self.contains(Direction::South) {
            axes.y += 1.0;
        }
        if self.contains(Direction::West) {
            axes.x -= 1.0;
        }
        if self.contains(Direction::East) {
            axes.x += 1.0;
        }
        axes
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Unique identifier assigned to a click-door.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DoorId(u32);

impl DoorId {
    /// Creates a new door identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a verification gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GateId(u32);

impl GateId {
    /// Creates a new gate identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Language tag used by collaborators that render text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Turkish copy.
    #[default]
    Turkish,
    /// English copy.
    English,
}

/// Cosmetic preferences with no gameplay effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cosmetics {
    /// Language used by externally rendered text.
    pub language: Language,
    /// Persisted glyph used to draw the player.
    pub player_glyph: String,
}

impl Default for Cosmetics {
    fn default() -> Self {
        Self {
            language: Language::default(),
            player_glyph: DEFAULT_PLAYER_GLYPH.to_owned(),
        }
    }
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Continuous pixel position of the player's centre.
    pub position: Vec2,
    /// Velocity in pixels per tick.
    pub velocity: Vec2,
    /// Directional keys currently held.
    pub held: HeldDirections,
    /// Head of the queued pointer path, if any.
    pub path_head: Option<Vec2>,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Current interpolated pixel position.
    pub position: Vec2,
    /// Index of the waypoint most recently reached.
    pub path_index: usize,
    /// Index of the waypoint the enemy is heading toward.
    pub next_index: usize,
    /// Waypoint the enemy is heading toward; `None` for an empty path.
    pub next_waypoint: Option<Vec2>,
    /// Whether the enemy still patrols and triggers challenges.
    pub alive: bool,
}

/// Immutable representation of a click-door used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorSnapshot {
    /// Unique identifier assigned to the door.
    pub id: DoorId,
    /// Pixel centre of the door's cell.
    pub position: Vec2,
    /// Clicks needed to open the door.
    pub required_clicks: u32,
    /// Clicks accumulated in this attempt.
    pub clicks: u32,
    /// Whether the door has been opened.
    pub removed: bool,
}

/// Immutable representation of a verification gate used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GateSnapshot {
    /// Unique identifier assigned to the gate.
    pub id: GateId,
    /// Pixel centre of the gate's cell.
    pub position: Vec2,
    /// Whether the gate has been passed.
    pub removed: bool,
}

/// Immutable representation of the key used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeySnapshot {
    /// Pixel centre of the key's cell.
    pub position: Vec2,
    /// Whether the key was picked up in this attempt.
    pub collected: bool,
}
