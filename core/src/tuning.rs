//! Tunable constants for motion, patrol and trigger ranges.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Gameplay tunables. Distances are pixels, factors are multiples of the tile size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Top player speed in pixels per tick.
    pub player_speed: f32,
    /// Enemy speed in pixels per nominal frame.
    pub enemy_speed: f32,
    /// Half-width of the square hitbox shared by player and enemies.
    pub actor_radius: f32,
    /// Blend factor pulling velocity toward the target velocity, in (0, 1].
    pub acceleration: f32,
    /// Per-tick velocity multiplier on axes without input, in (0, 1].
    pub friction: f32,
    /// Velocity components below this magnitude snap to zero.
    pub velocity_epsilon: f32,
    /// Distance at which a drawn-path waypoint counts as reached.
    pub waypoint_reach_factor: f32,
    /// Distance at which an enemy snaps onto its next waypoint.
    pub enemy_snap_distance: f32,
    /// Frame length the enemy speed is expressed against, in milliseconds.
    pub nominal_frame_ms: f32,
    /// Upper bound on the frame-time multiplier applied to enemy motion.
    pub max_frame_factor: f32,
    /// Proximity to a live enemy that starts its challenge.
    pub enemy_trigger_factor: f32,
    /// Proximity to a closed gate that starts its challenge.
    pub gate_trigger_factor: f32,
    /// Proximity to a closed door that offers the click action.
    pub door_reach_factor: f32,
    /// Proximity to goals and pickups, and the radius of a closed door.
    pub goal_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 2.75,
            enemy_speed: 2.5,
            actor_radius: 6.0,
            acceleration: 0.45,
            friction: 0.9,
            velocity_epsilon: 0.1,
            waypoint_reach_factor: 0.3,
            enemy_snap_distance: 1.5,
            nominal_frame_ms: 16.67,
            max_frame_factor: 2.0,
            enemy_trigger_factor: 0.7,
            gate_trigger_factor: 1.2,
            door_reach_factor: 1.2,
            goal_factor: 0.5,
        }
    }
}

impl Tuning {
    /// Multiplier applied to enemy speed for a frame of length `dt`.
    ///
    /// Long frames are capped at [`Tuning::max_frame_factor`] so hitches never
    /// produce large jumps.
    #[must_use]
    pub fn frame_factor(&self, dt: Duration) -> f32 {
        if self.nominal_frame_ms <= 0.0 {
            return 0.0;
        }
        let elapsed_ms = dt.as_secs_f32() * 1000.0;
        (elapsed_ms / self.nominal_frame_ms).min(self.max_frame_factor)
    }
}
