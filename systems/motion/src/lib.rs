#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player motion system integrating acceleration, friction and wall collision.

use glam::Vec2;
use maze_runner_core::{is_blocked, Command, DoorSnapshot, Event, LevelDescriptor, PlayerSnapshot, Tuning};
use maze_runner_world::query::FrameSnapshot;

/// Scale applied to each axis when two perpendicular keys are held.
const DIAGONAL_FACTOR: f32 = 0.707;

/// Pure system that advances the player once per simulated tick.
#[derive(Debug, Default)]
pub struct Motion {
    tuning: Tuning,
}

impl Motion {
    /// Creates a motion system with the provided tunables.
    #[must_use]
    pub const fn new(tuning: Tuning) -> Self {
        Self { tuning }
    }

    /// Consumes tick events and the current frame to emit a player move.
    ///
    /// Nothing is emitted while the attempt is paused or completed, or when
    /// the tick leaves the player exactly where it was.
    pub fn handle(
        &self,
        events: &[Event],
        level: &LevelDescriptor,
        frame: &FrameSnapshot,
        out: &mut Vec<Command>,
    ) {
        if !frame.play_state.is_running() {
            return;
        }
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        let step = self.step(level, &frame.player, &frame.doors);
        let unchanged = step.position == frame.player.position
            && step.velocity == frame.player.velocity
            && !step.reached_waypoint;
        if !unchanged {
            out.push(Command::MovePlayer {
                position: step.position,
                velocity: step.velocity,
                reached_waypoint: step.reached_waypoint,
            });
        }
    }

    /// Computes the player's position and velocity after one tick.
    #[must_use]
    pub fn step(
        &self,
        level: &LevelDescriptor,
        player: &PlayerSnapshot,
        doors: &[DoorSnapshot],
    ) -> MotionStep {
        let tuning = &self.tuning;
        let geometry = &level.geometry;
        let tile_size = geometry.tile_size();
        let origin = player.position;

        let (target, reached_waypoint) = self.target_velocity(player, tile_size);
        let mut velocity = Vec2::new(
            self.blend(player.velocity.x, target.x),
            self.blend(player.velocity.y, target.y),
        );

        let halted = MotionStep {
            position: origin,
            velocity: Vec2::ZERO,
            reached_waypoint,
        };
        if velocity == Vec2::ZERO {
            return halted;
        }

        let candidate = origin + velocity;
        let radius = tuning.actor_radius;
        let blocked_x = is_blocked(&level.grid, Vec2::new(candidate.x, origin.y), tile_size, radius);
        let blocked_y = is_blocked(&level.grid, Vec2::new(origin.x, candidate.y), tile_size, radius);
        if blocked_x && blocked_y {
            return halted;
        }

        let mut next = candidate;
        if blocked_x {
            next.x = origin.x;
            velocity.x = 0.0;
        }
        if blocked_y {
            next.y = origin.y;
            velocity.y = 0.0;
        }

        let door_radius = tuning.goal_factor * tile_size;
        if doors
            .iter()
            .any(|door| !door.removed && next.distance(door.position) < door_radius)
        {
            return halted;
        }

        let (x, clamped_x) = clamp_axis(next.x, radius, geometry.map_width() - radius);
        let (y, clamped_y) = clamp_axis(next.y, radius, geometry.map_height() - radius);
        if clamped_x {
            velocity.x = 0.0;
        }
        if clamped_y {
            velocity.y = 0.0;
        }

        MotionStep {
            position: Vec2::new(x, y),
            velocity,
            reached_waypoint,
        }
    }

    fn target_velocity(&self, player: &PlayerSnapshot, tile_size: f32) -> (Vec2, bool) {
        let speed = self.tuning.player_speed;

        if !player.held.is_empty() {
            let axes = player.held.axes();
            let mut target = axes * speed;
            if axes.x != 0.0 && axes.y != 0.0 {
                target *= DIAGONAL_FACTOR;
            }
            return (target, false);
        }

        let Some(head) = player.path_head else {
            return (Vec2::ZERO, false);
        };
        let offset = head - player.position;
        let distance = offset.length();
        if distance < self.tuning.waypoint_reach_factor * tile_size {
            (Vec2::ZERO, true)
        } else {
            (offset / distance * speed, false)
        }
    }

    fn blend(&self, current: f32, target: f32) -> f32 {
        let next = if target == 0.0 {
            current * self.tuning.friction
        } else {
            current + (target - current) * self.tuning.acceleration
        };
        if next.abs() < self.tuning.velocity_epsilon {
            0.0
        } else {
            next
        }
    }
}

/// Outcome of a single motion tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionStep {
    /// Resolved player position.
    pub position: Vec2,
    /// Velocity carried into the next tick.
    pub velocity: Vec2,
    /// Whether the head of the queued path was reached.
    pub reached_waypoint: bool,
}

fn clamp_axis(value: f32, min: f32, max: f32) -> (f32, bool) {
    if value < min || value >= max {
        (value.min(max).max(min), true)
    } else {
        (value, false)
    }
}
