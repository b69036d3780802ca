#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy patrol system that walks live enemies along their cyclic waypoints.

use std::time::Duration;

use maze_runner_core::{is_blocked, Command, EnemySnapshot, Event, LevelDescriptor, Tuning};
use maze_runner_world::query::FrameSnapshot;

/// Pure system that interpolates enemies toward their next waypoint.
#[derive(Debug, Default)]
pub struct Patrol {
    tuning: Tuning,
}

impl Patrol {
    /// Creates a patrol system with the provided tunables.
    #[must_use]
    pub const fn new(tuning: Tuning) -> Self {
        Self { tuning }
    }

    /// Consumes tick events and the current frame to emit enemy moves.
    ///
    /// Speed scales with the elapsed time of the batch, capped at the
    /// configured multiple of the nominal frame.
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

        let mut elapsed = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                elapsed = elapsed.saturating_add(*dt);
            }
        }
        if elapsed.is_zero() {
            return;
        }

        let factor = self.tuning.frame_factor(elapsed);
        for enemy in frame.enemies.iter().filter(|enemy| enemy.alive) {
            if let Some(command) = self.advance(level, enemy, factor) {
                out.push(command);
            }
        }
    }

    fn advance(
        &self,
        level: &LevelDescriptor,
        enemy: &EnemySnapshot,
        factor: f32,
    ) -> Option<Command> {
        let target = enemy.next_waypoint?;
        let arrive = Command::MoveEnemy {
            enemy: enemy.id,
            position: target,
            path_index: enemy.next_index,
        };

        let offset = target - enemy.position;
        let distance = offset.length();
        if distance < self.tuning.enemy_snap_distance {
            let settled = enemy.path_index == enemy.next_index && enemy.position == target;
            return (!settled).then_some(arrive);
        }

        let candidate = enemy.position + offset / distance * self.tuning.enemy_speed * factor;
        let tile_size = level.geometry.tile_size();
        if is_blocked(&level.grid, candidate, tile_size, self.tuning.actor_radius) {
            // Skip ahead rather than stall against the wall.
            return (enemy.path_index != enemy.next_index).then_some(arrive);
        }

        Some(Command::MoveEnemy {
            enemy: enemy.id,
            position: candidate,
            path_index: enemy.path_index,
        })
    }
}
