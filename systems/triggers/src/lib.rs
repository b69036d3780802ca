#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Trigger evaluation that turns player contact into challenges, pickups,
//! resets and level completion.

use glam::Vec2;
use maze_runner_core::{
    pixel_to_grid, CellKind, ChallengeTarget, Command, DoorId, Event, LevelDescriptor,
    ResetReason, Tuning,
};
use maze_runner_world::query::FrameSnapshot;

/// Pure system that checks the player's position against every trigger.
///
/// Checks run in a fixed priority: hazard terrain, enemies, gates, the key and
/// finally the goal. The first three end the evaluation for the tick.
#[derive(Debug, Default)]
pub struct Triggers {
    tuning: Tuning,
}

impl Triggers {
    /// Creates a trigger system with the provided tunables.
    #[must_use]
    pub const fn new(tuning: Tuning) -> Self {
        Self { tuning }
    }

    /// Evaluates triggers after the tick's movement has been applied.
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

        let tile_size = level.geometry.tile_size();
        let player = frame.player.position;

        let cell = level.grid.kind_at(pixel_to_grid(player, tile_size));
        if cell == Some(CellKind::HazardWall) {
            out.push(Command::ResetAttempt {
                reason: ResetReason::Hazard,
            });
            return;
        }

        let enemy_radius = self.tuning.enemy_trigger_factor * tile_size;
        if let Some(enemy) = frame
            .enemies
            .iter()
            .find(|enemy| enemy.alive && within(player, enemy.position, enemy_radius))
        {
            out.push(Command::BeginChallenge {
                target: ChallengeTarget::Enemy(enemy.id),
            });
            return;
        }

        let gate_radius = self.tuning.gate_trigger_factor * tile_size;
        if let Some(gate) = frame
            .gates
            .iter()
            .find(|gate| !gate.removed && within(player, gate.position, gate_radius))
        {
            out.push(Command::BeginChallenge {
                target: ChallengeTarget::Gate(gate.id),
            });
            return;
        }

        let goal_radius = self.tuning.goal_factor * tile_size;
        let mut has_key = frame.key.is_some_and(|key| key.collected);
        if let Some(key) = frame.key {
            if !key.collected && within(player, key.position, goal_radius) {
                out.push(Command::CollectKey);
                has_key = true;
            }
        }

        let (goal, needs_key) = level.goal();
        if within(player, goal, goal_radius) && (!needs_key || has_key) {
            out.push(Command::CompleteLevel);
        }
    }

    /// First unopened door close enough for the player to click.
    #[must_use]
    pub fn door_in_reach(&self, level: &LevelDescriptor, frame: &FrameSnapshot) -> Option<DoorId> {
        let reach = self.tuning.door_reach_factor * level.geometry.tile_size();
        frame
            .doors
            .iter()
            .find(|door| !door.removed && within(frame.player.position, door.position, reach))
            .map(|door| door.id)
    }
}

fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}

#[cfg(test)]
mod tests {
    use super::within;
    use glam::Vec2;

    #[test]
    fn reach_is_exclusive() {
        assert!(within(Vec2::ZERO, Vec2::new(9.99, 0.0), 10.0));
        assert!(!within(Vec2::ZERO, Vec2::new(10.0, 0.0), 10.0));
    }
}
