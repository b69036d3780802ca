#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Runner.
//!
//! The world owns the runtime overlay of the active level: player position and
//! velocity, held input, door click counts, gate and enemy liveness, the key
//! flag, the attempt timer and the retry counter. The level descriptor itself
//! is never mutated. Every change flows through [`apply`].

use std::collections::VecDeque;

use glam::Vec2;
use maze_runner_core::{
    ChallengeTarget, Command, Cosmetics, DoorId, DoorSpec, EnemyId, EnemySpec, Event, GateSpec,
    HeldDirections, LevelDescriptor, PlayState, ResetReason,
};
use tracing::{debug, info};

/// Represents the authoritative Maze Runner world state.
#[derive(Debug)]
pub struct World {
    level: Option<Box<LevelDescriptor>>,
    player: Player,
    input: Input,
    doors: Vec<Door>,
    gates: Vec<Gate>,
    enemies: Vec<Enemy>,
    key_collected: bool,
    play_state: PlayState,
    clock: AttemptClock,
    retries: u32,
    cosmetics: Cosmetics,
}

impl World {
    /// Creates an empty world that waits for a level to be loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: None,
            player: Player::default(),
            input: Input::default(),
            doors: Vec::new(),
            gates: Vec::new(),
            enemies: Vec::new(),
            key_collected: false,
            play_state: PlayState::Running,
            clock: AttemptClock::default(),
            retries: 0,
            cosmetics: Cosmetics::default(),
        }
    }

    fn reset_attempt(&mut self) {
        let Some(level) = self.level.as_deref() else {
            return;
        };

        self.player = Player {
            position: level.start,
            velocity: Vec2::ZERO,
        };
        self.input = Input::default();
        self.doors = level.doors.iter().copied().map(Door::closed).collect();
        self.gates = level.gates.iter().copied().map(Gate::closed).collect();
        self.enemies = level.enemies.iter().map(Enemy::from_spec).collect();
        self.key_collected = false;
        self.clock = AttemptClock::default();
    }

    fn end_attempt(&mut self, reason: ResetReason, out_events: &mut Vec<Event>) {
        self.reset_attempt();
        self.retries = self.retries.saturating_add(1);
        info!(%reason, retries = self.retries, "attempt reset");
        out_events.push(Event::AttemptReset {
            reason,
            retries: self.retries,
        });
        self.set_play_state(PlayState::Running, out_events);
    }

    fn set_play_state(&mut self, state: PlayState, out_events: &mut Vec<Event>) {
        if self.play_state != state {
            self.play_state = state;
            out_events.push(Event::PlayStateChanged { state });
        }
    }

    fn start_timer(&mut self, out_events: &mut Vec<Event>) {
        if !self.clock.started {
            self.clock.started = true;
            debug!("attempt timer started");
            out_events.push(Event::TimerStarted);
        }
    }

    fn accepts_input(&self) -> bool {
        self.level.is_some() && self.play_state.is_running()
    }

    fn challenge_is_live(&self, target: ChallengeTarget) -> bool {
        match target {
            ChallengeTarget::Enemy(id) => self
                .enemies
                .iter()
                .any(|enemy| enemy.spec.id == id && enemy.alive),
            ChallengeTarget::Gate(id) => self
                .gates
                .iter()
                .any(|gate| gate.spec.id == id && !gate.removed),
        }
    }

    fn resolve_challenge(
        &mut self,
        target: ChallengeTarget,
        correct: bool,
        out_events: &mut Vec<Event>,
    ) {
        debug!(?target, correct, "challenge resolved");
        out_events.push(Event::ChallengeResolved { target, correct });

        if !correct {
            self.end_attempt(ResetReason::FailedChallenge, out_events);
            return;
        }

        match target {
            ChallengeTarget::Enemy(id) => {
                if let Some(enemy) = self.enemy_mut(id) {
                    enemy.alive = false;
                }
            }
            ChallengeTarget::Gate(id) => {
                if let Some(gate) = self.gates.iter_mut().find(|gate| gate.spec.id == id) {
                    gate.removed = true;
                }
            }
        }
        self.set_play_state(PlayState::Running, out_events);
    }

    fn click_door(&mut self, door_id: DoorId, out_events: &mut Vec<Event>) {
        let Some(door) = self.doors.iter_mut().find(|door| door.spec.id == door_id) else {
            return;
        };
        if door.removed {
            return;
        }

        door.clicks = door.clicks.saturating_add(1);
        out_events.push(Event::DoorClicked {
            door: door_id,
            clicks: door.clicks,
            required: door.spec.required_clicks,
        });

        if door.clicks >= door.spec.required_clicks {
            door.removed = true;
            debug!(door = door_id.get(), clicks = door.clicks, "door opened");
            out_events.push(Event::DoorOpened { door: door_id });
        }
    }

    fn enemy_mut(&mut self, enemy_id: EnemyId) -> Option<&mut Enemy> {
        self.enemies
            .iter_mut()
            .find(|enemy| enemy.spec.id == enemy_id)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadLevel { level } => {
            let id = level.id.clone();
            info!(
                level = %id,
                name = %level.name,
                columns = level.grid.columns(),
                rows = level.grid.rows(),
                "level loaded"
            );
            world.level = Some(level);
            world.reset_attempt();
            world.retries = 0;
            out_events.push(Event::LevelLoaded { level: id });
            world.set_play_state(PlayState::Running, out_events);
        }
        Command::Restart => {
            if world.level.is_some() {
                world.end_attempt(ResetReason::Restart, out_events);
            }
        }
        Command::ResetAttempt { reason } => {
            if world.level.is_some() {
                world.end_attempt(reason, out_events);
            }
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::PressDirection { direction } => {
            if !world.accepts_input() {
                return;
            }
            world.input.held.press(direction);
            world.input.path.clear();
            world.input.drawing = None;
            world.start_timer(out_events);
        }
        Command::ReleaseDirection { direction } => {
            world.input.held.release(direction);
        }
        Command::BeginPath { at } => {
            if !world.accepts_input() {
                return;
            }
            world.input.path.clear();
            world.input.drawing = Some(vec![at]);
            world.start_timer(out_events);
        }
        Command::ExtendPath { at } => {
            if let Some(points) = world.input.drawing.as_mut() {
                points.push(at);
            }
        }
        Command::FinishPath => {
            if let Some(points) = world.input.drawing.take() {
                if points.len() > 1 {
                    world.input.path = points.into();
                }
            }
        }
        Command::MovePlayer {
            position,
            velocity,
            reached_waypoint,
        } => {
            if !world.accepts_input() {
                return;
            }
            let from = world.player.position;
            world.player.position = position;
            world.player.velocity = velocity;
            if reached_waypoint {
                let _ = world.input.path.pop_front();
            }
            if from != position {
                out_events.push(Event::PlayerMoved { from, to: position });
            }
        }
        Command::MoveEnemy {
            enemy,
            position,
            path_index,
        } => {
            if !world.accepts_input() {
                return;
            }
            let Some(state) = world.enemy_mut(enemy) else {
                return;
            };
            if !state.alive {
                return;
            }
            let from = state.position;
            state.position = position;
            state.path_index = match state.spec.path.len() {
                0 => 0,
                len => path_index % len,
            };
            if from != position {
                out_events.push(Event::EnemyMoved {
                    enemy,
                    to: position,
                });
            }
        }
        Command::ClickDoor { door } => {
            if world.accepts_input() {
                world.click_door(door, out_events);
            }
        }
        Command::BeginChallenge { target } => {
            if !world.accepts_input() || !world.challenge_is_live(target) {
                return;
            }
            debug!(?target, "challenge started");
            out_events.push(Event::ChallengeStarted { target });
            world.set_play_state(PlayState::Challenge(target), out_events);
        }
        Command::ResolveEnemyChallenge { correct } => {
            if let PlayState::Challenge(target @ ChallengeTarget::Enemy(_)) = world.play_state {
                world.resolve_challenge(target, correct, out_events);
            }
        }
        Command::ResolveGateChallenge { correct } => {
            if let PlayState::Challenge(target @ ChallengeTarget::Gate(_)) = world.play_state {
                world.resolve_challenge(target, correct, out_events);
            }
        }
        Command::CollectKey => {
            let has_key = world
                .level
                .as_deref()
                .is_some_and(|level| level.key.is_some());
            if world.accepts_input() && has_key && !world.key_collected {
                world.key_collected = true;
                debug!("key collected");
                out_events.push(Event::KeyCollected);
            }
        }
        Command::CompleteLevel => {
            if !world.accepts_input() {
                return;
            }
            let Some(level) = world.level.as_deref() else {
                return;
            };
            let id = level.id.clone();
            let elapsed_seconds = world.clock.elapsed_seconds;
            info!(level = %id, elapsed_seconds, retries = world.retries, "level completed");
            out_events.push(Event::LevelCompleted {
                level: id,
                elapsed_seconds,
            });
            world.set_play_state(PlayState::Completed, out_events);
        }
        Command::AdvanceClock => {
            if world.accepts_input() && world.clock.started {
                world.clock.elapsed_seconds = world.clock.elapsed_seconds.saturating_add(1);
                out_events.push(Event::ClockAdvanced {
                    elapsed_seconds: world.clock.elapsed_seconds,
                });
            }
        }
        Command::SetCosmetics { cosmetics } => {
            world.cosmetics = cosmetics;
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use glam::Vec2;
    use maze_runner_core::{
        Cosmetics, DoorSnapshot, EnemySnapshot, GateSnapshot, KeySnapshot, LevelDescriptor,
        PlayState, PlayerSnapshot,
    };

    use super::World;

    /// Descriptor of the active level, if one has been loaded.
    #[must_use]
    pub fn level(world: &World) -> Option<&LevelDescriptor> {
        world.level.as_deref()
    }

    /// Lifecycle state of the current attempt.
    #[must_use]
    pub fn play_state(world: &World) -> PlayState {
        world.play_state
    }

    /// Captures the player's position, velocity and pending input.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            position: world.player.position,
            velocity: world.player.velocity,
            held: world.input.held,
            path_head: world.input.path.front().copied(),
        }
    }

    /// Waypoints the player still has to follow, head first.
    #[must_use]
    pub fn queued_path(world: &World) -> Vec<Vec2> {
        world.input.path.iter().copied().collect()
    }

    /// Points of the path currently being drawn, empty when no drag is active.
    #[must_use]
    pub fn drawn_path(world: &World) -> &[Vec2] {
        world.input.drawing.as_deref().unwrap_or(&[])
    }

    /// Captures a read-only view of the enemies of the active level.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let mut snapshots: Vec<EnemySnapshot> = world
            .enemies
            .iter()
            .map(|enemy| {
                let len = enemy.spec.path.len();
                let next_index = if len == 0 {
                    0
                } else {
                    (enemy.path_index + 1) % len
                };
                EnemySnapshot {
                    id: enemy.spec.id,
                    position: enemy.position,
                    path_index: enemy.path_index,
                    next_index,
                    next_waypoint: enemy.spec.path.get(next_index).copied(),
                    alive: enemy.alive,
                }
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        EnemyView { snapshots }
    }

    /// Captures the click-doors of the active level in scan order.
    #[must_use]
    pub fn doors(world: &World) -> Vec<DoorSnapshot> {
        world
            .doors
            .iter()
            .map(|door| DoorSnapshot {
                id: door.spec.id,
                position: door.spec.position,
                required_clicks: door.spec.required_clicks,
                clicks: door.clicks,
                removed: door.removed,
            })
            .collect()
    }

    /// Captures the verification gates of the active level in scan order.
    #[must_use]
    pub fn gates(world: &World) -> Vec<GateSnapshot> {
        world
            .gates
            .iter()
            .map(|gate| GateSnapshot {
                id: gate.spec.id,
                position: gate.spec.position,
                removed: gate.removed,
            })
            .collect()
    }

    /// Captures the key of the active level, if it has one.
    #[must_use]
    pub fn key(world: &World) -> Option<KeySnapshot> {
        let position = world.level.as_deref()?.key?;
        Some(KeySnapshot {
            position,
            collected: world.key_collected,
        })
    }

    /// Reports whether the key was collected in the current attempt.
    #[must_use]
    pub fn has_key(world: &World) -> bool {
        world.key_collected
    }

    /// Reports whether the attempt timer has started counting.
    #[must_use]
    pub fn timer_started(world: &World) -> bool {
        world.clock.started
    }

    /// Whole seconds elapsed in the current attempt.
    #[must_use]
    pub fn elapsed_seconds(world: &World) -> u32 {
        world.clock.elapsed_seconds
    }

    /// Number of resets since the level was loaded.
    #[must_use]
    pub fn retries(world: &World) -> u32 {
        world.retries
    }

    /// Cosmetic preferences supplied by collaborators.
    #[must_use]
    pub fn cosmetics(world: &World) -> &Cosmetics {
        &world.cosmetics
    }

    /// Captures everything a renderer needs to draw one frame.
    #[must_use]
    pub fn snapshot(world: &World) -> FrameSnapshot {
        let enemies = enemy_view(world);
        FrameSnapshot {
            play_state: play_state(world),
            player: player(world),
            enemies: enemies.alive().copied().collect(),
            doors: doors(world),
            gates: gates(world),
            key: key(world),
            elapsed_seconds: elapsed_seconds(world),
            retries: retries(world),
        }
    }

    /// Read-only snapshot describing all enemies of the level.
    #[derive(Clone, Debug)]
    pub struct EnemyView {
        snapshots: Vec<EnemySnapshot>,
    }

    impl EnemyView {
        /// Iterator over the captured enemy snapshots in identifier order.
        pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
            self.snapshots.iter()
        }

        /// Iterator over the enemies that still patrol.
        pub fn alive(&self) -> impl Iterator<Item = &EnemySnapshot> {
            self.snapshots.iter().filter(|enemy| enemy.alive)
        }
    }

    /// Observer-facing state of a single frame.
    #[derive(Clone, Debug, PartialEq)]
    pub struct FrameSnapshot {
        /// Lifecycle state of the attempt.
        pub play_state: PlayState,
        /// Player state.
        pub player: PlayerSnapshot,
        /// Enemies that are still alive.
        pub enemies: Vec<EnemySnapshot>,
        /// Click-doors, opened ones included.
        pub doors: Vec<DoorSnapshot>,
        /// Verification gates, passed ones included.
        pub gates: Vec<GateSnapshot>,
        /// Key state, if the level has a key.
        pub key: Option<KeySnapshot>,
        /// Whole seconds elapsed in the attempt.
        pub elapsed_seconds: u32,
        /// Number of resets since the level was loaded.
        pub retries: u32,
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Player {
    position: Vec2,
    velocity: Vec2,
}

#[derive(Clone, Debug, Default)]
struct Input {
    held: HeldDirections,
    path: VecDeque<Vec2>,
    drawing: Option<Vec<Vec2>>,
}

#[derive(Clone, Copy, Debug)]
struct Door {
    spec: DoorSpec,
    clicks: u32,
    removed: bool,
}

impl Door {
    fn closed(spec: DoorSpec) -> Self {
        Self {
            spec,
            clicks: 0,
            removed: false,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Gate {
    spec: GateSpec,
    removed: bool,
}

impl Gate {
    fn closed(spec: GateSpec) -> Self {
        Self {
            spec,
            removed: false,
        }
    }
}

#[derive(Clone, Debug)]
struct Enemy {
    spec: EnemySpec,
    position: Vec2,
    path_index: usize,
    alive: bool,
}

impl Enemy {
    fn from_spec(spec: &EnemySpec) -> Self {
        Self {
            position: spec.initial_position(),
            spec: spec.clone(),
            path_index: 0,
            alive: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct AttemptClock {
    started: bool,
    elapsed_seconds: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_runner_core::{
        CellCoord, Direction, GateId, LevelId, MazeGrid, TileGeometry,
    };

    fn level() -> LevelDescriptor {
        let geometry = TileGeometry::new(10, 10, 20.0);
        LevelDescriptor {
            id: LevelId::Number(4),
            name: "fixture".to_owned(),
            grid: MazeGrid::with_outer_walls(10, 10),
            geometry,
            start: geometry.cell_center(CellCoord::new(1, 1)),
            exit: geometry.cell_center(CellCoord::new(8, 8)),
            doors: vec![DoorSpec {
                id: DoorId::new(0),
                position: geometry.cell_center(CellCoord::new(5, 5)),
                required_clicks: 3,
            }],
            gates: vec![GateSpec {
                id: GateId::new(0),
                position: geometry.cell_center(CellCoord::new(3, 7)),
            }],
            enemies: vec![EnemySpec {
                id: EnemyId::new(0),
                spawn: geometry.cell_center(CellCoord::new(6, 2)),
                path: vec![
                    geometry.cell_center(CellCoord::new(6, 2)),
                    geometry.cell_center(CellCoord::new(8, 2)),
                ],
            }],
            key: Some(geometry.cell_center(CellCoord::new(2, 6))),
            locked_exit: None,
        }
    }

    fn loaded_world() -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::LoadLevel {
                level: Box::new(level()),
            },
            &mut events,
        );
        world
    }

    fn run(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
        let mut events = Vec::new();
        for command in commands {
            apply(world, command, &mut events);
        }
        events
    }

    #[test]
    fn load_level_places_player_at_start() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::LoadLevel {
                level: Box::new(level()),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::LevelLoaded {
                level: LevelId::Number(4)
            }]
        );
        let player = query::player(&world);
        assert_eq!(player.position, Vec2::new(30.0, 30.0));
        assert_eq!(player.velocity, Vec2::ZERO);
        assert_eq!(query::retries(&world), 0);
        assert!(!query::timer_started(&world));
    }

    #[test]
    fn input_is_ignored_without_level() {
        let mut world = World::new();
        let events = run(
            &mut world,
            vec![
                Command::PressDirection {
                    direction: Direction::East,
                },
                Command::Restart,
                Command::CompleteLevel,
            ],
        );
        assert!(events.is_empty());
        assert!(query::player(&world).held.is_empty());
    }

    #[test]
    fn first_movement_input_starts_timer_once() {
        let mut world = loaded_world();
        let events = run(
            &mut world,
            vec![
                Command::PressDirection {
                    direction: Direction::East,
                },
                Command::PressDirection {
                    direction: Direction::South,
                },
                Command::BeginPath {
                    at: Vec2::new(50.0, 50.0),
                },
            ],
        );
        assert_eq!(events, vec![Event::TimerStarted]);
        assert!(query::timer_started(&world));
    }

    #[test]
    fn key_press_discards_queued_path() {
        let mut world = loaded_world();
        let _ = run(
            &mut world,
            vec![
                Command::BeginPath {
                    at: Vec2::new(30.0, 30.0),
                },
                Command::ExtendPath {
                    at: Vec2::new(50.0, 30.0),
                },
                Command::FinishPath,
            ],
        );
        assert_eq!(
            query::queued_path(&world),
            vec![Vec2::new(30.0, 30.0), Vec2::new(50.0, 30.0)]
        );

        let _ = run(
            &mut world,
            vec![Command::PressDirection {
                direction: Direction::North,
            }],
        );
        assert!(query::queued_path(&world).is_empty());
        assert!(query::drawn_path(&world).is_empty());
    }

    #[test]
    fn single_point_drag_queues_nothing() {
        let mut world = loaded_world();
        let _ = run(
            &mut world,
            vec![
                Command::BeginPath {
                    at: Vec2::new(30.0, 30.0),
                },
                Command::FinishPath,
            ],
        );
        assert!(query::queued_path(&world).is_empty());
        assert_eq!(query::player(&world).path_head, None);
    }

    #[test]
    fn reached_waypoint_pops_path_head() {
        let mut world = loaded_world();
        let _ = run(
            &mut world,
            vec![
                Command::BeginPath {
                    at: Vec2::new(30.0, 30.0),
                },
                Command::ExtendPath {
                    at: Vec2::new(70.0, 30.0),
                },
                Command::FinishPath,
                Command::MovePlayer {
                    position: Vec2::new(31.0, 30.0),
                    velocity: Vec2::new(1.0, 0.0),
                    reached_waypoint: true,
                },
            ],
        );
        assert_eq!(
            query::player(&world).path_head,
            Some(Vec2::new(70.0, 30.0))
        );
    }

    #[test]
    fn door_opens_once_clicks_reach_requirement() {
        let mut world = loaded_world();
        let door = DoorId::new(0);
        let events = run(
            &mut world,
            vec![Command::ClickDoor { door }, Command::ClickDoor { door }],
        );
        assert!(!events.contains(&Event::DoorOpened { door }));
        assert!(!query::doors(&world)[0].removed);

        let events = run(&mut world, vec![Command::ClickDoor { door }]);
        assert_eq!(
            events,
            vec![
                Event::DoorClicked {
                    door,
                    clicks: 3,
                    required: 3
                },
                Event::DoorOpened { door },
            ]
        );

        let before = query::doors(&world);
        let events = run(&mut world, vec![Command::ClickDoor { door }]);
        assert!(events.is_empty());
        assert_eq!(query::doors(&world), before);
    }

    #[test]
    fn correct_enemy_challenge_kills_enemy() {
        let mut world = loaded_world();
        let target = ChallengeTarget::Enemy(EnemyId::new(0));
        let events = run(
            &mut world,
            vec![
                Command::BeginChallenge { target },
                Command::MovePlayer {
                    position: Vec2::new(40.0, 40.0),
                    velocity: Vec2::ZERO,
                    reached_waypoint: false,
                },
            ],
        );
        assert_eq!(
            events,
            vec![
                Event::ChallengeStarted { target },
                Event::PlayStateChanged {
                    state: PlayState::Challenge(target)
                },
            ]
        );
        assert_eq!(query::player(&world).position, Vec2::new(30.0, 30.0));

        let events = run(
            &mut world,
            vec![
                Command::ResolveGateChallenge { correct: true },
                Command::ResolveEnemyChallenge { correct: true },
            ],
        );
        assert_eq!(
            events,
            vec![
                Event::ChallengeResolved {
                    target,
                    correct: true
                },
                Event::PlayStateChanged {
                    state: PlayState::Running
                },
            ]
        );
        let view = query::enemy_view(&world);
        assert_eq!(view.iter().count(), 1);
        assert_eq!(view.alive().count(), 0);
        assert!(query::snapshot(&world).enemies.is_empty());

        let events = run(&mut world, vec![Command::BeginChallenge { target }]);
        assert!(events.is_empty(), "dead enemies never challenge");
    }

    #[test]
    fn wrong_gate_answer_resets_attempt() {
        let mut world = loaded_world();
        let target = ChallengeTarget::Gate(GateId::new(0));
        let events = run(
            &mut world,
            vec![
                Command::BeginChallenge { target },
                Command::ResolveGateChallenge { correct: false },
            ],
        );
        assert!(events.contains(&Event::AttemptReset {
            reason: ResetReason::FailedChallenge,
            retries: 1,
        }));
        assert_eq!(query::play_state(&world), PlayState::Running);
        assert!(!query::gates(&world)[0].removed);
    }

    #[test]
    fn reset_restores_initial_attempt_state() {
        let mut world = loaded_world();
        let door = DoorId::new(0);
        let _ = run(
            &mut world,
            vec![
                Command::PressDirection {
                    direction: Direction::East,
                },
                Command::MovePlayer {
                    position: Vec2::new(44.0, 52.0),
                    velocity: Vec2::new(2.0, 1.0),
                    reached_waypoint: false,
                },
                Command::MoveEnemy {
                    enemy: EnemyId::new(0),
                    position: Vec2::new(140.0, 50.0),
                    path_index: 0,
                },
                Command::ClickDoor { door },
                Command::CollectKey,
                Command::AdvanceClock,
                Command::AdvanceClock,
                Command::BeginChallenge {
                    target: ChallengeTarget::Gate(GateId::new(0)),
                },
                Command::ResolveGateChallenge { correct: true },
            ],
        );
        assert!(query::has_key(&world));
        assert_eq!(query::elapsed_seconds(&world), 2);

        let events = run(
            &mut world,
            vec![Command::ResetAttempt {
                reason: ResetReason::Hazard,
            }],
        );
        assert_eq!(
            events,
            vec![Event::AttemptReset {
                reason: ResetReason::Hazard,
                retries: 1
            }]
        );

        let player = query::player(&world);
        assert_eq!(player.position, Vec2::new(30.0, 30.0));
        assert_eq!(player.velocity, Vec2::ZERO);
        assert!(player.held.is_empty());
        assert!(query::doors(&world)
            .iter()
            .all(|door| door.clicks == 0 && !door.removed));
        assert!(query::gates(&world).iter().all(|gate| !gate.removed));
        for enemy in query::enemy_view(&world).iter() {
            assert!(enemy.alive);
            assert_eq!(enemy.path_index, 0);
            assert_eq!(enemy.position, Vec2::new(130.0, 50.0));
        }
        assert!(!query::has_key(&world));
        assert_eq!(query::elapsed_seconds(&world), 0);
        assert!(!query::timer_started(&world));
    }

    #[test]
    fn completion_freezes_attempt_and_fires_once() {
        let mut world = loaded_world();
        let events = run(
            &mut world,
            vec![
                Command::PressDirection {
                    direction: Direction::East,
                },
                Command::AdvanceClock,
                Command::CompleteLevel,
                Command::AdvanceClock,
                Command::CompleteLevel,
            ],
        );
        let completions: Vec<_> = events
            .iter()
            .filter(|event| matches!(event, Event::LevelCompleted { .. }))
            .collect();
        assert_eq!(
            completions,
            vec![&Event::LevelCompleted {
                level: LevelId::Number(4),
                elapsed_seconds: 1,
            }]
        );
        assert_eq!(query::elapsed_seconds(&world), 1);
        assert_eq!(query::play_state(&world), PlayState::Completed);

        let events = run(&mut world, vec![Command::Restart]);
        assert!(events.contains(&Event::PlayStateChanged {
            state: PlayState::Running
        }));
        assert_eq!(query::retries(&world), 1);
    }

    #[test]
    fn clock_only_counts_after_timer_start() {
        let mut world = loaded_world();
        let events = run(&mut world, vec![Command::AdvanceClock]);
        assert!(events.is_empty());
        assert_eq!(query::elapsed_seconds(&world), 0);
    }

    #[test]
    fn loading_a_level_zeroes_retries() {
        let mut world = loaded_world();
        let _ = run(&mut world, vec![Command::Restart, Command::Restart]);
        assert_eq!(query::retries(&world), 2);

        let _ = run(
            &mut world,
            vec![Command::LoadLevel {
                level: Box::new(level()),
            }],
        );
        assert_eq!(query::retries(&world), 0);
    }

    #[test]
    fn cosmetics_are_stored_verbatim() {
        let mut world = loaded_world();
        let cosmetics = Cosmetics {
            language: maze_runner_core::Language::English,
            player_glyph: "@".to_owned(),
        };
        let events = run(
            &mut world,
            vec![Command::SetCosmetics {
                cosmetics: cosmetics.clone(),
            }],
        );
        assert!(events.is_empty());
        assert_eq!(query::cosmetics(&world), &cosmetics);
    }
}
