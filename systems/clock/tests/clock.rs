use std::time::Duration;

use glam::Vec2;
use maze_runner_core::{
    CellCoord, ChallengeTarget, Command, Direction, Event, GateId, GateSpec, LevelDescriptor,
    LevelId, MazeGrid, ResetReason, TileGeometry,
};
use maze_runner_system_clock::Clock;
use maze_runner_world::{self as world, query, World};

const FRAME: Duration = Duration::from_micros(16_667);

fn loaded() -> World {
    let geometry = TileGeometry::new(10, 10, 20.0);
    let level = LevelDescriptor {
        id: LevelId::Number(1),
        name: "clock".to_owned(),
        grid: MazeGrid::with_outer_walls(10, 10),
        geometry,
        start: Vec2::new(30.0, 30.0),
        exit: Vec2::new(170.0, 170.0),
        doors: Vec::new(),
        gates: vec![GateSpec {
            id: GateId::new(0),
            position: Vec2::new(130.0, 130.0),
        }],
        enemies: Vec::new(),
        key: None,
        locked_exit: None,
    };
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::LoadLevel {
            level: Box::new(level),
        },
        &mut events,
    );
    world
}

fn apply_all(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn tick(world: &mut World, clock: &mut Clock) {
    let events = apply_all(world, vec![Command::Tick { dt: FRAME }]);
    let mut commands = Vec::new();
    clock.handle(
        &events,
        query::play_state(world),
        query::timer_started(world),
        &mut commands,
    );
    let _ = apply_all(world, commands);
}

fn start_timer(world: &mut World) {
    let events = apply_all(
        world,
        vec![Command::PressDirection {
            direction: Direction::East,
        }],
    );
    assert_eq!(events, vec![Event::TimerStarted]);
}

#[test]
fn clock_waits_for_first_input() {
    let mut world = loaded();
    let mut clock = Clock::new();
    for _ in 0..120 {
        tick(&mut world, &mut clock);
    }
    assert_eq!(query::elapsed_seconds(&world), 0);
    assert_eq!(clock.pending(), Duration::ZERO);
}

#[test]
fn sixty_frames_make_one_second() {
    let mut world = loaded();
    let mut clock = Clock::new();
    start_timer(&mut world);

    for _ in 0..59 {
        tick(&mut world, &mut clock);
    }
    assert_eq!(query::elapsed_seconds(&world), 0);

    tick(&mut world, &mut clock);
    assert_eq!(query::elapsed_seconds(&world), 1);
}

#[test]
fn challenge_pauses_and_resumes_the_clock() {
    let mut world = loaded();
    let mut clock = Clock::new();
    start_timer(&mut world);
    for _ in 0..30 {
        tick(&mut world, &mut clock);
    }
    let before = clock.pending();

    let _ = apply_all(
        &mut world,
        vec![Command::BeginChallenge {
            target: ChallengeTarget::Gate(GateId::new(0)),
        }],
    );
    for _ in 0..120 {
        tick(&mut world, &mut clock);
    }
    assert_eq!(clock.pending(), before);
    assert_eq!(query::elapsed_seconds(&world), 0);

    let _ = apply_all(
        &mut world,
        vec![Command::ResolveGateChallenge { correct: true }],
    );
    for _ in 0..30 {
        tick(&mut world, &mut clock);
    }
    assert_eq!(query::elapsed_seconds(&world), 1);
}

#[test]
fn reset_restarts_the_count() {
    let mut world = loaded();
    let mut clock = Clock::new();
    start_timer(&mut world);
    for _ in 0..90 {
        tick(&mut world, &mut clock);
    }
    assert_eq!(query::elapsed_seconds(&world), 1);

    let events = apply_all(
        &mut world,
        vec![Command::ResetAttempt {
            reason: ResetReason::Restart,
        }],
    );
    assert!(events.contains(&Event::AttemptReset {
        reason: ResetReason::Restart,
        retries: 1,
    }));
    assert_eq!(query::elapsed_seconds(&world), 0);
    assert!(!query::timer_started(&world));

    tick(&mut world, &mut clock);
    assert_eq!(clock.pending(), Duration::ZERO);

    start_timer(&mut world);
    for _ in 0..59 {
        tick(&mut world, &mut clock);
    }
    assert_eq!(query::elapsed_seconds(&world), 0);
}
