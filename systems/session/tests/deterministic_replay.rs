use std::time::Duration;

use glam::Vec2;
use maze_runner_codec::{build_level, MazeConfig};
use maze_runner_core::{Command, Direction, Event, LevelId, Tuning};
use maze_runner_session::Session;
use maze_runner_world::query::FrameSnapshot;

const DESCRIPTOR: &str = r#"{
    "width": 12, "height": 12,
    "start": { "x": 1, "y": 1 },
    "exit": { "x": 10, "y": 10 },
    "doors": [{ "position": { "x": 6, "y": 1 }, "requiredClicks": 2 }],
    "verificationDoors": [{ "position": { "x": 9, "y": 6 } }],
    "enemies": [
        { "position": { "x": 3, "y": 8 }, "path": [{ "x": 3, "y": 8 }, { "x": 8, "y": 8 }, { "x": 8, "y": 9 }] }
    ]
}"#;

#[derive(Clone, Debug)]
enum Step {
    Submit(Command),
    Ticks(usize),
}

#[test]
fn deterministic_replay_produces_identical_logs() {
    let first = replay(scripted_steps());
    let second = replay(scripted_steps());

    assert_eq!(first, second, "replay diverged between runs");

    let moved_player = first
        .events
        .iter()
        .any(|event| matches!(event, Event::PlayerMoved { .. }));
    let moved_enemy = first
        .events
        .iter()
        .any(|event| matches!(event, Event::EnemyMoved { .. }));
    let reset = first
        .events
        .iter()
        .any(|event| matches!(event, Event::AttemptReset { .. }));
    assert!(moved_player && moved_enemy && reset);
    assert_eq!(first.snapshot.retries, 1);
}

fn replay(steps: Vec<Step>) -> ReplayOutcome {
    let config = MazeConfig::from_json(DESCRIPTOR).expect("descriptor decodes");
    let level = build_level(LevelId::Name("replay".to_owned()), "replay", &config, 240.0)
        .expect("level builds");

    let mut session = Session::new(Tuning::default());
    session.load(level);

    let mut events = Vec::new();
    for step in steps {
        match step {
            Step::Submit(command) => session.submit(command),
            Step::Ticks(count) => {
                for _ in 0..count {
                    events.extend(session.tick(Duration::from_micros(16_667), |_, _| {}));
                }
            }
        }
    }

    ReplayOutcome {
        events,
        snapshot: session.snapshot(),
    }
}

fn scripted_steps() -> Vec<Step> {
    vec![
        Step::Submit(Command::PressDirection {
            direction: Direction::East,
        }),
        Step::Submit(Command::PressDirection {
            direction: Direction::South,
        }),
        Step::Ticks(40),
        Step::Submit(Command::ReleaseDirection {
            direction: Direction::South,
        }),
        Step::Ticks(40),
        Step::Submit(Command::ReleaseDirection {
            direction: Direction::East,
        }),
        Step::Submit(Command::BeginPath {
            at: Vec2::new(70.0, 90.0),
        }),
        Step::Submit(Command::ExtendPath {
            at: Vec2::new(70.0, 150.0),
        }),
        Step::Submit(Command::ExtendPath {
            at: Vec2::new(130.0, 150.0),
        }),
        Step::Submit(Command::FinishPath),
        Step::Ticks(90),
        Step::Submit(Command::Restart),
        Step::Submit(Command::PressDirection {
            direction: Direction::South,
        }),
        Step::Ticks(30),
    ]
}

#[derive(Clone, Debug, PartialEq)]
struct ReplayOutcome {
    events: Vec<Event>,
    snapshot: FrameSnapshot,
}
