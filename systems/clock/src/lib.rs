#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Attempt clock that converts simulated time into whole elapsed seconds.

use std::time::Duration;

use maze_runner_core::{Command, Event, PlayState};

const SECOND: Duration = Duration::from_secs(1);

/// Pure system that accumulates tick time and emits one command per second.
///
/// Time only counts while the attempt runs and its timer has started. Pausing
/// freezes the fraction already accumulated; a reset or a new level discards it.
#[derive(Debug, Default)]
pub struct Clock {
    accumulator: Duration,
}

impl Clock {
    /// Creates a clock with nothing accumulated.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
        }
    }

    /// Consumes events and the attempt state to emit clock advances.
    pub fn handle(
        &mut self,
        events: &[Event],
        play_state: PlayState,
        timer_started: bool,
        out: &mut Vec<Command>,
    ) {
        if !timer_started {
            self.accumulator = Duration::ZERO;
            return;
        }

        for event in events {
            match event {
                Event::LevelLoaded { .. } | Event::AttemptReset { .. } => {
                    self.accumulator = Duration::ZERO;
                }
                Event::TimeAdvanced { dt } if play_state.is_running() => {
                    self.accumulator = self.accumulator.saturating_add(*dt);
                }
                _ => {}
            }
        }

        while self.accumulator >= SECOND {
            self.accumulator -= SECOND;
            out.push(Command::AdvanceClock);
        }
    }

    /// Time accumulated toward the next whole second.
    #[must_use]
    pub const fn pending(&self) -> Duration {
        self.accumulator
    }
}
