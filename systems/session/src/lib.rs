#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Single-threaded update loop that owns the world and drives every system.
//!
//! One call to [`Session::tick`] advances the attempt by one frame: the world
//! announces the elapsed time, then player motion, enemy patrol, trigger
//! evaluation and the attempt clock run in that order. Each system observes
//! the state left behind by the previous one.

use std::{mem, time::Duration};

use maze_runner_core::{Command, DoorId, Event, LevelDescriptor, LevelId, Tuning};
use maze_runner_system_clock::Clock;
use maze_runner_system_motion::Motion;
use maze_runner_system_patrol::Patrol;
use maze_runner_system_triggers::Triggers;
use maze_runner_world::{self as world, query, query::FrameSnapshot, World};

/// Owns the authoritative world together with the systems that advance it.
#[derive(Debug)]
pub struct Session {
    world: World,
    motion: Motion,
    patrol: Patrol,
    triggers: Triggers,
    clock: Clock,
    pending: Vec<Event>,
}

impl Session {
    /// Creates a session without a level, using the provided tunables.
    #[must_use]
    pub fn new(tuning: Tuning) -> Self {
        Self {
            world: World::new(),
            motion: Motion::new(tuning),
            patrol: Patrol::new(tuning),
            triggers: Triggers::new(tuning),
            clock: Clock::new(),
            pending: Vec::new(),
        }
    }

    /// Loads a level and starts a fresh attempt with a zeroed retry counter.
    pub fn load(&mut self, level: LevelDescriptor) {
        self.submit(Command::LoadLevel {
            level: Box::new(level),
        });
    }

    /// Applies a collaborator command immediately.
    ///
    /// The resulting events are delivered to the systems on the next tick.
    pub fn submit(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut self.pending);
    }

    /// Advances the simulation by one frame and returns every event it produced.
    ///
    /// `on_complete` is invoked with the level identifier and the frozen
    /// elapsed seconds whenever the attempt completes during this tick.
    pub fn tick<F>(&mut self, dt: Duration, mut on_complete: F) -> Vec<Event>
    where
        F: FnMut(&LevelId, u32),
    {
        let mut events = mem::take(&mut self.pending);
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);

        let mut commands = Vec::new();
        if let Some(level) = query::level(&self.world) {
            self.motion
                .handle(&events, level, &query::snapshot(&self.world), &mut commands);
        }
        self.apply_all(&mut commands, &mut events);

        if let Some(level) = query::level(&self.world) {
            self.patrol
                .handle(&events, level, &query::snapshot(&self.world), &mut commands);
        }
        self.apply_all(&mut commands, &mut events);

        if let Some(level) = query::level(&self.world) {
            self.triggers
                .handle(&events, level, &query::snapshot(&self.world), &mut commands);
        }
        self.apply_all(&mut commands, &mut events);

        self.clock.handle(
            &events,
            query::play_state(&self.world),
            query::timer_started(&self.world),
            &mut commands,
        );
        self.apply_all(&mut commands, &mut events);

        for event in &events {
            if let Event::LevelCompleted {
                level,
                elapsed_seconds,
            } = event
            {
                on_complete(level, *elapsed_seconds);
            }
        }

        events
    }

    /// Read-only access to the authoritative world for queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Observer-facing snapshot of the current frame.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        query::snapshot(&self.world)
    }

    /// Door the player may currently click, if any.
    #[must_use]
    pub fn door_in_reach(&self) -> Option<DoorId> {
        let level = query::level(&self.world)?;
        self.triggers
            .door_in_reach(level, &query::snapshot(&self.world))
    }

    fn apply_all(&mut self, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}
