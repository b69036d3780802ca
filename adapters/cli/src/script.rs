//! Scripted keyboard input for headless playthroughs.
//!
//! A script is a comma-separated list of `KEYS:TICKS` segments. `KEYS` is any
//! combination of `N`, `E`, `S` and `W` held together, or `.` for no input.
//! `ES:40,E:20,.:10` holds east and south for 40 ticks, then east alone for
//! 20 ticks, then lets go for 10 ticks.

use anyhow::{bail, Context, Result};
use maze_runner_core::Direction;

/// Every direction in the order keys are pressed.
pub(crate) const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

/// One stretch of held keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Segment {
    /// Directions held for the whole segment.
    pub(crate) held: Vec<Direction>,
    /// Number of ticks the segment lasts.
    pub(crate) ticks: u32,
}

/// Parses a move script into its segments.
pub(crate) fn parse_script(script: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    for raw in script.split(',').map(str::trim).filter(|raw| !raw.is_empty()) {
        let (keys, ticks) = raw
            .split_once(':')
            .with_context(|| format!("segment `{raw}` is missing `:TICKS`"))?;
        let ticks: u32 = ticks
            .trim()
            .parse()
            .with_context(|| format!("segment `{raw}` has an invalid tick count"))?;

        let mut held = Vec::new();
        for key in keys.trim().chars() {
            let direction = match key.to_ascii_uppercase() {
                'N' => Direction::North,
                'E' => Direction::East,
                'S' => Direction::South,
                'W' => Direction::West,
                '.' => continue,
                other => bail!("segment `{raw}` names unknown key `{other}`"),
            };
            if !held.contains(&direction) {
                held.push(direction);
            }
        }
        segments.push(Segment { held, ticks });
    }

    if segments.is_empty() {
        bail!("move script is empty");
    }
    Ok(segments)
}
