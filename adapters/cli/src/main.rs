#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for inspecting, sharing, generating and playing mazes.

mod script;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use maze_runner_codec::{
    build_level, decode_share_code, encode_share_code, generate_maze, GeneratorConfig, MazeConfig,
};
use maze_runner_core::{
    ChallengeTarget, Command, Cosmetics, Event, Language, LevelDescriptor, LevelId, PlayState,
    Tuning, DEFAULT_MAP_SIZE, DEFAULT_PLAYER_GLYPH,
};
use maze_runner_session::Session;
use maze_runner_world::query;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::script::{parse_script, DIRECTIONS};

/// Headless tools for Maze Runner levels.
#[derive(Debug, Parser)]
#[command(name = "maze-runner", version, about)]
struct Cli {
    /// TOML file overriding gameplay tunables.
    #[arg(long, global = true)]
    tuning: Option<PathBuf>,
    /// Pixel width the maze is scaled to.
    #[arg(long, global = true, default_value_t = DEFAULT_MAP_SIZE)]
    map_size: f32,
    #[command(subcommand)]
    command: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Validates a descriptor and prints the level it builds.
    Inspect {
        /// Descriptor JSON file.
        file: PathBuf,
    },
    /// Prints the single-line share code of a descriptor.
    Share {
        /// Descriptor JSON file.
        file: PathBuf,
    },
    /// Decodes a share code back into descriptor JSON.
    Unshare {
        /// Share code produced by `share`.
        code: String,
        /// Writes the descriptor here instead of standard output.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Generates a random walled maze.
    Generate {
        /// Number of columns.
        #[arg(long, default_value_t = 21)]
        width: u32,
        /// Number of rows.
        #[arg(long, default_value_t = 21)]
        height: u32,
        /// Fraction of interior cells that receive a wall.
        #[arg(long, default_value_t = 0.3)]
        complexity: f64,
        /// Random seed.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Writes the descriptor here instead of standard output.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Plays a level with scripted keyboard input.
    Play {
        /// Descriptor JSON file.
        file: PathBuf,
        /// Move script such as `ES:40,E:20,.:10`.
        #[arg(long)]
        moves: String,
        /// Frame length in microseconds.
        #[arg(long, default_value_t = 16_667)]
        frame_micros: u64,
        /// Clicks every door that comes within reach.
        #[arg(long)]
        auto_click: bool,
        /// Answers every challenge wrongly instead of correctly.
        #[arg(long)]
        fail_challenges: bool,
        /// Language tag forwarded to collaborators.
        #[arg(long, value_enum, default_value_t = LanguageArg::Tr)]
        language: LanguageArg,
        /// Glyph used to draw the player.
        #[arg(long, default_value = DEFAULT_PLAYER_GLYPH)]
        glyph: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LanguageArg {
    Tr,
    En,
}

impl From<LanguageArg> for Language {
    fn from(value: LanguageArg) -> Self {
        match value {
            LanguageArg::Tr => Self::Turkish,
            LanguageArg::En => Self::English,
        }
    }
}

/// Entry point for the Maze Runner command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Mode::Inspect { ref file } => inspect(file, cli.map_size),
        Mode::Share { ref file } => {
            let config = read_config(file)?;
            let code = encode_share_code(&config).context("failed to encode share code")?;
            println!("{code}");
            Ok(())
        }
        Mode::Unshare { ref code, ref output } => {
            let config = decode_share_code(code).context("failed to decode share code")?;
            emit_config(&config, output.as_deref())
        }
        Mode::Generate {
            width,
            height,
            complexity,
            seed,
            ref output,
        } => {
            let config = generate_maze(&GeneratorConfig {
                width,
                height,
                complexity,
                seed,
            });
            emit_config(&config, output.as_deref())
        }
        Mode::Play {
            ref file,
            ref moves,
            frame_micros,
            auto_click,
            fail_challenges,
            language,
            ref glyph,
        } => {
            let tuning = load_tuning(cli.tuning.as_deref())?;
            let level = load_level(file, cli.map_size)?;
            let options = PlayOptions {
                frame: Duration::from_micros(frame_micros),
                auto_click,
                answer: !fail_challenges,
                cosmetics: Cosmetics {
                    language: language.into(),
                    player_glyph: glyph.clone(),
                },
            };
            play(level, tuning, moves, &options)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn read_config(path: &Path) -> Result<MazeConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read descriptor {}", path.display()))?;
    MazeConfig::from_json(&json)
        .with_context(|| format!("invalid descriptor {}", path.display()))
}

fn load_level(path: &Path, map_size: f32) -> Result<LevelDescriptor> {
    let config = read_config(path)?;
    let name = path
        .file_stem()
        .map_or_else(|| "level".to_owned(), |stem| stem.to_string_lossy().into_owned());
    build_level(LevelId::Name(name.clone()), &name, &config, map_size)
        .with_context(|| format!("failed to build level from {}", path.display()))
}

fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("invalid tuning {}", path.display()))
}

fn emit_config(config: &MazeConfig, output: Option<&Path>) -> Result<()> {
    let json = config
        .to_json_pretty()
        .context("failed to serialise descriptor")?;
    match output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("failed to write descriptor {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn inspect(path: &Path, map_size: f32) -> Result<()> {
    let level = load_level(path, map_size)?;
    let geometry = level.geometry;

    println!("level {} ({})", level.id, level.name);
    println!(
        "grid {}x{}, tile {:.2} px, map {:.0}x{:.0} px",
        geometry.columns(),
        geometry.rows(),
        geometry.tile_size(),
        geometry.map_width(),
        geometry.map_height()
    );
    println!("start {}  exit {}", level.start, level.exit);
    for door in &level.doors {
        println!(
            "door {} at {} needs {} clicks",
            door.id.get(),
            door.position,
            door.required_clicks
        );
    }
    for gate in &level.gates {
        println!("gate {} at {}", gate.id.get(), gate.position);
    }
    for enemy in &level.enemies {
        println!(
            "enemy {} at {} patrols {} waypoints",
            enemy.id.get(),
            enemy.initial_position(),
            enemy.path.len()
        );
    }
    if let Some(key) = level.key {
        println!("key at {key}");
    }
    let (goal, needs_key) = level.goal();
    println!(
        "goal at {goal}{}",
        if needs_key { " (locked)" } else { "" }
    );
    Ok(())
}

struct PlayOptions {
    frame: Duration,
    auto_click: bool,
    answer: bool,
    cosmetics: Cosmetics,
}

fn play(level: LevelDescriptor, tuning: Tuning, moves: &str, options: &PlayOptions) -> Result<()> {
    let segments = parse_script(moves).context("invalid move script")?;
    let mut session = Session::new(tuning);
    session.load(level);
    session.submit(Command::SetCosmetics {
        cosmetics: options.cosmetics.clone(),
    });

    let mut completion = None;
    let mut ticks = 0u64;
    'script: for segment in &segments {
        for _ in 0..segment.ticks {
            let held = session.snapshot().player.held;
            for direction in DIRECTIONS {
                let wanted = segment.held.contains(&direction);
                if wanted && !held.contains(direction) {
                    session.submit(Command::PressDirection { direction });
                } else if !wanted && held.contains(direction) {
                    session.submit(Command::ReleaseDirection { direction });
                }
            }
            if options.auto_click {
                if let Some(door) = session.door_in_reach() {
                    session.submit(Command::ClickDoor { door });
                }
            }

            let events = session.tick(options.frame, |level, seconds| {
                completion = Some((level.clone(), seconds));
            });
            ticks += 1;

            for event in &events {
                match event {
                    Event::ChallengeStarted { target } => {
                        let correct = options.answer;
                        let command = match target {
                            ChallengeTarget::Enemy(_) => Command::ResolveEnemyChallenge { correct },
                            ChallengeTarget::Gate(_) => Command::ResolveGateChallenge { correct },
                        };
                        session.submit(command);
                    }
                    Event::AttemptReset { reason, retries } => {
                        warn!(%reason, retries, tick = ticks, "attempt reset");
                    }
                    _ => {}
                }
            }

            if completion.is_some() {
                break 'script;
            }
        }
    }

    let snapshot = session.snapshot();
    let glyph = &query::cosmetics(session.world()).player_glyph;
    match completion {
        Some((level, seconds)) => {
            info!(level = %level, seconds, ticks, "run finished");
            println!("completed {level} in {seconds}s after {ticks} ticks");
        }
        None => {
            let state = match snapshot.play_state {
                PlayState::Running => "running",
                PlayState::Challenge(_) => "paused",
                PlayState::Completed => "completed",
            };
            println!("not completed after {ticks} ticks ({state})");
        }
    }
    println!(
        "{glyph} at {} after {} retries, {}s on the clock",
        snapshot.player.position, snapshot.retries, snapshot.elapsed_seconds
    );
    Ok(())
}
