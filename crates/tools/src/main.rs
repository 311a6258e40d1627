mod config;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::{LevelFilter, info};
use maze_core::mapgen::generate_runtime_seed;
use maze_core::replay::replay_to_end;
use maze_core::{
    Difficulty, Direction, GeneratedMaze, InputJournal, MazeGenerator, MazeReport, Screen, Session,
};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::config::ToolConfig;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file with tool defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a maze as text
    Generate(MazeArgs),
    /// Print connectivity statistics for a maze as JSON
    Inspect(MazeArgs),
    /// Clear one level with a wall-following walker and save its session journal
    Record {
        /// Level to play; the configured default when absent
        #[arg(short, long, value_enum)]
        difficulty: Option<Level>,

        /// Session seed; a fresh one is drawn when absent
        #[arg(short, long)]
        seed: Option<u64>,

        /// Where to write the journal JSON
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Replay a recorded session journal
    Replay {
        /// Path to the journal JSON file to replay
        #[arg(short, long)]
        journal: PathBuf,
    },
}

#[derive(clap::Args)]
struct MazeArgs {
    /// Explicit width; even values grow by one
    #[arg(long, requires = "height", conflicts_with = "difficulty")]
    width: Option<usize>,

    /// Explicit height; even values grow by one
    #[arg(long, requires = "width")]
    height: Option<usize>,

    /// Preset size used when no explicit dimensions are given
    #[arg(short, long, value_enum)]
    difficulty: Option<Level>,

    /// Seed for a reproducible maze; a fresh one is drawn when absent
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    Easy,
    Medium,
    Hard,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Medium => Difficulty::Medium,
            Level::Hard => Difficulty::Hard,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new().filter_level(LevelFilter::Info).parse_default_env().init();

    let cli = Cli::parse();
    let config = ToolConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => {
            let (seed, maze) = build_maze(&args, &config)?;
            print!("{}", maze.grid.render(config.wall_glyph, config.open_glyph));
            println!("Seed: {seed}");
            println!("Size: {}x{}", maze.grid.width(), maze.grid.height());
            println!("Fingerprint: {}", format_fingerprint(maze.grid.fingerprint()));
        }
        Commands::Inspect(args) => {
            let (seed, maze) = build_maze(&args, &config)?;
            let report = MazeReport::from_grid(&maze.grid);
            println!("Seed: {seed}");
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Record { difficulty, seed, out } => {
            let difficulty = difficulty.map_or(config.default_difficulty, Difficulty::from);
            record(&config, difficulty, seed.unwrap_or_else(generate_runtime_seed), &out)?;
        }
        Commands::Replay { journal } => replay(&journal)?,
    }

    Ok(())
}

fn build_maze(args: &MazeArgs, config: &ToolConfig) -> Result<(u64, GeneratedMaze)> {
    let (width, height) = resolve_dimensions(args, config);
    let seed = args.seed.unwrap_or_else(|| {
        let seed = generate_runtime_seed();
        info!("no --seed given, using generated seed {seed}");
        seed
    });

    let maze = MazeGenerator::new(width, height)
        .with_max_attempts(config.max_attempts)
        .generate(&mut ChaCha8Rng::seed_from_u64(seed))
        .with_context(|| format!("Failed to generate a {width}x{height} maze"))?;
    Ok((seed, maze))
}

fn resolve_dimensions(args: &MazeArgs, config: &ToolConfig) -> (usize, usize) {
    if let (Some(width), Some(height)) = (args.width, args.height) {
        return (width, height);
    }
    let side = args.difficulty.map_or(config.default_difficulty, Difficulty::from).side();
    (side, side)
}

/// Simulated time between two recorded steps.
const RECORD_STEP: Duration = Duration::from_millis(150);

fn record(config: &ToolConfig, difficulty: Difficulty, seed: u64, out: &Path) -> Result<()> {
    let session = play_recorded_level(&config.player_name, difficulty, seed)?;
    let json = serde_json::to_string_pretty(session.journal())?;
    fs::write(out, json)
        .with_context(|| format!("Failed to write journal file: {}", out.display()))?;

    println!("Recorded {} inputs to {}", session.journal().inputs.len(), out.display());
    if let Some(score) = session.scores().last() {
        println!(
            "Score: {} {:?} {:.2} sec",
            score.player_name,
            score.difficulty,
            score.elapsed.as_secs_f64()
        );
    }
    println!("Snapshot Hash: {}", format_fingerprint(session.snapshot_hash()));
    Ok(())
}

/// Keeps a hand on the right-hand wall until the goal is reached. Open cells
/// form a tree, so the walk reaches every one of them.
fn play_recorded_level(player_name: &str, difficulty: Difficulty, seed: u64) -> Result<Session> {
    let mut session = Session::new(seed, player_name);
    let mut now = Duration::ZERO;
    session.open_level_select(now)?;
    session.select_level(difficulty, now)?;

    let mut facing = Direction::South;
    let step_limit = 4 * difficulty.side() * difficulty.side();
    for _ in 0..step_limit {
        if matches!(session.screen(), Screen::Won { .. }) {
            info!("{player_name} cleared {difficulty:?} (seed {seed})");
            return Ok(session);
        }
        let grid = session.grid().context("no maze on screen while playing")?;
        let pos = session.player_pos();
        let turn_order =
            [facing.turned_right(), facing, facing.turned_left(), facing.turned_right().turned_right()];
        let Some(next) =
            turn_order.into_iter().find(|&direction| grid.is_open_at(pos.step(direction)))
        else {
            bail!("player at ({}, {}) is walled in", pos.x, pos.y);
        };
        now += RECORD_STEP;
        session.step(next, now)?;
        facing = next;
    }
    bail!("walker did not reach the goal within {step_limit} steps")
}

fn replay(path: &Path) -> Result<()> {
    let journal_data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read journal file: {}", path.display()))?;
    let journal: InputJournal = serde_json::from_str(&journal_data)
        .with_context(|| "Failed to deserialize journal JSON")?;

    let result = replay_to_end(&journal).context("Replay failed during execution")?;

    println!("Replay complete.");
    println!("Inputs: {}", journal.inputs.len());
    println!("Final Screen: {:?}", result.final_screen);
    println!("Player: ({}, {})", result.player_pos.x, result.player_pos.y);
    for score in &result.scores {
        println!(
            "Score: {} {:?} {:.2} sec",
            score.player_name,
            score.difficulty,
            score.elapsed.as_secs_f64()
        );
    }
    println!("Snapshot Hash: {}", format_fingerprint(result.final_snapshot_hash));

    Ok(())
}

/// `0x` followed by exactly 16 lowercase hex digits.
fn format_fingerprint(hash: u64) -> String {
    format!("0x{hash:016x}")
}
