use anyhow::{Result, bail};
use clap::Parser;
use log::{LevelFilter, warn};
use maze_core::analysis::reachable_open_cells;
use maze_core::{Grid, MazeGenerator, MazeReport, Pos};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    cases: u32,
    /// Largest side length to try
    #[arg(long, default_value_t = 41)]
    max_side: usize,
}

fn pick_side(rng: &mut ChaCha8Rng, max_side: usize) -> usize {
    3 + rng.next_u64() as usize % (max_side.max(3) - 2)
}

fn check_invariants(grid: &Grid, requested: (usize, usize)) -> Result<(), String> {
    let (width, height) = requested;
    if grid.width().is_multiple_of(2) || grid.width() < width || grid.width() > width + 1 {
        return Err(format!("width {} does not match request {width}", grid.width()));
    }
    if grid.height().is_multiple_of(2) || grid.height() < height || grid.height() > height + 1 {
        return Err(format!("height {} does not match request {height}", grid.height()));
    }

    let (w, h) = (grid.width() as i32, grid.height() as i32);
    for x in 0..w {
        for y in 0..h {
            let pos = Pos::new(x, y);
            let on_border = x == 0 || y == 0 || x == w - 1 || y == h - 1;
            let gate = pos == grid.entrance() || pos == grid.exit();
            if on_border && grid.is_open_at(pos) != gate {
                return Err(format!("border cell ({x}, {y}) has the wrong state"));
            }
        }
    }

    let from_start = reachable_open_cells(grid, Pos::new(1, 1));
    for x in (1..w - 1).step_by(2) {
        for y in (1..h - 1).step_by(2) {
            let room = Pos::new(x, y);
            if grid.is_open_at(room) && !from_start.contains(&room) {
                return Err(format!("room ({x}, {y}) is cut off from the start"));
            }
        }
    }

    let report = MazeReport::from_grid(grid);
    if !report.goal_reachable || !report.exit_reachable {
        return Err("goal is not reachable from the entrance".to_string());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new().filter_level(LevelFilter::Warn).parse_default_env().init();
    let args = Args::parse();

    println!("Starting maze fuzz on seed {} for {} cases...", args.seed, args.cases);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut failures = 0_u32;

    for case in 0..args.cases {
        let requested = (pick_side(&mut rng, args.max_side), pick_side(&mut rng, args.max_side));
        let maze_seed = rng.next_u64();
        let generated = MazeGenerator::new(requested.0, requested.1)
            .generate(&mut ChaCha8Rng::seed_from_u64(maze_seed));

        let verdict = match generated {
            Ok(maze) => check_invariants(&maze.grid, requested),
            Err(err) => Err(err.to_string()),
        };
        if let Err(reason) = verdict {
            warn!("case {case} ({}x{}, seed {maze_seed}): {reason}", requested.0, requested.1);
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{failures} of {} cases violated maze invariants", args.cases);
    }
    println!("Fuzzing completed successfully.");
    Ok(())
}
