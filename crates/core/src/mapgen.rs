//! Maze generation split into carving, repair and seed helpers.

pub mod model;

mod carve;
mod generator;
mod repair;
mod seed;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::grid::Grid;

pub use generator::{DEFAULT_MAX_ATTEMPTS, MIN_DIMENSION, MazeGenerator};
pub use model::{GeneratedMaze, GenerationError};
pub use seed::generate_runtime_seed;

/// Builds a maze of at least `width` x `height` (even sides grow by one).
///
/// `None` draws a time-derived seed, so only `Some(seed)` calls are reproducible.
pub fn generate_maze(
    width: usize,
    height: usize,
    seed: Option<u64>,
) -> Result<Grid, GenerationError> {
    let seed = seed.unwrap_or_else(generate_runtime_seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    MazeGenerator::new(width, height).generate(&mut rng).map(|maze| maze.grid)
}
