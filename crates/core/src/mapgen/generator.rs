//! Generation driver: carve, punch gates, repair, and retry within a budget.

use log::{debug, warn};
use rand_chacha::rand_core::Rng;

use crate::grid::{Grid, MAX_DIMENSION, coerce_odd};

use super::carve::carve_rooms;
use super::model::{GeneratedMaze, GenerationError};
use super::repair::{open_border_gates, open_exit_approach};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;
pub const MIN_DIMENSION: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeGenerator {
    width: usize,
    height: usize,
    max_attempts: u32,
}

impl MazeGenerator {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: coerce_odd(width),
            height: coerce_odd(height),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Caps the number of discarded grids before giving up. Never below one.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Dimensions of every grid this generator produces.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Carves, gates and repairs grids until one passes the exit-approach scan.
    ///
    /// Once the dimensions validate, the first attempt always succeeds: the
    /// entrance and the start room both sit in column 1, so the scan never comes
    /// up empty. The retry budget only bounds the loop; `AttemptsExhausted` is
    /// not expected in practice.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GeneratedMaze, GenerationError> {
        if self.width < MIN_DIMENSION || self.height < MIN_DIMENSION {
            return Err(GenerationError::DimensionsTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(GenerationError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            });
        }

        for attempt in 1..=self.max_attempts {
            let mut grid = Grid::new(self.width, self.height);
            carve_rooms(&mut grid, rng);
            open_border_gates(&mut grid);

            if open_exit_approach(&mut grid) {
                debug!(
                    "generated {}x{} maze on attempt {attempt} ({} open cells)",
                    self.width,
                    self.height,
                    grid.open_cell_count()
                );
                return Ok(GeneratedMaze { grid, attempts: attempt });
            }
            warn!("discarding maze attempt {attempt}: no column reaches the exit row");
        }

        Err(GenerationError::AttemptsExhausted { attempts: self.max_attempts })
    }
}
