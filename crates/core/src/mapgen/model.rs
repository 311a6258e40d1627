//! Public results and failures of maze generation.

use thiserror::Error;

use crate::grid::Grid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedMaze {
    pub grid: Grid,
    /// Number of carve passes it took, starting at 1.
    pub attempts: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("maze dimensions {width}x{height} are below the 3x3 minimum")]
    DimensionsTooSmall { width: usize, height: usize },
    #[error("maze dimensions {width}x{height} exceed the i32 coordinate range")]
    DimensionsTooLarge { width: usize, height: usize },
    #[error("no maze reached the exit row after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },
}
