pub mod analysis;
pub mod grid;
pub mod journal;
pub mod mapgen;
pub mod player;
pub mod replay;
pub mod session;
pub mod types;

pub use analysis::MazeReport;
pub use grid::Grid;
pub use journal::{InputJournal, InputPayload, InputRecord};
pub use mapgen::{GeneratedMaze, GenerationError, MazeGenerator, generate_maze};
pub use player::Player;
pub use replay::*;
pub use session::{Session, SessionAction, SessionError};
pub use types::*;
