//! Hand-steered maze walker.

use crate::grid::Grid;
use crate::types::{Direction, MoveOutcome, Pos};

pub const PLAYER_START: Pos = Pos::new(1, 1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    pos: Pos,
}

impl Default for Player {
    fn default() -> Self {
        Self { pos: PLAYER_START }
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Steps one cell if the target is open; otherwise stays put.
    pub fn try_move(&mut self, grid: &Grid, direction: Direction) -> MoveOutcome {
        let target = self.pos.step(direction);
        if !grid.is_open_at(target) {
            return MoveOutcome::Blocked;
        }
        self.pos = target;
        MoveOutcome::Moved(target)
    }

    pub fn has_won(&self, grid: &Grid) -> bool {
        self.pos == grid.goal()
    }

    pub fn reset(&mut self) {
        self.pos = PLAYER_START;
    }
}
