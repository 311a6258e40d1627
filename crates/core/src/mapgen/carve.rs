//! Randomized depth-first carving over the odd-coordinate room lattice.

use rand_chacha::rand_core::Rng;

use crate::grid::Grid;
use crate::types::{Direction, Pos};

use super::seed::shuffle;

pub(super) const START_ROOM: Pos = Pos::new(1, 1);

/// Opens every room reachable from [`START_ROOM`] together with one connecting
/// cell per room.
///
/// A popped room carves *all* of its still-walled neighbours in shuffled order
/// before the stack is consulted again, so branches fan out wider than a
/// single-successor backtracker would.
pub(super) fn carve_rooms<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let width = grid.width() as i32;
    let height = grid.height() as i32;

    grid.set_open(START_ROOM.x, START_ROOM.y);
    let mut stack = vec![START_ROOM];

    while let Some(room) = stack.pop() {
        let mut directions = Direction::ALL;
        shuffle(rng, &mut directions);

        for direction in directions {
            let (dx, dy) = direction.delta();
            let next = room.offset(dx * 2, dy * 2);
            if !is_interior(next, width, height) || grid.is_open_at(next) {
                continue;
            }
            grid.set_open(next.x, next.y);
            grid.set_open(room.x + dx, room.y + dy);
            stack.push(next);
        }
    }
}

fn is_interior(pos: Pos, width: i32, height: i32) -> bool {
    pos.x > 0 && pos.x < width - 1 && pos.y > 0 && pos.y < height - 1
}
