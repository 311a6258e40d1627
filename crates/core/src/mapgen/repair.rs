//! Post-carve fixes that punch the border gates and guard the exit approach.

use log::debug;

use crate::grid::Grid;

pub(super) fn open_border_gates(grid: &mut Grid) {
    let entrance = grid.entrance();
    let exit = grid.exit();
    grid.set_open(entrance.x, entrance.y);
    grid.set_open(exit.x, exit.y);
}

/// Scans columns left to right, each from the row above the bottom border
/// upward. The first column holding any open cell gets its bottom interior
/// cell opened.
///
/// Returns `false` when no column holds an open cell.
pub(super) fn open_exit_approach(grid: &mut Grid) -> bool {
    let width = grid.width() as i32;
    let height = grid.height() as i32;

    for x in 1..width - 1 {
        if (0..=height - 2).rev().any(|y| grid.is_open(x, y)) {
            grid.set_open(x, height - 2);
            debug!("exit approach opened at column {x}");
            return true;
        }
    }
    false
}
