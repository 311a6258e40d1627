//! Connectivity checks over a finished grid.
//! This module exists so tests and tooling can verify solvability.
//! It does not steer the player; movement stays manual.

use std::collections::{BTreeSet, VecDeque};

use serde::Serialize;

use crate::grid::Grid;
use crate::types::{Direction, Pos};

/// Every open cell 4-connected to `start`, including `start` itself.
pub fn reachable_open_cells(grid: &Grid, start: Pos) -> BTreeSet<Pos> {
    let mut visited = BTreeSet::new();
    if !grid.is_open_at(start) {
        return visited;
    }

    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for neighbor in open_neighbors(grid, current) {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    visited
}

pub fn is_connected(grid: &Grid, from: Pos, to: Pos) -> bool {
    reachable_open_cells(grid, from).contains(&to)
}

fn open_neighbors(grid: &Grid, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
    Direction::ALL
        .into_iter()
        .map(move |direction| pos.step(direction))
        .filter(|&next| grid.is_open_at(next))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MazeReport {
    pub width: usize,
    pub height: usize,
    pub open_cells: usize,
    pub rooms: usize,
    pub rooms_reachable: usize,
    pub dead_ends: usize,
    pub goal_reachable: bool,
    pub exit_reachable: bool,
    /// Open cells connect without cycles.
    pub is_tree: bool,
}

impl MazeReport {
    pub fn from_grid(grid: &Grid) -> Self {
        let (width, height) = (grid.width() as i32, grid.height() as i32);
        let from_entrance = reachable_open_cells(grid, grid.entrance());

        let mut open_cells = 0;
        let mut rooms = 0;
        let mut rooms_reachable = 0;
        let mut dead_ends = 0;
        let mut degree_sum = 0;
        for y in 0..height {
            for x in 0..width {
                let pos = Pos::new(x, y);
                if !grid.is_open_at(pos) {
                    continue;
                }
                open_cells += 1;
                let degree = open_neighbors(grid, pos).count();
                degree_sum += degree;
                if degree == 1 && pos != grid.entrance() && pos != grid.exit() {
                    dead_ends += 1;
                }
                if x % 2 == 1 && y % 2 == 1 {
                    rooms += 1;
                    if from_entrance.contains(&pos) {
                        rooms_reachable += 1;
                    }
                }
            }
        }

        let edges = degree_sum / 2;
        Self {
            width: grid.width(),
            height: grid.height(),
            open_cells,
            rooms,
            rooms_reachable,
            dead_ends,
            goal_reachable: from_entrance.contains(&grid.goal()),
            exit_reachable: from_entrance.contains(&grid.exit()),
            is_tree: open_cells > 0
                && edges + 1 == open_cells
                && from_entrance.len() == open_cells,
        }
    }
}
