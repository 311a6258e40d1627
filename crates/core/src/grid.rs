//! Occupancy grid shared by the generator, the player and the renderers.

use std::fmt;

use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Cell, Pos};

/// Largest side whose cells are all addressable with `i32` coordinates.
pub const MAX_DIMENSION: usize = i32::MAX as usize;

/// Rectangular wall/open grid. Dimensions are always odd.
///
/// Queries take signed coordinates so edge lookups such as `(x - 1, y)` need no
/// special casing: anything outside the grid reads as a wall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocates an all-wall grid, rounding even dimensions up to the next odd value.
    ///
    /// Coordinates are `i32`, so sides must not exceed [`MAX_DIMENSION`].
    /// [`crate::MazeGenerator`] rejects larger requests before allocating.
    pub fn new(width: usize, height: usize) -> Self {
        let width = coerce_odd(width);
        let height = coerce_odd(height);
        Self { width, height, cells: vec![Cell::Wall; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_open(&self, x: i32, y: i32) -> bool {
        self.cell_at(Pos::new(x, y)) == Cell::Open
    }

    pub fn is_open_at(&self, pos: Pos) -> bool {
        self.cell_at(pos) == Cell::Open
    }

    pub fn cell_at(&self, pos: Pos) -> Cell {
        match self.index(pos) {
            Some(idx) => self.cells[idx],
            None => Cell::Wall,
        }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    /// Cell the player enters the maze through.
    pub fn entrance(&self) -> Pos {
        Pos::new(1, 0)
    }

    /// Border opening drawn at the bottom edge.
    pub fn exit(&self) -> Pos {
        Pos::new(self.width as i32 - 2, self.height as i32 - 1)
    }

    /// Cell that wins the level. One row above [`Grid::exit`].
    pub fn goal(&self) -> Pos {
        Pos::new(self.width as i32 - 2, self.height as i32 - 2)
    }

    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Cell::Open).count()
    }

    pub(crate) fn set_open(&mut self, x: i32, y: i32) {
        if let Some(idx) = self.index(Pos::new(x, y)) {
            self.cells[idx] = Cell::Open;
        }
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.cells.len());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for cell in &self.cells {
            bytes.push(match cell {
                Cell::Wall => 0,
                Cell::Open => 1,
            });
        }
        bytes
    }

    /// Stable xxh3 digest of [`Grid::canonical_bytes`].
    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    /// Text picture of the grid, one line per row.
    pub fn render(&self, wall_glyph: char, open_glyph: char) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(if self.is_open(x as i32, y as i32) { open_glyph } else { wall_glyph });
            }
            out.push('\n');
        }
        out
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some((pos.y as usize) * self.width + (pos.x as usize))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render('#', ' '))
    }
}

pub(crate) fn coerce_odd(dimension: usize) -> usize {
    if dimension.is_multiple_of(2) { dimension + 1 } else { dimension }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_dimensions_round_up_to_odd() {
        let grid = Grid::new(4, 10);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 11);

        let grid = Grid::new(7, 9);
        assert_eq!((grid.width(), grid.height()), (7, 9));
    }

    #[test]
    fn new_grid_is_all_wall() {
        let grid = Grid::new(5, 5);
        assert_eq!(grid.open_cell_count(), 0);
        assert!(!grid.is_open(1, 1));
    }

    #[test]
    fn out_of_range_queries_read_as_wall() {
        let mut grid = Grid::new(5, 5);
        grid.set_open(0, 0);
        grid.set_open(4, 4);
        assert!(grid.is_open(0, 0));
        assert!(grid.is_open(4, 4));

        for (x, y) in [(-1, 0), (0, -1), (5, 0), (0, 5), (i32::MIN, i32::MIN), (i32::MAX, 2)] {
            assert!(!grid.is_open(x, y), "({x}, {y}) should not be open");
            assert_eq!(grid.cell_at(Pos::new(x, y)), Cell::Wall);
        }
    }

    #[test]
    fn set_open_ignores_out_of_range_coordinates() {
        let mut grid = Grid::new(3, 3);
        grid.set_open(-1, 1);
        grid.set_open(3, 3);
        assert_eq!(grid.open_cell_count(), 0);
    }

    #[test]
    fn exit_sits_one_row_below_goal() {
        let grid = Grid::new(11, 11);
        assert_eq!(grid.entrance(), Pos::new(1, 0));
        assert_eq!(grid.exit(), Pos::new(9, 10));
        assert_eq!(grid.goal(), Pos::new(9, 9));
    }

    #[test]
    fn display_renders_one_line_per_row() {
        let mut grid = Grid::new(3, 3);
        grid.set_open(1, 1);
        assert_eq!(grid.to_string(), "###\n# #\n###\n");
        assert_eq!(grid.render('X', '.'), "XXX\nX.X\nXXX\n");
    }

    #[test]
    fn fingerprint_tracks_cell_changes() {
        let mut grid = Grid::new(5, 5);
        let before = grid.fingerprint();
        grid.set_open(1, 1);
        assert_ne!(before, grid.fingerprint());
        assert_eq!(grid.fingerprint(), grid.clone().fingerprint());
    }
}
