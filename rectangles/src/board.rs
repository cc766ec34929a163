mod rect;

pub use rect::*;

use crate::{Cell, Color, Coord, Corner, ALL_CORNERS};

/// The number of rows, and also the number of columns, of the board.
pub const BOARD_SIZE: usize = 30;

/// A snapshot of every cell of the board, in row-major order.
///
/// This is what gets sent over the wire as the `field` of a message.
pub type Field = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// The playing board.
///
/// Cells only ever change through [`Self::claim()`], and once claimed they
/// stay claimed until the whole board is replaced by a fresh one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Field,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board where every cell is unclaimed.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Rebuilds a board from a snapshot, e.g. one received from the judge.
    pub fn from_field(field: &Field) -> Self {
        Self { cells: *field }
    }

    /// An owned copy of all cells, for sending to the players.
    pub fn to_field(&self) -> Field {
        self.cells
    }

    /// Panics if the coordinate is out of bounds.
    pub fn get(&self, coord: Coord) -> Cell {
        self.cells[usize::from(coord.row)][usize::from(coord.col)]
    }

    /// Is every cell in the rectangle unclaimed?
    pub fn is_unclaimed(&self, rect: Rect) -> bool {
        rect.cells().all(|coord| self.get(coord) == Cell::Empty)
    }

    /// Marks every cell in the rectangle as owned by `color`.
    pub fn claim(&mut self, rect: Rect, color: Color) {
        for Coord { row, col } in rect.cells() {
            self.cells[usize::from(row)][usize::from(col)] = Cell::from(color);
        }
    }

    pub fn corner_state(&self, corner: Corner) -> Cell {
        self.get(corner.coord())
    }

    /// True iff none of the four corners has been claimed, which is the case
    /// exactly when nobody has moved yet.
    pub fn is_empty(&self) -> bool {
        ALL_CORNERS
            .iter()
            .all(|&corner| self.corner_state(corner) == Cell::Empty)
    }

    pub fn owns(&self, coord: Coord, color: Color) -> bool {
        self.get(coord) == Cell::from(color)
    }

    /// How many cells are owned by `color`.
    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::from(color))
            .count()
    }

    /// Is this an unclaimed cell that touches (4-directionally) a cell owned by `color`?
    pub fn is_frontier(&self, coord: Coord, color: Color) -> bool {
        self.get(coord) == Cell::Empty
            && neighbors(coord).any(|neighbor| self.owns(neighbor, color))
    }

    /// All frontier cells of `color`, in row-major order.
    pub fn frontier(&self, color: Color) -> Vec<Coord> {
        Rect::spanning(Coord::new(0, 0), Coord::LAST)
            .cells()
            .filter(|&coord| self.is_frontier(coord, color))
            .collect()
    }
}

/// The in-bounds cells directly above, below, left and right of `coord`.
pub fn neighbors(coord: Coord) -> impl Iterator<Item = Coord> {
    [(-1, 0), (1, 0), (0, -1), (0, 1)]
        .into_iter()
        .filter_map(move |(d_row, d_col)| coord.offset(d_row, d_col))
}
