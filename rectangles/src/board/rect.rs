use crate::Coord;

/// An axis-aligned area represented by a min + max coordinate pair.
///
/// The two coordinates form an _inclusive_ 2D range, i.e. unlike in a
/// half-open range, a cell with `row == row_max` is contained in the area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub row_min: u8,
    pub col_min: u8,
    pub row_max: u8,
    pub col_max: u8,
}

impl Rect {
    /// The rectangle with `a` and `b` as opposite corners, in either order.
    pub fn spanning(a: Coord, b: Coord) -> Self {
        Self {
            row_min: a.row.min(b.row),
            col_min: a.col.min(b.col),
            row_max: a.row.max(b.row),
            col_max: a.col.max(b.col),
        }
    }

    pub fn singleton(coord: Coord) -> Self {
        Self::spanning(coord, coord)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row >= self.row_min
            && coord.col >= self.col_min
            && coord.row <= self.row_max
            && coord.col <= self.col_max
    }

    /// Number of cells covered.
    pub fn area(&self) -> usize {
        usize::from(self.row_max - self.row_min + 1) * usize::from(self.col_max - self.col_min + 1)
    }

    /// All covered cells in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Coord> {
        (self.row_min..=self.row_max)
            .flat_map(move |row| (self.col_min..=self.col_max).map(move |col| Coord { row, col }))
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}..{}",
            Coord::new(self.row_min, self.col_min),
            Coord::new(self.row_max, self.col_max)
        )
    }
}
