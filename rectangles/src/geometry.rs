//! Which rectangles a dice roll allows.
//!
//! A roll of `n` allows claiming any rectangle of exactly `n` cells, so the
//! candidates are the factor pairs of `n`. A rectangle is described by the
//! offset from its starting cell to the opposite corner, which is one less
//! than its height and width.

use crate::{Coord, Signs};

/// The (row, column) offsets from a starting cell to the opposite corner of
/// every rectangle with `sum` cells.
///
/// Ordered by increasing row offset. A sum of zero has no rectangles.
pub fn displacements(sum: u8) -> Vec<(u8, u8)> {
    (1..=sum)
        .filter(|i| sum % i == 0)
        .map(|i| (i - 1, sum / i - 1))
        .collect()
}

/// Where a displacement leads from `anchor` when expanding in the direction
/// of `signs`, or `None` if that leaves the board.
pub fn target(anchor: Coord, signs: Signs, (d_row, d_col): (u8, u8)) -> Option<Coord> {
    let d_row = i8::try_from(d_row).ok()?;
    let d_col = i8::try_from(d_col).ok()?;
    anchor.offset(signs.row * d_row, signs.col * d_col)
}

/// All on-board targets for a roll of `sum`, starting from `anchor`.
pub fn reachable_targets(anchor: Coord, signs: Signs, sum: u8) -> Vec<Coord> {
    displacements(sum)
        .into_iter()
        .filter_map(|d| target(anchor, signs, d))
        .collect()
}

pub fn is_reachable(anchor: Coord, target: Coord, signs: Signs, sum: u8) -> bool {
    reachable_targets(anchor, signs, sum).contains(&target)
}
