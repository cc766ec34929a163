use crate::{Board, Color, Coord, IllegalMove};

/// One of the four corners of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

pub const ALL_CORNERS: [Corner; 4] = [
    Corner::TopLeft,
    Corner::TopRight,
    Corner::BottomLeft,
    Corner::BottomRight,
];

/// The direction, per axis, in which a player anchored at a corner expands.
///
/// Each component is either `1` or `-1`, pointing towards the center of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signs {
    pub row: i8,
    pub col: i8,
}

impl Corner {
    pub fn coord(self) -> Coord {
        let last = Coord::LAST;
        match self {
            Corner::TopLeft => Coord::new(0, 0),
            Corner::TopRight => Coord::new(0, last.col),
            Corner::BottomLeft => Coord::new(last.row, 0),
            Corner::BottomRight => last,
        }
    }

    pub fn signs(self) -> Signs {
        match self {
            Corner::TopLeft => Signs { row: 1, col: 1 },
            Corner::TopRight => Signs { row: 1, col: -1 },
            Corner::BottomLeft => Signs { row: -1, col: 1 },
            Corner::BottomRight => Signs { row: -1, col: -1 },
        }
    }

    /// The diagonally opposite corner.
    pub fn opposite(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }

    /// The corner located at `coord`, if it is one.
    pub fn at(coord: Coord) -> Option<Corner> {
        ALL_CORNERS
            .into_iter()
            .find(|corner| corner.coord() == coord)
    }
}

/// Remembers which corner each color is anchored to.
///
/// A color gets its corner with its first accepted move and keeps it until
/// the game is restarted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CornerTracker {
    anchors: [Option<Corner>; 2],
}

impl CornerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstructs the anchors from a board snapshot.
    ///
    /// See [`Self::observe()`] for how ambiguous snapshots are resolved.
    pub fn infer(board: &Board) -> Self {
        let mut tracker = Self::new();
        tracker.observe(board);
        tracker
    }

    /// Assigns an anchor to every color that doesn't have one yet but owns a
    /// corner on `board`. If a color owns several corners, the first one in
    /// [`ALL_CORNERS`] order wins, so this should be called after every move
    /// to stay accurate.
    pub fn observe(&mut self, board: &Board) {
        for color in [Color::A, Color::B] {
            if self.anchor(color).is_none() {
                if let Some(corner) = ALL_CORNERS
                    .into_iter()
                    .find(|&corner| board.corner_state(corner).owner() == Some(color))
                {
                    self.record(color, corner);
                }
            }
        }
    }

    pub fn anchor(&self, color: Color) -> Option<Corner> {
        self.anchors[color as usize]
    }

    pub fn record(&mut self, color: Color, corner: Corner) {
        self.anchors[color as usize] = Some(corner);
    }

    /// Determines the anchor corner for a move by `color` starting at `from`,
    /// checking that `from` is an allowed starting cell.
    ///
    /// - On an empty board, `from` must be one of the four corners, which becomes the anchor.
    /// - If only the opponent has moved, `from` must be the corner opposite
    ///   to the opponent's.
    /// - Otherwise, `from` must be on the frontier of `color`.
    pub fn resolve(&self, board: &Board, color: Color, from: Coord) -> Result<Corner, IllegalMove> {
        if board.is_empty() {
            return Corner::at(from).ok_or(IllegalMove::NotACorner { from });
        }
        match self.anchor(color) {
            Some(corner) => {
                if board.is_frontier(from, color) {
                    Ok(corner)
                } else {
                    Err(IllegalMove::NotOnFrontier { from })
                }
            }
            None => {
                let opponent_corner = self.anchor(color.opponent()).or_else(|| {
                    ALL_CORNERS
                        .into_iter()
                        .find(|&corner| board.corner_state(corner).owner().is_some())
                });
                // The board is not empty, so some corner is claimed
                let expected = opponent_corner
                    .map(Corner::opposite)
                    .ok_or(IllegalMove::NotACorner { from })?;
                if expected.coord() == from {
                    Ok(expected)
                } else {
                    Err(IllegalMove::WrongStartingCorner {
                        expected: expected.coord(),
                        from,
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;

    #[test]
    fn signs_point_inwards() {
        for corner in ALL_CORNERS {
            let Signs { row, col } = corner.signs();
            let inward = corner.coord().offset(row, col);
            assert!(inward.is_some(), "{:?}", corner);
            assert_eq!(corner.opposite().opposite(), corner);
            assert_eq!(Corner::at(corner.coord()), Some(corner));
        }
        assert_eq!(Corner::at(Coord::new(1, 0)), None);
    }

    #[test]
    fn first_move_must_start_at_a_corner() {
        let tracker = CornerTracker::new();
        let board = Board::new();
        assert_eq!(
            tracker.resolve(&board, Color::A, Coord::new(0, 29)),
            Ok(Corner::TopRight)
        );
        assert_eq!(
            tracker.resolve(&board, Color::A, Coord::new(1, 0)),
            Err(IllegalMove::NotACorner {
                from: Coord::new(1, 0)
            })
        );
    }

    #[test]
    fn responder_starts_opposite_of_opponent() {
        let mut tracker = CornerTracker::new();
        let mut board = Board::new();
        board.claim(Rect::spanning(Coord::new(0, 29), Coord::new(1, 28)), Color::A);
        tracker.record(Color::A, Corner::TopRight);

        assert_eq!(
            tracker.resolve(&board, Color::B, Coord::new(29, 0)),
            Ok(Corner::BottomLeft)
        );
        assert_eq!(
            tracker.resolve(&board, Color::B, Coord::LAST),
            Err(IllegalMove::WrongStartingCorner {
                expected: Coord::new(29, 0),
                from: Coord::LAST,
            })
        );
    }

    #[test]
    fn later_moves_start_on_the_frontier() {
        let mut tracker = CornerTracker::new();
        let mut board = Board::new();
        board.claim(Rect::spanning(Coord::new(0, 0), Coord::new(2, 1)), Color::A);
        tracker.record(Color::A, Corner::TopLeft);

        assert_eq!(
            tracker.resolve(&board, Color::A, Coord::new(3, 0)),
            Ok(Corner::TopLeft)
        );
        assert_eq!(
            tracker.resolve(&board, Color::A, Coord::new(0, 2)),
            Ok(Corner::TopLeft)
        );
        // Diagonal contact is not enough
        assert_eq!(
            tracker.resolve(&board, Color::A, Coord::new(3, 2)),
            Err(IllegalMove::NotOnFrontier {
                from: Coord::new(3, 2)
            })
        );
        // A claimed cell is never on the frontier
        assert_eq!(
            tracker.resolve(&board, Color::A, Coord::new(1, 1)),
            Err(IllegalMove::NotOnFrontier {
                from: Coord::new(1, 1)
            })
        );
    }

    #[test]
    fn infer_reads_anchors_from_corners() {
        let mut board = Board::new();
        board.claim(Rect::singleton(Coord::new(29, 0)), Color::B);
        let mut tracker = CornerTracker::infer(&board);
        assert_eq!(tracker.anchor(Color::A), None);
        assert_eq!(tracker.anchor(Color::B), Some(Corner::BottomLeft));

        // Later corners don't replace a known anchor
        board.claim(Rect::singleton(Coord::new(0, 0)), Color::B);
        board.claim(Rect::singleton(Coord::new(0, 29)), Color::A);
        tracker.observe(&board);
        assert_eq!(tracker.anchor(Color::A), Some(Corner::TopRight));
        assert_eq!(tracker.anchor(Color::B), Some(Corner::BottomLeft));
    }
}
