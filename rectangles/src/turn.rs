use crate::{
    is_reachable, reachable_targets, Board, Color, Coord, Corner, CornerTracker, IllegalMove, Move,
    Rect,
};

/// A move that passed validation but has not been applied yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckedMove {
    pub color: Color,
    pub anchor: Corner,
    pub rect: Rect,
    pub sum: u8,
}

/// Checks whether `color` may play `mv` on `board`, without changing anything.
///
/// `color` is the color of the player who sent the move, which the move
/// itself must agree with.
pub fn check_move(
    board: &Board,
    tracker: &CornerTracker,
    color: Color,
    mv: &Move,
) -> Result<CheckedMove, IllegalMove> {
    if mv.color != color {
        return Err(IllegalMove::ColorMismatch {
            expected: color,
            got: mv.color,
        });
    }
    if let Some(face) = mv.dices.invalid_face() {
        return Err(IllegalMove::InvalidDie { face });
    }
    for coord in [mv.from, mv.to] {
        if !coord.in_bounds() {
            return Err(IllegalMove::OutOfBounds { coord });
        }
    }

    let anchor = tracker.resolve(board, color, mv.from)?;
    let sum = mv.dices.sum();
    if !is_reachable(mv.from, mv.to, anchor.signs(), sum) {
        return Err(IllegalMove::Unreachable {
            from: mv.from,
            to: mv.to,
            sum,
        });
    }
    let rect = Rect::spanning(mv.from, mv.to);
    if !board.is_unclaimed(rect) {
        return Err(IllegalMove::AreaOccupied { rect });
    }

    Ok(CheckedMove {
        color,
        anchor,
        rect,
        sum,
    })
}

/// Validates and applies a move. On error, neither the board nor the tracker
/// is changed.
pub fn execute_move(
    board: &mut Board,
    tracker: &mut CornerTracker,
    color: Color,
    mv: &Move,
) -> Result<CheckedMove, IllegalMove> {
    let checked = check_move(board, tracker, color, mv)?;
    board.claim(checked.rect, color);
    if tracker.anchor(color).is_none() {
        tracker.record(color, checked.anchor);
    }
    Ok(checked)
}

/// Every `(from, to)` pair that [`check_move()`] would accept for `color`
/// and a roll of `sum`.
pub fn legal_moves(
    board: &Board,
    tracker: &CornerTracker,
    color: Color,
    sum: u8,
) -> Vec<(Coord, Coord)> {
    let starts: Vec<(Coord, Corner)> = if board.is_empty() {
        crate::ALL_CORNERS
            .into_iter()
            .map(|corner| (corner.coord(), corner))
            .collect()
    } else {
        match tracker.anchor(color) {
            Some(corner) => board
                .frontier(color)
                .into_iter()
                .map(|from| (from, corner))
                .collect(),
            None => crate::ALL_CORNERS
                .into_iter()
                .map(|corner| corner.coord())
                .filter_map(|from| {
                    tracker
                        .resolve(board, color, from)
                        .ok()
                        .map(|corner| (from, corner))
                })
                .collect(),
        }
    };

    let mut moves = Vec::new();
    for (from, corner) in starts {
        for to in reachable_targets(from, corner.signs(), sum) {
            if board.is_unclaimed(Rect::spanning(from, to)) {
                moves.push((from, to));
            }
        }
    }
    moves
}
