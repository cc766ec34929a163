use crate::{Color, Coord, Rect};

/// The error type for one move, i.e. the reasons a claim can be illegal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    ColorMismatch { expected: Color, got: Color },
    InvalidDie { face: u8 },
    OutOfBounds { coord: Coord },
    NotACorner { from: Coord },
    WrongStartingCorner { expected: Coord, from: Coord },
    NotOnFrontier { from: Coord },
    Unreachable { from: Coord, to: Coord, sum: u8 },
    AreaOccupied { rect: Rect },
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::ColorMismatch { expected, got } =>
                write!(f, "Move was made for color {}, but the player's color is {}", got, expected),
            IllegalMove::InvalidDie { face } =>
                write!(f, "A die showed {}, which is not between 1 and 6", face),
            IllegalMove::OutOfBounds { coord } =>
                write!(f, "Coordinate {} is outside of the board", coord),
            IllegalMove::NotACorner { from } =>
                write!(f, "The first move must start at a corner, but started at {}", from),
            IllegalMove::WrongStartingCorner { expected, from } =>
                write!(f, "The first move of this player must start at the corner {}, but started at {}", expected, from),
            IllegalMove::NotOnFrontier { from } =>
                write!(f, "Move started at {}, which is not an unclaimed cell next to the player's area", from),
            IllegalMove::Unreachable { from, to, sum } =>
                write!(f, "No rectangle from {} to {} can be claimed with a roll of {}", from, to, sum),
            IllegalMove::AreaOccupied { rect } =>
                write!(f, "The rectangle {} contains cells that are already claimed", rect),
        }
    }
}
