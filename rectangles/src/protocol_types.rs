use serde::{Deserialize, Serialize};

use crate::{DiceRoll, Field, BOARD_SIZE};

/// Request from a player to the judge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Request {
    /// Claim the rectangle described by the move.
    ///
    /// Only valid while it's the sender's turn.
    PlayerMove {
        #[serde(rename = "move")]
        player_move: Move,
    },
    /// Start over with an empty board and zero scores.
    RepeatGame,
}

/// Message from the judge to a player.
///
/// Every message is addressed to a single player, so `my_turn` and `color`
/// are from the point of view of the recipient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Response {
    /// A new game has started, either because the players were just paired
    /// or because someone requested a restart.
    GameStarted {
        #[serde(rename = "myTurn")]
        my_turn: bool,
        field: Field,
        color: Color,
        /// The recipient's score, which is always zero at the start.
        sum: u32,
    },
    /// A move was accepted and the turn passed to the other player.
    ChangePlayer {
        #[serde(rename = "myTurn")]
        my_turn: bool,
        field: Field,
        color: Color,
    },
    /// Someone reached the winning score.
    GameResult { win: bool },
    /// The other player left; no more messages will follow.
    GameAborted,
    /// The request was rejected and had no effect.
    IncorrectRequest { message: String },
}

/// The two players. The first player to be seated is always [`Color::A`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    A,
    B,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::A => Color::B,
            Color::B => Color::A,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::A => write!(f, "A"),
            Color::B => write!(f, "B"),
        }
    }
}

/// Ownership state of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[serde(rename = "empty")]
    Empty,
    A,
    B,
}

impl Cell {
    pub fn owner(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::A => Some(Color::A),
            Cell::B => Some(Color::B),
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Cell {
        match color {
            Color::A => Cell::A,
            Color::B => Cell::B,
        }
    }
}

/// A zero-based (row, column) position on the board.
///
/// Deserialization accepts any `u8`, so a coordinate received from a player
/// must be checked with [`Self::in_bounds()`] before touching a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    /// The bottom-right cell.
    pub const LAST: Coord = Coord::new(BOARD_SIZE as u8 - 1, BOARD_SIZE as u8 - 1);

    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self) -> bool {
        usize::from(self.row) < BOARD_SIZE && usize::from(self.col) < BOARD_SIZE
    }

    /// Moves by the given (signed) amounts, if the result stays on the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Coord> {
        let row = u8::try_from(i16::from(self.row) + i16::from(d_row)).ok()?;
        let col = u8::try_from(i16::from(self.col) + i16::from(d_col)).ok()?;
        let coord = Coord { row, col };
        coord.in_bounds().then_some(coord)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A request to claim the rectangle spanned by `from` and `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub color: Color,
    /// The two dice that were rolled for this move. Only their sum matters.
    pub dices: DiceRoll,
}
