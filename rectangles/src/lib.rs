pub use board::*;
pub use corner::*;
pub use dice::*;
pub use errors::*;
pub use geometry::*;
pub use protocol_types::*;
pub use turn::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod corner;
mod dice;
mod errors;
mod geometry;
mod protocol_types;
mod turn;
mod visualization;

/// A player wins once the dice sums of their accepted moves add up to this.
pub const WIN_THRESHOLD: u32 = 450;

/// The TCP port the judge listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 38617;
