mod error;
mod participant;
mod recording;
mod server;
mod session;
pub use error::*;
pub use participant::*;
pub use recording::*;
pub use server::*;
pub use session::*;

use std::path::PathBuf;

use rectangles::WIN_THRESHOLD;

#[derive(Clone, Debug)]
pub struct Config {
    /// The score at which a player wins.
    pub win_threshold: u32,
    /// Record the sessions' messages as JSON files into this directory.
    pub record_games_to_directory: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            win_threshold: WIN_THRESHOLD,
            record_games_to_directory: None,
        }
    }
}
