use std::sync::mpsc;

use rectangles::{Color, Response};
use tracing::{trace, warn};

/// The two places at a game. The first player to connect takes [`Seat::First`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Seat {
    First,
    Second,
}

pub const SEATS: [Seat; 2] = [Seat::First, Seat::Second];

impl Seat {
    pub fn other(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// Colors are tied to seats, so a restarted game keeps the assignment.
    pub fn color(self) -> Color {
        match self {
            Seat::First => Color::A,
            Seat::Second => Color::B,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// One connected player, as seen by the session.
///
/// Outgoing messages are queued on a channel and written to the connection
/// by someone else, so sending never blocks the session.
pub struct Participant {
    pub name: String,
    outbox: mpsc::Sender<Response>,
}

impl Participant {
    pub fn new(name: &str, outbox: mpsc::Sender<Response>) -> Self {
        Self {
            name: String::from(name),
            outbox,
        }
    }

    /// Queues a message for this participant.
    ///
    /// Failures are logged and otherwise ignored: by the time anything is
    /// sent, the game state has already moved on.
    pub fn send(&self, response: Response) {
        trace!(name: "Sending response", participant = &self.name, response = ?response);
        if self.outbox.send(response).is_err() {
            warn!(participant = &self.name, "Could not send message, connection is gone");
        }
    }
}
