use std::collections::HashMap;

use rectangles::{execute_move, visualize_board, Board, CornerTracker, Move, Request, Response};
use tracing::{debug, info, trace, warn};

use crate::error::{ProtocolError, Rejection};
use crate::participant::{Participant, Seat, SEATS};
use crate::recording::Recorder;
use crate::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Both participants are seated, but the game has not been started.
    Idle,
    Active,
    /// Someone won. Only a restart is accepted now.
    Finished,
    /// A participant left or the session was shut down. Everything is a no-op.
    TornDown,
}

/// The authority over one game between two participants.
///
/// Messages must be fed in one at a time, in the order they arrived.
pub struct Session {
    id: u64,
    win_threshold: u32,
    participants: [Option<Participant>; 2],
    board: Board,
    tracker: CornerTracker,
    scores: HashMap<Seat, u32>,
    turn: Seat,
    state: SessionState,
    recorder: Option<Recorder>,
}

impl Session {
    pub fn new(id: u64, config: &Config, first: Participant, second: Participant) -> Self {
        let recorder = config
            .record_games_to_directory
            .as_ref()
            .and_then(|dir| match Recorder::new(dir.clone(), id) {
                Ok(recorder) => Some(recorder),
                Err(err) => {
                    warn!(session = id, %err, "Not recording this session");
                    None
                }
            });
        Self {
            id,
            win_threshold: config.win_threshold,
            participants: [Some(first), Some(second)],
            board: Board::new(),
            tracker: CornerTracker::new(),
            scores: SEATS.into_iter().map(|seat| (seat, 0)).collect(),
            turn: Seat::First,
            state: SessionState::Idle,
            recorder,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whose turn it is.
    pub fn turn(&self) -> Seat {
        self.turn
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The sum of the dice of all accepted moves of this participant in the current game.
    pub fn score(&self, seat: Seat) -> u32 {
        self.scores.get(&seat).copied().unwrap_or(0)
    }

    /// Starts a fresh game, discarding the current one if there is any.
    pub fn start(&mut self) {
        if self.state == SessionState::TornDown {
            debug!(session = self.id, "Not starting a game after teardown");
            return;
        }
        if self.state != SessionState::Idle {
            self.write_recording();
        }

        self.board = Board::new();
        self.tracker = CornerTracker::new();
        for seat in SEATS {
            self.scores.insert(seat, 0);
        }
        self.turn = Seat::First;
        self.state = SessionState::Active;
        info!(session = self.id, "Game started");

        let field = self.board.to_field();
        let turn = self.turn;
        for seat in SEATS {
            self.send(
                seat,
                Response::GameStarted {
                    my_turn: seat == turn,
                    field,
                    color: seat.color(),
                    sum: 0,
                },
            );
        }
    }

    /// Processes one raw message from a participant.
    ///
    /// Anything that can't be acted upon is answered with an
    /// `incorrectRequest` to the sender alone, and changes nothing.
    pub fn handle_message(&mut self, seat: Seat, payload: &str) {
        let Some(participant) = &self.participants[seat.index()] else {
            debug!(session = self.id, ?seat, "Ignoring message from a departed participant");
            return;
        };
        trace!(name: "Received request", session = self.id, participant = &participant.name, request = payload);
        if let Some(recorder) = &mut self.recorder {
            recorder.store_inbound(&participant.name, payload);
        }

        let result = parse_request(payload)
            .map_err(Rejection::from)
            .and_then(|request| self.handle_request(seat, request));
        if let Err(rejection) = result {
            self.reject(seat, rejection);
        }
    }

    /// Answers a message that was too long to be read at all.
    pub fn handle_oversized_message(&mut self, seat: Seat) {
        if self.participants[seat.index()].is_none() {
            return;
        }
        self.reject(seat, ProtocolError::RequestTooLong.into());
    }

    fn reject(&mut self, seat: Seat, rejection: Rejection) {
        debug!(session = self.id, ?seat, %rejection, "Rejected request");
        self.send(
            seat,
            Response::IncorrectRequest {
                message: rejection.client_message(),
            },
        );
    }

    pub fn handle_request(&mut self, seat: Seat, request: Request) -> Result<(), Rejection> {
        match request {
            Request::PlayerMove { player_move } => self.play_move(seat, &player_move),
            Request::RepeatGame => {
                info!(session = self.id, ?seat, "Restart requested");
                self.start();
                Ok(())
            }
        }
    }

    fn play_move(&mut self, seat: Seat, mv: &Move) -> Result<(), Rejection> {
        if self.state != SessionState::Active {
            return Err(ProtocolError::GameNotRunning.into());
        }
        if seat != self.turn {
            return Err(ProtocolError::OutOfTurn.into());
        }

        let checked = execute_move(&mut self.board, &mut self.tracker, seat.color(), mv)?;
        let score = self.scores.entry(seat).or_insert(0);
        *score += u32::from(checked.sum);
        debug!(
            session = self.id,
            ?seat,
            rect = %checked.rect,
            sum = checked.sum,
            score = *score,
            "Move accepted"
        );
        trace!("\n{}", visualize_board(&self.board));
        self.turn = seat.other();

        let threshold = self.win_threshold;
        if SEATS.iter().all(|&seat| self.score(seat) < threshold) {
            let field = self.board.to_field();
            let turn = self.turn;
            for seat in SEATS {
                self.send(
                    seat,
                    Response::ChangePlayer {
                        my_turn: seat == turn,
                        field,
                        color: seat.color(),
                    },
                );
            }
        } else {
            self.state = SessionState::Finished;
            info!(
                session = self.id,
                score_a = self.score(Seat::First),
                score_b = self.score(Seat::Second),
                cells_a = self.board.count(Seat::First.color()),
                cells_b = self.board.count(Seat::Second.color()),
                "Game finished"
            );
            for seat in SEATS {
                let win = self.score(seat) >= threshold;
                self.send(seat, Response::GameResult { win });
            }
            self.write_recording();
        }
        Ok(())
    }

    /// Shuts the session down, telling whoever is still connected.
    ///
    /// `closed` is the participant whose connection is already gone, if any.
    /// Calling this again has no effect.
    pub fn teardown(&mut self, closed: Option<Seat>) {
        if self.state == SessionState::TornDown {
            return;
        }
        if let Some(seat) = closed {
            info!(session = self.id, ?seat, "Participant disconnected");
            self.participants[seat.index()] = None;
        }
        for seat in SEATS {
            self.send(seat, Response::GameAborted);
        }
        self.write_recording();
        self.participants = [None, None];
        self.scores.clear();
        self.state = SessionState::TornDown;
        info!(session = self.id, "Session closed");
    }

    fn send(&mut self, seat: Seat, response: Response) {
        let Some(participant) = &self.participants[seat.index()] else {
            return;
        };
        if let Some(recorder) = &mut self.recorder {
            recorder.store_outbound(&participant.name, &response);
        }
        participant.send(response);
    }

    fn write_recording(&mut self) {
        if let Some(recorder) = &mut self.recorder {
            match recorder.write_game_recording() {
                Ok(Some(path)) => debug!(session = self.id, path = %path.display(), "Game recorded"),
                Ok(None) => {}
                Err(err) => warn!(session = self.id, %err, "Could not write game recording"),
            }
        }
    }
}

fn parse_request(payload: &str) -> Result<Request, ProtocolError> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(ProtocolError::MalformedPayload)?;
    serde_json::from_value(value).map_err(ProtocolError::UnrecognizedRequest)
}
