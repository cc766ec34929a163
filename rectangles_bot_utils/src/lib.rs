use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;

use rectangles::{Board, Color, CornerTracker, Move, Request, Response};
use tracing::{debug, info};

/// A trait to simplify writing bots.
pub trait Bot {
    fn new_game(&mut self, color: Color);

    /// Picks the next move, or `None` to give up and leave the game.
    ///
    /// `tracker` knows the corners of both players, as far as they can be
    /// told from the boards seen so far.
    fn play_turn(&mut self, board: &Board, tracker: &CornerTracker, color: Color) -> Option<Move>;

    fn game_over(&mut self, _win: bool) {}

    /// Plays until `games` games are over, the judge aborts the game, or the
    /// bot gives up.
    ///
    /// After a game ends, the loser asks for a rematch.
    fn run(&mut self, mut reader: impl BufRead, mut writer: impl Write, games: usize) -> anyhow::Result<()> {
        let mut buf = String::new();
        let mut tracker = CornerTracker::new();
        let mut games_played = 0;

        loop {
            // Read the next line into buf
            buf.clear(); // because read_line() appends to the buffer
            let num_bytes_read = reader.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the judge has closed the connection.
                break Ok(());
            }

            let (my_turn, field, color) = match serde_json::from_str::<Response>(buf.trim_end())? {
                Response::GameStarted {
                    my_turn,
                    field,
                    color,
                    ..
                } => {
                    tracker = CornerTracker::new();
                    self.new_game(color);
                    (my_turn, field, color)
                }
                Response::ChangePlayer {
                    my_turn,
                    field,
                    color,
                } => (my_turn, field, color),
                Response::GameResult { win } => {
                    info!(win, "Game over");
                    self.game_over(win);
                    games_played += 1;
                    if games_played >= games {
                        break Ok(());
                    }
                    if !win {
                        send(&mut writer, &Request::RepeatGame)?;
                    }
                    continue;
                }
                Response::GameAborted => {
                    info!("The game was aborted");
                    break Ok(());
                }
                Response::IncorrectRequest { message } => {
                    anyhow::bail!("The judge rejected a request: {}", message)
                }
            };

            let board = Board::from_field(&field);
            tracker.observe(&board);
            if !my_turn {
                continue;
            }
            match self.play_turn(&board, &tracker, color) {
                Some(player_move) => {
                    debug!(from = %player_move.from, to = %player_move.to, "Playing move");
                    send(&mut writer, &Request::PlayerMove { player_move })?;
                }
                None => {
                    info!("No move found, leaving the game");
                    break Ok(());
                }
            }
        }
    }
}

/// Connects to a judge, returning the reading and the writing half.
pub fn connect(host: &str, port: u16) -> anyhow::Result<(BufReader<TcpStream>, TcpStream)> {
    let stream = TcpStream::connect((host, port))?;
    Ok((BufReader::new(stream.try_clone()?), stream))
}

fn send(writer: &mut impl Write, request: &Request) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *writer, request)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rectangles::{Coord, Corner, DiceRoll, Rect};

    use super::*;

    /// Plays a fixed list of moves and records what it was shown.
    struct ScriptedBot {
        moves: VecDeque<Move>,
        colors: Vec<Color>,
        anchors_seen: Vec<Option<Corner>>,
        results: Vec<bool>,
    }

    impl ScriptedBot {
        fn new(moves: Vec<Move>) -> Self {
            Self {
                moves: moves.into(),
                colors: Vec::new(),
                anchors_seen: Vec::new(),
                results: Vec::new(),
            }
        }
    }

    impl Bot for ScriptedBot {
        fn new_game(&mut self, color: Color) {
            self.colors.push(color);
        }

        fn play_turn(&mut self, _board: &Board, tracker: &CornerTracker, color: Color) -> Option<Move> {
            self.anchors_seen.push(tracker.anchor(color.opponent()));
            self.moves.pop_front()
        }

        fn game_over(&mut self, win: bool) {
            self.results.push(win);
        }
    }

    fn lines(responses: &[Response]) -> String {
        responses
            .iter()
            .map(|r| serde_json::to_string(r).unwrap() + "\n")
            .collect()
    }

    fn sent_requests(output: Vec<u8>) -> Vec<Request> {
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn some_move() -> Move {
        Move {
            from: Coord::new(29, 0),
            to: Coord::new(28, 0),
            color: Color::B,
            dices: DiceRoll([1, 1]),
        }
    }

    #[test]
    fn moves_only_when_it_is_our_turn() {
        let mut board = Board::new();
        board.claim(Rect::singleton(Coord::new(0, 29)), Color::A);
        let input = lines(&[
            Response::GameStarted {
                my_turn: false,
                field: Board::new().to_field(),
                color: Color::B,
                sum: 0,
            },
            Response::ChangePlayer {
                my_turn: true,
                field: board.to_field(),
                color: Color::B,
            },
            Response::GameResult { win: false },
        ]);
        let mut output = Vec::new();
        let mut bot = ScriptedBot::new(vec![some_move()]);
        bot.run(input.as_bytes(), &mut output, 1).unwrap();

        assert_eq!(
            sent_requests(output),
            vec![Request::PlayerMove {
                player_move: some_move()
            }]
        );
        assert_eq!(bot.colors, vec![Color::B]);
        assert_eq!(bot.anchors_seen, vec![Some(Corner::TopRight)]);
        assert_eq!(bot.results, vec![false]);
    }

    #[test]
    fn loser_asks_for_a_rematch() {
        let input = lines(&[
            Response::GameResult { win: false },
            Response::GameResult { win: true },
            Response::GameResult { win: false },
        ]);
        let mut output = Vec::new();
        let mut bot = ScriptedBot::new(vec![]);
        bot.run(input.as_bytes(), &mut output, 3).unwrap();
        // No rematch after the last game
        assert_eq!(sent_requests(output), vec![Request::RepeatGame]);
        assert_eq!(bot.results, vec![false, true, false]);
    }

    #[test]
    fn gives_up_without_a_move() {
        let input = lines(&[
            Response::GameStarted {
                my_turn: true,
                field: Board::new().to_field(),
                color: Color::A,
                sum: 0,
            },
            Response::GameAborted,
        ]);
        let mut output = Vec::new();
        ScriptedBot::new(vec![]).run(input.as_bytes(), &mut output, 1).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn rejected_request_is_an_error() {
        let input = lines(&[Response::IncorrectRequest {
            message: String::from("wrong move"),
        }]);
        let mut output = Vec::new();
        let err = ScriptedBot::new(vec![]).run(input.as_bytes(), &mut output, 1).unwrap_err();
        assert!(err.to_string().contains("wrong move"));
    }
}
