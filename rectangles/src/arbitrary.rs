use crate::{execute_move, legal_moves, Board, Color, CornerTracker, DiceRoll, Move};

impl quickcheck::Arbitrary for DiceRoll {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        DiceRoll([u8::arbitrary(g) % 6 + 1, u8::arbitrary(g) % 6 + 1])
    }
}

/// A position reached by playing random legal moves, alternating between
/// the colors and starting with [`Color::A`].
#[derive(Clone, Debug)]
pub struct PlayedGame {
    pub board: Board,
    pub tracker: CornerTracker,
    /// Whose turn it is now.
    pub to_move: Color,
}

impl quickcheck::Arbitrary for PlayedGame {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut board = Board::new();
        let mut tracker = CornerTracker::new();
        let mut to_move = Color::A;

        let num_moves = usize::from(u8::arbitrary(g) % 40);
        for _ in 0..num_moves {
            let dices = DiceRoll::arbitrary(g);
            let moves = legal_moves(&board, &tracker, to_move, dices.sum());
            // A player who can't use their roll just rolls again
            let Some(&(from, to)) = g.choose(&moves) else {
                continue;
            };
            let mv = Move {
                from,
                to,
                color: to_move,
                dices,
            };
            execute_move(&mut board, &mut tracker, to_move, &mv)
                .expect("Enumerated move was rejected");
            to_move = to_move.opponent();
        }

        Self {
            board,
            tracker,
            to_move,
        }
    }
}
