use crate::{Board, Cell, Coord, BOARD_SIZE};

/// Draws the board as a box of characters, one per cell.
///
/// Unclaimed cells are `·`, claimed cells show the owner's color.
pub fn visualize_board(board: &Board) -> String {
    // Column ruler: tens digit, then ones digit
    let mut result = String::from("     ");
    for col in 0..BOARD_SIZE {
        result.push(if col % 10 == 0 {
            char::from_digit((col / 10) as u32, 10).unwrap_or(' ')
        } else {
            ' '
        });
    }
    result += "\n     ";
    for col in 0..BOARD_SIZE {
        result.push(char::from_digit((col % 10) as u32, 10).unwrap_or(' '));
    }
    result += "\n    ╭";
    for _ in 0..BOARD_SIZE {
        result += "─";
    }
    result += "╮\n";

    for row in 0..BOARD_SIZE as u8 {
        result += &format!("{:>3} │", row);
        for col in 0..BOARD_SIZE as u8 {
            result.push(match board.get(Coord::new(row, col)) {
                Cell::Empty => '·',
                Cell::A => 'A',
                Cell::B => 'B',
            });
        }
        result += "│\n";
    }

    result += "    ╰";
    for _ in 0..BOARD_SIZE {
        result += "─";
    }
    result += "╯";
    result
}
