use tictactoe_engine::{BOARD_SIZE, Board, Mark, Position, StatusSnapshot};

/// Text board with row and column indices. Cells on the winning line are
/// bracketed.
pub fn render_board(board: &Board, status: &StatusSnapshot) -> String {
    let mut out = String::from("   0   1   2\n");
    for row in 0..BOARD_SIZE {
        out.push_str(&format!("{} ", row));
        for col in 0..BOARD_SIZE {
            let pos = Position::new(row, col);
            let symbol = match board.get(pos) {
                Some(Mark::X) => 'X',
                Some(Mark::O) => 'O',
                _ => '.',
            };
            let winning = status.winning_line.is_some_and(|line| line.contains(pos));
            if winning {
                out.push_str(&format!("[{}] ", symbol));
            } else {
                out.push_str(&format!(" {}  ", symbol));
            }
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
    }
    out
}
