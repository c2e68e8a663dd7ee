use super::board::Board;
use super::types::{CELL_COUNT, GameStatus, LINES, Line, Player, Position, WinningLine};

/// Checks only the lines through `last_move`: its row, its column, and the
/// diagonals when it lies on one. Used when a move is actually applied.
pub fn check_win_through(board: &Board, last_move: Position, player: Player) -> Option<WinningLine> {
    lines_through(last_move)
        .find(|line| is_uniform(board, line, player))
        .map(|line| WinningLine::new(player, *line))
}

/// Scans every line regardless of move history. Scratch boards built during
/// lookahead carry no last-move context, so they go through this check.
pub fn check_terminal_state(board: &Board, move_count: usize) -> GameStatus {
    for line in &LINES {
        let [first, _, _] = board.line(line);
        if let Some(player) = first.player()
            && is_uniform(board, line, player)
        {
            return GameStatus::Won(WinningLine::new(player, *line));
        }
    }

    if move_count == CELL_COUNT {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

fn lines_through(pos: Position) -> impl Iterator<Item = &'static Line> {
    LINES.iter().filter(move |line| line.contains(&pos))
}

fn is_uniform(board: &Board, line: &Line, player: Player) -> bool {
    board.line(line).iter().all(|&cell| cell == player.mark())
}
