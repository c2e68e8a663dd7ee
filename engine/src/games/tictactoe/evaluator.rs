use super::board::Board;
use super::types::{GameStatus, LINES, Mark, Player, Position};
use super::win_detector::check_terminal_state;

pub const WIN_SCORE: i32 = 1000;
pub const TWO_IN_LINE: i32 = 10;
pub const ONE_IN_LINE: i32 = 1;
pub const CENTER_BONUS: i32 = 3;
pub const CORNER_BONUS: i32 = 2;

pub fn score_line(line: [Mark; 3]) -> i32 {
    let o_count = line.iter().filter(|&&cell| cell == Mark::O).count();
    let x_count = line.iter().filter(|&&cell| cell == Mark::X).count();
    let empty_count = line.iter().filter(|&&cell| cell == Mark::Empty).count();

    match (o_count, x_count, empty_count) {
        (2, _, 1) => TWO_IN_LINE,
        (_, 2, 1) => -TWO_IN_LINE,
        (1, _, 2) => ONE_IN_LINE,
        (_, 1, 2) => -ONE_IN_LINE,
        _ => 0,
    }
}

/// Static score of the board from O's point of view; positive favours O.
/// Does not search past the moves the caller has already placed.
pub fn evaluate(board: &Board, move_count: usize) -> i32 {
    match check_terminal_state(board, move_count) {
        GameStatus::Won(line) => {
            return match line.player {
                Player::O => WIN_SCORE,
                Player::X => -WIN_SCORE,
            };
        }
        GameStatus::Draw => return 0,
        GameStatus::InProgress => {}
    }

    let mut score: i32 = LINES.iter().map(|line| score_line(board.line(line))).sum();

    score += mark_bonus(board.get(Position::CENTER), CENTER_BONUS);
    for corner in Position::CORNERS {
        score += mark_bonus(board.get(corner), CORNER_BONUS);
    }

    score
}

fn mark_bonus(mark: Option<Mark>, bonus: i32) -> i32 {
    match mark {
        Some(Mark::O) => bonus,
        Some(Mark::X) => -bonus,
        _ => 0,
    }
}
