use super::board::Board;
use super::types::{LINES, Mark, Player, Position};

/// Number of lines where `player` has two marks and the third cell is empty.
pub fn count_threats(board: &Board, player: Player) -> usize {
    LINES
        .iter()
        .filter(|line| {
            let cells = board.line(line);
            let own = cells.iter().filter(|&&cell| cell == player.mark()).count();
            let empty = cells.iter().filter(|&&cell| cell == Mark::Empty).count();
            own == 2 && empty >= 1
        })
        .count()
}

/// First candidate, in the order given, that leaves O with two or more
/// threats at once. Occupied and out-of-range candidates are skipped.
pub fn find_fork_move(candidates: &[Position], board: &Board) -> Option<Position> {
    let mut scratch = *board;
    candidates.iter().copied().find(|&pos| {
        scratch
            .with_trial_move(pos, Player::O, |b| count_threats(b, Player::O))
            .is_some_and(|threats| threats >= 2)
    })
}
