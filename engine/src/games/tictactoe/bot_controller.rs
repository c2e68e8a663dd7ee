use std::fmt;

use crate::games::MovePicker;
use super::board::{Board, available_moves};
use super::evaluator::evaluate;
use super::fork_detector::find_fork_move;
use super::types::{Mark, Player, Position};
use super::win_detector::check_win_through;

/// Which step of the decision cascade produced the move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    Opening,
    CenterReply,
    Win,
    Block,
    Fork,
    BestScore,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Opening => "opening",
            Rule::CenterReply => "center reply",
            Rule::Win => "win",
            Rule::Block => "block",
            Rule::Fork => "fork",
            Rule::BestScore => "best score",
        };
        write!(f, "{}", name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    pub position: Position,
    pub rule: Rule,
}

impl Decision {
    fn new(position: Position, rule: Rule) -> Self {
        Self { position, rule }
    }
}

pub fn choose_move<P: MovePicker + ?Sized>(
    board: &Board,
    move_count: usize,
    picker: &mut P,
) -> Option<Position> {
    decide(board, move_count, picker).map(|decision| decision.position)
}

/// Picks O's reply. The first rule that applies wins:
/// opening book, center reply, immediate win, immediate block, then the
/// best one-ply score with forks preferred among ties.
///
/// This is a bounded heuristic, not a full search; some lines can be lost.
pub fn decide<P: MovePicker + ?Sized>(
    board: &Board,
    move_count: usize,
    picker: &mut P,
) -> Option<Decision> {
    if move_count == 0 {
        return Some(opening_move(board, picker));
    }

    if move_count == 1
        && board.get(Position::CENTER) == Some(Mark::X)
        && let Some(corner) = Position::CORNERS.iter().copied().find(|&c| board.is_empty(c))
    {
        return Some(Decision::new(corner, Rule::CenterReply));
    }

    let moves = available_moves(board);
    if moves.is_empty() {
        return None;
    }

    let mut scratch = *board;

    if let Some(pos) = find_winning_move(&mut scratch, Player::O, &moves) {
        return Some(Decision::new(pos, Rule::Win));
    }

    if let Some(pos) = find_winning_move(&mut scratch, Player::X, &moves) {
        return Some(Decision::new(pos, Rule::Block));
    }

    let best_moves = best_scoring_moves(&mut scratch, move_count, &moves);

    if let Some(pos) = find_fork_move(&best_moves, &scratch) {
        return Some(Decision::new(pos, Rule::Fork));
    }

    let idx = picker.pick(best_moves.len());
    best_moves
        .get(idx)
        .map(|&pos| Decision::new(pos, Rule::BestScore))
}

fn opening_move<P: MovePicker + ?Sized>(board: &Board, picker: &mut P) -> Decision {
    if board.is_empty(Position::CENTER) {
        return Decision::new(Position::CENTER, Rule::Opening);
    }
    let corner = Position::CORNERS[picker.pick(Position::CORNERS.len())];
    Decision::new(corner, Rule::Opening)
}

/// First move in `moves` that completes a line for `player`. Occupied and
/// out-of-range moves are skipped.
pub fn find_winning_move(
    board: &mut Board,
    player: Player,
    moves: &[Position],
) -> Option<Position> {
    moves.iter().copied().find(|&pos| {
        board
            .with_trial_move(pos, player, |b| check_win_through(b, pos, player).is_some())
            .unwrap_or(false)
    })
}

/// Every move that reaches the top score, in enumeration order.
fn best_scoring_moves(board: &mut Board, move_count: usize, moves: &[Position]) -> Vec<Position> {
    let mut best_score = i32::MIN;
    let mut best_moves = Vec::new();

    for &pos in moves {
        let Some(score) = board.with_trial_move(pos, Player::O, |b| evaluate(b, move_count + 1))
        else {
            continue;
        };

        if score > best_score {
            best_score = score;
            best_moves.clear();
            best_moves.push(pos);
        } else if score == best_score {
            best_moves.push(pos);
        }
    }

    best_moves
}

#[cfg(test)]
pub(crate) struct ScriptedPicker {
    picks: Vec<usize>,
    next: usize,
}

#[cfg(test)]
impl ScriptedPicker {
    pub(crate) fn new(picks: Vec<usize>) -> Self {
        Self { picks, next: 0 }
    }
}

#[cfg(test)]
impl MovePicker for ScriptedPicker {
    fn pick(&mut self, n: usize) -> usize {
        let value = self.picks.get(self.next).copied().unwrap_or(0);
        self.next += 1;
        value % n
    }
}
