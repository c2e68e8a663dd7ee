use std::fmt;

use super::board::Board;
use super::types::{CELL_COUNT, GameMode, GameStatus, Player, Position, ScoreTally};
use super::win_detector::check_win_through;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    OutOfBounds,
    Occupied,
    GameOver,
    OpponentThinking,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::OutOfBounds => write!(f, "Position out of bounds"),
            RejectReason::Occupied => write!(f, "Cell is already marked"),
            RejectReason::GameOver => write!(f, "Game is already over"),
            RejectReason::OpponentThinking => write!(f, "Opponent is still thinking"),
        }
    }
}

/// Result of a move command. A rejected move never changes any state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted,
    Rejected(RejectReason),
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub current_player: Player,
    pub status: GameStatus,
    pub move_count: usize,
    pub score_tally: ScoreTally,
    pub mode: GameMode,
    pub opponent_thinking: bool,
    pub last_move: Option<Position>,
}

impl GameState {
    pub fn new(mode: GameMode) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            status: GameStatus::InProgress,
            move_count: 0,
            score_tally: ScoreTally::default(),
            mode,
            opponent_thinking: false,
            last_move: None,
        }
    }

    /// Starts a fresh game. The score tally and mode survive.
    pub fn reset(&mut self) {
        *self = Self {
            score_tally: self.score_tally,
            ..Self::new(self.mode)
        };
    }

    /// Places the current player's mark and settles the status. Does not
    /// look at the thinking guard; the controller owns that.
    pub fn place_mark(&mut self, pos: Position) -> MoveOutcome {
        if !pos.in_bounds() {
            return MoveOutcome::Rejected(RejectReason::OutOfBounds);
        }

        if self.status.is_terminal() {
            return MoveOutcome::Rejected(RejectReason::GameOver);
        }

        let player = self.current_player;
        if !self.board.place(pos, player) {
            return MoveOutcome::Rejected(RejectReason::Occupied);
        }

        self.move_count += 1;
        self.last_move = Some(pos);

        if let Some(line) = check_win_through(&self.board, pos, player) {
            self.status = GameStatus::Won(line);
            self.score_tally.record_win(player);
        } else if self.move_count == CELL_COUNT {
            self.status = GameStatus::Draw;
        } else {
            self.current_player = player.opponent();
        }

        MoveOutcome::Accepted
    }
}
