mod board;
mod bot_controller;
mod controller;
mod evaluator;
mod fork_detector;
mod game_state;
mod session;
mod types;
mod win_detector;

pub use board::{Board, available_moves};
pub use bot_controller::{Decision, Rule, choose_move, decide, find_winning_move};
pub use controller::{GameController, PendingReply, StatusSnapshot};
pub use evaluator::{CENTER_BONUS, CORNER_BONUS, WIN_SCORE, evaluate, score_line};
pub use fork_detector::{count_threats, find_fork_move};
pub use game_state::{GameState, MoveOutcome, RejectReason};
pub use session::GameSession;
pub use types::{
    BOARD_SIZE, CELL_COUNT, GameMode, GameStatus, LINES, Line, Mark, Player, Position, ScoreTally,
    WinningLine,
};
pub use win_detector::{check_terminal_state, check_win_through};
