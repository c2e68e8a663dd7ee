use std::fmt;

use crate::games::{MovePicker, SessionRng};
use crate::log;
use super::board::Board;
use super::bot_controller::{Rule, decide};
use super::game_state::{GameState, MoveOutcome, RejectReason};
use super::types::{GameMode, GameStatus, Player, Position, ScoreTally, WinningLine};

/// An opponent move computed but not yet committed. `ticket` ties it to the
/// game it was computed for; a reset invalidates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingReply {
    pub ticket: u64,
    pub position: Position,
    pub rule: Rule,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub status: GameStatus,
    pub current_player: Player,
    pub winning_line: Option<WinningLine>,
    pub opponent_thinking: bool,
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            GameStatus::Won(line) => write!(f, "Player {} wins!", line.player),
            GameStatus::Draw => write!(f, "It's a draw!"),
            GameStatus::InProgress if self.opponent_thinking => write!(f, "Computer is thinking..."),
            GameStatus::InProgress => write!(f, "Player {}'s turn", self.current_player),
        }
    }
}

pub struct GameController<P: MovePicker = SessionRng> {
    state: GameState,
    picker: P,
    generation: u64,
    pending: Option<PendingReply>,
}

impl<P: MovePicker> GameController<P> {
    pub fn new(mode: GameMode, picker: P) -> Self {
        Self {
            state: GameState::new(mode),
            picker,
            generation: 0,
            pending: None,
        }
    }

    /// Applies a move for the player on turn. Illegal moves are rejected
    /// without touching state. In computer mode an accepted X move that
    /// leaves the game open raises the thinking guard and queues O's reply.
    pub fn make_move(&mut self, row: usize, col: usize) -> MoveOutcome {
        if self.state.opponent_thinking {
            return MoveOutcome::Rejected(RejectReason::OpponentThinking);
        }

        let pos = Position::new(row, col);
        let player = self.state.current_player;
        let outcome = self.state.place_mark(pos);
        if !outcome.is_accepted() {
            return outcome;
        }

        log!("[game] {} played {}", player, pos);
        self.log_if_finished();

        if self.state.mode == GameMode::Computer
            && self.state.status == GameStatus::InProgress
            && self.state.current_player == Player::O
        {
            self.begin_opponent_turn();
        }

        outcome
    }

    fn begin_opponent_turn(&mut self) {
        let Some(decision) = decide(&self.state.board, self.state.move_count, &mut self.picker)
        else {
            return;
        };

        log!(
            "[game] opponent chose {} by {} (game {})",
            decision.position,
            decision.rule,
            self.generation
        );
        self.state.opponent_thinking = true;
        self.pending = Some(PendingReply {
            ticket: self.generation,
            position: decision.position,
            rule: decision.rule,
        });
    }

    pub fn pending_reply(&self) -> Option<PendingReply> {
        self.pending
    }

    /// Commits the queued opponent move if `ticket` still belongs to the
    /// current game. Returns false when there was nothing to commit.
    pub fn commit_opponent_move(&mut self, ticket: u64) -> bool {
        let Some(reply) = self.pending else {
            return false;
        };
        if reply.ticket != ticket || ticket != self.generation {
            return false;
        }

        self.pending = None;
        self.state.opponent_thinking = false;

        let committed = self.state.place_mark(reply.position).is_accepted();
        if committed {
            log!("[game] {} played {}", Player::O, reply.position);
            self.log_if_finished();
        }
        self.state.current_player = Player::X;
        committed
    }

    pub fn reset_game(&mut self) {
        self.generation += 1;
        if self.pending.take().is_some() {
            log!("[game] discarded pending opponent move");
        }
        self.state.reset();
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.state.mode = mode;
        self.reset_game();
        log!("[game] mode set to {}", mode);
    }

    fn log_if_finished(&self) {
        match self.state.status {
            GameStatus::Won(line) => log!(
                "[game] {} wins, score X {} - O {}",
                line.player,
                self.state.score_tally.x,
                self.state.score_tally.o
            ),
            GameStatus::Draw => log!("[game] draw"),
            GameStatus::InProgress => {}
        }
    }

    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            status: self.state.status,
            current_player: self.state.current_player,
            winning_line: self.state.status.winning_line(),
            opponent_thinking: self.state.opponent_thinking,
        }
    }

    pub fn status_message(&self) -> String {
        self.status().to_string()
    }

    pub fn board(&self) -> Board {
        self.state.board
    }

    pub fn score_tally(&self) -> ScoreTally {
        self.state.score_tally
    }

    pub fn is_winning_cell(&self, row: usize, col: usize) -> bool {
        self.state
            .status
            .winning_line()
            .is_some_and(|line| line.contains(Position::new(row, col)))
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    pub fn move_count(&self) -> usize {
        self.state.move_count
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::bot_controller::ScriptedPicker;
    use crate::games::tictactoe::types::Mark;

    fn human_game() -> GameController<ScriptedPicker> {
        GameController::new(GameMode::Human, ScriptedPicker::new(vec![]))
    }

    fn computer_game(seed: u64) -> GameController<SessionRng> {
        GameController::new(GameMode::Computer, SessionRng::new(seed))
    }

    fn commit_now<Q: MovePicker>(controller: &mut GameController<Q>) -> bool {
        match controller.pending_reply() {
            Some(reply) => controller.commit_opponent_move(reply.ticket),
            None => false,
        }
    }

    #[test]
    fn test_row_win_scenario() {
        let mut game = human_game();
        for (row, col) in [(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)] {
            assert!(game.make_move(row, col).is_accepted());
        }
        let status = game.status();
        let line = status.winning_line.expect("X completed the top row");
        assert_eq!(line.player, Player::X);
        assert_eq!(line.cells, [Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]);
        assert!(game.is_winning_cell(0, 1));
        assert!(!game.is_winning_cell(1, 1));
        assert_eq!(game.score_tally().x, 1);
        assert_eq!(game.status_message(), "Player X wins!");
    }

    #[test]
    fn test_draw_scenario() {
        let mut game = human_game();
        for (row, col) in [(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)] {
            assert!(game.make_move(row, col).is_accepted());
        }
        assert_eq!(game.status().status, GameStatus::Draw);
        assert_eq!(game.move_count(), 9);
        assert_eq!(game.status_message(), "It's a draw!");
    }

    #[test]
    fn test_repeated_move_is_noop() {
        let mut game = human_game();
        assert_eq!(game.make_move(0, 0), MoveOutcome::Accepted);
        let before = game.state().clone();
        assert_eq!(game.make_move(0, 0), MoveOutcome::Rejected(RejectReason::Occupied));
        assert_eq!(game.state(), &before);
        assert_eq!(game.board().get(Position::new(0, 0)), Some(Mark::X));
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut game = human_game();
        let before = game.state().clone();
        assert_eq!(game.make_move(5, 0), MoveOutcome::Rejected(RejectReason::OutOfBounds));
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn test_center_opening_gets_corner_reply() {
        let mut game = computer_game(3);
        assert!(game.make_move(1, 1).is_accepted());

        let status = game.status();
        assert!(status.opponent_thinking);
        assert_eq!(status.current_player, Player::O);
        assert_eq!(game.status_message(), "Computer is thinking...");

        let reply = game.pending_reply().expect("reply queued");
        assert_eq!(reply.position, Position::new(0, 0));
        assert_eq!(reply.rule, Rule::CenterReply);
        assert_eq!(game.board().get(Position::new(0, 0)), Some(Mark::Empty));

        assert!(game.commit_opponent_move(reply.ticket));
        assert_eq!(game.board().get(Position::new(0, 0)), Some(Mark::O));
        assert!(!game.status().opponent_thinking);
        assert_eq!(game.status().current_player, Player::X);
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn test_moves_rejected_while_thinking() {
        let mut game = computer_game(3);
        game.make_move(1, 1);
        let before = game.state().clone();
        assert_eq!(
            game.make_move(2, 2),
            MoveOutcome::Rejected(RejectReason::OpponentThinking)
        );
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn test_opponent_blocks_row_threat() {
        let mut game = computer_game(11);
        game.make_move(1, 1);
        assert!(commit_now(&mut game));
        game.make_move(1, 0);

        let reply = game.pending_reply().expect("reply queued");
        assert_eq!(reply.position, Position::new(1, 2));
        assert_eq!(reply.rule, Rule::Block);
        assert!(commit_now(&mut game));
        assert_eq!(game.board().get(Position::new(1, 2)), Some(Mark::O));
    }

    #[test]
    fn test_stale_ticket_is_discarded_after_reset() {
        let mut game = computer_game(5);
        game.make_move(1, 1);
        let stale = game.pending_reply().expect("reply queued");

        game.reset_game();
        assert_eq!(game.pending_reply(), None);
        assert!(!game.status().opponent_thinking);

        game.make_move(1, 1);
        assert!(!game.commit_opponent_move(stale.ticket));
        assert!(game.status().opponent_thinking);
        assert!(commit_now(&mut game));
    }

    #[test]
    fn test_commit_without_pending_is_false() {
        let mut game = computer_game(5);
        assert!(!game.commit_opponent_move(0));
    }

    #[test]
    fn test_opponent_win_updates_tally() {
        let mut game = computer_game(8);
        let mut guard = 0;
        while !game.status().status.is_terminal() && guard < 9 {
            guard += 1;
            let free = Position::ALL
                .iter()
                .copied()
                .filter(|&p| game.board().is_empty(p))
                .last();
            let Some(pos) = free else { break };
            game.make_move(pos.row, pos.col);
            commit_now(&mut game);
        }
        let tally = game.score_tally();
        match game.status().status {
            GameStatus::Won(line) => assert_eq!(tally.get(line.player), 1),
            GameStatus::Draw => assert_eq!(tally, ScoreTally::default()),
            GameStatus::InProgress => panic!("game did not finish"),
        }
    }

    #[test]
    fn test_set_mode_resets_but_keeps_tally() {
        let mut game = human_game();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            game.make_move(row, col);
        }
        game.set_mode(GameMode::Computer);
        assert_eq!(game.mode(), GameMode::Computer);
        assert_eq!(game.board(), Board::new());
        assert_eq!(game.score_tally().x, 1);
        assert_eq!(game.status_message(), "Player X's turn");
    }

    #[test]
    fn test_human_mode_never_queues_reply() {
        let mut game = human_game();
        game.make_move(1, 1);
        assert_eq!(game.pending_reply(), None);
        assert_eq!(game.status().current_player, Player::O);
        assert!(game.make_move(0, 0).is_accepted());
    }
}
