use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::games::{MovePicker, SessionRng};
use crate::log;
use super::board::Board;
use super::controller::{GameController, PendingReply, StatusSnapshot};
use super::game_state::MoveOutcome;
use super::types::{GameMode, ScoreTally};

/// Drives a [`GameController`] with a deferred opponent. The reply is computed
/// as soon as X moves but committed only after `thinking_delay`, and a reset
/// or mode switch aborts the pending commit.
pub struct GameSession<P: MovePicker + Send + 'static = SessionRng> {
    controller: Arc<Mutex<GameController<P>>>,
    thinking_delay: Duration,
    reply_task: Option<JoinHandle<()>>,
}

impl<P: MovePicker + Send + 'static> GameSession<P> {
    pub fn new(controller: GameController<P>, thinking_delay: Duration) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            thinking_delay,
            reply_task: None,
        }
    }

    pub async fn make_move(&mut self, row: usize, col: usize) -> MoveOutcome {
        let (outcome, pending) = {
            let mut controller = self.controller.lock().await;
            let outcome = controller.make_move(row, col);
            (outcome, controller.pending_reply())
        };

        if outcome.is_accepted()
            && let Some(reply) = pending
        {
            self.schedule_reply(reply);
        }

        outcome
    }

    fn schedule_reply(&mut self, reply: PendingReply) {
        self.cancel_reply();

        let controller = self.controller.clone();
        let delay = self.thinking_delay;
        self.reply_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut controller = controller.lock().await;
            if !controller.commit_opponent_move(reply.ticket) {
                log!("[session] dropped stale reply {} (game {})", reply.position, reply.ticket);
            }
        }));
    }

    fn cancel_reply(&mut self) {
        if let Some(task) = self.reply_task.take()
            && !task.is_finished()
        {
            task.abort();
            log!("[session] cancelled pending opponent move");
        }
    }

    /// Waits until the scheduled opponent move, if any, has been committed.
    pub async fn wait_for_opponent(&mut self) {
        if let Some(task) = self.reply_task.take()
            && let Err(e) = task.await
            && !e.is_cancelled()
        {
            log!("[session] opponent task failed: {}", e);
        }
    }

    pub async fn reset_game(&mut self) {
        self.cancel_reply();
        self.controller.lock().await.reset_game();
    }

    pub async fn set_mode(&mut self, mode: GameMode) {
        self.cancel_reply();
        self.controller.lock().await.set_mode(mode);
    }

    pub async fn status(&self) -> StatusSnapshot {
        self.controller.lock().await.status()
    }

    pub async fn board(&self) -> Board {
        self.controller.lock().await.board()
    }

    pub async fn score_tally(&self) -> ScoreTally {
        self.controller.lock().await.score_tally()
    }

    pub async fn is_winning_cell(&self, row: usize, col: usize) -> bool {
        self.controller.lock().await.is_winning_cell(row, col)
    }

    pub async fn mode(&self) -> GameMode {
        self.controller.lock().await.mode()
    }
}

impl<P: MovePicker + Send + 'static> Drop for GameSession<P> {
    fn drop(&mut self) {
        if let Some(task) = self.reply_task.take() {
            task.abort();
        }
    }
}
