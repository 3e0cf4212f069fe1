//! Drives a session with the computer's simulated thinking time.
//!
//! A tap that leaves the game running locks the session and yields a ticket.
//! The ticket is parked on a tokio timer; when the delay elapses it lands on
//! a channel and the next [`Controller::poll_computer`] redeems it, which
//! applies the computer's move and unlocks the board.

use crate::config::GameConfig;
use noughts_engine::{
    ComputerTurn, GameSession, Outcome, PendingComputerMove, Position, SessionError, TapOutcome,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Owns the session and schedules the computer's replies.
#[derive(Debug)]
pub struct Controller {
    session: GameSession,
    think_delay: Duration,
    ready_tx: mpsc::UnboundedSender<PendingComputerMove>,
    ready_rx: mpsc::UnboundedReceiver<PendingComputerMove>,
}

impl Controller {
    /// Wraps an existing session.
    pub fn new(session: GameSession, think_delay: Duration) -> Self {
        let (ready_tx, ready_rx) = mpsc::unbounded_channel();
        Self {
            session,
            think_delay,
            ready_tx,
            ready_rx,
        }
    }

    /// Builds the session from configuration and schedules an opening
    /// computer move if the computer starts.
    ///
    /// Must be called inside a tokio runtime.
    #[instrument(skip(config))]
    pub fn start(config: &GameConfig) -> Self {
        let (session, pending) = GameSession::start(config.turn_order(), config.rng());
        let controller = Self::new(session, config.think_delay());
        if let Some(ticket) = pending {
            controller.schedule(ticket);
        }
        controller
    }

    /// The session being driven.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Forwards a tap to the session.
    ///
    /// Returns the outcome when the human's move ends the game. Otherwise
    /// the computer's reply is scheduled and `None` comes back.
    #[instrument(skip(self))]
    pub fn on_cell_tapped(&mut self, position: Position) -> Result<Option<Outcome>, SessionError> {
        match self.session.tap(position)? {
            TapOutcome::ComputerToMove(ticket) => {
                self.schedule(ticket);
                Ok(None)
            }
            TapOutcome::Finished(outcome) => Ok(Some(outcome)),
        }
    }

    /// Applies the computer's move if its delay has elapsed.
    ///
    /// Tickets left over from a game that was reset are dropped.
    pub fn poll_computer(&mut self) -> Result<Option<ComputerTurn>, SessionError> {
        match self.ready_rx.try_recv() {
            Ok(ticket) => self.redeem(ticket),
            Err(_) => Ok(None),
        }
    }

    /// Starts the next game, scheduling the computer's opening if it is
    /// the computer's turn to start.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        if let Some(ticket) = self.session.reset() {
            info!("Computer opens this game");
            self.schedule(ticket);
        }
    }

    fn schedule(&self, ticket: PendingComputerMove) {
        let delay = self.think_delay;
        let tx = self.ready_tx.clone();
        debug!(game = ticket.game(), ?delay, "Computer thinking");
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver lives as long as the controller.
            let _ = tx.send(ticket);
        });
    }

    fn redeem(
        &mut self,
        ticket: PendingComputerMove,
    ) -> Result<Option<ComputerTurn>, SessionError> {
        match self.session.complete_computer_move(ticket) {
            Ok(turn) => {
                info!(position = %turn.position(), rule = %turn.decision.rule, "Computer moved");
                Ok(Some(turn))
            }
            Err(SessionError::StaleMove(game)) => {
                debug!(game, "Discarded computer move from an earlier game");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts_engine::{MoveRng, Player, TurnOrder};
    use tokio::time::Instant;

    const DELAY: Duration = Duration::from_millis(500);

    fn controller() -> Controller {
        Controller::new(GameSession::new(MoveRng::seeded(3)), DELAY)
    }

    async fn next_turn(controller: &mut Controller) -> ComputerTurn {
        tokio::time::sleep(DELAY + Duration::from_millis(1)).await;
        controller.poll_computer().unwrap().expect("computer move ready")
    }

    #[tokio::test(start_paused = true)]
    async fn test_computer_moves_after_delay() {
        let mut controller = controller();
        let started = Instant::now();

        assert_eq!(controller.on_cell_tapped(Position::TopLeft), Ok(None));
        assert!(controller.session().is_locked());

        let turn = next_turn(&mut controller).await;
        assert!(started.elapsed() >= DELAY);
        assert_eq!(turn.position(), Position::Center);
        assert!(!controller.session().is_locked());
    }

    #[tokio::test(start_paused = true)]
    async fn test_board_stays_locked_before_delay() {
        let mut controller = controller();
        controller.on_cell_tapped(Position::TopLeft).unwrap();

        tokio::time::advance(Duration::from_millis(100)).await;
        tokio::task::yield_now().await;

        assert_eq!(controller.poll_computer(), Ok(None));
        assert_eq!(
            controller.on_cell_tapped(Position::BottomRight),
            Err(SessionError::BoardLocked)
        );
        assert_eq!(controller.session().board().occupied(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_move_after_new_game_is_dropped() {
        let mut controller = controller();
        controller.on_cell_tapped(Position::TopLeft).unwrap();
        controller.new_game();

        tokio::time::sleep(DELAY * 2).await;

        assert_eq!(controller.poll_computer(), Ok(None));
        assert!(controller.session().board().is_blank());
        assert!(!controller.session().is_locked());
    }

    #[tokio::test(start_paused = true)]
    async fn test_computer_first_config_opens_game() {
        let config = GameConfig::new(250, false, Some(8), "noughts.log".into());
        let mut controller = Controller::start(&config);
        assert_eq!(controller.session().turn_order(), TurnOrder::ComputerFirst);
        assert!(controller.session().is_locked());

        let turn = next_turn(&mut controller).await;
        assert_eq!(controller.session().history()[0].player(), Player::Computer);
        assert!(!controller.session().board().is_empty(turn.position()));
    }
}
