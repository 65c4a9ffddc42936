use log::{debug, error, info};
use thiserror::Error;
use tokio::sync::watch;

use crate::error::GameError;
use crate::game::board::{Color, Square};
use crate::game::rules::is_legal_move;
use crate::game::status::{self, GameStatus};
use crate::models::GameState;

/// Why a submitted move was dropped. Never sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("game is already over")]
    GameOver,
    #[error("not your turn")]
    NotYourTurn,
    #[error("no piece on the origin square")]
    EmptyOrigin,
    #[error("move breaks the piece rules")]
    IllegalMove,
    #[error("move leaves the mover's king in check")]
    ExposesKing,
    /// The board broke an invariant, e.g. a king went missing. The candidate
    /// is discarded and logged at `error`; the last committed version stays
    /// valid, so the match keeps running on it.
    #[error("internal fault: {0}")]
    Internal(GameError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Applied(GameStatus),
    Rejected(Rejection),
}

/// Sole writer of the match state.
///
/// The current [`GameState`] lives in a watch channel. Every mutation runs as
/// one read-modify-write under the channel's lock, and subscribers only ever
/// observe whole committed versions.
pub struct GameController {
    state: watch::Sender<GameState>,
}

impl GameController {
    pub fn new() -> Self {
        GameController::from_state(GameState::new())
    }

    pub fn from_state(initial: GameState) -> Self {
        let (state, _) = watch::channel(initial);
        GameController { state }
    }

    pub fn snapshot(&self) -> GameState {
        self.state.borrow().clone()
    }

    /// Receiver that wakes on every commit after this call.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.state.subscribe()
    }

    /// Validates and applies one move for `acting`. Rejected moves leave the
    /// state untouched and publish nothing.
    pub fn finish_turn(&self, acting: Color, from: Square, to: Square) -> TurnOutcome {
        let mut outcome = TurnOutcome::Rejected(Rejection::NotYourTurn);
        let mut fen = None;
        self.state.send_if_modified(|state| match next_version(state, acting, from, to) {
            Ok(next) => {
                outcome = TurnOutcome::Applied(next.game_status);
                fen = Some(next.fen());
                *state = next;
                true
            }
            Err(rejection) => {
                outcome = TurnOutcome::Rejected(rejection);
                false
            }
        });

        match &outcome {
            TurnOutcome::Applied(status) => info!(
                "{} moved {} -> {}: status {:?}, position {}",
                acting,
                from,
                to,
                status,
                fen.unwrap_or_default()
            ),
            TurnOutcome::Rejected(Rejection::Internal(fault)) => {
                error!("Discarded move {} -> {} by {}: {}", from, to, acting, fault)
            }
            TurnOutcome::Rejected(rejection) => {
                debug!("Ignored move {} -> {} by {}: {}", from, to, acting, rejection)
            }
        }
        outcome
    }

    /// Back to the opening position with White to move. Connected players stay.
    pub fn reset(&self) -> GameState {
        self.state.send_modify(|state| {
            let connected = std::mem::take(&mut state.connected_players);
            *state = GameState::new();
            state.connected_players = connected;
        });
        info!("Game reset to the initial position");
        self.snapshot()
    }

    pub(crate) fn mark_connected(&self, color: Color) {
        self.state
            .send_if_modified(|state| state.connected_players.insert(color));
    }

    pub(crate) fn mark_disconnected(&self, color: Color) {
        self.state
            .send_if_modified(|state| state.connected_players.remove(&color));
    }
}

impl Default for GameController {
    fn default() -> Self {
        GameController::new()
    }
}

/// Builds the version that follows `current` if the move is accepted.
fn next_version(
    current: &GameState,
    acting: Color,
    from: Square,
    to: Square,
) -> Result<GameState, Rejection> {
    if current.is_over() {
        return Err(Rejection::GameOver);
    }
    if acting != current.player_at_turn {
        return Err(Rejection::NotYourTurn);
    }
    if current.board.piece_at(from).is_none() {
        return Err(Rejection::EmptyOrigin);
    }
    if !is_legal_move(&current.board, acting, from, to) {
        return Err(Rejection::IllegalMove);
    }

    let board = current.board.with_move(from, to);
    if status::king_in_check(&board, acting).map_err(Rejection::Internal)? {
        return Err(Rejection::ExposesKing);
    }

    let opponent = acting.opponent();
    let game_status = status::evaluate(&board, opponent).map_err(Rejection::Internal)?;
    let winning_player = (game_status == GameStatus::Checkmate).then_some(acting);

    Ok(GameState {
        player_at_turn: opponent,
        board,
        game_status,
        winning_player,
        connected_players: current.connected_players.clone(),
    })
}
