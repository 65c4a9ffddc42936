use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::game::board::{Board, Color};
use crate::game::status::GameStatus;

/// One committed version of the match. This is also the broadcast payload:
/// `{playerAtTurn, board, gameStatus, winningPlayer, connectedPlayers}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub player_at_turn: Color,
    pub board: Board,
    pub game_status: GameStatus,
    /// Set only on checkmate, to the side that delivered it.
    pub winning_player: Option<Color>,
    pub connected_players: BTreeSet<Color>,
}

impl GameState {
    /// Standard opening position, White to move, nobody connected.
    pub fn new() -> Self {
        GameState::from_position(Board::initial(), Color::White)
    }

    pub fn from_position(board: Board, player_at_turn: Color) -> Self {
        GameState {
            player_at_turn,
            board,
            game_status: GameStatus::Idle,
            winning_player: None,
            connected_players: BTreeSet::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.game_status.is_over()
    }

    pub fn fen(&self) -> String {
        self.board.to_fen(self.player_at_turn)
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
