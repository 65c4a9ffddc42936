//! Check, checkmate and stalemate detection.
//!
//! Status is always derived from scratch for a whole board. The searches are
//! exhaustive (every own piece against every square, each followed by a full
//! check scan), which is bounded by 64x64 simulated boards per call.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::board::{Board, Color, Square};
use crate::game::rules::{candidate_moves, is_legal_move};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    #[default]
    Idle,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

/// `side` is in check when any opposing piece could legally move onto its king.
pub fn king_in_check(board: &Board, side: Color) -> Result<bool, GameError> {
    let king = board
        .king_square(side)
        .ok_or(GameError::KingNotFound(side))?;
    let attacker = side.opponent();
    Ok(board
        .pieces(attacker)
        .any(|(from, _)| is_legal_move(board, attacker, from, king)))
}

/// Whether playing `from -> to` would leave the mover's own king attacked.
pub fn exposes_king(
    board: &Board,
    mover: Color,
    from: Square,
    to: Square,
) -> Result<bool, GameError> {
    king_in_check(&board.with_move(from, to), mover)
}

/// Whether `side` has at least one move that leaves its king out of check.
/// Each candidate is played on a scratch copy of the board.
pub fn has_escape(board: &Board, side: Color) -> Result<bool, GameError> {
    for (from, to) in candidate_moves(board, side) {
        if !exposes_king(board, side, from, to)? {
            return Ok(true);
        }
    }
    Ok(false)
}

pub fn is_checkmate(board: &Board, side: Color) -> Result<bool, GameError> {
    Ok(king_in_check(board, side)? && !has_escape(board, side)?)
}

pub fn is_stalemate(board: &Board, side: Color) -> Result<bool, GameError> {
    Ok(!king_in_check(board, side)? && !has_escape(board, side)?)
}

/// Status of the position for `side_to_move`.
pub fn evaluate(board: &Board, side_to_move: Color) -> Result<GameStatus, GameError> {
    let in_check = king_in_check(board, side_to_move)?;
    let escape = has_escape(board, side_to_move)?;
    Ok(match (in_check, escape) {
        (true, false) => GameStatus::Checkmate,
        (true, true) => GameStatus::Check,
        (false, false) => GameStatus::Stalemate,
        (false, true) => GameStatus::Idle,
    })
}
