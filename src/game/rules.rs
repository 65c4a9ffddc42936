//! Piece-movement rules.
//!
//! Everything here is a pure function of the board: no turn bookkeeping and no
//! check detection (see [`crate::game::status`] for that).

use crate::game::board::{Board, Color, PieceKind, Square};

/// Whether the piece on `from` may move to `to` on `board`.
///
/// The piece must belong to `turn_owner`, both squares must be on the board and
/// the target must not hold a piece of the mover's own side. Invalid input
/// yields `false`; this never panics.
pub fn is_legal_move(board: &Board, turn_owner: Color, from: Square, to: Square) -> bool {
    if !from.is_on_board() || !to.is_on_board() || from == to {
        return false;
    }
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if piece.color != turn_owner {
        return false;
    }
    let target = board.piece_at(to);
    if target.is_some_and(|t| t.color == piece.color) {
        return false;
    }

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    match piece.kind {
        PieceKind::Pawn => is_pawn_move(board, piece.color, from, dx, dy, target.is_some()),
        PieceKind::Rook => is_straight(dx, dy) && is_path_clear(board, from, to),
        PieceKind::Knight => matches!((dx.abs(), dy.abs()), (1, 2) | (2, 1)),
        PieceKind::Bishop => is_diagonal(dx, dy) && is_path_clear(board, from, to),
        PieceKind::Queen => {
            (is_straight(dx, dy) || is_diagonal(dx, dy)) && is_path_clear(board, from, to)
        }
        PieceKind::King => dx.abs() <= 1 && dy.abs() <= 1,
    }
}

fn is_straight(dx: i32, dy: i32) -> bool {
    (dx == 0) != (dy == 0)
}

fn is_diagonal(dx: i32, dy: i32) -> bool {
    dx != 0 && dx.abs() == dy.abs()
}

fn is_pawn_move(
    board: &Board,
    color: Color,
    from: Square,
    dx: i32,
    dy: i32,
    target_occupied: bool,
) -> bool {
    let dir = color.pawn_direction();
    match (dx.abs(), dy) {
        // pawns never capture straight ahead
        (0, dy) if dy == dir => !target_occupied,
        (0, dy) if dy == 2 * dir => {
            from.y == color.pawn_start_rank()
                && !target_occupied
                && board.piece_at(from.offset(0, dir)).is_none()
        }
        // diagonal steps are captures only; own pieces were filtered already
        (1, dy) if dy == dir => target_occupied,
        _ => false,
    }
}

/// Walks unit steps from the square after `from` up to, but excluding, `to`.
/// Any occupied square on the way blocks the move.
pub fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let step_x = (to.x - from.x).signum();
    let step_y = (to.y - from.y).signum();
    let mut current = from.offset(step_x, step_y);
    while current != to {
        if !current.is_on_board() || board.piece_at(current).is_some() {
            return false;
        }
        current = current.offset(step_x, step_y);
    }
    true
}

/// Every `(from, to)` pair `color` may play by piece rules alone, ignoring
/// whether the move would expose its own king.
pub fn candidate_moves(board: &Board, color: Color) -> impl Iterator<Item = (Square, Square)> + '_ {
    board.pieces(color).flat_map(move |(from, _)| {
        Square::all()
            .filter(move |&to| is_legal_move(board, color, from, to))
            .map(move |to| (from, to))
    })
}
