pub mod board;
pub mod controller;
pub mod rules;
pub mod status;

pub use board::{Board, Color, Piece, PieceKind, Square};
pub use controller::{GameController, Rejection, TurnOutcome};
pub use status::GameStatus;
