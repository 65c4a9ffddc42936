use actix::Message;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::game::board::{Piece, Square};

/// Body of a `move_piece#{...}` frame.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoveCommand {
    pub from_x: i32,
    pub from_y: i32,
    pub to_x: i32,
    pub to_y: i32,
    /// Informational only: the controller moves whatever stands on the origin.
    pub piece: Piece,
    #[serde(default)]
    pub is_capture: bool,
}

impl MoveCommand {
    pub fn from_square(&self) -> Square {
        Square::new(self.from_x, self.from_y)
    }

    pub fn to_square(&self) -> Square {
        Square::new(self.to_x, self.to_y)
    }
}

/// Inbound commands understood by the protocol handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MovePiece(MoveCommand),
}

/// Serialized snapshot pushed to one session's socket.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct SnapshotFrame(pub Arc<str>);
