use thiserror::Error;

use crate::game::board::Color;

/// Board-level faults. A missing king is never reachable from a correctly
/// maintained game and marks a broken invariant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("no {0} king on the board")]
    KingNotFound(Color),

    #[error("invalid piece placement: {0}")]
    InvalidPlacement(String),
}

/// Inbound frame could not be turned into a command.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("frame has no '#' separator between command and body")]
    MissingSeparator,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("malformed command body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectError {
    #[error("2 players already connected")]
    GameFull,
}

/// Per-session push failure. Never affects the other session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("session mailbox is full")]
    Full,

    #[error("session is closed")]
    Closed,
}
