//! Text frame codec.
//!
//! Inbound frames look like `move_piece#{"fromX":4,"fromY":6,...}`; outbound
//! frames are the whole [`GameState`] as JSON.

use std::sync::Arc;

use crate::error::ProtocolError;
use crate::models::{Command, GameState};

pub const MOVE_PIECE: &str = "move_piece";

pub fn parse_frame(text: &str) -> Result<Command, ProtocolError> {
    let (name, body) = text
        .split_once('#')
        .ok_or(ProtocolError::MissingSeparator)?;
    match name.trim() {
        MOVE_PIECE => Ok(Command::MovePiece(serde_json::from_str(body)?)),
        other => Err(ProtocolError::UnknownCommand(other.to_string())),
    }
}

pub fn encode_snapshot(state: &GameState) -> Result<Arc<str>, serde_json::Error> {
    serde_json::to_string(state).map(Arc::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::{Color, Piece, PieceKind, Square};

    #[test]
    fn parses_a_move_frame() {
        let frame = r#"move_piece#{"fromX":0,"fromY":6,"toX":0,"toY":5,"piece":"P","isCapture":false}"#;
        let Command::MovePiece(cmd) = parse_frame(frame).unwrap();
        assert_eq!(cmd.from_square(), Square::new(0, 6));
        assert_eq!(cmd.to_square(), Square::new(0, 5));
        assert_eq!(cmd.piece, Piece::new(PieceKind::Pawn, Color::White));
        assert!(!cmd.is_capture);
    }

    #[test]
    fn capture_flag_defaults_to_false() {
        let frame = r#"move_piece#{"fromX":1,"fromY":1,"toX":1,"toY":2,"piece":"p"}"#;
        let Command::MovePiece(cmd) = parse_frame(frame).unwrap();
        assert!(!cmd.is_capture);
    }

    #[test]
    fn unknown_commands_are_rejected() {
        let err = parse_frame(r#"resign#{}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownCommand(name) if name == "resign"));
    }

    #[test]
    fn malformed_frames_are_rejected() {
        assert!(matches!(
            parse_frame("move_piece"),
            Err(ProtocolError::MissingSeparator)
        ));
        assert!(matches!(
            parse_frame("move_piece#{not json"),
            Err(ProtocolError::MalformedBody(_))
        ));
        assert!(matches!(
            parse_frame(r#"move_piece#{"fromX":0,"fromY":6}"#),
            Err(ProtocolError::MalformedBody(_))
        ));
        assert!(matches!(
            parse_frame(r#"move_piece#{"fromX":0,"fromY":6,"toX":0,"toY":5,"piece":"X"}"#),
            Err(ProtocolError::MalformedBody(_))
        ));
    }

    #[test]
    fn snapshot_frame_is_plain_json() {
        let frame = encode_snapshot(&GameState::new()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["playerAtTurn"], "W");
        assert_eq!(value["connectedPlayers"], serde_json::json!([]));
    }
}
