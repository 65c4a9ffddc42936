use std::sync::Arc;
use std::time::Duration;

use actix_rt::time::timeout;
use tokio::sync::mpsc;

use chess_match_server::error::{ConnectError, TransportError};
use chess_match_server::game::{Color, GameStatus, Square, TurnOutcome};
use chess_match_server::models::{AppState, Command, GameState};
use chess_match_server::websocket::protocol::parse_frame;
use chess_match_server::websocket::sessions::Transport;

struct ChannelTransport(mpsc::UnboundedSender<Arc<str>>);

impl Transport for ChannelTransport {
    fn push(&self, frame: Arc<str>) -> Result<(), TransportError> {
        self.0.send(frame).map_err(|_| TransportError::Closed)
    }
}

fn channel() -> (Box<dyn Transport>, mpsc::UnboundedReceiver<Arc<str>>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Box::new(ChannelTransport(tx)), rx)
}

/// Waits for the first pushed state that satisfies `pred`.
async fn wait_for<F>(rx: &mut mpsc::UnboundedReceiver<Arc<str>>, pred: F) -> GameState
where
    F: Fn(&GameState) -> bool,
{
    loop {
        let frame = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for a broadcast")
            .expect("transport channel closed");
        let state: GameState = serde_json::from_str(&frame).unwrap();
        if pred(&state) {
            return state;
        }
    }
}

#[actix_rt::test]
async fn both_players_see_every_committed_move() {
    let app = AppState::new();
    app.spawn_broadcaster();

    let (white_tx, mut white_rx) = channel();
    let (black_tx, mut black_rx) = channel();
    let white = app.sessions.connect(white_tx).unwrap();
    let black = app.sessions.connect(black_tx).unwrap();
    assert_eq!(white.color, Color::White);
    assert_eq!(black.color, Color::Black);

    let both = |s: &GameState| s.connected_players.len() == 2;
    wait_for(&mut white_rx, both).await;
    wait_for(&mut black_rx, both).await;

    // e2-e4 with White sitting on rows 6 and 7
    let frame = r#"move_piece#{"fromX":4,"fromY":6,"toX":4,"toY":4,"piece":"P","isCapture":false}"#;
    let Command::MovePiece(cmd) = parse_frame(frame).unwrap();
    let outcome = app
        .controller
        .finish_turn(white.color, cmd.from_square(), cmd.to_square());
    assert_eq!(outcome, TurnOutcome::Applied(GameStatus::Idle));

    let moved = |s: &GameState| s.player_at_turn == Color::Black;
    for rx in [&mut white_rx, &mut black_rx] {
        let state = wait_for(rx, moved).await;
        assert_eq!(state.game_status, GameStatus::Idle);
        assert!(state.board.piece_at(Square::new(4, 4)).is_some());
        assert!(state.board.piece_at(Square::new(4, 6)).is_none());
    }
}

#[actix_rt::test]
async fn third_connection_is_refused_without_touching_the_game() {
    let app = AppState::new();
    app.spawn_broadcaster();

    let (white_tx, _white_rx) = channel();
    let (black_tx, _black_rx) = channel();
    app.sessions.connect(white_tx).unwrap();
    app.sessions.connect(black_tx).unwrap();
    let before = app.controller.snapshot();

    let (extra_tx, _extra_rx) = channel();
    assert_eq!(app.sessions.connect(extra_tx).err(), Some(ConnectError::GameFull));
    assert_eq!(app.controller.snapshot(), before);
    assert_eq!(app.sessions.active_count(), 2);
}

#[actix_rt::test]
async fn remaining_player_is_told_when_the_opponent_leaves() {
    let app = AppState::new();
    app.spawn_broadcaster();

    let (white_tx, mut white_rx) = channel();
    let (black_tx, _black_rx) = channel();
    app.sessions.connect(white_tx).unwrap();
    let black = app.sessions.connect(black_tx).unwrap();
    wait_for(&mut white_rx, |s| s.connected_players.len() == 2).await;

    assert!(app.sessions.disconnect(black));
    let state = wait_for(&mut white_rx, |s| s.connected_players.len() == 1).await;
    assert!(state.connected_players.contains(&Color::White));
    assert_eq!(state.player_at_turn, Color::White);
}

#[actix_rt::test]
async fn a_dead_session_does_not_stop_delivery_to_the_other() {
    let app = AppState::new();
    app.spawn_broadcaster();

    let (white_tx, white_rx) = channel();
    let (black_tx, mut black_rx) = channel();
    app.sessions.connect(white_tx).unwrap();
    app.sessions.connect(black_tx).unwrap();
    drop(white_rx);

    app.controller
        .finish_turn(Color::White, Square::new(6, 7), Square::new(5, 5));
    let state = wait_for(&mut black_rx, |s| s.player_at_turn == Color::Black).await;
    assert!(state.board.piece_at(Square::new(5, 5)).is_some());
}
