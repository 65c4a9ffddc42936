use log::{debug, error, info};
use std::sync::Arc;
use tokio::sync::watch;

use crate::models::GameState;
use crate::websocket::protocol::encode_snapshot;
use crate::websocket::sessions::SessionManager;

/// Pushes every committed state to all live sessions until the controller
/// goes away. If several commits land while a push is in flight, only the
/// newest one is sent next; payloads are whole states, so nothing is lost.
pub async fn run(mut updates: watch::Receiver<GameState>, sessions: Arc<SessionManager>) {
    info!("Broadcaster started");
    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();
        publish(&snapshot, &sessions);
    }
    info!("State channel closed, broadcaster stopping");
}

/// Serializes `snapshot` once and hands it to every session.
pub fn publish(snapshot: &GameState, sessions: &SessionManager) -> usize {
    match encode_snapshot(snapshot) {
        Ok(frame) => {
            let delivered = sessions.fan_out(frame);
            debug!(
                "Broadcast state ({} to move, {:?}) to {} session(s)",
                snapshot.player_at_turn, snapshot.game_status, delivered
            );
            delivered
        }
        Err(e) => {
            error!("Failed to serialize game state: {}", e);
            0
        }
    }
}
