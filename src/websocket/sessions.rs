use actix::prelude::SendError;
use actix::Recipient;
use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::error::{ConnectError, TransportError};
use crate::game::board::Color;
use crate::game::controller::GameController;
use crate::models::SnapshotFrame;

/// Outbound half of a player connection. Pushes must not block.
pub trait Transport: Send + Sync {
    fn push(&self, frame: Arc<str>) -> Result<(), TransportError>;
}

impl Transport for Recipient<SnapshotFrame> {
    fn push(&self, frame: Arc<str>) -> Result<(), TransportError> {
        self.try_send(SnapshotFrame(frame)).map_err(|e| match e {
            SendError::Full(_) => TransportError::Full,
            SendError::Closed(_) => TransportError::Closed,
        })
    }
}

/// Handle returned to a connection that was given a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTicket {
    pub id: Uuid,
    pub color: Color,
}

struct Session {
    id: Uuid,
    transport: Box<dyn Transport>,
}

/// Assigns colors to incoming connections and owns their transports.
/// At most one session per color.
pub struct SessionManager {
    controller: Arc<GameController>,
    sessions: Mutex<HashMap<Color, Session>>,
}

impl SessionManager {
    pub fn new(controller: Arc<GameController>) -> Self {
        SessionManager {
            controller,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Color, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// White if free, else Black if free, else [`ConnectError::GameFull`].
    /// The color pick, the registration and the `connectedPlayers` update all
    /// happen under one lock.
    pub fn connect(&self, transport: Box<dyn Transport>) -> Result<SessionTicket, ConnectError> {
        let mut sessions = self.lock();
        let color = [Color::White, Color::Black]
            .into_iter()
            .find(|color| !sessions.contains_key(color))
            .ok_or(ConnectError::GameFull)?;

        let id = Uuid::new_v4();
        sessions.insert(color, Session { id, transport });
        self.controller.mark_connected(color);
        info!("Player {} connected as {}; {} session(s) active", id, color, sessions.len());
        Ok(SessionTicket { id, color })
    }

    /// Drops the session behind `ticket` and frees its color. The board is
    /// left as it is. Returns `false` if the ticket no longer owns the color.
    pub fn disconnect(&self, ticket: SessionTicket) -> bool {
        let mut sessions = self.lock();
        match sessions.get(&ticket.color) {
            Some(session) if session.id == ticket.id => {
                sessions.remove(&ticket.color);
                self.controller.mark_disconnected(ticket.color);
                info!(
                    "Player {} ({}) disconnected; {} session(s) active",
                    ticket.id,
                    ticket.color,
                    sessions.len()
                );
                true
            }
            _ => false,
        }
    }

    /// Best-effort push of one frame to every session. Returns how many
    /// sessions accepted it.
    pub fn fan_out(&self, frame: Arc<str>) -> usize {
        let sessions = self.lock();
        let mut delivered = 0;
        for (color, session) in sessions.iter() {
            match session.transport.push(Arc::clone(&frame)) {
                Ok(()) => delivered += 1,
                Err(e) => warn!("Could not push state to {} ({}): {}", session.id, color, e),
            }
        }
        delivered
    }

    /// Number of live sessions.
    pub fn active_count(&self) -> usize {
        self.lock().len()
    }

    #[cfg(test)]
    fn connected_colors(&self) -> Vec<Color> {
        let mut colors: Vec<Color> = self.lock().keys().copied().collect();
        colors.sort();
        colors
    }
}
