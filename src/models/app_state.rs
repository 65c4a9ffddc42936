use std::sync::Arc;

use crate::game::controller::GameController;
use crate::websocket::broadcaster;
use crate::websocket::sessions::SessionManager;

/// Application state shared between connections
pub struct AppState {
    pub controller: Arc<GameController>,
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new() -> Self {
        AppState::with_controller(GameController::new())
    }

    pub fn with_controller(controller: GameController) -> Self {
        let controller = Arc::new(controller);
        let sessions = Arc::new(SessionManager::new(Arc::clone(&controller)));
        AppState {
            controller,
            sessions,
        }
    }

    /// Starts the broadcast worker on the current actix runtime.
    pub fn spawn_broadcaster(&self) -> actix_rt::task::JoinHandle<()> {
        actix_rt::spawn(broadcaster::run(
            self.controller.subscribe(),
            Arc::clone(&self.sessions),
        ))
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new()
    }
}
