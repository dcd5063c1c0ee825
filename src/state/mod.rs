mod game;

use crate::protocol::ServerMessage;
use crate::veto::VetoGame;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub game: Arc<RwLock<VetoGame>>,
    /// Broadcast channel for sending messages to all connected clients
    pub broadcast: broadcast::Sender<ServerMessage>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_game(VetoGame::new())
    }

    /// State whose turn order shuffles are reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::with_game(VetoGame::with_seed(seed))
    }

    fn with_game(game: VetoGame) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            game: Arc::new(RwLock::new(game)),
            broadcast: tx,
        }
    }

    /// Broadcast a message to every connected client
    pub fn broadcast_to_all(&self, msg: ServerMessage) {
        // No receivers connected is fine
        let _ = self.broadcast.send(msg);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
