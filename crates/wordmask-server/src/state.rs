use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::room_manager::RoomDirectory;

pub type SharedRoomDirectory = Arc<RwLock<RoomDirectory>>;

#[derive(Clone)]
pub struct AppState {
    pub rooms: SharedRoomDirectory,
    pub config: Arc<ServerConfig>,
    pub ws_connection_count: Arc<AtomicUsize>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            rooms: Arc::new(RwLock::new(RoomDirectory::new(config.rooms.max_rooms))),
            config: Arc::new(config),
            ws_connection_count: Arc::new(AtomicUsize::new(0)),
        }
    }
}

/// Counts a live WebSocket connection for as long as it is held.
pub struct ConnectionGuard {
    count: Arc<AtomicUsize>,
}

impl ConnectionGuard {
    pub fn new(count: Arc<AtomicUsize>) -> Self {
        count.fetch_add(1, Ordering::Relaxed);
        Self { count }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.count.fetch_sub(1, Ordering::Relaxed);
    }
}
