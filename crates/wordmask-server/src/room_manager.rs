use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;

use wordmask_core::room::generate_room_code;

use crate::error::RoomError;
use crate::orchestrator::{Room, RoomOptions};
use crate::room_loop::{RoomHandle, spawn_room};
use crate::state::SharedRoomDirectory;

/// Per-player sender for outbound WebSocket text frames.
/// Bounded so a slow client cannot grow memory without limit; frames that do
/// not fit are dropped for that client only.
pub type PlayerSender = mpsc::Sender<Bytes>;

/// Index of live rooms by code. Each room runs as its own task; the directory
/// only hands out handles to it.
pub struct RoomDirectory {
    rooms: HashMap<String, RoomHandle>,
    max_rooms: usize,
}

impl RoomDirectory {
    pub fn new(max_rooms: usize) -> Self {
        Self {
            rooms: HashMap::new(),
            max_rooms,
        }
    }

    pub fn get(&self, code: &str) -> Option<RoomHandle> {
        self.rooms.get(code).cloned()
    }

    pub fn remove(&mut self, code: &str) -> Option<RoomHandle> {
        self.rooms.remove(code)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn stats(&self) -> DirectoryStats {
        let mut stats = DirectoryStats {
            rooms: self.rooms.len(),
            ..DirectoryStats::default()
        };
        for room in self.rooms.values() {
            stats.players += room.player_count();
            if room.in_game() {
                stats.games_in_progress += 1;
            }
        }
        stats
    }

    pub fn max_rooms(&self) -> usize {
        self.max_rooms
    }
}

/// Aggregate counts across every live room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryStats {
    pub rooms: usize,
    /// Connected players only.
    pub players: usize,
    pub games_in_progress: usize,
}

/// Open a room under a fresh code and start its task.
pub async fn create_room(
    rooms: &SharedRoomDirectory,
    options: RoomOptions,
) -> Result<RoomHandle, RoomError> {
    let mut directory = rooms.write().await;
    if directory.rooms.len() >= directory.max_rooms {
        tracing::warn!(max = directory.max_rooms, "Room limit reached");
        return Err(RoomError::TooManyRooms);
    }
    let code = generate_unique_room_code(&directory.rooms);
    let handle = spawn_room(Room::new(code.clone(), options), Arc::clone(rooms));
    directory.rooms.insert(code.clone(), handle.clone());
    tracing::info!(room = %code, active = directory.rooms.len(), "Room created");
    Ok(handle)
}

fn generate_unique_room_code(existing: &HashMap<String, RoomHandle>) -> String {
    let mut rng = rand::rng();
    loop {
        let code = generate_room_code(&mut rng);
        if !existing.contains_key(&code) {
            return code;
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::RwLock;

    use wordmask_core::room::is_valid_room_code;

    use super::*;

    fn directory(max_rooms: usize) -> SharedRoomDirectory {
        Arc::new(RwLock::new(RoomDirectory::new(max_rooms)))
    }

    #[tokio::test]
    async fn created_rooms_get_distinct_valid_codes() {
        let rooms = directory(10);
        let a = create_room(&rooms, RoomOptions::default()).await.unwrap();
        let b = create_room(&rooms, RoomOptions::default()).await.unwrap();
        assert_ne!(a.code(), b.code());
        assert!(is_valid_room_code(a.code()));

        let dir = rooms.read().await;
        assert_eq!(dir.len(), 2);
        assert!(dir.get(a.code()).is_some());
        assert_eq!(
            dir.stats(),
            DirectoryStats {
                rooms: 2,
                players: 0,
                games_in_progress: 0,
            }
        );
    }

    #[tokio::test]
    async fn room_limit_is_enforced() {
        let rooms = directory(1);
        create_room(&rooms, RoomOptions::default()).await.unwrap();
        let err = create_room(&rooms, RoomOptions::default()).await;
        assert!(matches!(err, Err(RoomError::TooManyRooms)));
    }

    #[tokio::test]
    async fn remove_forgets_the_code() {
        let rooms = directory(10);
        let handle = create_room(&rooms, RoomOptions::default()).await.unwrap();
        let mut dir = rooms.write().await;
        assert!(dir.remove(handle.code()).is_some());
        assert!(dir.get(handle.code()).is_none());
        assert!(dir.is_empty());
    }
}
