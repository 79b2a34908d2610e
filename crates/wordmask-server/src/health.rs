use std::sync::atomic::Ordering;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::room_manager::DirectoryStats;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub connections: Usage,
    pub rooms: RoomUsage,
}

/// A gauge next to its configured ceiling.
#[derive(Debug, Serialize)]
pub struct Usage {
    pub current: usize,
    pub max: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUsage {
    pub active: usize,
    pub max: usize,
    pub in_game: usize,
    pub players: usize,
}

impl HealthResponse {
    fn new(stats: DirectoryStats, ws_connections: usize, max_ws: usize, max_rooms: usize) -> Self {
        // Full is still up, but new rooms or sockets will be turned away.
        let saturated = stats.rooms >= max_rooms || ws_connections >= max_ws;
        Self {
            status: if saturated { "full" } else { "ok" },
            version: env!("CARGO_PKG_VERSION"),
            connections: Usage {
                current: ws_connections,
                max: max_ws,
            },
            rooms: RoomUsage {
                active: stats.rooms,
                max: max_rooms,
                in_game: stats.games_in_progress,
                players: stats.players,
            },
        }
    }
}

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (stats, max_rooms) = {
        let rooms = state.rooms.read().await;
        (rooms.stats(), rooms.max_rooms())
    };
    Json(HealthResponse::new(
        stats,
        state.ws_connection_count.load(Ordering::Relaxed),
        state.config.limits.max_ws_connections,
        max_rooms,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(rooms: usize) -> DirectoryStats {
        DirectoryStats {
            rooms,
            players: 7,
            games_in_progress: 1,
        }
    }

    #[test]
    fn reports_room_and_connection_usage() {
        let json = serde_json::to_value(HealthResponse::new(stats(2), 5, 200, 500)).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["connections"]["current"], 5);
        assert_eq!(json["rooms"]["active"], 2);
        assert_eq!(json["rooms"]["inGame"], 1);
        assert_eq!(json["rooms"]["players"], 7);
    }

    #[test]
    fn saturated_server_reports_full() {
        assert_eq!(HealthResponse::new(stats(500), 5, 200, 500).status, "full");
        assert_eq!(HealthResponse::new(stats(1), 200, 200, 500).status, "full");
    }
}
