pub mod config;
pub mod error;
pub mod health;
pub mod orchestrator;
pub mod room_loop;
pub mod room_manager;
pub mod state;
pub mod ws;

use axum::Router;
use axum::routing::get;
use tower_http::services::ServeDir;

use config::ServerConfig;
use state::AppState;

/// Build the Axum router and application state from a config.
pub fn build_app(config: ServerConfig) -> (Router<()>, AppState) {
    let web_root = config.web_root.clone();
    let state = AppState::new(config);

    let app = Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/health", get(health::health_check))
        .fallback_service(ServeDir::new(&web_root))
        .with_state(state.clone());

    (app, state)
}
