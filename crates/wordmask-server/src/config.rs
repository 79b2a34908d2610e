use serde::Deserialize;

use wordmask_core::net::protocol::MAX_MESSAGE_SIZE;

/// Top-level server configuration, loaded from `wordmask.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub web_root: String,
    pub limits: LimitsConfig,
    pub rooms: RoomsConfig,
    pub scores: ScoresConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            web_root: "public".to_string(),
            limits: LimitsConfig::default(),
            rooms: RoomsConfig::default(),
            scores: ScoresConfig::default(),
        }
    }
}

/// Infrastructure limits (connection caps, buffer sizes, rate limits).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_ws_connections: usize,
    pub player_message_buffer: usize,
    pub ws_rate_limit_per_sec: f64,
    /// Inbound frames larger than this are dropped.
    pub max_message_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_ws_connections: 200,
            player_message_buffer: 256,
            ws_rate_limit_per_sec: 20.0,
            max_message_bytes: MAX_MESSAGE_SIZE,
        }
    }
}

/// Room lifecycle configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoomsConfig {
    pub max_rooms: usize,
    /// How long a disconnected player's slot is held.
    pub disconnect_grace_secs: u64,
    /// Pause between sealing a clue slot and opening the next one.
    pub step_reveal_delay_ms: u64,
}

impl Default for RoomsConfig {
    fn default() -> Self {
        Self {
            max_rooms: 500,
            disconnect_grace_secs: 30,
            step_reveal_delay_ms: 3000,
        }
    }
}

/// When cumulative scores are cleared.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoresConfig {
    pub reset_on_abort: bool,
    pub reset_on_play_again: bool,
}

impl Default for ScoresConfig {
    fn default() -> Self {
        Self {
            reset_on_abort: false,
            reset_on_play_again: true,
        }
    }
}

impl ServerConfig {
    /// Validate configuration, exiting on values the server cannot run with.
    pub fn validate(&self) {
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            tracing::error!(
                addr = %self.listen_addr,
                "listen_addr is not a valid socket address"
            );
            std::process::exit(1);
        }

        if self.limits.max_ws_connections == 0 {
            tracing::error!("limits.max_ws_connections must be > 0");
            std::process::exit(1);
        }
        if self.limits.player_message_buffer == 0 {
            tracing::error!("limits.player_message_buffer must be > 0");
            std::process::exit(1);
        }
        if self.limits.ws_rate_limit_per_sec <= 0.0 {
            tracing::error!("limits.ws_rate_limit_per_sec must be > 0");
            std::process::exit(1);
        }
        if self.limits.max_message_bytes == 0 || self.limits.max_message_bytes > MAX_MESSAGE_SIZE {
            tracing::error!(
                max = MAX_MESSAGE_SIZE,
                "limits.max_message_bytes must be between 1 and the protocol maximum"
            );
            std::process::exit(1);
        }

        if self.rooms.max_rooms == 0 {
            tracing::error!("rooms.max_rooms must be > 0");
            std::process::exit(1);
        }
        if self.rooms.disconnect_grace_secs == 0 {
            tracing::warn!("rooms.disconnect_grace_secs is 0, dropped players cannot rejoin");
        }
    }

    /// Load config from `wordmask.toml` if it exists, then apply env var overrides.
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string("wordmask.toml") {
            Ok(content) => match toml::from_str::<ServerConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from wordmask.toml");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse wordmask.toml: {e}, using defaults");
                    ServerConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No wordmask.toml found, using defaults");
                ServerConfig::default()
            },
        };

        if let Ok(addr) = std::env::var("WORDMASK_LISTEN_ADDR")
            && !addr.is_empty()
        {
            config.listen_addr = addr;
        }
        // Hosting platforms hand out a bare port.
        if let Ok(val) = std::env::var("PORT")
            && let Ok(port) = val.parse::<u16>()
        {
            config.listen_addr = format!("0.0.0.0:{port}");
        }
        if let Ok(root) = std::env::var("WORDMASK_WEB_ROOT")
            && !root.is_empty()
        {
            config.web_root = root;
        }

        if let Ok(val) = std::env::var("WORDMASK_MAX_WS_CONNECTIONS")
            && let Ok(n) = val.parse::<usize>()
        {
            config.limits.max_ws_connections = n;
        }
        if let Ok(val) = std::env::var("WORDMASK_WS_RATE_LIMIT")
            && let Ok(n) = val.parse::<f64>()
        {
            config.limits.ws_rate_limit_per_sec = n;
        }
        if let Ok(val) = std::env::var("WORDMASK_MAX_ROOMS")
            && let Ok(n) = val.parse::<usize>()
        {
            config.rooms.max_rooms = n;
        }
        if let Ok(val) = std::env::var("WORDMASK_DISCONNECT_GRACE_SECS")
            && let Ok(n) = val.parse::<u64>()
        {
            config.rooms.disconnect_grace_secs = n;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
        assert_eq!(cfg.web_root, "public");
        assert!(!cfg.scores.reset_on_abort);
        assert!(cfg.scores.reset_on_play_again);
    }

    #[test]
    fn validate_accepts_valid_config() {
        let cfg = ServerConfig::default();
        cfg.validate();
    }

    #[test]
    fn validate_rejects_invalid_addr() {
        let cfg = ServerConfig {
            listen_addr: "not-an-address".to_string(),
            ..ServerConfig::default()
        };
        // validate() calls process::exit, so we test the underlying check
        assert!(cfg.listen_addr.parse::<std::net::SocketAddr>().is_err());
    }

    #[test]
    fn parse_minimal_toml() {
        let toml_str = r#"
listen_addr = "127.0.0.1:9090"
web_root = "/var/www"
"#;
        let cfg: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.listen_addr, "127.0.0.1:9090");
        assert_eq!(cfg.web_root, "/var/www");
        assert_eq!(cfg.rooms.disconnect_grace_secs, 30);
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
listen_addr = "0.0.0.0:8080"
web_root = "dist"

[limits]
max_ws_connections = 50
player_message_buffer = 64
ws_rate_limit_per_sec = 5.0
max_message_bytes = 4096

[rooms]
max_rooms = 20
disconnect_grace_secs = 10
step_reveal_delay_ms = 0

[scores]
reset_on_abort = true
reset_on_play_again = false
"#;
        let cfg: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.limits.max_ws_connections, 50);
        assert_eq!(cfg.limits.player_message_buffer, 64);
        assert!((cfg.limits.ws_rate_limit_per_sec - 5.0).abs() < f64::EPSILON);
        assert_eq!(cfg.limits.max_message_bytes, 4096);
        assert_eq!(cfg.rooms.max_rooms, 20);
        assert_eq!(cfg.rooms.step_reveal_delay_ms, 0);
        assert!(cfg.scores.reset_on_abort);
        assert!(!cfg.scores.reset_on_play_again);
    }

    #[test]
    fn default_limits_config() {
        let cfg = LimitsConfig::default();
        assert_eq!(cfg.max_ws_connections, 200);
        assert_eq!(cfg.player_message_buffer, 256);
        assert!((cfg.ws_rate_limit_per_sec - 20.0).abs() < f64::EPSILON);
        assert_eq!(cfg.max_message_bytes, 16 * 1024);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let toml_str = r#"
listen_addr = "0.0.0.0:8080"

[scores]
reset_on_abort = true
"#;
        let cfg: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.limits.max_ws_connections, 200);
        assert_eq!(cfg.rooms.max_rooms, 500);
        assert_eq!(cfg.rooms.step_reveal_delay_ms, 3000);
        assert!(cfg.scores.reset_on_abort);
        assert!(cfg.scores.reset_on_play_again);
    }
}
