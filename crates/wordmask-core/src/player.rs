use serde::{Deserialize, Serialize};

/// Opaque connection identifier. A player's id changes when they reconnect
/// on a new connection; every structure keyed by it is migrated at that point.
pub type PlayerId = String;

/// Longest display name kept after trimming.
pub const MAX_NAME_CHARS: usize = 16;

/// A participant in a Wordmask room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub is_host: bool,
    pub connected: bool,
}

/// The public view of a player sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub is_host: bool,
}

impl From<&Player> for PlayerSummary {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id.clone(),
            name: p.display_name.clone(),
            is_host: p.is_host,
        }
    }
}

/// Trim and truncate a requested display name. Returns `None` when nothing
/// usable remains or the name carries control characters.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_control) {
        return None;
    }
    let name: String = trimmed.chars().take(MAX_NAME_CHARS).collect();
    Some(name.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_truncates() {
        assert_eq!(normalize_name("  Alice  ").as_deref(), Some("Alice"));
        assert_eq!(
            normalize_name("abcdefghijklmnopqrstuvwxyz").as_deref(),
            Some("abcdefghijklmnop")
        );
    }

    #[test]
    fn normalize_rejects_empty_and_control() {
        assert!(normalize_name("   ").is_none());
        assert!(normalize_name("bad\u{7}name").is_none());
    }

    #[test]
    fn summary_uses_camel_case() {
        let p = Player {
            id: "c1".into(),
            display_name: "Alice".into(),
            is_host: true,
            connected: true,
        };
        let json = serde_json::to_value(PlayerSummary::from(&p)).unwrap();
        assert_eq!(json["isHost"], true);
        assert_eq!(json["name"], "Alice");
    }
}
