//! Roster of the participants in one room.
//!
//! Players keep their registry position for the lifetime of the room, which
//! gives host promotion and ranking tie-breaks a deterministic order.
//! Disconnected players stay in the roster (so their clues and guesses remain
//! attributable) but are excluded from [`PlayerRegistry::all`] and
//! [`PlayerRegistry::count`].

use crate::player::{Player, PlayerId, PlayerSummary, normalize_name};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    InvalidName,
    NameTaken,
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "Invalid player name"),
            Self::NameTaken => write!(f, "Name already taken"),
        }
    }
}

impl std::error::Error for RegistryError {}

#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connected player. Names are compared case-insensitively against
    /// every roster entry, connected or not.
    pub fn add(
        &mut self,
        id: PlayerId,
        name: &str,
        is_host: bool,
    ) -> Result<&Player, RegistryError> {
        let display_name = normalize_name(name).ok_or(RegistryError::InvalidName)?;
        if self.has_name(&display_name) {
            return Err(RegistryError::NameTaken);
        }
        self.players.push(Player {
            id,
            display_name,
            is_host,
            connected: true,
        });
        Ok(&self.players[self.players.len() - 1])
    }

    /// Drop a player permanently. Returns the removed record.
    pub fn remove(&mut self, id: &str) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == id)?;
        Some(self.players.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Flip `connected` off, keeping the record. Returns false for unknown ids.
    pub fn mark_disconnected(&mut self, id: &str) -> bool {
        match self.players.iter_mut().find(|p| p.id == id) {
            Some(p) => {
                p.connected = false;
                true
            },
            None => false,
        }
    }

    pub fn find_disconnected_by_name(&self, name: &str) -> Option<&Player> {
        let wanted = name.trim().to_lowercase();
        self.players
            .iter()
            .find(|p| !p.connected && p.display_name.to_lowercase() == wanted)
    }

    /// Rename a player to a new connection id and mark them connected.
    pub fn migrate_id(&mut self, old_id: &str, new_id: &str) -> Option<&Player> {
        let player = self.players.iter_mut().find(|p| p.id == old_id)?;
        player.id = new_id.to_string();
        player.connected = true;
        Some(player)
    }

    /// Give the host title to the first connected player in registry order,
    /// clearing it everywhere else. Returns the new host, if any.
    pub fn promote_new_host(&mut self) -> Option<PlayerId> {
        for p in &mut self.players {
            p.is_host = false;
        }
        let next = self.players.iter_mut().find(|p| p.connected)?;
        next.is_host = true;
        Some(next.id.clone())
    }

    /// Connected players in registry order.
    pub fn all(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.connected)
    }

    pub fn all_including_disconnected(&self) -> &[Player] {
        &self.players
    }

    pub fn connected_ids(&self) -> Vec<PlayerId> {
        self.all().map(|p| p.id.clone()).collect()
    }

    pub fn count(&self) -> usize {
        self.all().count()
    }

    /// True when no record, connected or held for reconnection, remains.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn has_name(&self, name: &str) -> bool {
        let wanted = name.trim().to_lowercase();
        self.players
            .iter()
            .any(|p| p.display_name.to_lowercase() == wanted)
    }

    pub fn is_host(&self, id: &str) -> bool {
        self.get(id).is_some_and(|p| p.is_host && p.connected)
    }

    pub fn host_id(&self) -> Option<PlayerId> {
        self.all().find(|p| p.is_host).map(|p| p.id.clone())
    }

    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.get(id).map(|p| p.display_name.as_str())
    }

    pub fn summaries(&self) -> Vec<PlayerSummary> {
        self.all().map(PlayerSummary::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> PlayerRegistry {
        let mut reg = PlayerRegistry::new();
        reg.add("a".into(), "Alice", true).unwrap();
        reg.add("b".into(), "Bob", false).unwrap();
        reg.add("c".into(), "Cara", false).unwrap();
        reg
    }

    #[test]
    fn add_rejects_case_insensitive_duplicates() {
        let mut reg = roster();
        assert_eq!(
            reg.add("d".into(), "  alice ", false).unwrap_err(),
            RegistryError::NameTaken
        );
        assert_eq!(reg.count(), 3);
    }

    #[test]
    fn add_truncates_long_names() {
        let mut reg = PlayerRegistry::new();
        let p = reg
            .add("x".into(), "Bartholomew-the-Magnificent", false)
            .unwrap();
        assert_eq!(p.display_name.chars().count(), 16);
    }

    #[test]
    fn disconnected_players_are_not_counted_but_kept() {
        let mut reg = roster();
        assert!(reg.mark_disconnected("b"));
        assert_eq!(reg.count(), 2);
        assert_eq!(reg.all_including_disconnected().len(), 3);
        assert_eq!(reg.find_disconnected_by_name("BOB").unwrap().id, "b");
        assert!(reg.find_disconnected_by_name("Alice").is_none());
    }

    #[test]
    fn migrate_id_preserves_fields_and_reconnects() {
        let mut reg = roster();
        reg.mark_disconnected("a");
        let p = reg.migrate_id("a", "a2").unwrap();
        assert_eq!(p.display_name, "Alice");
        assert!(p.connected);
        assert!(p.is_host);
        assert!(reg.get("a").is_none());
        // Registry order is unchanged.
        assert_eq!(reg.all_including_disconnected()[0].id, "a2");
    }

    #[test]
    fn promote_new_host_picks_first_connected() {
        let mut reg = roster();
        reg.mark_disconnected("a");
        assert_eq!(reg.promote_new_host().as_deref(), Some("b"));
        assert!(!reg.get("a").unwrap().is_host);
        assert_eq!(reg.host_id().as_deref(), Some("b"));
    }

    #[test]
    fn promote_with_nobody_connected_clears_host() {
        let mut reg = roster();
        for id in ["a", "b", "c"] {
            reg.mark_disconnected(id);
        }
        assert!(reg.promote_new_host().is_none());
        assert!(reg.host_id().is_none());
        assert!(!reg.is_empty());
    }

    #[test]
    fn remove_drops_the_record() {
        let mut reg = roster();
        let removed = reg.remove("c").unwrap();
        assert_eq!(removed.display_name, "Cara");
        assert!(reg.remove("c").is_none());
        assert_eq!(reg.connected_ids(), vec!["a".to_string(), "b".to_string()]);
    }
}
