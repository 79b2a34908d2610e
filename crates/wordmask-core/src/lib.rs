pub mod content;
pub mod net;
pub mod player;
pub mod registry;
pub mod room;
pub mod scoring;
pub mod session;
pub mod settings;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::time::Instant;

    use crate::player::PlayerId;
    use crate::registry::PlayerRegistry;
    use crate::scoring::Participant;
    use crate::session::{Phase, Session};

    /// Ids and names used by the fixtures below.
    pub const FIXTURE_PLAYERS: [(&str, &str); 3] = [("p1", "Alice"), ("p2", "Bob"), ("p3", "Cara")];
    /// Hidden words dealt to the fixture players, in the same order.
    pub const FIXTURE_WORDS: [&str; 3] = ["fox", "owl", "elk"];

    /// Create a registry with `n` connected players `p1..pn`; `p1` is host.
    pub fn make_registry(n: usize) -> PlayerRegistry {
        let mut reg = PlayerRegistry::new();
        for i in 0..n {
            let id = format!("p{}", i + 1);
            let name = format!("Player{}", i + 1);
            let _ = reg.add(id, &name, i == 0);
        }
        reg
    }

    /// Participants for [`FIXTURE_PLAYERS`].
    pub fn fixture_participants() -> Vec<Participant> {
        FIXTURE_PLAYERS
            .iter()
            .map(|(id, name)| Participant {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect()
    }

    /// A session in the clue phase with fixed words: p1 fox, p2 owl, p3 elk.
    /// The word order is p1, p2, p3 and the only decoy is "yak".
    pub fn fixed_session(now: Instant) -> Session {
        let assignments: Vec<(PlayerId, String)> = FIXTURE_PLAYERS
            .iter()
            .zip(FIXTURE_WORDS)
            .map(|((id, _), word)| (id.to_string(), word.to_string()))
            .collect();
        let order = assignments.iter().map(|(id, _)| id.clone()).collect();
        let mut session = Session::new();
        session.init_game(assignments, order, vec!["yak".to_string()]);
        let _ = session.transition_to(Phase::Clue, now);
        session.start_clue_step(now);
        session
    }
}
