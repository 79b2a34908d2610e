//! Authoritative per-room game state: the phase machine, clue slots and every
//! player submission of the current game.
//!
//! The session knows nothing about connections or timers. Callers pass the
//! current connected roster and the current instant into the operations that
//! need them.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// Game phases, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Lobby,
    Clue,
    Guessing,
    Matching,
    Results,
}

impl Phase {
    pub fn can_transition_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Lobby, Phase::Clue)
                | (Phase::Clue, Phase::Guessing)
                | (Phase::Guessing, Phase::Matching)
                | (Phase::Matching, Phase::Results)
                | (Phase::Results, Phase::Clue)
                | (Phase::Results, Phase::Lobby)
        )
    }

    /// Clue, guessing or matching: a game is running and can be aborted.
    pub fn is_mid_game(self) -> bool {
        matches!(self, Phase::Clue | Phase::Guessing | Phase::Matching)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Lobby => "lobby",
            Phase::Clue => "clue",
            Phase::Guessing => "guessing",
            Phase::Matching => "matching",
            Phase::Results => "results",
        };
        f.write_str(name)
    }
}

/// An illegal phase change. Only an orchestration bug can produce one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionError {
    pub from: Phase,
    pub to: Phase,
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid phase transition: {} -> {}", self.from, self.to)
    }
}

impl std::error::Error for TransitionError {}

/// Address of one clue slot: a clue round and a position in the word order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub round: u8,
    pub word_index: usize,
}

/// Accused owner per guessed word, as submitted in the matching phase.
pub type MatchMap = BTreeMap<String, PlayerId>;

/// Cumulative score line for one player. Survives "play again".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreTotals {
    pub self_guess: i32,
    pub match_points: i32,
    pub penalties: i32,
    pub total: i32,
    pub total_time_ms: u64,
}

/// Clues about one player's word, split by who gave them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CluesForPlayer {
    /// Given by other players.
    pub clues: Vec<String>,
    /// Given blind by the word's owner.
    pub blind_clues: Vec<String>,
}

/// One clue with full attribution, as revealed in the matching phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealedClue {
    pub player_id: PlayerId,
    pub player_name: String,
    pub clue: String,
    pub target_word: String,
    pub target_player_id: PlayerId,
    /// 1-based clue round.
    pub round: u8,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) phase: Phase,
    pub(crate) round: u8,
    pub(crate) word_index: usize,
    pub(crate) hidden_words: HashMap<PlayerId, String>,
    pub(crate) word_order: Vec<PlayerId>,
    pub(crate) decoys: Vec<String>,
    pub(crate) clues: BTreeMap<SlotKey, Vec<(PlayerId, String)>>,
    pub(crate) current_clue_submissions: Vec<(PlayerId, String)>,
    pub(crate) guesses: HashMap<PlayerId, String>,
    pub(crate) matches: HashMap<PlayerId, MatchMap>,
    pub(crate) scores: HashMap<PlayerId, ScoreTotals>,
    pub(crate) phase_started_at: Option<Instant>,
    pub(crate) submit_times: HashMap<PlayerId, u64>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Lobby,
            round: 0,
            word_index: 0,
            hidden_words: HashMap::new(),
            word_order: Vec::new(),
            decoys: Vec::new(),
            clues: BTreeMap::new(),
            current_clue_submissions: Vec::new(),
            guesses: HashMap::new(),
            matches: HashMap::new(),
            scores: HashMap::new(),
            phase_started_at: None,
            submit_times: HashMap::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }

    pub fn word_order(&self) -> &[PlayerId] {
        &self.word_order
    }

    pub fn decoys(&self) -> &[String] {
        &self.decoys
    }

    pub fn hidden_word(&self, player_id: &str) -> Option<&str> {
        self.hidden_words.get(player_id).map(String::as_str)
    }

    pub fn hidden_words(&self) -> &HashMap<PlayerId, String> {
        &self.hidden_words
    }

    pub fn guess(&self, player_id: &str) -> Option<&str> {
        self.guesses.get(player_id).map(String::as_str)
    }

    pub fn matches_of(&self, player_id: &str) -> Option<&MatchMap> {
        self.matches.get(player_id)
    }

    pub fn score(&self, player_id: &str) -> Option<&ScoreTotals> {
        self.scores.get(player_id)
    }

    pub fn sealed_slot(&self, key: SlotKey) -> Option<&[(PlayerId, String)]> {
        self.clues.get(&key).map(Vec::as_slice)
    }

    pub fn current_clue_count(&self) -> usize {
        self.current_clue_submissions.len()
    }

    /// True when `player_id` was dealt a word in the current game.
    pub fn is_participant(&self, player_id: &str) -> bool {
        self.hidden_words.contains_key(player_id)
    }

    pub fn transition_to(&mut self, next: Phase, now: Instant) -> Result<(), TransitionError> {
        if !self.phase.can_transition_to(next) {
            return Err(TransitionError {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        self.phase_started_at = Some(now);
        Ok(())
    }

    /// Install the word assignments for a new game. `word_order` must be a
    /// permutation of the assigned players. Cumulative scores are kept.
    pub fn init_game(
        &mut self,
        assignments: Vec<(PlayerId, String)>,
        word_order: Vec<PlayerId>,
        decoys: Vec<String>,
    ) {
        debug_assert_eq!(assignments.len(), word_order.len());
        self.round = 0;
        self.word_index = 0;
        self.clues.clear();
        self.guesses.clear();
        self.matches.clear();
        self.current_clue_submissions.clear();
        self.submit_times.clear();
        for (id, _) in &assignments {
            self.scores.entry(id.clone()).or_default();
            self.submit_times.insert(id.clone(), 0);
        }
        self.hidden_words = assignments.into_iter().collect();
        self.word_order = word_order;
        self.decoys = decoys;
    }

    /// Owner of the word currently on the table.
    pub fn current_target(&self) -> Option<&PlayerId> {
        self.word_order.get(self.word_index)
    }

    pub fn current_slot(&self) -> SlotKey {
        SlotKey {
            round: self.round,
            word_index: self.word_index,
        }
    }

    /// Open a fresh clue slot.
    pub fn start_clue_step(&mut self, now: Instant) {
        self.current_clue_submissions.clear();
        self.phase_started_at = Some(now);
    }

    /// Record a clue for the open slot. Returns false (and changes nothing)
    /// if the player already gave one.
    pub fn submit_clue(&mut self, player_id: &str, clue: &str, now: Instant) -> bool {
        if self.phase != Phase::Clue || self.has_submitted_clue(player_id) {
            return false;
        }
        self.current_clue_submissions
            .push((player_id.to_string(), clue.to_string()));
        self.record_submit_time(player_id, now);
        true
    }

    pub fn has_submitted_clue(&self, player_id: &str) -> bool {
        self.current_clue_submissions
            .iter()
            .any(|(giver, _)| giver == player_id)
    }

    /// True when every listed player has a clue in the open slot.
    pub fn all_clues_in(&self, connected: &[PlayerId]) -> bool {
        connected.iter().all(|id| self.has_submitted_clue(id))
    }

    /// Seal the open slot into the clue record and move to the next word,
    /// wrapping to the next round after the last word.
    pub fn seal_clue_slot(&mut self, now: Instant) -> SlotKey {
        let key = self.current_slot();
        let sealed = std::mem::take(&mut self.current_clue_submissions);
        self.clues.insert(key, sealed);

        self.word_index += 1;
        if self.word_index >= self.word_order.len() {
            self.word_index = 0;
            self.round += 1;
        }
        self.phase_started_at = Some(now);
        key
    }

    pub fn is_clue_phase_complete(&self, total_rounds: u8) -> bool {
        self.round >= total_rounds
    }

    pub fn submit_guess(&mut self, player_id: &str, word: &str, now: Instant) -> bool {
        if self.phase != Phase::Guessing || self.guesses.contains_key(player_id) {
            return false;
        }
        self.guesses.insert(player_id.to_string(), word.to_string());
        self.record_submit_time(player_id, now);
        true
    }

    pub fn all_guesses_in(&self, connected: &[PlayerId]) -> bool {
        connected.iter().all(|id| self.guesses.contains_key(id))
    }

    pub fn submit_matches(&mut self, player_id: &str, matches: MatchMap, now: Instant) -> bool {
        if self.phase != Phase::Matching || self.matches.contains_key(player_id) {
            return false;
        }
        self.matches.insert(player_id.to_string(), matches);
        self.record_submit_time(player_id, now);
        true
    }

    pub fn all_matches_in(&self, connected: &[PlayerId]) -> bool {
        connected.iter().all(|id| self.matches.contains_key(id))
    }

    fn record_submit_time(&mut self, player_id: &str, now: Instant) {
        let Some(started) = self.phase_started_at else {
            return;
        };
        let elapsed = now.saturating_duration_since(started).as_millis() as u64;
        *self.submit_times.entry(player_id.to_string()).or_insert(0) += elapsed;
    }

    pub fn submit_time_ms(&self, player_id: &str) -> u64 {
        self.submit_times.get(player_id).copied().unwrap_or(0)
    }

    /// Clues given about `player_id`'s word across all sealed rounds.
    pub fn clues_for_player(&self, player_id: &str) -> CluesForPlayer {
        let mut out = CluesForPlayer::default();
        let Some(owner_index) = self.word_order.iter().position(|id| id == player_id) else {
            return out;
        };
        for (key, submissions) in &self.clues {
            if key.word_index != owner_index {
                continue;
            }
            for (giver, clue) in submissions {
                if giver == player_id {
                    out.blind_clues.push(clue.clone());
                } else {
                    out.clues.push(clue.clone());
                }
            }
        }
        out
    }

    /// Every sealed clue with attribution, ordered by round then word slot.
    pub fn revealed_clues<F>(&self, name_of: F) -> Vec<RevealedClue>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut revealed = Vec::new();
        for (key, submissions) in &self.clues {
            let Some(target) = self.word_order.get(key.word_index) else {
                continue;
            };
            let target_word = self.hidden_words.get(target).cloned().unwrap_or_default();
            for (giver, clue) in submissions {
                revealed.push(RevealedClue {
                    player_id: giver.clone(),
                    player_name: name_of(giver).unwrap_or_else(|| "Unknown".to_string()),
                    clue: clue.clone(),
                    target_word: target_word.clone(),
                    target_player_id: target.clone(),
                    round: key.round + 1,
                });
            }
        }
        revealed
    }

    /// Rename every reference to `old_id` across the session.
    pub fn migrate_player_id(&mut self, old_id: &str, new_id: &str) {
        fn rekey<V>(map: &mut HashMap<PlayerId, V>, old_id: &str, new_id: &str) {
            if let Some(v) = map.remove(old_id) {
                map.insert(new_id.to_string(), v);
            }
        }
        fn rename(id: &mut PlayerId, old_id: &str, new_id: &str) {
            if id == old_id {
                *id = new_id.to_string();
            }
        }

        rekey(&mut self.hidden_words, old_id, new_id);
        rekey(&mut self.guesses, old_id, new_id);
        rekey(&mut self.matches, old_id, new_id);
        rekey(&mut self.scores, old_id, new_id);
        rekey(&mut self.submit_times, old_id, new_id);

        for id in &mut self.word_order {
            rename(id, old_id, new_id);
        }
        for submissions in self.clues.values_mut() {
            for (giver, _) in submissions.iter_mut() {
                rename(giver, old_id, new_id);
            }
        }
        for (giver, _) in &mut self.current_clue_submissions {
            rename(giver, old_id, new_id);
        }
        for map in self.matches.values_mut() {
            for accused in map.values_mut() {
                rename(accused, old_id, new_id);
            }
        }
    }

    /// Forget the current game and return to the lobby. Scores are kept.
    pub fn reset_for_new_game(&mut self) {
        self.phase = Phase::Lobby;
        self.round = 0;
        self.word_index = 0;
        self.hidden_words.clear();
        self.word_order.clear();
        self.decoys.clear();
        self.clues.clear();
        self.current_clue_submissions.clear();
        self.guesses.clear();
        self.matches.clear();
        self.submit_times.clear();
        self.phase_started_at = None;
    }

    pub fn reset_scores(&mut self) {
        self.scores.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn ids(names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn started_session(now: Instant) -> Session {
        let mut s = Session::new();
        s.init_game(
            vec![
                ("a".into(), "fox".into()),
                ("b".into(), "owl".into()),
                ("c".into(), "elk".into()),
            ],
            ids(&["b", "c", "a"]),
            vec!["yak".into(), "emu".into()],
        );
        s.transition_to(Phase::Clue, now).unwrap();
        s.start_clue_step(now);
        s
    }

    #[test]
    fn only_listed_transitions_are_legal() {
        let now = Instant::now();
        let mut s = Session::new();
        assert!(s.transition_to(Phase::Guessing, now).is_err());
        s.transition_to(Phase::Clue, now).unwrap();
        let err = s.transition_to(Phase::Results, now).unwrap_err();
        assert_eq!(err.from, Phase::Clue);
        assert_eq!(err.to, Phase::Results);
        assert_eq!(s.phase(), Phase::Clue);
        s.transition_to(Phase::Guessing, now).unwrap();
        s.transition_to(Phase::Matching, now).unwrap();
        s.transition_to(Phase::Results, now).unwrap();
        assert!(Phase::Results.can_transition_to(Phase::Clue));
        assert!(Phase::Results.can_transition_to(Phase::Lobby));
        assert!(!Phase::Matching.can_transition_to(Phase::Lobby));
    }

    #[test]
    fn clue_resubmission_is_a_noop() {
        let now = Instant::now();
        let mut s = started_session(now);
        assert!(s.submit_clue("a", "forest", now));
        assert!(!s.submit_clue("a", "river", now));
        assert_eq!(s.current_clue_count(), 1);
    }

    #[test]
    fn completeness_tracks_connected_ids_not_counts() {
        let now = Instant::now();
        let mut s = started_session(now);
        s.submit_clue("a", "forest", now);
        // "a" is gone; "b" submitting must not stand in for "c".
        s.submit_clue("b", "river", now);
        assert!(!s.all_clues_in(&ids(&["b", "c"])));
        s.submit_clue("c", "stone", now);
        assert!(s.all_clues_in(&ids(&["b", "c"])));
    }

    #[test]
    fn sealing_advances_slot_and_wraps_rounds() {
        let now = Instant::now();
        let mut s = started_session(now);
        s.submit_clue("a", "forest", now);
        let key = s.seal_clue_slot(now);
        assert_eq!(key, SlotKey { round: 0, word_index: 0 });
        assert_eq!(s.sealed_slot(key).unwrap().len(), 1);
        assert_eq!(s.current_clue_count(), 0);
        s.seal_clue_slot(now);
        s.seal_clue_slot(now);
        assert_eq!(s.round(), 1);
        assert_eq!(s.word_index(), 0);
        assert!(s.is_clue_phase_complete(1));
        assert!(!s.is_clue_phase_complete(2));
    }

    #[test]
    fn clues_for_player_splits_blind_clues() {
        let now = Instant::now();
        let mut s = started_session(now);
        // Slot 0 is b's word.
        s.submit_clue("a", "night", now);
        s.submit_clue("b", "feather", now);
        s.submit_clue("c", "wise", now);
        s.seal_clue_slot(now);

        let for_b = s.clues_for_player("b");
        assert_eq!(for_b.clues, vec!["night".to_string(), "wise".to_string()]);
        assert_eq!(for_b.blind_clues, vec!["feather".to_string()]);
        assert!(s.clues_for_player("a").clues.is_empty());
    }

    #[test]
    fn revealed_clues_carry_attribution() {
        let now = Instant::now();
        let mut s = started_session(now);
        s.submit_clue("c", "wise", now);
        s.seal_clue_slot(now);
        let revealed = s.revealed_clues(|id| (id == "c").then(|| "Cara".to_string()));
        assert_eq!(revealed.len(), 1);
        let r = &revealed[0];
        assert_eq!(r.player_name, "Cara");
        assert_eq!(r.target_word, "owl");
        assert_eq!(r.target_player_id, "b");
        assert_eq!(r.round, 1);
    }

    #[test]
    fn submit_time_accumulates_per_phase() {
        let start = Instant::now();
        let mut s = started_session(start);
        s.submit_clue("a", "x", start + Duration::from_millis(1500));
        s.seal_clue_slot(start + Duration::from_millis(2000));
        s.submit_clue("a", "y", start + Duration::from_millis(2500));
        assert_eq!(s.submit_time_ms("a"), 2000);
        assert_eq!(s.submit_time_ms("b"), 0);
    }

    #[test]
    fn migrate_renames_every_reference() {
        let now = Instant::now();
        let mut s = started_session(now);
        s.submit_clue("a", "night", now);
        s.seal_clue_slot(now);
        s.submit_clue("a", "den", now);
        s.transition_to(Phase::Guessing, now).unwrap();
        s.submit_guess("a", "fox", now);
        s.transition_to(Phase::Matching, now).unwrap();
        s.submit_matches("b", MatchMap::from([("fox".into(), "a".into())]), now);

        s.migrate_player_id("a", "a2");

        assert_eq!(s.hidden_word("a2"), Some("fox"));
        assert!(s.hidden_word("a").is_none());
        assert!(s.word_order().contains(&"a2".to_string()));
        assert_eq!(s.guess("a2"), Some("fox"));
        assert_eq!(s.matches_of("b").unwrap()["fox"], "a2");
        assert!(s.score("a2").is_some());
        let sealed = s.sealed_slot(SlotKey { round: 0, word_index: 0 }).unwrap();
        assert_eq!(sealed[0].0, "a2");
        assert!(s.has_submitted_clue("a2"));
    }

    #[test]
    fn reset_keeps_scores_until_explicitly_cleared() {
        let now = Instant::now();
        let mut s = started_session(now);
        s.scores.get_mut("a").unwrap().total = 5;
        s.reset_for_new_game();
        assert_eq!(s.phase(), Phase::Lobby);
        assert!(s.hidden_words().is_empty());
        assert_eq!(s.score("a").unwrap().total, 5);
        s.reset_scores();
        assert!(s.score("a").is_none());
    }

    #[test]
    fn submissions_outside_their_phase_are_rejected() {
        let now = Instant::now();
        let mut s = started_session(now);
        assert!(!s.submit_guess("a", "fox", now));
        assert!(!s.submit_matches("a", MatchMap::new(), now));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn sealed_slots_never_exceed_roster(
                submitters in proptest::collection::vec(0usize..3, 0..40),
                seal_every in 1usize..6,
            ) {
                let now = Instant::now();
                let mut s = started_session(now);
                let roster = ids(&["a", "b", "c"]);
                for (i, who) in submitters.iter().enumerate() {
                    s.submit_clue(&roster[*who], "clue", now);
                    if i % seal_every == 0 {
                        s.seal_clue_slot(now);
                    }
                }
                s.seal_clue_slot(now);
                for submissions in s.clues.values() {
                    prop_assert!(submissions.len() <= roster.len());
                    let mut givers: Vec<_> = submissions.iter().map(|(g, _)| g).collect();
                    givers.sort();
                    givers.dedup();
                    prop_assert_eq!(givers.len(), submissions.len());
                }
            }
        }
    }
}
