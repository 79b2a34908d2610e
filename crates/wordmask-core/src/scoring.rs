//! End-of-game scoring.
//!
//! Runs exactly once per game, on the transition into results. The returned
//! [`GameResults`] is what clients see; callers cache it rather than scoring
//! again, since scoring mutates the cumulative totals.

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;
use crate::session::Session;
use crate::settings::Settings;

/// A scored player: id and display name, in registry order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessResult {
    pub player_id: PlayerId,
    pub player_name: String,
    pub guessed: Option<String>,
    pub actual: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub matcher_id: PlayerId,
    pub target_player_id: PlayerId,
    pub guessed_word: String,
    pub actual_word: Option<String>,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyRecord {
    pub penalized_player_id: PlayerId,
    pub matcher_id: PlayerId,
    pub wrong_word: String,
    pub assigned_to_player_id: PlayerId,
}

/// One row of the final standings: cumulative totals plus this game's deltas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalScore {
    pub player_id: PlayerId,
    pub player_name: String,
    pub self_guess: i32,
    pub match_points: i32,
    pub penalties: i32,
    pub total: i32,
    pub total_time_ms: u64,
    pub round_self_guess: i32,
    pub round_match_points: i32,
    pub round_penalties: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResults {
    pub guess_results: Vec<GuessResult>,
    pub match_results: Vec<MatchResult>,
    pub penalties: Vec<PenaltyRecord>,
    /// Sorted: total descending, then latency ascending, then registry order.
    pub final_scores: Vec<FinalScore>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Delta {
    self_guess: i32,
    match_points: i32,
    penalties: i32,
}

impl Delta {
    fn total(self) -> i32 {
        self.self_guess + self.match_points + self.penalties
    }
}

/// Score the finished game and fold the outcome into the cumulative totals.
pub fn calculate_results(
    session: &mut Session,
    participants: &[Participant],
    settings: &Settings,
) -> GameResults {
    let mut deltas = vec![Delta::default(); participants.len()];
    let index_of = |id: &str| participants.iter().position(|p| p.id == id);

    let mut guess_results = Vec::with_capacity(participants.len());
    for (i, p) in participants.iter().enumerate() {
        let actual = session.hidden_word(&p.id).unwrap_or_default().to_string();
        let guessed = session.guess(&p.id).map(str::to_string);
        let correct = guessed.as_deref() == Some(actual.as_str());
        if correct {
            deltas[i].self_guess = settings.points_self_guess;
        }
        guess_results.push(GuessResult {
            player_id: p.id.clone(),
            player_name: p.name.clone(),
            guessed,
            actual,
            correct,
        });
    }

    let mut match_results = Vec::new();
    let mut penalties = Vec::new();
    for (matcher_idx, matcher) in participants.iter().enumerate() {
        let Some(match_map) = session.matches_of(&matcher.id) else {
            continue;
        };
        for (guessed_word, target) in match_map {
            let actual_word = session.hidden_word(target).map(str::to_string);
            let correct = actual_word.as_deref() == Some(guessed_word.as_str());
            if correct {
                deltas[matcher_idx].match_points += settings.points_match;
            } else if let Some(owner) = participants.iter().find(|p| {
                p.id != *target && session.hidden_word(&p.id) == Some(guessed_word.as_str())
            }) && let Some(owner_idx) = index_of(&owner.id)
            {
                deltas[owner_idx].penalties += settings.penalty_misidentified;
                penalties.push(PenaltyRecord {
                    penalized_player_id: owner.id.clone(),
                    matcher_id: matcher.id.clone(),
                    wrong_word: guessed_word.clone(),
                    assigned_to_player_id: target.clone(),
                });
            }
            match_results.push(MatchResult {
                matcher_id: matcher.id.clone(),
                target_player_id: target.clone(),
                guessed_word: guessed_word.clone(),
                actual_word,
                correct,
            });
        }
    }

    let mut final_scores = Vec::with_capacity(participants.len());
    for (p, delta) in participants.iter().zip(&deltas) {
        let elapsed = session.submit_time_ms(&p.id);
        let score = session.scores.entry(p.id.clone()).or_default();
        score.self_guess += delta.self_guess;
        score.match_points += delta.match_points;
        score.penalties += delta.penalties;
        score.total += delta.total();
        score.total_time_ms += elapsed;
        final_scores.push(FinalScore {
            player_id: p.id.clone(),
            player_name: p.name.clone(),
            self_guess: score.self_guess,
            match_points: score.match_points,
            penalties: score.penalties,
            total: score.total,
            total_time_ms: score.total_time_ms,
            round_self_guess: delta.self_guess,
            round_match_points: delta.match_points,
            round_penalties: delta.penalties,
        });
    }
    // Stable sort keeps registry order for full ties.
    final_scores.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then(a.total_time_ms.cmp(&b.total_time_ms))
    });

    GameResults {
        guess_results,
        match_results,
        penalties,
        final_scores,
    }
}
