use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::lists::CLUE_LISTS;

pub const DEFAULT_CLUE_LIST: &str = "general";

pub fn lists() -> Vec<&'static str> {
    CLUE_LISTS.iter().map(|(name, _)| *name).collect()
}

pub fn is_list(name: &str) -> bool {
    CLUE_LISTS.iter().any(|(n, _)| *n == name)
}

/// Distinct cards of a list, first occurrence wins.
fn list_cards(name: &str) -> Vec<&'static str> {
    let cards = CLUE_LISTS
        .iter()
        .find(|(n, _)| *n == name)
        .or_else(|| CLUE_LISTS.iter().find(|(n, _)| *n == DEFAULT_CLUE_LIST))
        .map(|(_, c)| *c)
        .unwrap_or(&[]);
    let mut seen = HashSet::new();
    cards.iter().copied().filter(|c| seen.insert(*c)).collect()
}

/// Deals clue-card hands. Within one clue slot no card is dealt twice
/// until the list runs out.
#[derive(Debug, Clone)]
pub struct ClueDeck {
    list: String,
    used_this_step: HashSet<&'static str>,
}

impl Default for ClueDeck {
    fn default() -> Self {
        Self::new(DEFAULT_CLUE_LIST)
    }
}

impl ClueDeck {
    pub fn new(list: &str) -> Self {
        let list = if is_list(list) {
            list
        } else {
            DEFAULT_CLUE_LIST
        };
        Self {
            list: list.to_string(),
            used_this_step: HashSet::new(),
        }
    }

    pub fn list(&self) -> &str {
        &self.list
    }

    /// Switch to another list. Unknown names are ignored.
    pub fn set_list(&mut self, list: &str) {
        if is_list(list) && self.list != list {
            self.list = list.to_string();
            self.used_this_step.clear();
        }
    }

    /// Begin a new clue slot: every card is available again.
    pub fn start_step(&mut self) {
        self.used_this_step.clear();
    }

    pub fn reset_round(&mut self) {
        self.used_this_step.clear();
    }

    /// Deal a hand of up to `count` cards.
    pub fn draw<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Vec<String> {
        let cards = list_cards(&self.list);
        let mut available: Vec<&'static str> = cards
            .iter()
            .copied()
            .filter(|c| !self.used_this_step.contains(c))
            .collect();
        if available.len() < count {
            self.used_this_step.clear();
            available = cards;
        }
        available.shuffle(rng);
        available.truncate(count);
        self.used_this_step.extend(available.iter().copied());
        available.into_iter().map(str::to_string).collect()
    }
}
