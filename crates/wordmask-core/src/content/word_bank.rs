use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::lists::THEMES;

/// Names of every built-in theme, in catalog order.
pub fn themes() -> Vec<&'static str> {
    THEMES.iter().map(|(name, _)| *name).collect()
}

pub fn is_theme(name: &str) -> bool {
    THEMES.iter().any(|(n, _)| *n == name)
}

fn theme_words(name: &str) -> Option<&'static [&'static str]> {
    THEMES.iter().find(|(n, _)| *n == name).map(|(_, w)| *w)
}

/// Secret-word source for one room. Words handed out in earlier games are
/// skipped until the theme runs dry.
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    used: HashSet<&'static str>,
}

impl WordBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `count` distinct words from `theme`. Returns `None` for an unknown
    /// theme or one that is smaller than `count`.
    pub fn pick_words<R: Rng + ?Sized>(
        &mut self,
        theme: &str,
        count: usize,
        rng: &mut R,
    ) -> Option<Vec<String>> {
        let words = theme_words(theme)?;
        if words.len() < count {
            return None;
        }
        let mut available: Vec<&'static str> = words
            .iter()
            .copied()
            .filter(|w| !self.used.contains(w))
            .collect();
        if available.len() < count {
            tracing::debug!(theme, "word bank exhausted, starting over");
            self.used.clear();
            available = words.to_vec();
        }
        available.shuffle(rng);
        available.truncate(count);
        self.used.extend(available.iter().copied());
        Some(available.into_iter().map(str::to_string).collect())
    }

    pub fn reset(&mut self) {
        self.used.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn catalog_lists_builtin_themes() {
        let names = themes();
        assert!(names.contains(&"animals"));
        assert!(names.contains(&"movies"));
        assert!(is_theme("food"));
        assert!(!is_theme("dinosaurs"));
    }

    #[test]
    fn picks_are_distinct_and_from_theme() {
        let mut bank = WordBank::new();
        let mut rng = StdRng::seed_from_u64(7);
        let words = bank.pick_words("animals", 8, &mut rng).unwrap();
        let unique: HashSet<_> = words.iter().collect();
        assert_eq!(unique.len(), 8);
        let pool = theme_words("animals").unwrap();
        assert!(words.iter().all(|w| pool.contains(&w.as_str())));
    }

    #[test]
    fn no_repeats_until_exhausted() {
        let mut bank = WordBank::new();
        let mut rng = StdRng::seed_from_u64(11);
        let pool_len = theme_words("objects").unwrap().len();
        let first = bank.pick_words("objects", pool_len / 2, &mut rng).unwrap();
        let second = bank.pick_words("objects", pool_len / 2, &mut rng).unwrap();
        assert!(first.iter().all(|w| !second.contains(w)));

        // Pool is exhausted now; the next draw starts over instead of failing.
        let third = bank.pick_words("objects", 5, &mut rng).unwrap();
        assert_eq!(third.len(), 5);
    }

    #[test]
    fn unknown_or_too_small_theme_yields_none() {
        let mut bank = WordBank::new();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(bank.pick_words("nope", 3, &mut rng).is_none());
        assert!(bank.pick_words("animals", 500, &mut rng).is_none());
    }
}
