use serde::{Deserialize, Deserializer, Serialize};

use crate::content::{clue_deck, word_bank};

/// Fewest connected players a game can start with.
pub const MIN_PLAYERS: usize = 3;
/// Most players a room admits.
pub const MAX_PLAYERS: usize = 10;

pub const HAND_SIZE_RANGE: (i64, i64) = (3, 15);
pub const CLUE_ROUNDS_RANGE: (i64, i64) = (1, 5);
pub const DECOY_COUNT_RANGE: (i64, i64) = (1, 10);
pub const POINTS_RANGE: (i64, i64) = (0, 10);
pub const PENALTY_RANGE: (i64, i64) = (-10, 0);
pub const TIMER_RANGE: (i64, i64) = (0, 300);

/// Host-controlled game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: String,
    pub clue_list: String,
    pub hand_size: u8,
    pub clue_rounds: u8,
    pub decoy_count: u8,
    pub points_self_guess: i32,
    pub points_match: i32,
    pub penalty_misidentified: i32,
    pub allow_duplicate_matches: bool,
    /// Seconds per clue slot, 0 = untimed.
    pub clue_timer: u16,
    pub guess_timer: u16,
    pub match_timer: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "animals".to_string(),
            clue_list: "general".to_string(),
            hand_size: 6,
            clue_rounds: 2,
            decoy_count: 3,
            points_self_guess: 3,
            points_match: 1,
            penalty_misidentified: -1,
            allow_duplicate_matches: false,
            clue_timer: 45,
            guess_timer: 60,
            match_timer: 90,
        }
    }
}

/// A partial settings update from the host. Every field is optional and
/// clamped independently; unknown fields are ignored. Numeric fields accept
/// numbers or numeric strings, since form controls tend to send the latter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub theme: Option<String>,
    pub clue_list: Option<String>,
    #[serde(deserialize_with = "lenient_int")]
    pub hand_size: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    pub clue_rounds: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    pub decoy_count: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    pub points_self_guess: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    pub points_match: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    pub penalty_misidentified: Option<i64>,
    #[serde(deserialize_with = "lenient_bool")]
    pub allow_duplicate_matches: Option<bool>,
    #[serde(deserialize_with = "lenient_int")]
    pub clue_timer: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    pub guess_timer: Option<i64>,
    #[serde(deserialize_with = "lenient_int")]
    pub match_timer: Option<i64>,
}

fn clamp(value: i64, (lo, hi): (i64, i64)) -> i64 {
    value.clamp(lo, hi)
}

impl Settings {
    /// Apply a patch in place. Unknown theme or clue-list names are ignored.
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(v) = patch.hand_size {
            self.hand_size = clamp(v, HAND_SIZE_RANGE) as u8;
        }
        if let Some(v) = patch.clue_rounds {
            self.clue_rounds = clamp(v, CLUE_ROUNDS_RANGE) as u8;
        }
        if let Some(v) = patch.decoy_count {
            self.decoy_count = clamp(v, DECOY_COUNT_RANGE) as u8;
        }
        if let Some(v) = patch.points_self_guess {
            self.points_self_guess = clamp(v, POINTS_RANGE) as i32;
        }
        if let Some(v) = patch.points_match {
            self.points_match = clamp(v, POINTS_RANGE) as i32;
        }
        if let Some(v) = patch.penalty_misidentified {
            self.penalty_misidentified = clamp(v, PENALTY_RANGE) as i32;
        }
        if let Some(ref theme) = patch.theme
            && word_bank::is_theme(theme)
        {
            self.theme = theme.clone();
        }
        if let Some(ref list) = patch.clue_list
            && clue_deck::is_list(list)
        {
            self.clue_list = list.clone();
        }
        if let Some(v) = patch.allow_duplicate_matches {
            self.allow_duplicate_matches = v;
        }
        if let Some(v) = patch.clue_timer {
            self.clue_timer = clamp(v, TIMER_RANGE) as u16;
        }
        if let Some(v) = patch.guess_timer {
            self.guess_timer = clamp(v, TIMER_RANGE) as u16;
        }
        if let Some(v) = patch.match_timer {
            self.match_timer = clamp(v, TIMER_RANGE) as u16;
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntLike {
    Int(i64),
    Float(f64),
    Text(String),
}

fn lenient_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<IntLike>::deserialize(d)? {
        Some(IntLike::Int(n)) => Some(n),
        Some(IntLike::Float(f)) if f.is_finite() => Some(f.trunc() as i64),
        Some(IntLike::Text(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolLike {
    Bool(bool),
    Int(i64),
    Text(String),
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(match Option::<BoolLike>::deserialize(d)? {
        Some(BoolLike::Bool(b)) => Some(b),
        Some(BoolLike::Int(n)) => Some(n != 0),
        Some(BoolLike::Text(s)) => match s.trim() {
            "true" | "1" | "on" => Some(true),
            "false" | "0" | "off" | "" => Some(false),
            _ => None,
        },
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_fields_are_clamped() {
        let mut s = Settings::default();
        s.apply(&SettingsPatch {
            hand_size: Some(99),
            clue_rounds: Some(0),
            penalty_misidentified: Some(5),
            clue_timer: Some(-3),
            ..SettingsPatch::default()
        });
        assert_eq!(s.hand_size, 15);
        assert_eq!(s.clue_rounds, 1);
        assert_eq!(s.penalty_misidentified, 0);
        assert_eq!(s.clue_timer, 0);
    }

    #[test]
    fn unknown_theme_is_ignored() {
        let mut s = Settings::default();
        s.apply(&SettingsPatch {
            theme: Some("dinosaurs".into()),
            clue_list: Some("science".into()),
            ..SettingsPatch::default()
        });
        assert_eq!(s.theme, "animals");
        assert_eq!(s.clue_list, "science");
    }

    #[test]
    fn patch_accepts_strings_and_ignores_unknown_fields() {
        let patch: SettingsPatch = serde_json::from_str(
            r#"{"handSize":"8","decoyCount":4.7,"allowDuplicateMatches":"on","colour":"red"}"#,
        )
        .unwrap();
        assert_eq!(patch.hand_size, Some(8));
        assert_eq!(patch.decoy_count, Some(4));
        assert_eq!(patch.allow_duplicate_matches, Some(true));
        assert_eq!(patch.theme, None);
    }

    #[test]
    fn unparsable_number_leaves_field_untouched() {
        let patch: SettingsPatch = serde_json::from_str(r#"{"clueRounds":"lots"}"#).unwrap();
        let mut s = Settings::default();
        s.apply(&patch);
        assert_eq!(s.clue_rounds, Settings::default().clue_rounds);
    }

    #[test]
    fn settings_serialize_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["pointsSelfGuess"], 3);
        assert_eq!(json["allowDuplicateMatches"], false);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn applied_settings_stay_in_range(
                hand in any::<i64>(),
                rounds in any::<i64>(),
                decoys in any::<i64>(),
                penalty in any::<i64>(),
                timer in any::<i64>(),
            ) {
                let mut s = Settings::default();
                s.apply(&SettingsPatch {
                    hand_size: Some(hand),
                    clue_rounds: Some(rounds),
                    decoy_count: Some(decoys),
                    penalty_misidentified: Some(penalty),
                    match_timer: Some(timer),
                    ..SettingsPatch::default()
                });
                prop_assert!((3..=15).contains(&s.hand_size));
                prop_assert!((1..=5).contains(&s.clue_rounds));
                prop_assert!((1..=10).contains(&s.decoy_count));
                prop_assert!((-10..=0).contains(&s.penalty_misidentified));
                prop_assert!(s.match_timer <= 300);
            }
        }
    }
}
