// src/evaluation/normalize.rs

use crate::models::response::AnswerValue;

/// Likert phrases, abbreviations and digit strings accepted as answers.
const LIKERT_DICTIONARY: &[(&str, f64)] = &[
    ("sangat tidak setuju", 1.0),
    ("tidak setuju", 2.0),
    ("netral", 3.0),
    ("setuju", 4.0),
    ("sangat setuju", 5.0),
    ("sts", 1.0),
    ("ts", 2.0),
    ("n", 3.0),
    ("s", 4.0),
    ("ss", 5.0),
    ("1", 1.0),
    ("2", 2.0),
    ("3", 3.0),
    ("4", 4.0),
    ("5", 5.0),
];

/// Maps a raw answer onto the 1-5 Likert scale.
///
/// Returns 0 for anything that should not count: missing answers, unknown
/// phrases, unparseable text and non-scalar JSON. Numbers pass through untouched; range
/// checking belongs to the caller.
pub fn normalize(raw: &AnswerValue) -> f64 {
    match raw {
        AnswerValue::Missing | AnswerValue::Other(_) => 0.0,
        AnswerValue::Numeric(n) => *n,
        AnswerValue::Text(text) => normalize_text(text),
    }
}

fn normalize_text(text: &str) -> f64 {
    let key = text.trim().to_lowercase();

    if let Some((_, value)) = LIKERT_DICTIONARY.iter().find(|(phrase, _)| *phrase == key) {
        return *value;
    }

    match key.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}
