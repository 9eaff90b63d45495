// src/evaluation/score.rs

use serde::Serialize;

use super::{normalize, round_half_up};
use crate::models::response::Answer;

/// Outcome of scoring one respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    /// Percentage on a 0-100 scale.
    pub score: u8,
    /// Answers that counted towards the score.
    pub answered_count: usize,
}

/// Scores a respondent's answers, returning only the percentage.
pub fn score(answers: &[Answer]) -> u8 {
    score_card(answers).score
}

/// Rescales the mean of the valid Likert answers to a 0-100 percentage.
///
/// Values outside [1, 5] are dropped rather than scored as zero.
pub fn score_card(answers: &[Answer]) -> ScoreCard {
    let (sum, count) = answers
        .iter()
        .map(|a| normalize(&a.answer))
        .filter(|v| (1.0..=5.0).contains(v))
        .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        return ScoreCard::default();
    }

    let mean = sum / count as f64;
    let percent = round_half_up((mean - 1.0) / 4.0 * 100.0).clamp(0, 100);

    ScoreCard {
        score: percent as u8,
        answered_count: count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::response::AnswerValue;

    fn answers(values: Vec<AnswerValue>) -> Vec<Answer> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| Answer::new(format!("q{}", i + 1), v))
            .collect()
    }

    #[test]
    fn empty_scores_zero() {
        assert_eq!(score(&[]), 0);
        assert_eq!(score_card(&[]).answered_count, 0);
    }

    #[test]
    fn strongly_agree_and_agree() {
        let a = answers(vec!["SS".into(), "S".into()]);
        assert_eq!(score(&a), 88);
    }

    #[test]
    fn numeric_extremes_average_to_half() {
        let a = answers(vec![1_i64.into(), 5_i64.into()]);
        assert_eq!(score(&a), 50);
    }

    #[test]
    fn invalid_answers_do_not_count() {
        let a = answers(vec![
            "ss".into(),
            "7".into(),
            "gibberish".into(),
            AnswerValue::Missing,
            0_i64.into(),
        ]);
        let card = score_card(&a);
        assert_eq!(card.answered_count, 1);
        assert_eq!(card.score, 100);
    }

    #[test]
    fn only_invalid_answers_score_zero() {
        let a = answers(vec!["7".into(), AnswerValue::Missing]);
        assert_eq!(score_card(&a), ScoreCard::default());
    }

    #[test]
    fn all_strongly_disagree_is_zero_percent() {
        let a = answers(vec!["STS".into(), "sangat tidak setuju".into()]);
        let card = score_card(&a);
        assert_eq!(card.score, 0);
        assert_eq!(card.answered_count, 2);
    }
}
