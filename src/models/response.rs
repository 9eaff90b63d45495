// src/models/response.rs

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use validator::Validate;

/// A raw questionnaire answer as it arrives from the client or the database.
///
/// Stored JSON is loosely typed: a number, a Likert phrase, an abbreviation,
/// or nothing at all. The variants keep that distinction so normalization can
/// branch on the shape instead of guessing at runtime. Any other JSON shape is
/// kept verbatim in `Other` so one odd answer never rejects a whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum AnswerValue {
    Numeric(f64),
    Text(String),
    #[default]
    Missing,
    Other(serde_json::Value),
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Numeric(value)
    }
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        AnswerValue::Numeric(value as f64)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

/// Response to a single questionnaire item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    #[serde(default)]
    pub question_id: String,
    #[serde(default)]
    pub answer: AnswerValue,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, answer: impl Into<AnswerValue>) -> Self {
        Self {
            question_id: question_id.into(),
            answer: answer.into(),
        }
    }
}

/// Represents the 'responses' table in the database.
/// One submission per respondent per period; rows are never updated.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondentRecord {
    pub id: i64,
    pub user_id: i64,

    /// Group of the member at submission time.
    pub kelompok: Option<String>,

    pub kuesioner_id: Option<i64>,
    pub bulan: i32,
    pub tahun: i32,

    /// Stored as a JSON array in the database.
    pub answers: Json<Vec<Answer>>,

    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for submitting a questionnaire.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseRequest {
    pub user_id: i64,
    pub kuesioner_id: Option<i64>,
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12."))]
    pub bulan: i32,
    #[validate(range(min = 2000, max = 2100, message = "Year must be between 2000 and 2100."))]
    pub tahun: i32,
    #[validate(length(min = 1, max = 500, message = "At least one answer is required."))]
    pub answers: Vec<Answer>,
}

/// Upstream filter applied by the response store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseFilter {
    pub bulan: Option<i32>,
    pub tahun: Option<i32>,
    pub kuesioner_id: Option<i64>,
}

impl ResponseFilter {
    pub fn matches(&self, record: &RespondentRecord) -> bool {
        self.bulan.is_none_or(|b| record.bulan == b)
            && self.tahun.is_none_or(|t| record.tahun == t)
            && self
                .kuesioner_id
                .is_none_or(|k| record.kuesioner_id == Some(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_values_deserialize_by_shape() {
        let answers: Vec<Answer> = serde_json::from_value(serde_json::json!([
            {"questionId": "q1", "answer": 4},
            {"questionId": "q2", "answer": "Sangat Setuju"},
            {"questionId": "q3", "answer": null},
            {"questionId": "q4"}
        ]))
        .unwrap();

        assert_eq!(answers[0].answer, AnswerValue::Numeric(4.0));
        assert_eq!(answers[1].answer, AnswerValue::Text("Sangat Setuju".to_string()));
        assert_eq!(answers[2].answer, AnswerValue::Missing);
        assert_eq!(answers[3].answer, AnswerValue::Missing);
    }

    #[test]
    fn unexpected_answer_shapes_are_kept_not_rejected() {
        let raw = serde_json::json!([
            {"questionId": "q1", "answer": "SS"},
            {"questionId": "q2", "answer": "S"},
            {"questionId": "q3", "answer": true},
            {"questionId": "q4", "answer": {"v": 5}},
            {"answer": [1, 2]}
        ]);
        let answers: Vec<Answer> = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(answers.len(), 5);
        assert_eq!(answers[2].answer, AnswerValue::Other(serde_json::json!(true)));
        assert_eq!(answers[3].answer, AnswerValue::Other(serde_json::json!({"v": 5})));
        assert_eq!(answers[4].question_id, "");

        let back = serde_json::to_value(&answers).unwrap();
        assert_eq!(back[2]["answer"], true);
        assert_eq!(back[3]["answer"], raw[3]["answer"]);
    }

    #[test]
    fn filter_matches_only_given_fields() {
        let record = RespondentRecord {
            id: 1,
            user_id: 7,
            kelompok: None,
            kuesioner_id: Some(3),
            bulan: 5,
            tahun: 2024,
            answers: Json(vec![]),
            submitted_at: None,
        };

        assert!(ResponseFilter::default().matches(&record));
        assert!(ResponseFilter { bulan: Some(5), tahun: Some(2024), kuesioner_id: Some(3) }.matches(&record));
        assert!(!ResponseFilter { bulan: Some(6), ..Default::default() }.matches(&record));
        assert!(!ResponseFilter { kuesioner_id: Some(4), ..Default::default() }.matches(&record));
    }
}
