// src/models/questionnaire.rs

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use validator::Validate;

/// Represents the 'questionnaires' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    pub id: i64,

    pub judul: String,

    pub deskripsi: Option<String>,

    /// Ordered Likert items, stored as a JSON array in the database.
    pub questions: Json<Vec<QuestionItem>>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// A single Likert item of a questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionItem {
    pub id: String,
    pub text: String,
}

/// DTO for creating a questionnaire.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionnaireRequest {
    #[validate(length(min = 1, max = 200))]
    pub judul: String,
    #[validate(length(max = 2000))]
    pub deskripsi: Option<String>,
    #[validate(custom(function = validate_questions))]
    pub questions: Vec<QuestionItem>,
}

fn validate_questions(questions: &[QuestionItem]) -> Result<(), validator::ValidationError> {
    if questions.is_empty() {
        return Err(validator::ValidationError::new("questions_cannot_be_empty"));
    }
    let mut seen = std::collections::HashSet::new();
    for q in questions {
        if q.id.trim().is_empty() || q.text.len() > 1000 {
            return Err(validator::ValidationError::new("invalid_question"));
        }
        if !seen.insert(q.id.as_str()) {
            return Err(validator::ValidationError::new("duplicate_question_id"));
        }
    }
    Ok(())
}
