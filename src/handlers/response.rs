// src/handlers/response.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    evaluation::score_card,
    models::response::{ResponseFilter, SubmitResponseRequest},
    store::{MemberDirectory, NewResponse, QuestionnaireStore, ResponseStore},
};

/// Submits a member's questionnaire answers for one period.
///
/// * Rejects unknown members and questionnaires with 404.
/// * Records the member's current farmer group alongside the answers.
/// * Submissions are append-only; a resubmission is stored as a new record.
pub async fn submit_response(
    State(members): State<Arc<dyn MemberDirectory>>,
    State(questionnaires): State<Arc<dyn QuestionnaireStore>>,
    State(responses): State<Arc<dyn ResponseStore>>,
    Json(payload): Json<SubmitResponseRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let member = members
        .find_member(payload.user_id)
        .await?
        .ok_or(AppError::NotFound("Member not found".to_string()))?;

    if let Some(kuesioner_id) = payload.kuesioner_id {
        questionnaires
            .find_questionnaire(kuesioner_id)
            .await?
            .ok_or(AppError::NotFound("Questionnaire not found".to_string()))?;
    }

    let card = score_card(&payload.answers);

    let record = responses
        .insert_response(NewResponse {
            user_id: member.id,
            kelompok: member.kelompok,
            kuesioner_id: payload.kuesioner_id,
            bulan: payload.bulan,
            tahun: payload.tahun,
            answers: payload.answers,
        })
        .await?;

    tracing::info!(
        response_id = record.id,
        user_id = record.user_id,
        bulan = record.bulan,
        tahun = record.tahun,
        "Questionnaire response stored"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": record.id,
            "score": card.score,
            "answeredCount": card.answered_count,
            "totalQuestions": record.answers.len(),
        })),
    ))
}

/// Lists stored responses in submission order.
pub async fn list_responses(
    State(responses): State<Arc<dyn ResponseStore>>,
    Query(filter): Query<ResponseFilter>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(responses.list_responses(&filter).await?))
}
