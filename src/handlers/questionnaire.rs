// src/handlers/questionnaire.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError, models::questionnaire::CreateQuestionnaireRequest, store::QuestionnaireStore,
};

pub async fn create_questionnaire(
    State(store): State<Arc<dyn QuestionnaireStore>>,
    Json(payload): Json<CreateQuestionnaireRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let questionnaire = store.create_questionnaire(payload).await?;
    Ok((StatusCode::CREATED, Json(questionnaire)))
}

/// Lists questionnaires, newest first.
pub async fn list_questionnaires(
    State(store): State<Arc<dyn QuestionnaireStore>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.list_questionnaires().await?))
}

pub async fn get_questionnaire(
    State(store): State<Arc<dyn QuestionnaireStore>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let questionnaire = store
        .find_questionnaire(id)
        .await?
        .ok_or(AppError::NotFound("Questionnaire not found".to_string()))?;

    Ok(Json(questionnaire))
}
