// src/handlers/evaluation.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    config::Config,
    error::AppError,
    evaluation::{DuplicatePolicy, aggregate},
    models::response::ResponseFilter,
    store::{MemberDirectory, ResponseStore},
};

/// Query parameters for group evaluation.
#[derive(Debug, Default, Deserialize)]
pub struct EvaluationParams {
    pub bulan: Option<i32>,
    pub tahun: Option<i32>,
    pub kuesioner_id: Option<i64>,
    /// Overrides the configured duplicate policy ('first' or 'latest').
    pub policy: Option<DuplicatePolicy>,
}

/// Computes per-group questionnaire results.
///
/// Evaluates every member holding the configured role against the responses
/// matching the period and questionnaire filters. Nothing is cached; each
/// call recomputes from the stores.
pub async fn group_results(
    State(config): State<Config>,
    State(members): State<Arc<dyn MemberDirectory>>,
    State(responses): State<Arc<dyn ResponseStore>>,
    Query(params): Query<EvaluationParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = ResponseFilter {
        bulan: params.bulan,
        tahun: params.tahun,
        kuesioner_id: params.kuesioner_id,
    };
    let policy = params.policy.unwrap_or(config.duplicate_policy);

    let population = members
        .list_members(Some(config.evaluation_role.as_str()))
        .await?;
    let records = responses.list_responses(&filter).await?;

    let summaries = aggregate(&population, &records, policy);

    tracing::debug!(
        groups = summaries.len(),
        members = population.len(),
        responses = records.len(),
        ?policy,
        "Evaluation computed"
    );

    Ok(Json(summaries))
}
