// src/handlers/member.rs

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
    models::member::{CreateMemberRequest, MemberListParams},
    store::MemberDirectory,
};

/// Registers a member in the user directory.
/// Returns 201 Created with the stored member, 409 if the username is taken.
pub async fn create_member(
    State(members): State<Arc<dyn MemberDirectory>>,
    Json(mut payload): Json<CreateMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    payload.kelompok = payload
        .kelompok
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    let member = members.create_member(payload).await?;
    tracing::info!(member_id = member.id, "Member registered");

    Ok((StatusCode::CREATED, Json(member)))
}

/// Lists members, optionally filtered by role.
pub async fn list_members(
    State(members): State<Arc<dyn MemberDirectory>>,
    Query(params): Query<MemberListParams>,
) -> Result<impl IntoResponse, AppError> {
    let list = members.list_members(params.role.as_deref()).await?;
    Ok(Json(list))
}
