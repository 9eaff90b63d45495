// src/store/mod.rs

//! Persistence collaborators used by the evaluation service.
//!
//! Handlers depend on these traits only, so the same routes run against
//! Postgres in production and against [`memory::MemoryStore`] in tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        member::{CreateMemberRequest, Member},
        questionnaire::{CreateQuestionnaireRequest, Questionnaire},
        response::{Answer, RespondentRecord, ResponseFilter},
    },
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// User directory.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Members ordered by id, optionally restricted to one role.
    async fn list_members(&self, role: Option<&str>) -> Result<Vec<Member>, AppError>;

    async fn find_member(&self, id: i64) -> Result<Option<Member>, AppError>;

    /// Fails with `AppError::Conflict` when the username is taken.
    async fn create_member(&self, req: CreateMemberRequest) -> Result<Member, AppError>;
}

#[async_trait]
pub trait QuestionnaireStore: Send + Sync {
    async fn list_questionnaires(&self) -> Result<Vec<Questionnaire>, AppError>;

    async fn find_questionnaire(&self, id: i64) -> Result<Option<Questionnaire>, AppError>;

    async fn create_questionnaire(
        &self,
        req: CreateQuestionnaireRequest,
    ) -> Result<Questionnaire, AppError>;
}

/// Append-only store of questionnaire submissions.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Matching records in submission order (ascending id).
    async fn list_responses(&self, filter: &ResponseFilter)
    -> Result<Vec<RespondentRecord>, AppError>;

    async fn insert_response(&self, new: NewResponse) -> Result<RespondentRecord, AppError>;
}

/// A validated submission ready to be stored.
#[derive(Debug, Clone)]
pub struct NewResponse {
    pub user_id: i64,
    pub kelompok: Option<String>,
    pub kuesioner_id: Option<i64>,
    pub bulan: i32,
    pub tahun: i32,
    pub answers: Vec<Answer>,
}
