// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, types::Json};

use super::{MemberDirectory, NewResponse, QuestionnaireStore, ResponseStore};
use crate::{
    error::AppError,
    models::{
        member::{CreateMemberRequest, Member},
        questionnaire::{CreateQuestionnaireRequest, Questionnaire},
        response::{RespondentRecord, ResponseFilter},
    },
};

/// Postgres-backed implementation of every store trait.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl MemberDirectory for PgStore {
    async fn list_members(&self, role: Option<&str>) -> Result<Vec<Member>, AppError> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, nama, username, role, kelompok, created_at
            FROM members
            WHERE ($1::TEXT IS NULL OR role = $1)
            ORDER BY id ASC
            "#,
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list members: {:?}", e);
            AppError::from(e)
        })?;

        Ok(members)
    }

    async fn find_member(&self, id: i64) -> Result<Option<Member>, AppError> {
        let member = sqlx::query_as::<_, Member>(
            "SELECT id, nama, username, role, kelompok, created_at FROM members WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    async fn create_member(&self, req: CreateMemberRequest) -> Result<Member, AppError> {
        sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (nama, username, role, kelompok)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nama, username, role, kelompok, created_at
            "#,
        )
        .bind(&req.nama)
        .bind(&req.username)
        .bind(&req.role)
        .bind(&req.kelompok)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(format!("Username '{}' already exists", req.username))
            } else {
                tracing::error!("Failed to create member: {:?}", e);
                AppError::from(e)
            }
        })
    }
}

#[async_trait]
impl QuestionnaireStore for PgStore {
    async fn list_questionnaires(&self) -> Result<Vec<Questionnaire>, AppError> {
        let questionnaires = sqlx::query_as::<_, Questionnaire>(
            r#"
            SELECT id, judul, deskripsi, questions, created_at
            FROM questionnaires
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list questionnaires: {:?}", e);
            AppError::from(e)
        })?;

        Ok(questionnaires)
    }

    async fn find_questionnaire(&self, id: i64) -> Result<Option<Questionnaire>, AppError> {
        let questionnaire = sqlx::query_as::<_, Questionnaire>(
            "SELECT id, judul, deskripsi, questions, created_at FROM questionnaires WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(questionnaire)
    }

    async fn create_questionnaire(
        &self,
        req: CreateQuestionnaireRequest,
    ) -> Result<Questionnaire, AppError> {
        sqlx::query_as::<_, Questionnaire>(
            r#"
            INSERT INTO questionnaires (judul, deskripsi, questions)
            VALUES ($1, $2, $3)
            RETURNING id, judul, deskripsi, questions, created_at
            "#,
        )
        .bind(req.judul)
        .bind(req.deskripsi)
        .bind(Json(req.questions))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create questionnaire: {:?}", e);
            AppError::from(e)
        })
    }
}

#[async_trait]
impl ResponseStore for PgStore {
    async fn list_responses(
        &self,
        filter: &ResponseFilter,
    ) -> Result<Vec<RespondentRecord>, AppError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, user_id, kelompok, kuesioner_id, bulan, tahun, answers, submitted_at \
             FROM responses WHERE TRUE",
        );

        if let Some(bulan) = filter.bulan {
            builder.push(" AND bulan = ");
            builder.push_bind(bulan);
        }

        if let Some(tahun) = filter.tahun {
            builder.push(" AND tahun = ");
            builder.push_bind(tahun);
        }

        if let Some(kuesioner_id) = filter.kuesioner_id {
            builder.push(" AND kuesioner_id = ");
            builder.push_bind(kuesioner_id);
        }

        builder.push(" ORDER BY id ASC");

        let records = builder
            .build_query_as::<RespondentRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list responses: {:?}", e);
                AppError::from(e)
            })?;

        Ok(records)
    }

    async fn insert_response(&self, new: NewResponse) -> Result<RespondentRecord, AppError> {
        sqlx::query_as::<_, RespondentRecord>(
            r#"
            INSERT INTO responses (user_id, kelompok, kuesioner_id, bulan, tahun, answers)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, kelompok, kuesioner_id, bulan, tahun, answers, submitted_at
            "#,
        )
        .bind(new.user_id)
        .bind(new.kelompok)
        .bind(new.kuesioner_id)
        .bind(new.bulan)
        .bind(new.tahun)
        .bind(Json(new.answers))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert response: {:?}", e);
            AppError::from(e)
        })
    }
}
