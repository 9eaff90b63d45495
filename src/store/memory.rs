// src/store/memory.rs

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use tokio::sync::RwLock;

use super::{MemberDirectory, NewResponse, QuestionnaireStore, ResponseStore};
use crate::{
    error::AppError,
    models::{
        member::{CreateMemberRequest, Member},
        questionnaire::{CreateQuestionnaireRequest, Questionnaire},
        response::{RespondentRecord, ResponseFilter},
    },
};

#[derive(Default)]
struct Tables {
    members: Vec<Member>,
    questionnaires: Vec<Questionnaire>,
    responses: Vec<RespondentRecord>,
    next_id: i64,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process store with the same ordering guarantees as [`super::PgStore`].
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberDirectory for MemoryStore {
    async fn list_members(&self, role: Option<&str>) -> Result<Vec<Member>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .members
            .iter()
            .filter(|m| role.is_none_or(|r| m.role == r))
            .cloned()
            .collect())
    }

    async fn find_member(&self, id: i64) -> Result<Option<Member>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.members.iter().find(|m| m.id == id).cloned())
    }

    async fn create_member(&self, req: CreateMemberRequest) -> Result<Member, AppError> {
        let mut tables = self.tables.write().await;
        if tables.members.iter().any(|m| m.username == req.username) {
            return Err(AppError::Conflict(format!(
                "Username '{}' already exists",
                req.username
            )));
        }

        let member = Member {
            id: tables.allocate_id(),
            nama: req.nama,
            username: req.username,
            role: req.role,
            kelompok: req.kelompok,
            created_at: Some(Utc::now()),
        };
        tables.members.push(member.clone());
        Ok(member)
    }
}

#[async_trait]
impl QuestionnaireStore for MemoryStore {
    async fn list_questionnaires(&self) -> Result<Vec<Questionnaire>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.questionnaires.iter().rev().cloned().collect())
    }

    async fn find_questionnaire(&self, id: i64) -> Result<Option<Questionnaire>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.questionnaires.iter().find(|q| q.id == id).cloned())
    }

    async fn create_questionnaire(
        &self,
        req: CreateQuestionnaireRequest,
    ) -> Result<Questionnaire, AppError> {
        let mut tables = self.tables.write().await;
        let questionnaire = Questionnaire {
            id: tables.allocate_id(),
            judul: req.judul,
            deskripsi: req.deskripsi,
            questions: Json(req.questions),
            created_at: Some(Utc::now()),
        };
        tables.questionnaires.push(questionnaire.clone());
        Ok(questionnaire)
    }
}

#[async_trait]
impl ResponseStore for MemoryStore {
    async fn list_responses(
        &self,
        filter: &ResponseFilter,
    ) -> Result<Vec<RespondentRecord>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .responses
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn insert_response(&self, new: NewResponse) -> Result<RespondentRecord, AppError> {
        let mut tables = self.tables.write().await;
        let record = RespondentRecord {
            id: tables.allocate_id(),
            user_id: new.user_id,
            kelompok: new.kelompok,
            kuesioner_id: new.kuesioner_id,
            bulan: new.bulan,
            tahun: new.tahun,
            answers: Json(new.answers),
            submitted_at: Some(Utc::now()),
        };
        tables.responses.push(record.clone());
        Ok(record)
    }
}
