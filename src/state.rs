// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::{
    config::Config,
    store::{MemberDirectory, MemoryStore, PgStore, QuestionnaireStore, ResponseStore},
};

#[derive(Clone)]
pub struct AppState {
    pub members: Arc<dyn MemberDirectory>,
    pub questionnaires: Arc<dyn QuestionnaireStore>,
    pub responses: Arc<dyn ResponseStore>,
    pub config: Config,
}

impl AppState {
    pub fn postgres(pool: PgPool, config: Config) -> Self {
        Self::from_store(Arc::new(PgStore::new(pool)), config)
    }

    pub fn in_memory(config: Config) -> Self {
        Self::from_store(Arc::new(MemoryStore::new()), config)
    }

    fn from_store<S>(store: Arc<S>, config: Config) -> Self
    where
        S: MemberDirectory + QuestionnaireStore + ResponseStore + 'static,
    {
        Self {
            members: store.clone(),
            questionnaires: store.clone(),
            responses: store,
            config,
        }
    }
}

impl FromRef<AppState> for Arc<dyn MemberDirectory> {
    fn from_ref(state: &AppState) -> Self {
        state.members.clone()
    }
}

impl FromRef<AppState> for Arc<dyn QuestionnaireStore> {
    fn from_ref(state: &AppState) -> Self {
        state.questionnaires.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ResponseStore> {
    fn from_ref(state: &AppState) -> Self {
        state.responses.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
