// src/handlers/mod.rs

pub mod evaluation;
pub mod member;
pub mod questionnaire;
pub mod response;
