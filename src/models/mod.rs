// src/models/mod.rs

pub mod member;
pub mod questionnaire;
pub mod response;
