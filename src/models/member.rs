// src/models/member.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'members' table in the database.
/// The user directory that evaluation reads from.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,

    /// Display name.
    pub nama: String,

    /// Unique username.
    pub username: String,

    /// Member role, e.g. 'peternak' (farmer) or 'penyuluh' (extension officer).
    pub role: String,

    /// Farmer group the member belongs to, if any.
    pub kelompok: Option<String>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for registering a member in the directory.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 100, message = "Name length must be between 1 and 100 characters."))]
    pub nama: String,
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username length must be between 3 and 50 characters."
    ))]
    pub username: String,
    #[validate(length(min = 1, max = 20))]
    pub role: String,
    #[validate(length(max = 100))]
    pub kelompok: Option<String>,
}

/// Query parameters for listing members.
#[derive(Debug, Deserialize)]
pub struct MemberListParams {
    pub role: Option<String>,
}
