//! Relationship database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct RelationshipModel {
    pub id: i64,
    pub coach_id: i64,
    pub runner_id: i64,
    pub status: String,
    pub nickname: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
