//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Capability bits, see `coach_core::Capabilities`
    pub capabilities: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
