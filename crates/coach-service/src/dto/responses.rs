//! Response DTOs for API endpoints
//!
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, NaiveDate, Utc};
use coach_core::{Capabilities, RelationStatus};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Offset-paginated list
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, limit: i64, offset: i64, total: i64) -> Self {
        let has_more = offset + (data.len() as i64) < total;
        Self {
            data,
            pagination: PaginationMeta {
                limit,
                offset,
                total,
                has_more,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
    pub has_more: bool,
}

// ============================================================================
// Auth & User Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

/// Profile of the authenticated user
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub capabilities: Capabilities,
    /// Whether the user has an established coach
    pub has_coach: bool,
    pub created_at: DateTime<Utc>,
}

/// Public view of another user
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}

// ============================================================================
// Relationship Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RelationshipResponse {
    pub id: String,
    pub coach: UserResponse,
    pub runner: UserResponse,
    pub status: RelationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Nickname if set, otherwise the runner's username
    pub displayed_name: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Training Responses
// ============================================================================

/// A persisted training, or a placeholder (`id` null) for an empty day
#[derive(Debug, Clone, Serialize)]
pub struct TrainingResponse {
    pub id: Option<String>,
    pub relation_id: String,
    pub date: NaiveDate,
    pub description: String,
    pub execution: Option<String>,
    pub visible_since: Option<NaiveDate>,
}

/// Seven days, Monday first, with navigation anchors
#[derive(Debug, Clone, Serialize)]
pub struct WeekResponse {
    pub relation_id: String,
    pub monday: NaiveDate,
    pub sunday: NaiveDate,
    pub previous_week: NaiveDate,
    pub next_week: NaiveDate,
    pub days: Vec<TrainingResponse>,
}

/// An existing training that a broadcast would overwrite
#[derive(Debug, Clone, Serialize)]
pub struct ConflictResponse {
    pub runner: String,
    pub date: NaiveDate,
    /// False when the training belongs to another coach of the runner
    pub own: bool,
    /// Only disclosed for the requesting coach's own trainings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Outcome of a broadcast
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpsertResponse {
    Applied { trainings: Vec<TrainingResponse> },
    ConfirmationRequired { conflicts: Vec<ConflictResponse> },
}

impl UpsertResponse {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

// ============================================================================
// Health Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
