//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those with free-form input also
//! implement `Validate`. Dates are `YYYY-MM-DD`.

use chrono::NaiveDate;
use coach_core::schedule::parse_date;
use coach_core::{DomainError, Role};
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

/// Tells an absent field (`None`) apart from an explicit `null` (`Some(None)`)
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Usernames are 3-32 characters of letters, digits, `_`, `.` and `-`
fn validate_username(username: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-');
    if username.chars().all(allowed) {
        Ok(())
    } else {
        Err(ValidationError::new("username_charset")
            .with_message("Username may only contain letters, digits, '_', '.' and '-'".into()))
    }
}

// ============================================================================
// Auth Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 32, message = "Username must be 3-32 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    /// Capability granted at registration
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// ============================================================================
// Roster Requests
// ============================================================================

/// Coach invites a runner by username
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InviteRunnerRequest {
    #[validate(length(min = 1, max = 32, message = "Runner username must be 1-32 characters"))]
    pub runner: String,
}

/// Set or clear the coach's nickname for a runner. `null` or `""` clears it.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateNicknameRequest {
    #[validate(length(max = 32, message = "Nickname must be at most 32 characters"))]
    pub nickname: Option<String>,
}

// ============================================================================
// Training Requests
// ============================================================================

/// Assign one description to several runners on one date
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertTrainingsRequest {
    /// Runner usernames
    #[validate(length(min = 1, message = "At least one runner is required"))]
    pub runners: Vec<String>,

    pub date: NaiveDate,

    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: String,

    /// Applied to trainings this request creates
    pub visible_since: Option<NaiveDate>,

    /// Overwrite existing trainings without asking
    #[serde(default)]
    pub force: bool,
}

/// Create or overwrite the training of a relationship on one date
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTrainingRequest {
    pub date: NaiveDate,

    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: String,

    pub visible_since: Option<NaiveDate>,
}

/// Coach edits a single day; the date comes from the path
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DayTrainingRequest {
    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: String,

    pub visible_since: Option<NaiveDate>,
}

/// Partial update of a training by the coach. The execution report is not writable here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTrainingRequest {
    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: Option<String>,

    /// `null` clears the visibility date; an absent field keeps it
    #[serde(default, deserialize_with = "nullable")]
    pub visible_since: Option<Option<NaiveDate>>,
}

/// Runner reports how a training went. `null` or blank clears the report.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExecutionRequest {
    #[validate(length(max = 10000, message = "Execution must be at most 10000 characters"))]
    pub execution: Option<String>,
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Anchor of a week view. Anything that does not parse means "this week".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeekQuery {
    pub date: Option<String>,
}

/// Inclusive date filters on a relationship's trainings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainingRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl TrainingRangeQuery {
    /// Parse both bounds; a malformed one is rejected rather than ignored
    pub fn bounds(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>), DomainError> {
        fn bound(raw: Option<&String>) -> Result<Option<NaiveDate>, DomainError> {
            match raw.map(|s| s.trim()).filter(|s| !s.is_empty()) {
                None => Ok(None),
                Some(s) => parse_date(s)
                    .map(Some)
                    .ok_or_else(|| DomainError::InvalidDate(s.to_string())),
            }
        }
        Ok((bound(self.start_date.as_ref())?, bound(self.end_date.as_ref())?))
    }
}
