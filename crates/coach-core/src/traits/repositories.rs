//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer states what it needs; `coach-db` provides the PostgreSQL
//! implementation and the service tests provide in-memory ones.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::entities::{Relationship, Training, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Limit/offset window for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
}

impl PageRequest {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.max(1),
            offset: offset.max(0),
        }
    }
}

/// A persisted training together with the runner it was scheduled for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerTraining {
    pub runner_id: Snowflake,
    pub coach_id: Snowflake,
    pub training: Training,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user with its password hash
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Delete the account; its relationships and their trainings go with it
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Relationship Repository
// ============================================================================

#[async_trait]
pub trait RelationshipRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Relationship>>;

    /// Find the relationship between a coach and a runner, in any status
    async fn find_by_pair(
        &self,
        coach_id: Snowflake,
        runner_id: Snowflake,
    ) -> RepoResult<Option<Relationship>>;

    /// Coach roster, excluding runner-initiated invitations, ordered by runner username
    async fn list_by_coach(
        &self,
        coach_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Vec<Relationship>>;

    /// Total size of the roster returned by `list_by_coach`
    async fn count_by_coach(&self, coach_id: Snowflake) -> RepoResult<i64>;

    /// All relationships in which the user is the runner
    async fn list_by_runner(&self, runner_id: Snowflake) -> RepoResult<Vec<Relationship>>;

    /// The runner's established relationship, if any
    async fn find_established_for_runner(
        &self,
        runner_id: Snowflake,
    ) -> RepoResult<Option<Relationship>>;

    /// Whether another relationship of this coach already uses `nickname`
    async fn nickname_taken(
        &self,
        coach_id: Snowflake,
        nickname: &str,
        except: Snowflake,
    ) -> RepoResult<bool>;

    async fn create(&self, relationship: &Relationship) -> RepoResult<()>;

    /// Persist status and nickname changes
    async fn update(&self, relationship: &Relationship) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Training Repository
// ============================================================================

#[async_trait]
pub trait TrainingRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Training>>;

    async fn find_by_relation_and_date(
        &self,
        relation_id: Snowflake,
        date: NaiveDate,
    ) -> RepoResult<Option<Training>>;

    /// Trainings of a relationship within the inclusive bounds, ordered by date
    async fn find_in_range(
        &self,
        relation_id: Snowflake,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> RepoResult<Vec<Training>>;

    /// Trainings on `date` for any of the runners, under any coach
    async fn find_for_runners_on_date(
        &self,
        runner_ids: &[Snowflake],
        date: NaiveDate,
    ) -> RepoResult<Vec<RunnerTraining>>;

    /// Insert a training; fails on a duplicate (relation, date)
    async fn create(&self, training: &Training) -> RepoResult<()>;

    /// Persist description, execution and visibility
    async fn update(&self, training: &Training) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}
