//! PostgreSQL implementation of RelationshipRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use coach_core::entities::{RelationStatus, Relationship};
use coach_core::error::DomainError;
use coach_core::traits::{PageRequest, RelationshipRepository, RepoResult};
use coach_core::value_objects::Snowflake;

use crate::models::RelationshipModel;

use super::error::{map_db_error, map_unique_violation};

fn nickname_or(other: DomainError) -> impl FnOnce(Option<&str>) -> DomainError {
    move |constraint| match constraint {
        Some("relationships_nickname_key") => DomainError::NicknameTaken,
        _ => other,
    }
}

fn into_entities(models: Vec<RelationshipModel>) -> RepoResult<Vec<Relationship>> {
    models.into_iter().map(Relationship::try_from).collect()
}

#[derive(Clone)]
pub struct PgRelationshipRepository {
    pool: PgPool,
}

impl PgRelationshipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RelationshipRepository for PgRelationshipRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Relationship>> {
        sqlx::query_as::<_, RelationshipModel>(
            r"
            SELECT id, coach_id, runner_id, status, nickname, created_at, updated_at
            FROM relationships
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(Relationship::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_pair(
        &self,
        coach_id: Snowflake,
        runner_id: Snowflake,
    ) -> RepoResult<Option<Relationship>> {
        sqlx::query_as::<_, RelationshipModel>(
            r"
            SELECT id, coach_id, runner_id, status, nickname, created_at, updated_at
            FROM relationships
            WHERE coach_id = $1 AND runner_id = $2
            ",
        )
        .bind(coach_id.into_inner())
        .bind(runner_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(Relationship::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn list_by_coach(
        &self,
        coach_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Vec<Relationship>> {
        let models = sqlx::query_as::<_, RelationshipModel>(
            r"
            SELECT r.id, r.coach_id, r.runner_id, r.status, r.nickname, r.created_at, r.updated_at
            FROM relationships r
            JOIN users u ON u.id = r.runner_id
            WHERE r.coach_id = $1 AND r.status <> $2
            ORDER BY u.username
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(coach_id.into_inner())
        .bind(RelationStatus::InvitedByRunner.as_str())
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_entities(models)
    }

    #[instrument(skip(self))]
    async fn count_by_coach(&self, coach_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM relationships WHERE coach_id = $1 AND status <> $2",
        )
        .bind(coach_id.into_inner())
        .bind(RelationStatus::InvitedByRunner.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list_by_runner(&self, runner_id: Snowflake) -> RepoResult<Vec<Relationship>> {
        let models = sqlx::query_as::<_, RelationshipModel>(
            r"
            SELECT id, coach_id, runner_id, status, nickname, created_at, updated_at
            FROM relationships
            WHERE runner_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(runner_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_entities(models)
    }

    #[instrument(skip(self))]
    async fn find_established_for_runner(
        &self,
        runner_id: Snowflake,
    ) -> RepoResult<Option<Relationship>> {
        sqlx::query_as::<_, RelationshipModel>(
            r"
            SELECT id, coach_id, runner_id, status, nickname, created_at, updated_at
            FROM relationships
            WHERE runner_id = $1 AND status = $2
            ORDER BY updated_at DESC
            LIMIT 1
            ",
        )
        .bind(runner_id.into_inner())
        .bind(RelationStatus::Established.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .map(Relationship::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn nickname_taken(
        &self,
        coach_id: Snowflake,
        nickname: &str,
        except: Snowflake,
    ) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM relationships
                WHERE coach_id = $1 AND nickname = $2 AND id <> $3
            )
            ",
        )
        .bind(coach_id.into_inner())
        .bind(nickname)
        .bind(except.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self), fields(relationship_id = %relationship.id))]
    async fn create(&self, relationship: &Relationship) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO relationships (id, coach_id, runner_id, status, nickname, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(relationship.id.into_inner())
        .bind(relationship.coach_id.into_inner())
        .bind(relationship.runner_id.into_inner())
        .bind(relationship.status.as_str())
        .bind(&relationship.nickname)
        .bind(relationship.created_at)
        .bind(relationship.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, nickname_or(DomainError::RelationshipExists)))?;

        Ok(())
    }

    #[instrument(skip(self), fields(relationship_id = %relationship.id))]
    async fn update(&self, relationship: &Relationship) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE relationships
            SET status = $2, nickname = $3, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(relationship.id.into_inner())
        .bind(relationship.status.as_str())
        .bind(&relationship.nickname)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, nickname_or(DomainError::RelationshipExists)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RelationshipNotFound);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM relationships WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RelationshipNotFound);
        }
        Ok(())
    }
}
