//! PostgreSQL implementation of TrainingRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use coach_core::entities::Training;
use coach_core::error::DomainError;
use coach_core::traits::{RepoResult, RunnerTraining, TrainingRepository};
use coach_core::value_objects::Snowflake;

use crate::models::{RunnerTrainingModel, TrainingModel};

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgTrainingRepository {
    pool: PgPool,
}

impl PgTrainingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrainingRepository for PgTrainingRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Training>> {
        let result = sqlx::query_as::<_, TrainingModel>(
            r"
            SELECT id, relationship_id, date, description, execution, visible_since
            FROM trainings
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Training::from))
    }

    #[instrument(skip(self))]
    async fn find_by_relation_and_date(
        &self,
        relation_id: Snowflake,
        date: NaiveDate,
    ) -> RepoResult<Option<Training>> {
        let result = sqlx::query_as::<_, TrainingModel>(
            r"
            SELECT id, relationship_id, date, description, execution, visible_since
            FROM trainings
            WHERE relationship_id = $1 AND date = $2
            ",
        )
        .bind(relation_id.into_inner())
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Training::from))
    }

    #[instrument(skip(self))]
    async fn find_in_range(
        &self,
        relation_id: Snowflake,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> RepoResult<Vec<Training>> {
        let results = sqlx::query_as::<_, TrainingModel>(
            r"
            SELECT id, relationship_id, date, description, execution, visible_since
            FROM trainings
            WHERE relationship_id = $1
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            ORDER BY date
            ",
        )
        .bind(relation_id.into_inner())
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Training::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_for_runners_on_date(
        &self,
        runner_ids: &[Snowflake],
        date: NaiveDate,
    ) -> RepoResult<Vec<RunnerTraining>> {
        if runner_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = runner_ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, RunnerTrainingModel>(
            r"
            SELECT r.runner_id, r.coach_id,
                   t.id, t.relationship_id, t.date, t.description, t.execution, t.visible_since
            FROM trainings t
            JOIN relationships r ON r.id = t.relationship_id
            WHERE r.runner_id = ANY($1) AND t.date = $2
            ORDER BY r.runner_id, t.id
            ",
        )
        .bind(ids)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(RunnerTraining::from).collect())
    }

    #[instrument(skip(self), fields(relation_id = %training.relation_id, date = %training.date))]
    async fn create(&self, training: &Training) -> RepoResult<()> {
        let id = training
            .id
            .ok_or_else(|| DomainError::InternalError("cannot insert a placeholder training".into()))?;

        sqlx::query(
            r"
            INSERT INTO trainings (id, relationship_id, date, description, execution, visible_since)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(id.into_inner())
        .bind(training.relation_id.into_inner())
        .bind(training.date)
        .bind(&training.description)
        .bind(&training.execution)
        .bind(training.visible_since)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::TrainingExists))?;

        Ok(())
    }

    #[instrument(skip(self), fields(training_id = ?training.id))]
    async fn update(&self, training: &Training) -> RepoResult<()> {
        let id = training.id.ok_or(DomainError::TrainingNotFound)?;

        let result = sqlx::query(
            r"
            UPDATE trainings
            SET description = $2, execution = $3, visible_since = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(&training.description)
        .bind(&training.execution)
        .bind(training.visible_since)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TrainingNotFound);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM trainings WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TrainingNotFound);
        }
        Ok(())
    }
}
