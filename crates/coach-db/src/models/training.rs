//! Training database models

use chrono::NaiveDate;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct TrainingModel {
    pub id: i64,
    pub relationship_id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub execution: Option<String>,
    pub visible_since: Option<NaiveDate>,
}

/// Training row joined with its relationship's participants
#[derive(Debug, Clone, FromRow)]
pub struct RunnerTrainingModel {
    pub runner_id: i64,
    pub coach_id: i64,
    #[sqlx(flatten)]
    pub training: TrainingModel,
}
