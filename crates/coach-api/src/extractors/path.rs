//! Path parameter extractors
//!
//! Runners and coaches are addressed by username, relationships and trainings
//! by Snowflake id, days by ISO date.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use chrono::NaiveDate;
use coach_core::Snowflake;
use serde::{de::DeserializeOwned, Deserialize};

use crate::response::ApiError;

/// `Path` whose rejection is an `ApiError`
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(ApiPath(inner))
    }
}

fn parse_date(name: &str, value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format, expected YYYY-MM-DD")))
}

fn parse_id(name: &str, value: &str) -> Result<Snowflake, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// Path parameters with runner
#[derive(Debug, Deserialize)]
pub struct RunnerPath {
    pub runner: String,
}

/// Path parameters with runner and date
#[derive(Debug, Deserialize)]
pub struct RunnerDatePath {
    pub runner: String,
    pub date: String,
}

impl RunnerDatePath {
    pub fn date(&self) -> Result<NaiveDate, ApiError> {
        parse_date("date", &self.date)
    }
}

/// Path parameters with date
#[derive(Debug, Deserialize)]
pub struct DatePath {
    pub date: String,
}

impl DatePath {
    pub fn date(&self) -> Result<NaiveDate, ApiError> {
        parse_date("date", &self.date)
    }
}

/// Path parameters with coach
#[derive(Debug, Deserialize)]
pub struct CoachPath {
    pub coach: String,
}

/// Path parameters with relation_id
#[derive(Debug, Deserialize)]
pub struct RelationIdPath {
    pub relation_id: String,
}

impl RelationIdPath {
    pub fn relation_id(&self) -> Result<Snowflake, ApiError> {
        parse_id("relation_id", &self.relation_id)
    }
}

/// Path parameters with training_id
#[derive(Debug, Deserialize)]
pub struct TrainingIdPath {
    pub training_id: String,
}

impl TrainingIdPath {
    pub fn training_id(&self) -> Result<Snowflake, ApiError> {
        parse_id("training_id", &self.training_id)
    }
}
