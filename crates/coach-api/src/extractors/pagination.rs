//! Pagination extractor
//!
//! Offset pagination for the coach roster. Defaults and the upper bound come
//! from the `ROSTER_*` configuration.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Query},
    http::request::Parts,
};
use coach_common::RosterConfig;
use coach_core::PageRequest;
use serde::Deserialize;

use crate::response::ApiError;
use crate::state::AppState;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Validated pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Clamped to `1..=max_page_size`
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub fn from_params(params: &PaginationParams, config: &RosterConfig) -> Result<Self, ApiError> {
        let offset = params.offset.unwrap_or(0);
        if offset < 0 {
            return Err(ApiError::invalid_query("'offset' must not be negative"));
        }

        let limit = params
            .limit
            .unwrap_or(config.page_size)
            .clamp(1, config.max_page_size);

        Ok(Self { limit, offset })
    }
}

impl From<Pagination> for PageRequest {
    fn from(pagination: Pagination) -> Self {
        PageRequest::new(pagination.limit, pagination.offset)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        let app_state = AppState::from_ref(state);
        Pagination::from_params(&params, &app_state.config().roster)
    }
}
