//! Authentication extractors
//!
//! `AuthUser` only validates the bearer token. `CoachUser` and `RunnerUser`
//! additionally load the account and require the matching capability.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use coach_core::{Snowflake, User};
use coach_service::AccessService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from JWT token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Snowflake,
}

impl AuthUser {
    pub fn new(user_id: Snowflake) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let claims = app_state
            .jwt_service()
            .validate_access_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::App(e)
            })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid user ID in token");
            ApiError::InvalidAuth
        })?;

        Ok(AuthUser::new(user_id))
    }
}

/// Authenticated user holding the coach capability
#[derive(Debug, Clone)]
pub struct CoachUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CoachUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        let app_state = AppState::from_ref(state);
        let access = AccessService::new(app_state.service_context());

        let user = access.current_user(auth.user_id).await?;
        access.require_coach(&user)?;
        Ok(CoachUser(user))
    }
}

/// Authenticated user holding the runner capability
#[derive(Debug, Clone)]
pub struct RunnerUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for RunnerUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        let app_state = AppState::from_ref(state);
        let access = AccessService::new(app_state.service_context());

        let user = access.current_user(auth.user_id).await?;
        access.require_runner(&user)?;
        Ok(RunnerUser(user))
    }
}
