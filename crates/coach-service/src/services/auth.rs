//! Authentication service
//!
//! Handles user registration, login and token refresh. Tokens are stateless:
//! a refresh token stays valid until it expires or its account is deleted.

use coach_common::{hash_password, validate_password_strength, verify_password, AppError, TokenPair};
use coach_core::{DomainError, User};
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, CurrentUserResponse, LoginRequest, RefreshTokenRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user holding the requested role
    #[instrument(skip(self, request), fields(username = %request.username, role = %request.role))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password)?;

        if self.ctx.user_repo().username_exists(&request.username).await? {
            return Err(DomainError::UsernameTaken.into());
        }
        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailTaken.into());
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(
            self.ctx.generate_id(),
            request.username,
            request.email,
            request.role,
        );
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");

        self.issue(&user, false)
    }

    /// Login with username and password
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown username");
                AppError::InvalidCredentials
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        info!(user_id = %user.id, "User logged in");

        let has_coach = self.has_coach(&user).await?;
        self.issue(&user, has_coach)
    }

    /// Exchange a refresh token for a new token pair
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(claims.user_id()?)
            .await?
            .ok_or(AppError::InvalidToken)?;

        let has_coach = self.has_coach(&user).await?;
        self.issue(&user, has_coach)
    }

    async fn has_coach(&self, user: &User) -> ServiceResult<bool> {
        Ok(self
            .ctx
            .relationship_repo()
            .find_established_for_runner(user.id)
            .await?
            .is_some())
    }

    fn issue(&self, user: &User, has_coach: bool) -> ServiceResult<AuthResponse> {
        let TokenPair {
            access_token,
            refresh_token,
            token_type,
            expires_in,
        } = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id, &user.username)?;

        Ok(AuthResponse {
            access_token,
            refresh_token,
            token_type,
            expires_in,
            user: CurrentUserResponse::new(user, has_coach),
        })
    }
}
