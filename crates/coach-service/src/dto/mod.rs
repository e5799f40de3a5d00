//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateTrainingRequest, DayTrainingRequest, ExecutionRequest, InviteRunnerRequest,
    LoginRequest, RefreshTokenRequest, RegisterRequest, TrainingRangeQuery,
    UpdateNicknameRequest, UpdateTrainingRequest, UpsertTrainingsRequest, WeekQuery,
};

pub use responses::{
    AuthResponse, ConflictResponse, CurrentUserResponse, HealthResponse, PaginatedResponse,
    PaginationMeta, ReadinessResponse, RelationshipResponse, TrainingResponse, UpsertResponse,
    UserResponse, WeekResponse,
};

pub use mappers::RelationshipWithUsers;
