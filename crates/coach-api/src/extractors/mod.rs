//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, pagination and path parameters.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{AuthUser, CoachUser, RunnerUser};
pub use pagination::{Pagination, PaginationParams};
pub use path::{
    ApiPath, CoachPath, DatePath, RelationIdPath, RunnerDatePath, RunnerPath, TrainingIdPath,
};
pub use validated::ValidatedJson;
