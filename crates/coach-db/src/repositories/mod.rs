//! PostgreSQL repository implementations

mod error;
mod relationship;
mod training;
mod user;

pub use relationship::PgRelationshipRepository;
pub use training::PgTrainingRepository;
pub use user::PgUserRepository;
