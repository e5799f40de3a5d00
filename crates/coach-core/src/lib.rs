//! # coach-core
//!
//! Domain layer for the coaching schedule: users with capability sets, coach/runner
//! relationships, trainings, the weekly schedule materializer and the access policy.
//! This crate has no dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod policy;
pub mod schedule;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{RelationStatus, Relationship, Training, User};
pub use error::DomainError;
pub use policy::Resource;
pub use schedule::{materialize_week, resolve_reference_date, today, Week, WeekWindow};
pub use traits::{
    PageRequest, RelationshipRepository, RepoResult, RunnerTraining, TrainingRepository,
    UserRepository,
};
pub use value_objects::{Capabilities, Role, Snowflake, SnowflakeGenerator, SnowflakeParseError};
