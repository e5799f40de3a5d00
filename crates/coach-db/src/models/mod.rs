//! Database models - SQLx-compatible structs for PostgreSQL tables

mod relationship;
mod training;
mod user;

pub use relationship::RelationshipModel;
pub use training::{RunnerTrainingModel, TrainingModel};
pub use user::UserModel;
