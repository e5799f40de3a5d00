//! Domain entities - core business objects

mod relationship;
mod training;
mod user;

pub use relationship::{RelationStatus, Relationship};
pub use training::Training;
pub use user::User;
