//! Business logic services
//!
//! Each service borrows the shared `ServiceContext` for the length of one request.

pub mod access;
pub mod auth;
pub mod context;
pub mod error;
pub mod invitation;
pub mod roster;
pub mod schedule;
pub mod training;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use access::AccessService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use invitation::InvitationService;
pub use roster::RosterService;
pub use schedule::ScheduleService;
pub use training::TrainingService;
pub use user::UserService;
