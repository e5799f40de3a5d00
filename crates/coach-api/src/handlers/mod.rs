//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod health;
pub mod invites;
pub mod roster;
pub mod schedule;
pub mod trainings;
pub mod users;
