//! # coach-service
//!
//! Application layer: guards, roster and invitation management, week views and
//! the training upsert workflow, plus the DTOs exchanged with the HTTP layer.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::*;
