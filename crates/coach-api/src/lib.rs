//! # coach-api
//!
//! REST API server built with Axum framework.
//!
//! Coaches and runners authenticate with a bearer token; every endpoint is
//! mounted under `/api/v1` except the health probes.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
