//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, health, invites, roster, schedule, trainings, users};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes, kept outside rate limiting
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(roster_routes())
        .merge(invite_routes())
        .merge(runner_schedule_routes())
        .merge(training_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
}

fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/users/@me",
        get(users::get_current_user).delete(users::delete_current_user),
    )
}

/// Coach side: runners and their weeks
fn roster_routes() -> Router<AppState> {
    Router::new()
        .route("/runners", get(roster::list_runners).post(roster::invite_runner))
        .route(
            "/runners/:runner",
            get(roster::get_runner)
                .patch(roster::update_runner)
                .delete(roster::remove_runner),
        )
        .route("/runners/:runner/trainings", get(schedule::coach_week))
        .route(
            "/runners/:runner/trainings/:date",
            get(schedule::coach_day).put(schedule::put_coach_day),
        )
}

fn invite_routes() -> Router<AppState> {
    Router::new()
        .route("/invites", get(invites::list_invites))
        .route("/invites/:coach/accept", post(invites::accept_invite))
        .route("/invites/:coach/decline", post(invites::decline_invite))
}

/// Runner side: the own schedule
fn runner_schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/me/trainings", get(schedule::runner_week))
        .route(
            "/me/trainings/:date",
            get(schedule::runner_day).patch(schedule::report_execution),
        )
}

fn training_routes() -> Router<AppState> {
    Router::new()
        .route("/trainings", post(trainings::upsert_trainings))
        .route(
            "/trainings/:training_id",
            get(trainings::get_training)
                .patch(trainings::update_training)
                .delete(trainings::delete_training),
        )
        .route(
            "/relations/:relation_id/trainings",
            get(trainings::list_relation_trainings).post(trainings::create_relation_training),
        )
}
