//! Roster handlers
//!
//! The coach's runners: listing, inviting, nicknames and removal.

use axum::{extract::State, Json};
use coach_service::{
    InviteRunnerRequest, PaginatedResponse, RelationshipResponse, RosterService,
    UpdateNicknameRequest,
};

use crate::extractors::{ApiPath, CoachUser, Pagination, RunnerPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List the coach's relationships
///
/// GET /runners?limit=&offset=
pub async fn list_runners(
    State(state): State<AppState>,
    CoachUser(coach): CoachUser,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<RelationshipResponse>>> {
    let service = RosterService::new(state.service_context());
    let page = service.list(&coach, pagination.into()).await?;
    Ok(Json(page))
}

/// Invite a runner by username
///
/// POST /runners
pub async fn invite_runner(
    State(state): State<AppState>,
    CoachUser(coach): CoachUser,
    ValidatedJson(request): ValidatedJson<InviteRunnerRequest>,
) -> ApiResult<Created<Json<RelationshipResponse>>> {
    let service = RosterService::new(state.service_context());
    let response = service.invite(&coach, request).await?;
    Ok(Created(Json(response)))
}

/// Get an established relationship
///
/// GET /runners/{runner}
pub async fn get_runner(
    State(state): State<AppState>,
    CoachUser(coach): CoachUser,
    ApiPath(path): ApiPath<RunnerPath>,
) -> ApiResult<Json<RelationshipResponse>> {
    let service = RosterService::new(state.service_context());
    let response = service.detail(&coach, &path.runner).await?;
    Ok(Json(response))
}

/// Set or clear the runner's nickname
///
/// PATCH /runners/{runner}
pub async fn update_runner(
    State(state): State<AppState>,
    CoachUser(coach): CoachUser,
    ApiPath(path): ApiPath<RunnerPath>,
    ValidatedJson(request): ValidatedJson<UpdateNicknameRequest>,
) -> ApiResult<Json<RelationshipResponse>> {
    let service = RosterService::new(state.service_context());
    let response = service.set_nickname(&coach, &path.runner, request).await?;
    Ok(Json(response))
}

/// Remove a relationship
///
/// DELETE /runners/{runner}
pub async fn remove_runner(
    State(state): State<AppState>,
    CoachUser(coach): CoachUser,
    ApiPath(path): ApiPath<RunnerPath>,
) -> ApiResult<NoContent> {
    let service = RosterService::new(state.service_context());
    service.remove(&coach, &path.runner).await?;
    Ok(NoContent)
}
