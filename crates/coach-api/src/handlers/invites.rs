//! Invitation handlers
//!
//! The runner's answer to coach invitations.

use axum::{extract::State, Json};
use coach_service::{InvitationService, RelationshipResponse};

use crate::extractors::{ApiPath, CoachPath, RunnerUser};
use crate::response::ApiResult;
use crate::state::AppState;

/// Pending invitations
///
/// GET /invites
pub async fn list_invites(
    State(state): State<AppState>,
    RunnerUser(runner): RunnerUser,
) -> ApiResult<Json<Vec<RelationshipResponse>>> {
    let service = InvitationService::new(state.service_context());
    let invites = service.list(&runner).await?;
    Ok(Json(invites))
}

/// Accept the invitation of a coach
///
/// POST /invites/{coach}/accept
pub async fn accept_invite(
    State(state): State<AppState>,
    RunnerUser(runner): RunnerUser,
    ApiPath(path): ApiPath<CoachPath>,
) -> ApiResult<Json<RelationshipResponse>> {
    let service = InvitationService::new(state.service_context());
    let response = service.accept(&runner, &path.coach).await?;
    Ok(Json(response))
}

/// Decline the invitation of a coach
///
/// POST /invites/{coach}/decline
pub async fn decline_invite(
    State(state): State<AppState>,
    RunnerUser(runner): RunnerUser,
    ApiPath(path): ApiPath<CoachPath>,
) -> ApiResult<Json<RelationshipResponse>> {
    let service = InvitationService::new(state.service_context());
    let response = service.decline(&runner, &path.coach).await?;
    Ok(Json(response))
}
