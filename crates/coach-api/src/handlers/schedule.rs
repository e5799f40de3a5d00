//! Schedule handlers
//!
//! Week and day views. Coaches address a runner by username; runners read
//! their own schedule under `/me`.

use axum::{
    extract::{Query, State},
    Json,
};
use coach_service::{
    DayTrainingRequest, ExecutionRequest, ScheduleService, TrainingResponse, WeekQuery,
    WeekResponse,
};

use crate::extractors::{
    ApiPath, CoachUser, DatePath, RunnerDatePath, RunnerPath, RunnerUser, ValidatedJson,
};
use crate::response::{ApiResult, Upserted};
use crate::state::AppState;

/// Week of a coached runner. A missing or malformed `date` means the current week.
///
/// GET /runners/{runner}/trainings?date=YYYY-MM-DD
pub async fn coach_week(
    State(state): State<AppState>,
    CoachUser(coach): CoachUser,
    ApiPath(path): ApiPath<RunnerPath>,
    Query(query): Query<WeekQuery>,
) -> ApiResult<Json<WeekResponse>> {
    let service = ScheduleService::new(state.service_context());
    let week = service
        .coach_week(&coach, &path.runner, query.date.as_deref())
        .await?;
    Ok(Json(week))
}

/// GET /runners/{runner}/trainings/{date}
pub async fn coach_day(
    State(state): State<AppState>,
    CoachUser(coach): CoachUser,
    ApiPath(path): ApiPath<RunnerDatePath>,
) -> ApiResult<Json<TrainingResponse>> {
    let date = path.date()?;
    let service = ScheduleService::new(state.service_context());
    let training = service.coach_day(&coach, &path.runner, date).await?;
    Ok(Json(training))
}

/// Create or replace the training of one day
///
/// PUT /runners/{runner}/trainings/{date}
pub async fn put_coach_day(
    State(state): State<AppState>,
    CoachUser(coach): CoachUser,
    ApiPath(path): ApiPath<RunnerDatePath>,
    ValidatedJson(request): ValidatedJson<DayTrainingRequest>,
) -> ApiResult<Upserted<TrainingResponse>> {
    let date = path.date()?;
    let service = ScheduleService::new(state.service_context());
    let result = service
        .put_coach_day(&coach, &path.runner, date, request)
        .await?;
    Ok(result.into())
}

/// The runner's own week
///
/// GET /me/trainings?date=YYYY-MM-DD
pub async fn runner_week(
    State(state): State<AppState>,
    RunnerUser(runner): RunnerUser,
    Query(query): Query<WeekQuery>,
) -> ApiResult<Json<WeekResponse>> {
    let service = ScheduleService::new(state.service_context());
    let week = service.runner_week(&runner, query.date.as_deref()).await?;
    Ok(Json(week))
}

/// GET /me/trainings/{date}
pub async fn runner_day(
    State(state): State<AppState>,
    RunnerUser(runner): RunnerUser,
    ApiPath(path): ApiPath<DatePath>,
) -> ApiResult<Json<TrainingResponse>> {
    let date = path.date()?;
    let service = ScheduleService::new(state.service_context());
    let training = service.runner_day(&runner, date).await?;
    Ok(Json(training))
}

/// Report how the training went
///
/// PATCH /me/trainings/{date}
pub async fn report_execution(
    State(state): State<AppState>,
    RunnerUser(runner): RunnerUser,
    ApiPath(path): ApiPath<DatePath>,
    ValidatedJson(request): ValidatedJson<ExecutionRequest>,
) -> ApiResult<Json<TrainingResponse>> {
    let date = path.date()?;
    let service = ScheduleService::new(state.service_context());
    let training = service.report_execution(&runner, date, request).await?;
    Ok(Json(training))
}
