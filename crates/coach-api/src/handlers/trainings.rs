//! Training handlers
//!
//! Bulk scheduling across runners and per-relationship training management.

use axum::{
    extract::{Query, State},
    Json,
};
use coach_service::{
    CreateTrainingRequest, TrainingRangeQuery, TrainingResponse, TrainingService,
    UpdateTrainingRequest, UpsertResponse, UpsertTrainingsRequest,
};

use crate::extractors::{ApiPath, CoachUser, RelationIdPath, TrainingIdPath, ValidatedJson};
use crate::response::{ApiResult, NoContent, Upserted};
use crate::state::AppState;

/// Schedule one training for several runners on the same day.
///
/// Without `force`, existing trainings on that day are reported back as
/// conflicts and nothing is written.
///
/// POST /trainings
pub async fn upsert_trainings(
    State(state): State<AppState>,
    CoachUser(coach): CoachUser,
    ValidatedJson(request): ValidatedJson<UpsertTrainingsRequest>,
) -> ApiResult<Json<UpsertResponse>> {
    let service = TrainingService::new(state.service_context());
    let response = service.upsert(&coach, request).await?;
    Ok(Json(response))
}

/// GET /relations/{relation_id}/trainings?start_date=&end_date=
pub async fn list_relation_trainings(
    State(state): State<AppState>,
    CoachUser(coach): CoachUser,
    ApiPath(path): ApiPath<RelationIdPath>,
    Query(query): Query<TrainingRangeQuery>,
) -> ApiResult<Json<Vec<TrainingResponse>>> {
    let relation_id = path.relation_id()?;
    let service = TrainingService::new(state.service_context());
    let trainings = service.list_for_relation(&coach, relation_id, query).await?;
    Ok(Json(trainings))
}

/// POST /relations/{relation_id}/trainings
pub async fn create_relation_training(
    State(state): State<AppState>,
    CoachUser(coach): CoachUser,
    ApiPath(path): ApiPath<RelationIdPath>,
    ValidatedJson(request): ValidatedJson<CreateTrainingRequest>,
) -> ApiResult<Upserted<TrainingResponse>> {
    let relation_id = path.relation_id()?;
    let service = TrainingService::new(state.service_context());
    let result = service
        .create_for_relation(&coach, relation_id, request)
        .await?;
    Ok(result.into())
}

/// GET /trainings/{training_id}
pub async fn get_training(
    State(state): State<AppState>,
    CoachUser(coach): CoachUser,
    ApiPath(path): ApiPath<TrainingIdPath>,
) -> ApiResult<Json<TrainingResponse>> {
    let training_id = path.training_id()?;
    let service = TrainingService::new(state.service_context());
    let training = service.get(&coach, training_id).await?;
    Ok(Json(training))
}

/// PATCH /trainings/{training_id}
pub async fn update_training(
    State(state): State<AppState>,
    CoachUser(coach): CoachUser,
    ApiPath(path): ApiPath<TrainingIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateTrainingRequest>,
) -> ApiResult<Json<TrainingResponse>> {
    let training_id = path.training_id()?;
    let service = TrainingService::new(state.service_context());
    let training = service.update(&coach, training_id, request).await?;
    Ok(Json(training))
}

/// DELETE /trainings/{training_id}
pub async fn delete_training(
    State(state): State<AppState>,
    CoachUser(coach): CoachUser,
    ApiPath(path): ApiPath<TrainingIdPath>,
) -> ApiResult<NoContent> {
    let training_id = path.training_id()?;
    let service = TrainingService::new(state.service_context());
    service.delete(&coach, training_id).await?;
    Ok(NoContent)
}
