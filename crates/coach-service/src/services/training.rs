//! Training service
//!
//! Broadcasting one training to several runners with a confirmation step, and
//! the coach's per-relationship training API.
//!
//! A broadcast first resolves every runner to an established relationship of the
//! coach, so an unknown runner aborts it before anything is written. It then
//! looks for trainings the runners already have on that date under any coach.
//! Unless forced, existing trainings are reported back instead of overwritten.

use std::collections::HashMap;

use coach_core::policy::{self, Resource};
use coach_core::{DomainError, Relationship, Snowflake, Training, User};
use tracing::{info, instrument, warn};

use crate::dto::{
    ConflictResponse, CreateTrainingRequest, TrainingRangeQuery, TrainingResponse,
    UpdateTrainingRequest, UpsertResponse, UpsertTrainingsRequest,
};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct TrainingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TrainingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Assign `description` to every listed runner on `date`.
    ///
    /// Existing trainings only get their description replaced; execution,
    /// visibility and relationship stay as they are.
    #[instrument(
        skip(self, coach, request),
        fields(coach_id = %coach.id, date = %request.date, runners = request.runners.len(), force = request.force)
    )]
    pub async fn upsert(
        &self,
        coach: &User,
        request: UpsertTrainingsRequest,
    ) -> ServiceResult<UpsertResponse> {
        let targets = self.resolve_runners(coach, &request.runners).await?;

        let runner_ids: Vec<Snowflake> = targets.iter().map(|(runner, _)| runner.id).collect();
        let existing = self
            .ctx
            .training_repo()
            .find_for_runners_on_date(&runner_ids, request.date)
            .await?;

        if !existing.is_empty() && !request.force {
            let usernames: HashMap<Snowflake, &str> = targets
                .iter()
                .map(|(runner, _)| (runner.id, runner.username.as_str()))
                .collect();
            let conflicts = existing
                .into_iter()
                .map(|found| {
                    let own = found.coach_id == coach.id;
                    ConflictResponse {
                        runner: usernames.get(&found.runner_id).copied().unwrap_or_default().to_string(),
                        date: found.training.date,
                        own,
                        description: own.then_some(found.training.description),
                    }
                })
                .collect();
            return Ok(UpsertResponse::ConfirmationRequired { conflicts });
        }

        let repo = self.ctx.training_repo();
        let mut trainings = Vec::with_capacity(targets.len());
        for (_, relationship) in &targets {
            let training = match repo.find_by_relation_and_date(relationship.id, request.date).await? {
                Some(mut training) => {
                    training.set_description(request.description.clone());
                    repo.update(&training).await?;
                    training
                }
                None => {
                    let mut training = Training::new(
                        self.ctx.generate_id(),
                        relationship.id,
                        request.date,
                        request.description.clone(),
                    );
                    training.set_visible_since(request.visible_since);
                    repo.create(&training).await?;
                    training
                }
            };
            trainings.push(TrainingResponse::from(training));
        }

        info!(count = trainings.len(), "Trainings applied");
        Ok(UpsertResponse::Applied { trainings })
    }

    /// Trainings of one of the coach's relationships, optionally bounded by date
    #[instrument(skip(self, coach), fields(coach_id = %coach.id))]
    pub async fn list_for_relation(
        &self,
        coach: &User,
        relation_id: Snowflake,
        query: TrainingRangeQuery,
    ) -> ServiceResult<Vec<TrainingResponse>> {
        let (start, end) = query.bounds()?;
        let relationship = AccessService::new(self.ctx)
            .coach_relationship(coach, relation_id)
            .await?;
        let trainings = self
            .ctx
            .training_repo()
            .find_in_range(relationship.id, start, end)
            .await?;
        Ok(trainings.iter().map(TrainingResponse::from).collect())
    }

    /// Create a training on an established relationship. A training already on
    /// that date keeps its row and gets the new description.
    #[instrument(skip(self, coach, request), fields(coach_id = %coach.id, date = %request.date))]
    pub async fn create_for_relation(
        &self,
        coach: &User,
        relation_id: Snowflake,
        request: CreateTrainingRequest,
    ) -> ServiceResult<(TrainingResponse, bool)> {
        let relationship = AccessService::new(self.ctx)
            .coach_relationship(coach, relation_id)
            .await?;
        if !relationship.is_established() {
            return Err(DomainError::InvalidRelationship(relation_id).into());
        }

        let repo = self.ctx.training_repo();
        if let Some(mut training) = repo.find_by_relation_and_date(relationship.id, request.date).await? {
            training.set_description(request.description);
            repo.update(&training).await?;
            return Ok((TrainingResponse::from(training), false));
        }

        let mut training = Training::new(
            self.ctx.generate_id(),
            relationship.id,
            request.date,
            request.description,
        );
        training.set_visible_since(request.visible_since);
        repo.create(&training).await?;
        info!(training_id = ?training.id, "Training created");
        Ok((TrainingResponse::from(training), true))
    }

    #[instrument(skip(self, coach), fields(coach_id = %coach.id))]
    pub async fn get(&self, coach: &User, training_id: Snowflake) -> ServiceResult<TrainingResponse> {
        let (training, _) = AccessService::new(self.ctx)
            .coach_training(coach, training_id)
            .await?;
        Ok(TrainingResponse::from(training))
    }

    /// Change description or visibility. The runner's execution report is left alone.
    #[instrument(skip(self, coach, request), fields(coach_id = %coach.id))]
    pub async fn update(
        &self,
        coach: &User,
        training_id: Snowflake,
        request: UpdateTrainingRequest,
    ) -> ServiceResult<TrainingResponse> {
        let (mut training, relationship) = self.modifiable(coach, training_id).await?;

        if let Some(description) = request.description {
            training.set_description(description);
        }
        if let Some(visible_since) = request.visible_since {
            training.set_visible_since(visible_since);
        }
        self.ctx.training_repo().update(&training).await?;

        info!(training_id = %training_id, relation_id = %relationship.id, "Training updated");
        Ok(TrainingResponse::from(training))
    }

    #[instrument(skip(self, coach), fields(coach_id = %coach.id))]
    pub async fn delete(&self, coach: &User, training_id: Snowflake) -> ServiceResult<()> {
        self.modifiable(coach, training_id).await?;
        self.ctx.training_repo().delete(training_id).await?;
        info!(training_id = %training_id, "Training deleted");
        Ok(())
    }

    async fn modifiable(
        &self,
        coach: &User,
        training_id: Snowflake,
    ) -> ServiceResult<(Training, Relationship)> {
        let (training, relationship) = AccessService::new(self.ctx)
            .coach_training(coach, training_id)
            .await?;
        let resource = Resource::Training {
            training: &training,
            relationship: &relationship,
        };
        if !policy::can_modify(coach, resource) {
            return Err(DomainError::InvalidRelationship(relationship.id).into());
        }
        Ok((training, relationship))
    }

    /// Map each distinct username to the coach's established relationship with it
    async fn resolve_runners(
        &self,
        coach: &User,
        usernames: &[String],
    ) -> ServiceResult<Vec<(User, Relationship)>> {
        let access = AccessService::new(self.ctx);
        let mut targets: Vec<(User, Relationship)> = Vec::with_capacity(usernames.len());

        for username in usernames {
            let username = username.trim();
            if targets.iter().any(|(runner, _)| runner.username == username) {
                continue;
            }
            match access.coached_runner(coach, username).await {
                Ok((relationship, runner)) => targets.push((runner, relationship)),
                Err(err) if err.as_domain().is_some_and(DomainError::is_not_found) => {
                    warn!(runner = %username, "Broadcast names a runner without a relationship");
                    return Err(DomainError::RunnerNotCoached(username.to_string()).into());
                }
                Err(err) => return Err(err),
            }
        }
        Ok(targets)
    }
}
