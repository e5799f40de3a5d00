//! Schedule service
//!
//! Week views for the coach and the runner, and single-day access to a
//! training: the coach writes the description, the runner reports execution.

use chrono::NaiveDate;
use coach_core::policy::{self, Resource};
use coach_core::{
    materialize_week, resolve_reference_date, today, DomainError, Relationship, Training, User,
    Week, WeekWindow,
};
use tracing::{debug, info, instrument};

use crate::dto::{DayTrainingRequest, ExecutionRequest, TrainingResponse, WeekResponse};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct ScheduleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ScheduleService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The week of a coached runner containing `date`, or the current week
    #[instrument(skip(self, coach), fields(coach_id = %coach.id))]
    pub async fn coach_week(
        &self,
        coach: &User,
        runner: &str,
        date: Option<&str>,
    ) -> ServiceResult<WeekResponse> {
        let (relationship, _) = AccessService::new(self.ctx).coached_runner(coach, runner).await?;
        let week = self.week(&relationship, resolve_reference_date(date, today())).await?;
        Ok(WeekResponse::from(&week))
    }

    /// The runner's own week. Trainings not yet visible show as empty days.
    #[instrument(skip(self, runner), fields(runner_id = %runner.id))]
    pub async fn runner_week(&self, runner: &User, date: Option<&str>) -> ServiceResult<WeekResponse> {
        let relationship = AccessService::new(self.ctx).runner_relationship(runner).await?;
        let today = today();
        let mut week = self.week(&relationship, resolve_reference_date(date, today)).await?;

        for day in &mut week.days {
            let visible = policy::can_view_on(
                runner,
                Resource::Training {
                    training: &*day,
                    relationship: &relationship,
                },
                today,
            );
            if !visible {
                debug!(date = %day.date, "Masking training not yet visible");
                *day = Training::placeholder(relationship.id, day.date);
            }
        }
        Ok(WeekResponse::from(&week))
    }

    /// One day of a coached runner
    #[instrument(skip(self, coach), fields(coach_id = %coach.id))]
    pub async fn coach_day(
        &self,
        coach: &User,
        runner: &str,
        date: NaiveDate,
    ) -> ServiceResult<TrainingResponse> {
        let (relationship, _) = AccessService::new(self.ctx).coached_runner(coach, runner).await?;
        let training = self
            .ctx
            .training_repo()
            .find_by_relation_and_date(relationship.id, date)
            .await?
            .ok_or(DomainError::TrainingNotFound)?;
        Ok(TrainingResponse::from(training))
    }

    /// Create or update the training of a coached runner on one day
    #[instrument(skip(self, coach, request), fields(coach_id = %coach.id))]
    pub async fn put_coach_day(
        &self,
        coach: &User,
        runner: &str,
        date: NaiveDate,
        request: DayTrainingRequest,
    ) -> ServiceResult<(TrainingResponse, bool)> {
        let (relationship, _) = AccessService::new(self.ctx).coached_runner(coach, runner).await?;
        let repo = self.ctx.training_repo();

        match repo.find_by_relation_and_date(relationship.id, date).await? {
            Some(mut training) => {
                training.set_description(request.description);
                training.set_visible_since(request.visible_since);
                repo.update(&training).await?;
                Ok((TrainingResponse::from(training), false))
            }
            None => {
                let mut training =
                    Training::new(self.ctx.generate_id(), relationship.id, date, request.description);
                training.set_visible_since(request.visible_since);
                repo.create(&training).await?;
                info!(training_id = ?training.id, %date, "Training created");
                Ok((TrainingResponse::from(training), true))
            }
        }
    }

    /// One visible day of the runner's schedule
    #[instrument(skip(self, runner), fields(runner_id = %runner.id))]
    pub async fn runner_day(&self, runner: &User, date: NaiveDate) -> ServiceResult<TrainingResponse> {
        let (training, _) = self.runner_training(runner, date).await?;
        Ok(TrainingResponse::from(training))
    }

    /// Record how the training of `date` went
    #[instrument(skip(self, runner, request), fields(runner_id = %runner.id))]
    pub async fn report_execution(
        &self,
        runner: &User,
        date: NaiveDate,
        request: ExecutionRequest,
    ) -> ServiceResult<TrainingResponse> {
        let (mut training, relationship) = self.runner_training(runner, date).await?;
        if !policy::can_report_execution(runner, &training, &relationship) {
            return Err(DomainError::TrainingNotFound.into());
        }

        training.set_execution(request.execution);
        self.ctx.training_repo().update(&training).await?;
        Ok(TrainingResponse::from(training))
    }

    async fn week(&self, relationship: &Relationship, reference: NaiveDate) -> ServiceResult<Week> {
        let window = WeekWindow::containing(reference);
        let persisted = self
            .ctx
            .training_repo()
            .find_in_range(relationship.id, Some(window.monday), Some(window.sunday))
            .await?;
        Ok(materialize_week(relationship.id, reference, persisted))
    }

    async fn runner_training(&self, runner: &User, date: NaiveDate) -> ServiceResult<(Training, Relationship)> {
        let relationship = AccessService::new(self.ctx).runner_relationship(runner).await?;
        let training = self
            .ctx
            .training_repo()
            .find_by_relation_and_date(relationship.id, date)
            .await?
            .filter(|training| {
                policy::can_view(
                    runner,
                    Resource::Training {
                        training,
                        relationship: &relationship,
                    },
                )
            })
            .ok_or(DomainError::TrainingNotFound)?;
        Ok((training, relationship))
    }
}
