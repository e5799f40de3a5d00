//! Access service
//!
//! Guard functions composed in front of handlers and the lookups every other
//! service uses to resolve a resource for the acting user. Role checks fail as
//! forbidden; lookups of resources the user may not see fail as not found.

use coach_common::AppError;
use coach_core::policy::{self, Resource};
use coach_core::{DomainError, Relationship, Role, Snowflake, Training, User};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct AccessService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccessService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load the user a valid token was issued for. A deleted account invalidates the token.
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::InvalidToken.into())
    }

    pub fn require_coach(&self, user: &User) -> ServiceResult<()> {
        if policy::is_coach(user) {
            Ok(())
        } else {
            debug!(user_id = %user.id, "Rejected: not a coach");
            Err(DomainError::MissingCapability(Role::Coach).into())
        }
    }

    pub fn require_runner(&self, user: &User) -> ServiceResult<()> {
        if policy::is_runner(user) {
            Ok(())
        } else {
            debug!(user_id = %user.id, "Rejected: not a runner");
            Err(DomainError::MissingCapability(Role::Runner).into())
        }
    }

    /// Whether the user has no established coach
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn lacks_coach(&self, user: &User) -> ServiceResult<bool> {
        let relationships = self.ctx.relationship_repo().list_by_runner(user.id).await?;
        Ok(policy::lacks_coach(user, &relationships))
    }

    pub async fn require_lacks_coach(&self, user: &User) -> ServiceResult<()> {
        if self.lacks_coach(user).await? {
            Ok(())
        } else {
            Err(DomainError::AlreadyCoached.into())
        }
    }

    /// The coach's relationship with a runner, in any status, with the runner loaded
    #[instrument(skip(self, coach), fields(coach_id = %coach.id))]
    pub async fn relationship_with(
        &self,
        coach: &User,
        runner_username: &str,
    ) -> ServiceResult<(Relationship, User)> {
        let runner = self
            .ctx
            .user_repo()
            .find_by_username(runner_username)
            .await?
            .ok_or(DomainError::RelationshipNotFound)?;
        let relationship = self
            .ctx
            .relationship_repo()
            .find_by_pair(coach.id, runner.id)
            .await?
            .filter(|rel| policy::owns_as_coach(coach, rel.into()))
            .ok_or(DomainError::RelationshipNotFound)?;
        Ok((relationship, runner))
    }

    /// The coach's established relationship with a runner
    pub async fn coached_runner(
        &self,
        coach: &User,
        runner_username: &str,
    ) -> ServiceResult<(Relationship, User)> {
        let (relationship, runner) = self.relationship_with(coach, runner_username).await?;
        if !relationship.is_established() {
            return Err(DomainError::RelationshipNotFound.into());
        }
        Ok((relationship, runner))
    }

    /// A relationship by id, only if coached by `coach`
    #[instrument(skip(self, coach), fields(coach_id = %coach.id))]
    pub async fn coach_relationship(
        &self,
        coach: &User,
        relation_id: Snowflake,
    ) -> ServiceResult<Relationship> {
        self.ctx
            .relationship_repo()
            .find_by_id(relation_id)
            .await?
            .filter(|rel| policy::owns_as_coach(coach, rel.into()))
            .ok_or_else(|| DomainError::RelationshipNotFound.into())
    }

    /// A training by id with its relationship, only if coached by `coach`
    #[instrument(skip(self, coach), fields(coach_id = %coach.id))]
    pub async fn coach_training(
        &self,
        coach: &User,
        training_id: Snowflake,
    ) -> ServiceResult<(Training, Relationship)> {
        let training = self
            .ctx
            .training_repo()
            .find_by_id(training_id)
            .await?
            .ok_or(DomainError::TrainingNotFound)?;
        let relationship = self
            .ctx
            .relationship_repo()
            .find_by_id(training.relation_id)
            .await?
            .ok_or(DomainError::TrainingNotFound)?;

        let resource = Resource::Training {
            training: &training,
            relationship: &relationship,
        };
        if !policy::owns_as_coach(coach, resource) {
            return Err(DomainError::TrainingNotFound.into());
        }
        Ok((training, relationship))
    }

    /// The runner's established relationship
    #[instrument(skip(self, runner), fields(runner_id = %runner.id))]
    pub async fn runner_relationship(&self, runner: &User) -> ServiceResult<Relationship> {
        self.ctx
            .relationship_repo()
            .find_established_for_runner(runner.id)
            .await?
            .filter(|rel| policy::can_view(runner, rel.into()))
            .ok_or_else(|| DomainError::RelationshipNotFound.into())
    }
}
