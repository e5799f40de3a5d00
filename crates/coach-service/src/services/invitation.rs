//! Invitation service
//!
//! The runner's side of relationships: pending coach invitations and the answer to them.

use coach_core::{DomainError, RelationStatus, Relationship, User};
use tracing::{info, instrument};

use crate::dto::{RelationshipResponse, RelationshipWithUsers};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct InvitationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InvitationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Invitations from coaches still waiting for an answer
    #[instrument(skip(self, runner), fields(runner_id = %runner.id))]
    pub async fn list(&self, runner: &User) -> ServiceResult<Vec<RelationshipResponse>> {
        let pending = self
            .ctx
            .relationship_repo()
            .list_by_runner(runner.id)
            .await?
            .into_iter()
            .filter(|rel| rel.status == RelationStatus::InvitedByCoach);

        let mut data = Vec::new();
        for relationship in pending {
            let coach = self
                .ctx
                .user_repo()
                .find_by_id(relationship.coach_id)
                .await?
                .ok_or_else(|| DomainError::UserNotFound(relationship.coach_id.to_string()))?;
            data.push(RelationshipResponse::from(RelationshipWithUsers {
                relationship,
                coach,
                runner: runner.clone(),
            }));
        }
        Ok(data)
    }

    /// Accept a coach's invitation. A runner with an established coach cannot accept another.
    #[instrument(skip(self, runner), fields(runner_id = %runner.id))]
    pub async fn accept(&self, runner: &User, coach: &str) -> ServiceResult<RelationshipResponse> {
        AccessService::new(self.ctx).require_lacks_coach(runner).await?;

        let (mut relationship, coach) = self.pending(runner, coach).await?;
        relationship.accept()?;
        self.ctx.relationship_repo().update(&relationship).await?;

        info!(relationship_id = %relationship.id, "Invitation accepted");

        Ok(RelationshipResponse::from(RelationshipWithUsers {
            relationship,
            coach,
            runner: runner.clone(),
        }))
    }

    /// Decline a coach's invitation; the relationship is kept as revoked
    #[instrument(skip(self, runner), fields(runner_id = %runner.id))]
    pub async fn decline(&self, runner: &User, coach: &str) -> ServiceResult<RelationshipResponse> {
        let (mut relationship, coach) = self.pending(runner, coach).await?;
        relationship.decline()?;
        self.ctx.relationship_repo().update(&relationship).await?;

        info!(relationship_id = %relationship.id, "Invitation declined");

        Ok(RelationshipResponse::from(RelationshipWithUsers {
            relationship,
            coach,
            runner: runner.clone(),
        }))
    }

    /// The pending invitation from `coach_username` to `runner`
    async fn pending(&self, runner: &User, coach_username: &str) -> ServiceResult<(Relationship, User)> {
        let coach = self
            .ctx
            .user_repo()
            .find_by_username(coach_username)
            .await?
            .ok_or(DomainError::RelationshipNotFound)?;
        let relationship = self
            .ctx
            .relationship_repo()
            .find_by_pair(coach.id, runner.id)
            .await?
            .filter(|rel| rel.status == RelationStatus::InvitedByCoach)
            .ok_or(DomainError::RelationshipNotFound)?;
        Ok((relationship, coach))
    }
}
