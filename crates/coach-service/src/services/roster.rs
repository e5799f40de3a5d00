//! Roster service
//!
//! The coach's side of relationships: listing runners, inviting, nicknames and removal.

use coach_core::{DomainError, PageRequest, Relationship, User};
use tracing::{info, instrument};

use crate::dto::{
    InviteRunnerRequest, PaginatedResponse, RelationshipResponse, RelationshipWithUsers,
    UpdateNicknameRequest,
};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct RosterService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RosterService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The coach's relationships ordered by runner username, runner invitations excluded
    #[instrument(skip(self, coach), fields(coach_id = %coach.id))]
    pub async fn list(
        &self,
        coach: &User,
        page: PageRequest,
    ) -> ServiceResult<PaginatedResponse<RelationshipResponse>> {
        let relationships = self.ctx.relationship_repo().list_by_coach(coach.id, page).await?;
        let total = self.ctx.relationship_repo().count_by_coach(coach.id).await?;

        let mut data = Vec::with_capacity(relationships.len());
        for relationship in relationships {
            let runner = self
                .ctx
                .user_repo()
                .find_by_id(relationship.runner_id)
                .await?
                .ok_or_else(|| DomainError::UserNotFound(relationship.runner_id.to_string()))?;
            data.push(respond(relationship, coach, runner));
        }

        Ok(PaginatedResponse::new(data, page.limit, page.offset, total))
    }

    /// Invite a runner by username.
    ///
    /// Checked in order: the runner exists, has no established coach, and has
    /// not been invited by this coach before.
    #[instrument(skip(self, coach, request), fields(coach_id = %coach.id, runner = %request.runner))]
    pub async fn invite(
        &self,
        coach: &User,
        request: InviteRunnerRequest,
    ) -> ServiceResult<RelationshipResponse> {
        let username = request.runner.trim();
        let runner = self
            .ctx
            .user_repo()
            .find_by_username(username)
            .await?
            .filter(|user| user.is_runner() && user.id != coach.id)
            .ok_or_else(|| DomainError::UnknownRunner(username.to_string()))?;

        if !AccessService::new(self.ctx).lacks_coach(&runner).await? {
            return Err(DomainError::RunnerHasCoach.into());
        }

        if self
            .ctx
            .relationship_repo()
            .find_by_pair(coach.id, runner.id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyInvited.into());
        }

        let relationship = Relationship::invite(self.ctx.generate_id(), coach.id, runner.id);
        self.ctx
            .relationship_repo()
            .create(&relationship)
            .await
            .map_err(|e| match e {
                DomainError::RelationshipExists => DomainError::AlreadyInvited,
                other => other,
            })?;

        info!(relationship_id = %relationship.id, runner_id = %runner.id, "Runner invited");

        Ok(respond(relationship, coach, runner))
    }

    /// Detail of an established relationship
    #[instrument(skip(self, coach), fields(coach_id = %coach.id))]
    pub async fn detail(&self, coach: &User, runner: &str) -> ServiceResult<RelationshipResponse> {
        let (relationship, runner) = AccessService::new(self.ctx)
            .coached_runner(coach, runner)
            .await?;
        Ok(respond(relationship, coach, runner))
    }

    /// Set or clear the nickname of an established relationship.
    /// Another relationship of the same coach must not already use it.
    #[instrument(skip(self, coach, request), fields(coach_id = %coach.id))]
    pub async fn set_nickname(
        &self,
        coach: &User,
        runner: &str,
        request: UpdateNicknameRequest,
    ) -> ServiceResult<RelationshipResponse> {
        let (mut relationship, runner) = AccessService::new(self.ctx)
            .coached_runner(coach, runner)
            .await?;

        relationship.set_nickname(request.nickname);
        if let Some(nickname) = relationship.nickname.as_deref() {
            if self
                .ctx
                .relationship_repo()
                .nickname_taken(coach.id, nickname, relationship.id)
                .await?
            {
                return Err(DomainError::NicknameTaken.into());
            }
        }

        self.ctx.relationship_repo().update(&relationship).await?;
        Ok(respond(relationship, coach, runner))
    }

    /// Remove a relationship, whatever its status, unless the runner initiated it
    #[instrument(skip(self, coach), fields(coach_id = %coach.id))]
    pub async fn remove(&self, coach: &User, runner: &str) -> ServiceResult<()> {
        let (relationship, _) = AccessService::new(self.ctx)
            .relationship_with(coach, runner)
            .await?;
        if !relationship.is_deletable_by_coach() {
            return Err(DomainError::RelationshipNotFound.into());
        }

        self.ctx.relationship_repo().delete(relationship.id).await?;
        info!(relationship_id = %relationship.id, "Relationship removed");
        Ok(())
    }
}

fn respond(relationship: Relationship, coach: &User, runner: User) -> RelationshipResponse {
    RelationshipResponse::from(RelationshipWithUsers {
        relationship,
        coach: coach.clone(),
        runner,
    })
}
