//! User service
//!
//! Profile of the authenticated user and account deletion.

use coach_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::CurrentUserResponse;

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let access = AccessService::new(self.ctx);
        let user = access.current_user(user_id).await?;
        let has_coach = !access.lacks_coach(&user).await?;
        Ok(CurrentUserResponse::new(&user, has_coach))
    }

    /// Delete the account together with its relationships and their trainings
    #[instrument(skip(self))]
    pub async fn delete_account(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx.user_repo().delete(user_id).await?;
        info!(user_id = %user_id, "Account deleted");
        Ok(())
    }
}
