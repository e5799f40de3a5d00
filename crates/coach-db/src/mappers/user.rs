//! User model -> entity

use coach_core::entities::User;
use coach_core::value_objects::{Capabilities, Snowflake};

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            capabilities: Capabilities::from_i32(model.capabilities),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
