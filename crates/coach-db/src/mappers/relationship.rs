//! Relationship model -> entity

use coach_core::entities::{RelationStatus, Relationship};
use coach_core::error::DomainError;
use coach_core::value_objects::Snowflake;

use crate::models::RelationshipModel;

impl TryFrom<RelationshipModel> for Relationship {
    type Error = DomainError;

    fn try_from(model: RelationshipModel) -> Result<Self, Self::Error> {
        let status = RelationStatus::parse(&model.status).ok_or_else(|| {
            DomainError::DatabaseError(format!(
                "relationship {} has unknown status '{}'",
                model.id, model.status
            ))
        })?;

        Ok(Relationship {
            id: Snowflake::new(model.id),
            coach_id: Snowflake::new(model.coach_id),
            runner_id: Snowflake::new(model.runner_id),
            status,
            nickname: model.nickname,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
