//! Entity to DTO mappers

use coach_core::{Relationship, Training, User, Week};

use super::responses::{
    CurrentUserResponse, RelationshipResponse, TrainingResponse, UserResponse, WeekResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
        }
    }
}

impl CurrentUserResponse {
    pub fn new(user: &User, has_coach: bool) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            capabilities: user.capabilities,
            has_coach,
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Relationship Mappers
// ============================================================================

/// A relationship with both of its users loaded
#[derive(Debug, Clone)]
pub struct RelationshipWithUsers {
    pub relationship: Relationship,
    pub coach: User,
    pub runner: User,
}

impl From<RelationshipWithUsers> for RelationshipResponse {
    fn from(value: RelationshipWithUsers) -> Self {
        let RelationshipWithUsers {
            relationship,
            coach,
            runner,
        } = value;
        Self {
            id: relationship.id.to_string(),
            displayed_name: relationship.displayed_name(&runner.username).to_string(),
            coach: UserResponse::from(&coach),
            runner: UserResponse::from(&runner),
            status: relationship.status,
            nickname: relationship.nickname,
            created_at: relationship.created_at,
        }
    }
}

// ============================================================================
// Training Mappers
// ============================================================================

impl From<&Training> for TrainingResponse {
    fn from(training: &Training) -> Self {
        Self {
            id: training.id.map(|id| id.to_string()),
            relation_id: training.relation_id.to_string(),
            date: training.date,
            description: training.description.clone(),
            execution: training.execution.clone(),
            visible_since: training.visible_since,
        }
    }
}

impl From<Training> for TrainingResponse {
    fn from(training: Training) -> Self {
        Self::from(&training)
    }
}

impl From<&Week> for WeekResponse {
    fn from(week: &Week) -> Self {
        Self {
            relation_id: week.days[0].relation_id.to_string(),
            monday: week.window.monday,
            sunday: week.window.sunday,
            previous_week: week.previous_week(),
            next_week: week.next_week(),
            days: week.days.iter().map(TrainingResponse::from).collect(),
        }
    }
}
