//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::RelationStatus;
use crate::value_objects::{Role, Snowflake};

#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Relationship not found")]
    RelationshipNotFound,

    #[error("Training not found")]
    TrainingNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Runner doesn't exist")]
    UnknownRunner(String),

    #[error("Runner already has a coach")]
    RunnerHasCoach,

    #[error("Runner has already been invited")]
    AlreadyInvited,

    #[error("Nickname already used for another runner")]
    NicknameTaken,

    #[error("Invalid data")]
    InvalidRelationship(Snowflake),

    #[error("No established relationship with runner {0}")]
    RunnerNotCoached(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing capability: {0}")]
    MissingCapability(Role),

    #[error("Runner already has an established coach")]
    AlreadyCoached,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already in use")]
    UsernameTaken,

    #[error("Email already in use")]
    EmailTaken,

    #[error("Relationship already exists for this coach and runner")]
    RelationshipExists,

    #[error("Training already exists for this relationship and date")]
    TrainingExists,

    #[error("Cannot move relationship from {from} to {to}")]
    InvalidTransition {
        from: RelationStatus,
        to: RelationStatus,
    },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::RelationshipNotFound => "UNKNOWN_RELATIONSHIP",
            Self::TrainingNotFound => "UNKNOWN_TRAINING",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidDate(_) => "INVALID_DATE",
            Self::UnknownRunner(_) => "UNKNOWN_RUNNER",
            Self::RunnerHasCoach => "RUNNER_HAS_COACH",
            Self::AlreadyInvited => "ALREADY_INVITED",
            Self::NicknameTaken => "NICKNAME_TAKEN",
            Self::InvalidRelationship(_) => "INVALID_RELATIONSHIP",
            Self::RunnerNotCoached(_) => "RUNNER_NOT_COACHED",

            // Authorization
            Self::MissingCapability(Role::Coach) => "NOT_A_COACH",
            Self::MissingCapability(Role::Runner) => "NOT_A_RUNNER",
            Self::AlreadyCoached => "ALREADY_COACHED",

            // Conflict
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::RelationshipExists => "RELATIONSHIP_EXISTS",
            Self::TrainingExists => "TRAINING_EXISTS",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::RelationshipNotFound | Self::TrainingNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidDate(_)
                | Self::UnknownRunner(_)
                | Self::RunnerHasCoach
                | Self::AlreadyInvited
                | Self::NicknameTaken
                | Self::InvalidRelationship(_)
                | Self::RunnerNotCoached(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::MissingCapability(_) | Self::AlreadyCoached)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UsernameTaken
                | Self::EmailTaken
                | Self::RelationshipExists
                | Self::TrainingExists
                | Self::InvalidTransition { .. }
        )
    }
}
