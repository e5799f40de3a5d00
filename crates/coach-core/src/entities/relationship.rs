//! Relationship entity - the coach/runner pairing and its invitation lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Lifecycle state of a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationStatus {
    #[default]
    InvitedByCoach,
    InvitedByRunner,
    Established,
    Revoked,
}

impl RelationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvitedByCoach => "INVITED_BY_COACH",
            Self::InvitedByRunner => "INVITED_BY_RUNNER",
            Self::Established => "ESTABLISHED",
            Self::Revoked => "REVOKED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "INVITED_BY_COACH" => Some(Self::InvitedByCoach),
            "INVITED_BY_RUNNER" => Some(Self::InvitedByRunner),
            "ESTABLISHED" => Some(Self::Established),
            "REVOKED" => Some(Self::Revoked),
            _ => None,
        }
    }
}

impl fmt::Display for RelationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coach/runner link. At most one exists per (coach, runner) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: Snowflake,
    pub coach_id: Snowflake,
    pub runner_id: Snowflake,
    pub status: RelationStatus,
    /// Coach-assigned label, unique per coach
    pub nickname: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Relationship {
    /// A fresh invitation sent by the coach
    pub fn invite(id: Snowflake, coach_id: Snowflake, runner_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            coach_id,
            runner_id,
            status: RelationStatus::InvitedByCoach,
            nickname: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_established(&self) -> bool {
        self.status == RelationStatus::Established
    }

    /// Name the coach sees for the runner: the nickname, or else the runner's username
    pub fn displayed_name<'a>(&'a self, runner_username: &'a str) -> &'a str {
        self.nickname.as_deref().unwrap_or(runner_username)
    }

    /// Whether the coach may remove this relationship
    pub fn is_deletable_by_coach(&self) -> bool {
        self.status != RelationStatus::InvitedByRunner
    }

    /// Runner accepts a pending coach invitation
    pub fn accept(&mut self) -> Result<(), DomainError> {
        self.transition(RelationStatus::InvitedByCoach, RelationStatus::Established)
    }

    /// Runner turns down a pending coach invitation
    pub fn decline(&mut self) -> Result<(), DomainError> {
        self.transition(RelationStatus::InvitedByCoach, RelationStatus::Revoked)
    }

    /// Set or clear the nickname. Blank input clears it.
    pub fn set_nickname(&mut self, nickname: Option<String>) {
        self.nickname = nickname
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self.updated_at = Utc::now();
    }

    fn transition(&mut self, from: RelationStatus, to: RelationStatus) -> Result<(), DomainError> {
        if self.status != from {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }
}
