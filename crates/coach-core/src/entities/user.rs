//! User entity - an account that can coach, run, or both

use chrono::{DateTime, Utc};

use crate::value_objects::{Capabilities, Role, Snowflake};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub capabilities: Capabilities,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a user registered with a single role
    pub fn new(id: Snowflake, username: String, email: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            capabilities: role.capability(),
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_coach(&self) -> bool {
        self.capabilities.has(Role::Coach)
    }

    #[inline]
    pub fn is_runner(&self) -> bool {
        self.capabilities.has(Role::Runner)
    }

    /// Grant an additional role
    pub fn grant(&mut self, role: Role) {
        if !self.capabilities.has(role) {
            self.capabilities |= role.capability();
            self.updated_at = Utc::now();
        }
    }
}
