//! Capability set - which sides of a coaching relationship a user may take

use bitflags::bitflags;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A single enumerated role a user can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Runner,
    Coach,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Runner => "runner",
            Self::Coach => "coach",
        }
    }

    /// The capability bit granted by this role
    pub fn capability(self) -> Capabilities {
        match self {
            Self::Runner => Capabilities::RUNNER,
            Self::Coach => Capabilities::COACH,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Set of roles held by a user
    ///
    /// Stored as INTEGER in the database, serialized as a list of role names in JSON.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u32 {
        const RUNNER = 1 << 0;
        const COACH  = 1 << 1;
    }
}

impl Capabilities {
    #[inline]
    pub fn has(&self, role: Role) -> bool {
        self.contains(role.capability())
    }

    pub fn roles(&self) -> Vec<Role> {
        [Role::Runner, Role::Coach]
            .into_iter()
            .filter(|role| self.has(*role))
            .collect()
    }

    /// Raw bits for database storage
    #[inline]
    pub fn to_i32(self) -> i32 {
        self.bits() as i32
    }

    /// Build from database bits, ignoring unknown ones
    #[inline]
    pub fn from_i32(bits: i32) -> Self {
        Self::from_bits_truncate(bits as u32)
    }
}

impl From<Role> for Capabilities {
    fn from(role: Role) -> Self {
        role.capability()
    }
}

impl FromIterator<Role> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Capabilities::empty(), |acc, role| acc | role.capability())
    }
}

impl Serialize for Capabilities {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.roles())
    }
}

impl<'de> Deserialize<'de> for Capabilities {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Vec::<Role>::deserialize(deserializer).map(|roles| roles.into_iter().collect())
    }
}
