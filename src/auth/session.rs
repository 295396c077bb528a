//! Session and profile types for the signed-in user.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a portal user.
///
/// User identifiers are assigned server-side and treated as opaque strings
/// by the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a user identifier from a server-assigned value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Portal role controlling which dashboard a user lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Institution administrator.
    Admin,
    /// Institution staff member.
    Staff,
    /// Recruitment agent.
    Agent,
    /// Partner company account.
    Company,
    /// Content creator account.
    Creator,
    /// Enrolled or applying student.
    Student,
    /// Teaching staff.
    Teacher,
}

impl Role {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Agent => "agent",
            Self::Company => "company",
            Self::Creator => "creator",
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "staff" => Ok(Self::Staff),
            "agent" => Ok(Self::Agent),
            "company" => Ok(Self::Company),
            "creator" => Ok(Self::Creator),
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Error returned when a role string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown portal role: {0}")]
pub struct ParseRoleError(pub String);

/// The signed-in user's profile slice.
///
/// Established once after login and shared read-only with every consumer
/// that needs the current identity (channel setup, notification feed,
/// comment authorship).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user_id: UserId,
    display_name: String,
    role: Role,
}

impl Session {
    /// Creates a session from login response data.
    #[must_use]
    pub fn new(user_id: UserId, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            role,
        }
    }

    /// Returns the signed-in user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the display name shown on comments authored by this user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the portal role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}
