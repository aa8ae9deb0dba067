//! User role value object.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Role of an account.
///
/// Roles this crate does not know are read back as [`UserRole::Other`]
/// with the stored text unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(into = "String", from = "String")]
pub enum UserRole {
    /// Employee submitting receipts.
    #[default]
    User,
    /// Reviewer who approves or rejects receipts.
    Admin,
    /// Any other stored role.
    Other(String),
}

impl UserRole {
    /// Maps column text to a role. Known values match case-insensitively.
    #[must_use]
    pub fn from_column(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "user" => Self::User,
            "admin" | "administrator" => Self::Admin,
            _ => Self::Other(value.to_string()),
        }
    }

    /// Returns the value stored in the `role` column.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Other(value) => value,
        }
    }

    /// Checks if the role may act on receipts of other users.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_column(s))
    }
}

impl From<String> for UserRole {
    fn from(value: String) -> Self {
        Self::from_column(&value)
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}
