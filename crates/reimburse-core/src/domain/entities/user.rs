//! User inputs and the user response shape.

use super::receipt::DepartmentSummary;
use crate::domain::value_objects::UserRole;
use crate::validation::rules;
use crate::{DepartmentId, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Fields needed to register a user. The id is assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Login email, unique across users.
    #[validate(email, length(max = 255))]
    pub email: String,

    /// Password hash produced by the caller (never the raw password).
    #[serde(skip_serializing)]
    #[validate(custom(function = "rules::not_blank"))]
    pub password_hashed: String,

    /// Display name.
    #[validate(custom(function = "rules::not_blank"), length(max = 100))]
    pub user_name: String,

    /// Home department.
    pub department_id: DepartmentId,

    /// Role, `user` unless stated otherwise.
    #[serde(default)]
    pub role: UserRole,
}

impl NewUser {
    /// Creates a regular user.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password_hashed: impl Into<String>,
        user_name: impl Into<String>,
        department_id: DepartmentId,
    ) -> Self {
        Self {
            email: email.into(),
            password_hashed: password_hashed.into(),
            user_name: user_name.into(),
            department_id,
            role: UserRole::User,
        }
    }

    /// Sets the role.
    #[must_use]
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }
}

/// User as returned to callers. Password hash and OTP fields never leave
/// the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub user_id: UserId,
    pub email: String,
    pub user_name: String,
    pub department: DepartmentSummary,
    pub role: UserRole,
    pub profile_image_url: Option<String>,
}
