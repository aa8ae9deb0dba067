//! UserDao trait: low-level user data access abstraction.
//!
//! [`UserRepository`] uses a `UserDao` to fulfil domain-level operations.
//!
//! [`UserRepository`]: crate::traits::UserRepository

use crate::query::UserFilter;
use crate::shape::UserRow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reimburse_core::{DepartmentId, NewUser, ReimburseResult, UserId, UserRole};

/// Low-level user data access object.
///
/// Mutations return `true` when a row matched the id (or email).
#[async_trait]
pub trait UserDao: Send + Sync {
    /// Inserts a user under a caller-chosen id.
    ///
    /// A taken id fails with a `DuplicateKey` on the primary key.
    async fn insert(&self, id: UserId, user: &NewUser) -> ReimburseResult<()>;

    /// Fetches joined rows matching the filter.
    async fn find_rows(&self, filter: &UserFilter) -> ReimburseResult<Vec<UserRow>>;

    /// Returns the stored password hash.
    async fn find_password_hash(&self, id: UserId) -> ReimburseResult<Option<String>>;

    async fn update_otp(
        &self,
        id: UserId,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> ReimburseResult<bool>;

    /// Checks the code against the stored one and its expiry relative to `now`.
    async fn verify_otp(&self, id: UserId, code: &str, now: DateTime<Utc>)
        -> ReimburseResult<bool>;

    async fn update_password(&self, id: UserId, password_hashed: &str) -> ReimburseResult<bool>;

    async fn update_name(&self, id: UserId, user_name: &str) -> ReimburseResult<bool>;

    async fn update_department(
        &self,
        id: UserId,
        department_id: DepartmentId,
    ) -> ReimburseResult<bool>;

    async fn update_role(&self, id: UserId, role: UserRole) -> ReimburseResult<bool>;

    async fn update_profile_image(
        &self,
        id: UserId,
        profile_image_url: Option<&str>,
    ) -> ReimburseResult<bool>;

    async fn delete_by_id(&self, id: UserId) -> ReimburseResult<bool>;

    async fn delete_by_email(&self, email: &str) -> ReimburseResult<bool>;
}
