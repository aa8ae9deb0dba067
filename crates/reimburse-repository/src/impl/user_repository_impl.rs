//! `UserRepositoryImpl`: Repository layer implementation for users.
//!
//! Implements the [`UserRepository`] domain interface on top of a
//! [`UserDao`]. User ids are chosen here, not by the database:
//!
//! ```text
//! create_user
//!   ↓ UserIdGenerator::next_id
//! UserDao::insert ── duplicate PRIMARY ──▶ new id, retry (bounded by RetryPolicy)
//!   │             └─ duplicate email ───▶ Conflict
//!   ↓
//! UserId
//! ```
//!
//! [`UserRepository`]: crate::traits::UserRepository
//! [`UserDao`]: crate::dao::UserDao

use crate::dao::UserDao;
use crate::id_generator::{RandomUserIdGenerator, UserIdGenerator};
use crate::query::UserFilter;
use crate::shape::shape_user;
use crate::traits::UserRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reimburse_config::IdentityConfig;
use reimburse_core::{
    rules, DepartmentId, NewUser, ReimburseError, ReimburseResult, UserId, UserRole, UserView,
    ValidateExt,
};
use reimburse_resilience::{RetryError, RetryPolicy};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Repository implementation that orchestrates [`UserDao`] access.
///
/// [`UserDao`]: crate::dao::UserDao
pub struct UserRepositoryImpl {
    user_dao: Arc<dyn UserDao>,
    id_generator: Arc<dyn UserIdGenerator>,
    identity_retry: RetryPolicy,
}

impl UserRepositoryImpl {
    /// Creates a repository with random ids and the default identity retry bound.
    #[must_use]
    pub fn new(user_dao: Arc<dyn UserDao>) -> Self {
        Self::with_identity_config(user_dao, &IdentityConfig::default())
    }

    /// Creates a repository whose id collision retries follow `config`.
    #[must_use]
    pub fn with_identity_config(user_dao: Arc<dyn UserDao>, config: &IdentityConfig) -> Self {
        Self {
            user_dao,
            id_generator: Arc::new(RandomUserIdGenerator),
            identity_retry: identity_retry_policy(config),
        }
    }

    /// Replaces the id source.
    #[must_use]
    pub fn with_id_generator(mut self, id_generator: Arc<dyn UserIdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    /// Replaces the id collision retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.identity_retry = policy;
        self
    }
}

/// Maps the `identity` config section onto a retry policy.
#[must_use]
pub fn identity_retry_policy(config: &IdentityConfig) -> RetryPolicy {
    RetryPolicy {
        max_attempts: config.max_attempts,
        initial_delay: config.initial_delay(),
        max_delay: config.max_delay(),
        multiplier: config.multiplier,
        jitter: config.jitter,
    }
}

fn not_blank(field: &str, value: &str) -> ReimburseResult<()> {
    rules::not_blank(value)
        .map_err(|_| ReimburseError::validation(format!("{}: must not be blank", field)))
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create_user(&self, user: NewUser) -> ReimburseResult<UserId> {
        debug!("Repository: create_user {}", user.email);
        user.validate_request()?;

        let user = &user;
        let result = self
            .identity_retry
            .execute_if(
                |attempt| {
                    let id = self.id_generator.next_id();
                    async move {
                        debug!("Inserting user with id {} (attempt {})", id, attempt + 1);
                        self.user_dao.insert(id, user).await.map(|()| id)
                    }
                },
                |err: &ReimburseError| {
                    let collision = err.is_primary_key_collision();
                    if collision {
                        warn!("User id collision, regenerating: {}", err);
                    }
                    collision
                },
            )
            .await;

        match result {
            Ok(id) => {
                info!("Created user {}", id);
                Ok(id)
            }
            Err(RetryError::Exhausted { attempts, .. }) => {
                warn!("Gave up allocating a user id after {} attempts", attempts);
                Err(ReimburseError::IdentityExhausted {
                    resource_type: "user",
                    attempts,
                })
            }
            Err(RetryError::Aborted(ReimburseError::DuplicateKey { key, .. })) => Err(
                ReimburseError::conflict(format!("User already exists (duplicate {})", key)),
            ),
            Err(RetryError::Aborted(err)) => Err(err),
        }
    }

    async fn get_users(&self, filter: UserFilter) -> ReimburseResult<Vec<UserView>> {
        debug!("Repository: get_users {:?}", filter);
        Ok(self
            .user_dao
            .find_rows(&filter)
            .await?
            .into_iter()
            .map(shape_user)
            .collect())
    }

    async fn get_hashed_password(&self, id: UserId) -> ReimburseResult<Option<String>> {
        debug!("Repository: get_hashed_password {}", id);
        self.user_dao.find_password_hash(id).await
    }

    async fn update_otp(
        &self,
        id: UserId,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> ReimburseResult<bool> {
        debug!("Repository: update_otp {}", id);
        rules::otp_code(code)
            .map_err(|e| ReimburseError::validation(format!("otp_code: {}", e.code)))?;
        self.user_dao.update_otp(id, code, expires_at).await
    }

    async fn verify_otp(&self, id: UserId, code: &str) -> ReimburseResult<bool> {
        debug!("Repository: verify_otp {}", id);
        self.user_dao.verify_otp(id, code, Utc::now()).await
    }

    async fn update_password(&self, id: UserId, password_hashed: &str) -> ReimburseResult<bool> {
        debug!("Repository: update_password {}", id);
        not_blank("password_hashed", password_hashed)?;
        self.user_dao.update_password(id, password_hashed).await
    }

    async fn update_name(&self, id: UserId, user_name: &str) -> ReimburseResult<bool> {
        debug!("Repository: update_name {}", id);
        not_blank("user_name", user_name)?;
        self.user_dao.update_name(id, user_name).await
    }

    async fn update_department(
        &self,
        id: UserId,
        department_id: DepartmentId,
    ) -> ReimburseResult<bool> {
        debug!("Repository: update_department {} -> {}", id, department_id);
        self.user_dao.update_department(id, department_id).await
    }

    async fn update_role(&self, id: UserId, role: UserRole) -> ReimburseResult<bool> {
        debug!("Repository: update_role {} -> {}", id, role);
        self.user_dao.update_role(id, role).await
    }

    async fn update_profile_image(
        &self,
        id: UserId,
        profile_image_url: Option<&str>,
    ) -> ReimburseResult<bool> {
        debug!("Repository: update_profile_image {}", id);
        self.user_dao.update_profile_image(id, profile_image_url).await
    }

    async fn delete_user_by_id(&self, id: UserId) -> ReimburseResult<bool> {
        debug!("Repository: delete_user_by_id {}", id);
        self.user_dao.delete_by_id(id).await
    }

    async fn delete_user_by_email(&self, email: &str) -> ReimburseResult<bool> {
        debug!("Repository: delete_user_by_email {}", email);
        self.user_dao.delete_by_email(email).await
    }
}

impl std::fmt::Debug for UserRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRepositoryImpl")
            .field("identity_retry", &self.identity_retry)
            .finish_non_exhaustive()
    }
}
