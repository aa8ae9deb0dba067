//! MySQL implementation of [`UserDao`].

use crate::dao::UserDao;
use crate::query::{bind_all, UserFilter, USER_QUERY};
use crate::shape::UserRow;
use crate::DatabasePoolInterface;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reimburse_core::{DepartmentId, NewUser, ReimburseResult, UserId, UserRole};
use std::sync::Arc;
use tracing::debug;

/// MySQL-backed user DAO.
#[derive(Clone)]
pub struct MySqlUserDaoImpl {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlUserDaoImpl {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn update_column<T>(&self, id: UserId, sql: &str, value: T) -> ReimburseResult<bool>
    where
        T: for<'q> sqlx::Encode<'q, sqlx::MySql> + sqlx::Type<sqlx::MySql> + Send + 'static,
    {
        let result = sqlx::query(sql)
            .bind(value)
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserDao for MySqlUserDaoImpl {
    async fn insert(&self, id: UserId, user: &NewUser) -> ReimburseResult<()> {
        debug!("Inserting user {} ({})", id, user.email);

        sqlx::query(
            r"
            INSERT INTO `user` (user_id, email, password_hashed, user_name, department_id, role)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(id.into_inner())
        .bind(&user.email)
        .bind(&user.password_hashed)
        .bind(&user.user_name)
        .bind(i32::from(user.department_id))
        .bind(user.role.as_str())
        .execute(self.pool.inner())
        .await?;

        Ok(())
    }

    async fn find_rows(&self, filter: &UserFilter) -> ReimburseResult<Vec<UserRow>> {
        let built = USER_QUERY.build(&filter.to_params(), filter.sorted.as_deref());
        debug!(sql = %built.sql, params = built.params.len(), "Finding users");

        let rows = bind_all(sqlx::query_as::<_, UserRow>(&built.sql), &built.params)
            .fetch_all(self.pool.inner())
            .await?;
        Ok(rows)
    }

    async fn find_password_hash(&self, id: UserId) -> ReimburseResult<Option<String>> {
        debug!("Fetching password hash for user {}", id);

        let hash: Option<String> =
            sqlx::query_scalar("SELECT password_hashed FROM `user` WHERE user_id = ?")
                .bind(id.into_inner())
                .fetch_optional(self.pool.inner())
                .await?;
        Ok(hash)
    }

    async fn update_otp(
        &self,
        id: UserId,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> ReimburseResult<bool> {
        debug!("Storing OTP for user {}", id);

        let result = sqlx::query(
            "UPDATE `user` SET otp_code = ?, otp_expires_at = ? WHERE user_id = ?",
        )
        .bind(code)
        .bind(expires_at)
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn verify_otp(
        &self,
        id: UserId,
        code: &str,
        now: DateTime<Utc>,
    ) -> ReimburseResult<bool> {
        debug!("Verifying OTP for user {}", id);

        let found: Option<i64> = sqlx::query_scalar(
            r"
            SELECT 1 FROM `user`
            WHERE user_id = ? AND otp_code = ? AND otp_expires_at > ?
            LIMIT 1
            ",
        )
        .bind(id.into_inner())
        .bind(code)
        .bind(now)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(found.is_some())
    }

    async fn update_password(&self, id: UserId, password_hashed: &str) -> ReimburseResult<bool> {
        debug!("Updating password for user {}", id);
        self.update_column(
            id,
            "UPDATE `user` SET password_hashed = ? WHERE user_id = ?",
            password_hashed.to_string(),
        )
        .await
    }

    async fn update_name(&self, id: UserId, user_name: &str) -> ReimburseResult<bool> {
        debug!("Updating name for user {}", id);
        self.update_column(
            id,
            "UPDATE `user` SET user_name = ? WHERE user_id = ?",
            user_name.to_string(),
        )
        .await
    }

    async fn update_department(
        &self,
        id: UserId,
        department_id: DepartmentId,
    ) -> ReimburseResult<bool> {
        debug!("Moving user {} to department {}", id, department_id);
        self.update_column(
            id,
            "UPDATE `user` SET department_id = ? WHERE user_id = ?",
            i32::from(department_id),
        )
        .await
    }

    async fn update_role(&self, id: UserId, role: UserRole) -> ReimburseResult<bool> {
        debug!("Setting role {} on user {}", role, id);
        self.update_column(
            id,
            "UPDATE `user` SET role = ? WHERE user_id = ?",
            String::from(role),
        )
        .await
    }

    async fn update_profile_image(
        &self,
        id: UserId,
        profile_image_url: Option<&str>,
    ) -> ReimburseResult<bool> {
        debug!("Updating profile image for user {}", id);
        self.update_column(
            id,
            "UPDATE `user` SET profile_image_url = ? WHERE user_id = ?",
            profile_image_url.map(str::to_string),
        )
        .await
    }

    async fn delete_by_id(&self, id: UserId) -> ReimburseResult<bool> {
        debug!("Deleting user {}", id);

        let result = sqlx::query("DELETE FROM `user` WHERE user_id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_email(&self, email: &str) -> ReimburseResult<bool> {
        debug!("Deleting user by email {}", email);

        let result = sqlx::query("DELETE FROM `user` WHERE email = ?")
            .bind(email)
            .execute(self.pool.inner())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlUserDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserDaoImpl").finish_non_exhaustive()
    }
}
