//! Assembles the repository stack from configuration.
//!
//! ```text
//! AppConfig
//!   ├─ database  → DatabasePool ─┬─ MySqlReceiptDaoImpl → ReceiptRepositoryImpl
//!   │                            └─ MySqlUserDaoImpl    → UserRepositoryImpl
//!   ├─ security  → AesGcmAccountCipher (receipts only)
//!   └─ identity  → RetryPolicy (user id collisions)
//! ```

use crate::dao::{MySqlReceiptDaoImpl, MySqlUserDaoImpl};
use crate::pool::{DatabasePool, DatabasePoolInterface};
use crate::r#impl::{ReceiptRepositoryImpl, UserRepositoryImpl};
use crate::traits::{ReceiptRepository, UserRepository};
use reimburse_config::{AppConfig, IdentityConfig};
use reimburse_core::ReimburseResult;
use reimburse_security::{AccountNumberCipher, AesGcmAccountCipher};
use std::sync::Arc;
use tracing::info;

/// The wired repositories plus the pool they share.
#[derive(Clone)]
pub struct RepositoryModule {
    pool: Arc<dyn DatabasePoolInterface>,
    receipts: Arc<dyn ReceiptRepository>,
    users: Arc<dyn UserRepository>,
}

impl RepositoryModule {
    /// Connects to the configured database and wires every repository.
    pub async fn build(config: &AppConfig) -> ReimburseResult<Self> {
        let cipher = AesGcmAccountCipher::from_config(&config.security)?;
        let pool = DatabasePool::new(&config.database).await?;
        info!("Repository module ready ({})", config.app.environment);
        Ok(Self::from_parts(
            Arc::new(pool),
            Arc::new(cipher),
            &config.identity,
        ))
    }

    /// Wires repositories over an existing pool and cipher.
    #[must_use]
    pub fn from_parts(
        pool: Arc<dyn DatabasePoolInterface>,
        cipher: Arc<dyn AccountNumberCipher>,
        identity: &IdentityConfig,
    ) -> Self {
        let receipts = ReceiptRepositoryImpl::new(
            Arc::new(MySqlReceiptDaoImpl::new(Arc::clone(&pool))),
            cipher,
        );
        let users = UserRepositoryImpl::with_identity_config(
            Arc::new(MySqlUserDaoImpl::new(Arc::clone(&pool))),
            identity,
        );

        Self {
            pool,
            receipts: Arc::new(receipts),
            users: Arc::new(users),
        }
    }

    #[must_use]
    pub fn pool(&self) -> Arc<dyn DatabasePoolInterface> {
        Arc::clone(&self.pool)
    }

    #[must_use]
    pub fn receipts(&self) -> Arc<dyn ReceiptRepository> {
        Arc::clone(&self.receipts)
    }

    #[must_use]
    pub fn users(&self) -> Arc<dyn UserRepository> {
        Arc::clone(&self.users)
    }
}

impl std::fmt::Debug for RepositoryModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryModule").finish_non_exhaustive()
    }
}
