//! `ReceiptRepositoryImpl`: Repository layer implementation for receipts.
//!
//! Validates input, stamps server-side fields and shapes DAO rows,
//! decrypting account numbers on the way out.

use crate::dao::ReceiptDao;
use crate::query::ReceiptFilter;
use crate::shape::shape_receipt;
use crate::traits::ReceiptRepository;
use async_trait::async_trait;
use chrono::Utc;
use reimburse_core::{
    NewReceipt, ReceiptApproval, ReceiptId, ReceiptUpdate, ReceiptView, ReimburseResult,
    ValidateExt,
};
use reimburse_security::AccountNumberCipher;
use std::sync::Arc;
use tracing::debug;

/// Repository implementation that orchestrates [`ReceiptDao`] access.
pub struct ReceiptRepositoryImpl {
    receipt_dao: Arc<dyn ReceiptDao>,
    cipher: Arc<dyn AccountNumberCipher>,
}

impl ReceiptRepositoryImpl {
    #[must_use]
    pub fn new(receipt_dao: Arc<dyn ReceiptDao>, cipher: Arc<dyn AccountNumberCipher>) -> Self {
        Self {
            receipt_dao,
            cipher,
        }
    }
}

#[async_trait]
impl ReceiptRepository for ReceiptRepositoryImpl {
    async fn create_receipt(&self, receipt: NewReceipt) -> ReimburseResult<ReceiptId> {
        debug!("Repository: create_receipt for {}", receipt.requester_id);
        receipt.validate_request()?;
        self.receipt_dao.insert(&receipt, Utc::now()).await
    }

    async fn get_receipts(&self, filter: ReceiptFilter) -> ReimburseResult<Vec<ReceiptView>> {
        debug!("Repository: get_receipts {:?}", filter);
        self.receipt_dao
            .find_rows(&filter)
            .await?
            .into_iter()
            .map(|row| shape_receipt(row, self.cipher.as_ref()))
            .collect()
    }

    async fn update_receipt(&self, id: ReceiptId, update: ReceiptUpdate) -> ReimburseResult<bool> {
        debug!("Repository: update_receipt {}", id);
        update.validate_request()?;
        self.receipt_dao.update(id, &update).await
    }

    async fn delete_receipt(&self, id: ReceiptId) -> ReimburseResult<bool> {
        debug!("Repository: delete_receipt {}", id);
        self.receipt_dao.delete(id).await
    }

    async fn update_receipt_approval(
        &self,
        id: ReceiptId,
        approval: ReceiptApproval,
    ) -> ReimburseResult<bool> {
        debug!(
            "Repository: update_receipt_approval {} -> {} by {}",
            id, approval.decision, approval.admin_id
        );
        approval.validate_request()?;
        self.receipt_dao.update_approval(id, &approval).await
    }
}

impl std::fmt::Debug for ReceiptRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiptRepositoryImpl").finish_non_exhaustive()
    }
}
