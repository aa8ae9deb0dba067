//! MySQL implementation of [`ReceiptDao`].

use crate::dao::ReceiptDao;
use crate::query::{bind_all, ReceiptFilter, RECEIPT_QUERY};
use crate::shape::ReceiptRow;
use crate::DatabasePoolInterface;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reimburse_core::{
    NewReceipt, ReceiptApproval, ReceiptId, ReceiptStatus, ReceiptUpdate, ReimburseError,
    ReimburseResult,
};
use std::sync::Arc;
use tracing::debug;

/// MySQL-backed receipt DAO.
#[derive(Clone)]
pub struct MySqlReceiptDaoImpl {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlReceiptDaoImpl {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReceiptDao for MySqlReceiptDaoImpl {
    async fn insert(
        &self,
        receipt: &NewReceipt,
        request_date: DateTime<Utc>,
    ) -> ReimburseResult<ReceiptId> {
        debug!("Inserting receipt for requester {}", receipt.requester_id);

        let result = sqlx::query(
            r"
            INSERT INTO receipt (requester_id, department_id, account_id, receipt_date,
                                 description, amount, request_date, status, receipt_image_url)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(receipt.requester_id.into_inner())
        .bind(i32::from(receipt.department_id))
        .bind(i32::from(receipt.account_id))
        .bind(receipt.receipt_date)
        .bind(&receipt.description)
        .bind(receipt.amount)
        .bind(request_date)
        .bind(String::from(ReceiptStatus::UnderReview))
        .bind(&receipt.receipt_image_url)
        .execute(self.pool.inner())
        .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| ReimburseError::internal("receipt id out of range"))?;
        Ok(ReceiptId::new(id))
    }

    async fn find_rows(&self, filter: &ReceiptFilter) -> ReimburseResult<Vec<ReceiptRow>> {
        let built = RECEIPT_QUERY.build(&filter.to_params(), filter.sorted.as_deref());
        debug!(sql = %built.sql, params = built.params.len(), "Finding receipts");

        let rows = bind_all(sqlx::query_as::<_, ReceiptRow>(&built.sql), &built.params)
            .fetch_all(self.pool.inner())
            .await?;
        Ok(rows)
    }

    async fn update(&self, id: ReceiptId, receipt: &ReceiptUpdate) -> ReimburseResult<bool> {
        debug!("Updating receipt {}", id);

        let result = sqlx::query(
            r"
            UPDATE receipt
            SET requester_id = ?, department_id = ?, account_id = ?, receipt_date = ?,
                description = ?, amount = ?, receipt_image_url = ?
            WHERE receipt_id = ?
            ",
        )
        .bind(receipt.requester_id.into_inner())
        .bind(i32::from(receipt.department_id))
        .bind(i32::from(receipt.account_id))
        .bind(receipt.receipt_date)
        .bind(&receipt.description)
        .bind(receipt.amount)
        .bind(&receipt.receipt_image_url)
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: ReceiptId) -> ReimburseResult<bool> {
        debug!("Deleting receipt {}", id);

        let result = sqlx::query("DELETE FROM receipt WHERE receipt_id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_approval(
        &self,
        id: ReceiptId,
        approval: &ReceiptApproval,
    ) -> ReimburseResult<bool> {
        debug!("Recording {} on receipt {}", approval.decision, id);

        let result = sqlx::query(
            r"
            UPDATE receipt
            SET status = ?, admin_id = ?, response_date = ?,
                response_description = ?, transfer_image_url = ?
            WHERE receipt_id = ?
            ",
        )
        .bind(String::from(approval.decision.status()))
        .bind(approval.admin_id.into_inner())
        .bind(approval.response_date)
        .bind(&approval.response_description)
        .bind(&approval.transfer_image_url)
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlReceiptDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlReceiptDaoImpl").finish_non_exhaustive()
    }
}
