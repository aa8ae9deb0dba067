//! ReceiptDao trait: low-level receipt data access abstraction.

use crate::query::ReceiptFilter;
use crate::shape::ReceiptRow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reimburse_core::{NewReceipt, ReceiptApproval, ReceiptId, ReceiptUpdate, ReimburseResult};

/// Low-level receipt data access object.
#[async_trait]
pub trait ReceiptDao: Send + Sync {
    /// Inserts an `under_review` receipt stamped with `request_date`.
    async fn insert(
        &self,
        receipt: &NewReceipt,
        request_date: DateTime<Utc>,
    ) -> ReimburseResult<ReceiptId>;

    /// Fetches joined rows matching the filter, in the filter's order.
    async fn find_rows(&self, filter: &ReceiptFilter) -> ReimburseResult<Vec<ReceiptRow>>;

    /// Overwrites the caller-editable fields. Returns `true` if a row matched.
    async fn update(&self, id: ReceiptId, receipt: &ReceiptUpdate) -> ReimburseResult<bool>;

    /// Deletes a receipt. Returns `true` if deleted.
    async fn delete(&self, id: ReceiptId) -> ReimburseResult<bool>;

    /// Records an admin decision in one statement.
    async fn update_approval(
        &self,
        id: ReceiptId,
        approval: &ReceiptApproval,
    ) -> ReimburseResult<bool>;
}
