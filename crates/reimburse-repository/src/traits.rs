//! Repository trait definitions.
//!
//! "No matching row" is never an error here: reads return empty or `None`,
//! mutations return `false`.

use crate::query::{ReceiptFilter, UserFilter};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reimburse_core::{
    DepartmentId, NewReceipt, NewUser, ReceiptApproval, ReceiptId, ReceiptUpdate, ReceiptView,
    ReimburseResult, UserId, UserRole, UserView,
};

/// Receipt repository trait.
#[async_trait]
pub trait ReceiptRepository: Send + Sync {
    /// Creates a receipt in `under_review`, stamped with the current time.
    async fn create_receipt(&self, receipt: NewReceipt) -> ReimburseResult<ReceiptId>;

    /// Lists receipts matching the filter, shaped for callers.
    async fn get_receipts(&self, filter: ReceiptFilter) -> ReimburseResult<Vec<ReceiptView>>;

    /// Overwrites every caller-editable field of a receipt.
    async fn update_receipt(&self, id: ReceiptId, update: ReceiptUpdate) -> ReimburseResult<bool>;

    /// Deletes a receipt by ID.
    async fn delete_receipt(&self, id: ReceiptId) -> ReimburseResult<bool>;

    /// Records an admin's decision. The only way a receipt leaves review.
    async fn update_receipt_approval(
        &self,
        id: ReceiptId,
        approval: ReceiptApproval,
    ) -> ReimburseResult<bool>;
}

/// User repository trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a user under a freshly generated six-digit id.
    async fn create_user(&self, user: NewUser) -> ReimburseResult<UserId>;

    /// Lists users matching the filter.
    async fn get_users(&self, filter: UserFilter) -> ReimburseResult<Vec<UserView>>;

    /// Returns the stored password hash, `None` for an unknown user.
    async fn get_hashed_password(&self, id: UserId) -> ReimburseResult<Option<String>>;

    /// Stores a one-time code and its expiry.
    async fn update_otp(
        &self,
        id: UserId,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> ReimburseResult<bool>;

    /// True iff the code matches and has not expired. Does not consume it.
    async fn verify_otp(&self, id: UserId, code: &str) -> ReimburseResult<bool>;

    async fn update_password(&self, id: UserId, password_hashed: &str) -> ReimburseResult<bool>;

    async fn update_name(&self, id: UserId, user_name: &str) -> ReimburseResult<bool>;

    async fn update_department(
        &self,
        id: UserId,
        department_id: DepartmentId,
    ) -> ReimburseResult<bool>;

    async fn update_role(&self, id: UserId, role: UserRole) -> ReimburseResult<bool>;

    /// Sets or clears the profile image.
    async fn update_profile_image(
        &self,
        id: UserId,
        profile_image_url: Option<&str>,
    ) -> ReimburseResult<bool>;

    async fn delete_user_by_id(&self, id: UserId) -> ReimburseResult<bool>;

    async fn delete_user_by_email(&self, email: &str) -> ReimburseResult<bool>;
}
