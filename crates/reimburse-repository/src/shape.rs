//! Flat joined rows and their nested response shapes.

use chrono::{DateTime, NaiveDate, Utc};
use reimburse_core::{
    AccountSummary, AdminSummary, ApprovalView, BankSummary, DepartmentSummary, ReceiptId,
    ReceiptStatus, ReceiptView, ReimburseResult, RequesterSummary, UserId, UserRole, UserView,
};
use reimburse_security::AccountNumberCipher;
use rust_decimal::Decimal;
use sqlx::FromRow;

/// One row of [`crate::query::RECEIPT_QUERY`].
#[derive(Debug, Clone, FromRow)]
pub struct ReceiptRow {
    pub receipt_id: i64,
    pub receipt_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub request_date: DateTime<Utc>,
    pub status: String,
    pub receipt_image_url: Option<String>,
    pub user_id: i32,
    pub user_name: String,
    pub email: String,
    pub department_id: i32,
    pub department_name: String,
    pub account_id: i32,
    pub account_title: String,
    pub account_holder_name: String,
    pub account_number_encrypted: String,
    pub bank_id: i32,
    pub bank_name: String,
    pub admin_id: Option<i32>,
    pub admin_name: Option<String>,
    pub admin_email: Option<String>,
    pub response_date: Option<DateTime<Utc>>,
    pub transfer_image_url: Option<String>,
    pub response_description: Option<String>,
}

/// One row of [`crate::query::USER_QUERY`].
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub user_id: i32,
    pub email: String,
    pub user_name: String,
    pub department_id: i32,
    pub department_name: String,
    pub role: String,
    pub profile_image_url: Option<String>,
}

/// Nests a receipt row, decrypting the account number.
///
/// Decryption failures propagate as
/// [`reimburse_core::ReimburseError::Decryption`]. Status text is carried
/// through even when it is not one of the known values.
pub fn shape_receipt(
    row: ReceiptRow,
    cipher: &dyn AccountNumberCipher,
) -> ReimburseResult<ReceiptView> {
    let status = ReceiptStatus::from(row.status);
    let account_number = cipher.decrypt(&row.account_number_encrypted)?;

    let admin = row.admin_id.map(|admin_id| AdminSummary {
        admin_id: UserId::new(admin_id),
        admin_name: row.admin_name.unwrap_or_default(),
        admin_email: row.admin_email.unwrap_or_default(),
    });

    Ok(ReceiptView {
        receipt_id: ReceiptId::new(row.receipt_id),
        requester: RequesterSummary {
            user_id: UserId::new(row.user_id),
            user_name: row.user_name,
            email: row.email,
        },
        department: DepartmentSummary {
            department_id: row.department_id.into(),
            department_name: row.department_name,
        },
        account: AccountSummary {
            account_id: row.account_id.into(),
            account_title: row.account_title,
            account_holder_name: row.account_holder_name,
            account_number,
            bank: BankSummary {
                bank_id: row.bank_id.into(),
                bank_name: row.bank_name,
            },
        },
        receipt_date: row.receipt_date,
        description: row.description,
        amount: row.amount,
        request_date: row.request_date,
        status,
        receipt_image_url: row.receipt_image_url,
        approval: ApprovalView {
            admin,
            response_date: row.response_date,
            transfer_image_url: row.transfer_image_url,
            response_description: row.response_description,
        },
    })
}

/// Nests a user row.
#[must_use]
pub fn shape_user(row: UserRow) -> UserView {
    UserView {
        user_id: UserId::new(row.user_id),
        email: row.email,
        user_name: row.user_name,
        department: DepartmentSummary {
            department_id: row.department_id.into(),
            department_name: row.department_name,
        },
        role: UserRole::from(row.role),
        profile_image_url: row.profile_image_url,
    }
}
