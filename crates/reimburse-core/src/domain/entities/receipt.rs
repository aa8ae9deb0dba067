//! Receipt inputs and the nested receipt response shape.

use crate::domain::value_objects::{ApprovalDecision, ReceiptStatus};
use crate::validation::rules;
use crate::{AccountId, BankId, DepartmentId, ReceiptId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Caller-supplied fields of a receipt.
///
/// `request_date` and `status` are not part of the input: the repository
/// stamps them at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewReceipt {
    /// User asking to be reimbursed.
    pub requester_id: UserId,
    /// Department the expense is booked against.
    pub department_id: DepartmentId,
    /// Bank account the money goes to.
    pub account_id: AccountId,
    /// Date printed on the receipt.
    pub receipt_date: NaiveDate,
    /// Free-text description.
    #[validate(custom(function = "rules::not_blank"), length(max = 1000))]
    pub description: String,
    /// Amount to reimburse.
    #[validate(custom(function = "rules::non_negative_amount"))]
    pub amount: Decimal,
    /// Uploaded receipt image.
    #[validate(length(max = 512))]
    pub receipt_image_url: Option<String>,
}

/// Full-field receipt update; carries the same fields as a new receipt.
pub type ReceiptUpdate = NewReceipt;

/// An admin's decision on a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptApproval {
    /// Approved or rejected.
    pub decision: ApprovalDecision,
    /// Admin recording the decision.
    pub admin_id: UserId,
    /// When the decision was made.
    pub response_date: DateTime<Utc>,
    /// Optional note for the requester.
    #[validate(length(max = 1000))]
    pub response_description: Option<String>,
    /// Proof of transfer, usually only set on approval.
    #[validate(length(max = 512))]
    pub transfer_image_url: Option<String>,
}

/// Receipt as returned to callers, with its lookups nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptView {
    pub receipt_id: ReceiptId,
    pub requester: RequesterSummary,
    pub department: DepartmentSummary,
    pub account: AccountSummary,
    pub receipt_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub request_date: DateTime<Utc>,
    pub status: ReceiptStatus,
    pub receipt_image_url: Option<String>,
    pub approval: ApprovalView,
}

/// The user who submitted a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequesterSummary {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}

/// Department lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    pub department_id: DepartmentId,
    pub department_name: String,
}

/// Bank account with its account number already decrypted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub account_id: AccountId,
    pub account_title: String,
    pub account_holder_name: String,
    pub account_number: String,
    pub bank: BankSummary,
}

/// Bank lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankSummary {
    pub bank_id: BankId,
    pub bank_name: String,
}

/// Approval sub-record. `admin` is `None` (serialized as `null`) until an
/// admin has acted on the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalView {
    pub admin: Option<AdminSummary>,
    pub response_date: Option<DateTime<Utc>>,
    pub transfer_image_url: Option<String>,
    pub response_description: Option<String>,
}

/// The admin who decided on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub admin_id: UserId,
    pub admin_name: String,
    pub admin_email: String,
}
