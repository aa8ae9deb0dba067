//! Receipt and user query specifications and their typed filters.

use super::{FilterColumn, FilterKind, FilterParams, QuerySpec, SortDirection, SortSpec};
use reimburse_core::{DepartmentId, ReceiptId, UserId};
use serde::{Deserialize, Serialize};

/// Receipts joined with requester, department, bank account, bank and the
/// approving admin (left join, absent until a decision is recorded).
pub const RECEIPT_QUERY: QuerySpec = QuerySpec {
    base: r"
        SELECT
            r.receipt_id, r.receipt_date, r.description, r.amount,
            r.request_date, r.status, r.receipt_image_url,
            u.user_id, u.user_name, u.email,
            d.department_id, d.department_name,
            ba.account_id, ba.account_title, ba.account_holder_name, ba.account_number_encrypted,
            b.bank_id, b.bank_name,
            admin.user_id AS admin_id, admin.user_name AS admin_name, admin.email AS admin_email,
            r.response_date, r.transfer_image_url, r.response_description
        FROM receipt r
        JOIN `user` u ON r.requester_id = u.user_id
        JOIN department d ON r.department_id = d.department_id
        JOIN bank_account ba ON r.account_id = ba.account_id
        JOIN bank b ON ba.bank_id = b.bank_id
        LEFT JOIN `user` admin ON r.admin_id = admin.user_id
    ",
    filters: &[
        FilterColumn::new("receiptId", FilterKind::Equals("r.receipt_id")),
        FilterColumn::new("userId", FilterKind::Equals("r.requester_id")),
        FilterColumn::new(
            "search",
            FilterKind::Search(&["r.description", "u.user_name", "u.email"]),
        ),
        FilterColumn::new("departmentId", FilterKind::Equals("r.department_id")),
        FilterColumn::new("status", FilterKind::InList("r.status")),
    ],
    sort: SortSpec {
        prefix: "r.",
        allowed: &["request_date", "status", "amount"],
        default_column: "request_date",
        default_direction: SortDirection::Desc,
    },
};

/// Users joined with their department.
pub const USER_QUERY: QuerySpec = QuerySpec {
    base: r"
        SELECT
            u.user_id, u.email, u.user_name,
            d.department_id, d.department_name,
            u.role, u.profile_image_url
        FROM `user` u
        JOIN department d ON u.department_id = d.department_id
    ",
    filters: &[
        FilterColumn::new("email", FilterKind::Equals("u.email")),
        FilterColumn::new("userId", FilterKind::Equals("u.user_id")),
        FilterColumn::new("departmentId", FilterKind::Equals("u.department_id")),
        FilterColumn::new("role", FilterKind::InList("u.role")),
        FilterColumn::new("search", FilterKind::Search(&["u.user_name", "u.email"])),
    ],
    sort: SortSpec {
        prefix: "u.",
        allowed: &["user_name", "email", "role"],
        default_column: "user_name",
        default_direction: SortDirection::Asc,
    },
};

/// Optional criteria for listing receipts.
///
/// Deserializes from camelCase query strings, e.g.
/// `?userId=123456&status=approved,rejected&sorted=amount:desc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiptFilter {
    pub receipt_id: Option<ReceiptId>,
    /// Requester.
    pub user_id: Option<UserId>,
    /// Matched against description, requester name and email.
    pub search: Option<String>,
    pub department_id: Option<DepartmentId>,
    /// Comma-separated statuses.
    pub status: Option<String>,
    /// `column:direction`.
    pub sorted: Option<String>,
}

impl ReceiptFilter {
    /// Filter matching a single receipt.
    #[must_use]
    pub fn by_id(id: ReceiptId) -> Self {
        Self {
            receipt_id: Some(id),
            ..Self::default()
        }
    }

    /// Sparse parameter map consumed by [`RECEIPT_QUERY`].
    #[must_use]
    pub fn to_params(&self) -> FilterParams {
        let mut params = FilterParams::new();
        if let Some(id) = self.receipt_id {
            params.insert("receiptId", id.into_inner().into());
        }
        if let Some(id) = self.user_id {
            params.insert("userId", id.into_inner().into());
        }
        if let Some(search) = &self.search {
            params.insert("search", search.as_str().into());
        }
        if let Some(id) = self.department_id {
            params.insert("departmentId", i32::from(id).into());
        }
        if let Some(status) = &self.status {
            params.insert("status", status.as_str().into());
        }
        params
    }
}

/// Optional criteria for listing users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserFilter {
    pub email: Option<String>,
    pub user_id: Option<UserId>,
    pub department_id: Option<DepartmentId>,
    /// Comma-separated roles.
    pub role: Option<String>,
    /// Matched against name and email.
    pub search: Option<String>,
    /// `column:direction`.
    pub sorted: Option<String>,
}

impl UserFilter {
    /// Filter matching a single user.
    #[must_use]
    pub fn by_id(id: UserId) -> Self {
        Self {
            user_id: Some(id),
            ..Self::default()
        }
    }

    /// Sparse parameter map consumed by [`USER_QUERY`].
    #[must_use]
    pub fn to_params(&self) -> FilterParams {
        let mut params = FilterParams::new();
        if let Some(email) = &self.email {
            params.insert("email", email.as_str().into());
        }
        if let Some(id) = self.user_id {
            params.insert("userId", id.into_inner().into());
        }
        if let Some(id) = self.department_id {
            params.insert("departmentId", i32::from(id).into());
        }
        if let Some(role) = &self.role {
            params.insert("role", role.as_str().into());
        }
        if let Some(search) = &self.search {
            params.insert("search", search.as_str().into());
        }
        params
    }
}
