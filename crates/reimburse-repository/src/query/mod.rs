//! Dynamic, parameterized SELECT construction.
//!
//! Each entity declares a [`QuerySpec`]: a base statement, the filterable
//! columns in the order their predicates are emitted, and a sort allow-list.
//! Caller-supplied values only ever reach the statement as bound
//! parameters; column names and ORDER BY text come from the static `QuerySpec`.
//!
//! ```text
//! ReceiptFilter ──to_params──▶ FilterParams ──QuerySpec::build──▶ BuiltQuery { sql, params }
//! ```

mod filters;
mod sort;
mod spec;

pub use filters::{ReceiptFilter, UserFilter, RECEIPT_QUERY, USER_QUERY};
pub use sort::{SortDirection, SortSpec};
pub use spec::{FilterColumn, FilterKind, QuerySpec};

use std::collections::HashMap;

/// A positional parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Int(i64),
    Text(String),
}

impl BindValue {
    /// Text form used by list and search predicates.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl From<i64> for BindValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for BindValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Sparse filter values keyed by [`FilterColumn::key`].
pub type FilterParams = HashMap<&'static str, BindValue>;

/// Final statement text plus its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<BindValue>,
}

/// Binds every parameter of a [`BuiltQuery`] onto a `query_as` in order.
pub(crate) fn bind_all<'q, O>(
    mut query: sqlx::query::QueryAs<'q, sqlx::MySql, O, sqlx::mysql::MySqlArguments>,
    params: &[BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::MySql, O, sqlx::mysql::MySqlArguments> {
    for param in params {
        query = match param {
            BindValue::Int(v) => query.bind(*v),
            BindValue::Text(s) => query.bind(s.clone()),
        };
    }
    query
}
