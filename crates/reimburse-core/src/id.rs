//! Typed ID wrappers for domain entities.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Smallest user id handed out by the generator.
pub const USER_ID_MIN: i32 = 100_000;
/// Largest user id handed out by the generator.
pub const USER_ID_MAX: i32 = 999_999;

/// A strongly-typed wrapper for user IDs.
///
/// User ids are six-digit numbers chosen by the application rather than
/// the database, so they can be read out and shared by people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i32);

impl UserId {
    /// Creates a user ID from a raw value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the inner value.
    #[must_use]
    pub const fn into_inner(self) -> i32 {
        self.0
    }

    /// Checks that the value lies in the six-digit range.
    #[must_use]
    pub const fn is_six_digit(self) -> bool {
        self.0 >= USER_ID_MIN && self.0 <= USER_ID_MAX
    }
}

/// A strongly-typed wrapper for receipt IDs (database assigned).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(pub i64);

impl ReceiptId {
    /// Creates a receipt ID from a raw value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the inner value.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

/// A strongly-typed wrapper for department IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(pub i32);

/// A strongly-typed wrapper for bank account IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub i32);

/// A strongly-typed wrapper for bank IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BankId(pub i32);

macro_rules! impl_id_conversions {
    ($($name:ident => $inner:ty),* $(,)?) => {
        $(
            impl Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<$inner> for $name {
                fn from(value: $inner) -> Self {
                    Self(value)
                }
            }

            impl From<$name> for $inner {
                fn from(id: $name) -> Self {
                    id.0
                }
            }
        )*
    };
}

impl_id_conversions! {
    UserId => i32,
    ReceiptId => i64,
    DepartmentId => i32,
    AccountId => i32,
    BankId => i32,
}
