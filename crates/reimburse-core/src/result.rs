//! Result type aliases for the data layer.

use crate::ReimburseError;

/// A specialized `Result` type for reimbursement operations.
pub type ReimburseResult<T> = Result<T, ReimburseError>;
