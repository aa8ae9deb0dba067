//! Validation utilities.

use crate::{FieldError, ReimburseError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `ReimburseError` on failure.
    fn validate_request(&self) -> Result<(), ReimburseError> {
        self.validate().map_err(validation_errors_to_reimburse_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `ReimburseError`.
#[must_use]
pub fn validation_errors_to_reimburse_error(errors: ValidationErrors) -> ReimburseError {
    let field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect();

    let message = field_errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    ReimburseError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use rust_decimal::Decimal;
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates that a money amount is zero or more.
    pub fn non_negative_amount(amount: &Decimal) -> Result<(), ValidationError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValidationError::new("amount_negative"));
        }
        Ok(())
    }

    /// Validates a one-time code: 4 to 8 ASCII digits.
    pub fn otp_code(code: &str) -> Result<(), ValidationError> {
        if !(4..=8).contains(&code.len()) {
            return Err(ValidationError::new("otp_length"));
        }
        if !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new("otp_not_numeric"));
        }
        Ok(())
    }
}
