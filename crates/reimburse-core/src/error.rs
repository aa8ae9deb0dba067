//! Unified error types for the data-access layer.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// MySQL server error number for a duplicate key (`ER_DUP_ENTRY`).
pub const MYSQL_DUPLICATE_ENTRY: u16 = 1062;

/// Unified error type for the reimbursement data layer.
#[derive(Error, Debug)]
pub enum ReimburseError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict error (e.g., duplicate email)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Infrastructure Errors ============
    /// Unique-key violation reported by the database.
    ///
    /// `key` is the index name as reported by the server (`PRIMARY`,
    /// `email`, `user.PRIMARY`, ...).
    #[error("Duplicate entry for key '{key}': {message}")]
    DuplicateKey { key: String, message: String },

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Stored ciphertext could not be decrypted.
    #[error("Decryption error: {0}")]
    Decryption(String),

    /// Identity generation kept colliding with existing rows.
    #[error("Could not allocate a unique {resource_type} id after {attempts} attempts")]
    IdentityExhausted {
        resource_type: &'static str,
        attempts: u32,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReimburseError {
    /// Returns the HTTP status code callers should map this error to.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) | Self::DuplicateKey { .. } => 409,
            Self::IdentityExhausted { .. } => 503,
            Self::Database(_)
            | Self::Decryption(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::DuplicateKey { .. } => "DUPLICATE_KEY",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Decryption(_) => "DECRYPTION_ERROR",
            Self::IdentityExhausted { .. } => "IDENTITY_EXHAUSTED",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a decryption error.
    #[must_use]
    pub fn decryption<T: Into<String>>(message: T) -> Self {
        Self::Decryption(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks whether this is a duplicate on the primary key of a table.
    ///
    /// MySQL 8 reports the key as `table.PRIMARY`, older servers as `PRIMARY`.
    #[must_use]
    pub fn is_primary_key_collision(&self) -> bool {
        match self {
            Self::DuplicateKey { key, .. } => {
                key == "PRIMARY" || key.ends_with(".PRIMARY")
            }
            _ => false,
        }
    }

    /// Checks if this error comes from the database rather than from the caller.
    #[must_use]
    pub const fn is_database(&self) -> bool {
        matches!(self, Self::Database(_) | Self::DuplicateKey { .. })
    }
}

/// Extracts the key name from a MySQL duplicate-entry message.
///
/// `Duplicate entry '123456' for key 'user.PRIMARY'` yields `user.PRIMARY`.
#[must_use]
pub fn parse_duplicate_key(message: &str) -> Option<String> {
    let (_, tail) = message.rsplit_once("for key '")?;
    let key = tail.strip_suffix('\'').unwrap_or(tail);
    let key = key.split('\'').next()?;
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for ReimburseError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let duplicate = db_err
                .try_downcast_ref::<sqlx::mysql::MySqlDatabaseError>()
                .is_some_and(|e| e.number() == MYSQL_DUPLICATE_ENTRY);
            if duplicate {
                let message = db_err.message().to_string();
                let key = parse_duplicate_key(&message).unwrap_or_default();
                return Self::DuplicateKey { key, message };
            }
        }
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for ReimburseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for callers that surface errors over an API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `ReimburseError`.
    #[must_use]
    pub fn from_error(error: &ReimburseError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&ReimburseError> for ErrorResponse {
    fn from(error: &ReimburseError) -> Self {
        Self::from_error(error)
    }
}
