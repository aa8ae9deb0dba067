//! Configuration validation module.
//!
//! Collects every problem in one pass so a broken deployment reports all
//! of them at once.

use crate::AppConfig;
use base64::{engine::general_purpose, Engine as _};
use std::fmt;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { min: u32, max: u32 },
    /// Pool size exceeds maximum allowed.
    PoolSizeTooLarge { value: u32, maximum: u32 },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String, value: u64 },
    /// At least one attempt is needed to create a user.
    InvalidIdentityAttempts { value: u32, maximum: u32 },
    /// Backoff multiplier below 1.0 would shrink delays.
    InvalidBackoffMultiplier { value: f64 },
    /// Account number key missing outside development.
    MissingAccountNumberKey,
    /// Account number key is not base64 of 32 bytes.
    InvalidAccountNumberKey { message: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPoolSize { min, max } => {
                write!(
                    f,
                    "Invalid pool size: min ({}) cannot be greater than max ({})",
                    min, max
                )
            }
            Self::PoolSizeTooLarge { value, maximum } => {
                write!(f, "Pool size {} exceeds maximum allowed ({})", value, maximum)
            }
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::NonPositiveTimeout { name, value } => {
                write!(f, "Timeout '{}' must be positive, got {}", name, value)
            }
            Self::InvalidIdentityAttempts { value, maximum } => {
                write!(
                    f,
                    "identity.max_attempts must be between 1 and {}, got {}",
                    maximum, value
                )
            }
            Self::InvalidBackoffMultiplier { value } => {
                write!(f, "identity.multiplier must be at least 1.0, got {}", value)
            }
            Self::MissingAccountNumberKey => {
                write!(f, "security.account_number_key is required outside development")
            }
            Self::InvalidAccountNumberKey { message } => {
                write!(f, "Invalid security.account_number_key: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Result of configuration validation containing all errors found.
#[derive(Debug)]
pub struct ValidationResult {
    errors: Vec<ConfigValidationError>,
}

impl ValidationResult {
    fn new() -> Self {
        Self { errors: Vec::new() }
    }

    fn add_error(&mut self, error: ConfigValidationError) {
        self.errors.push(error);
    }

    /// Returns true if validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the validation errors.
    pub fn errors(&self) -> &[ConfigValidationError] {
        &self.errors
    }

    /// Converts to Result, returning Err with all errors if any exist.
    pub fn into_result(self) -> Result<(), Vec<ConfigValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Maximum connection pool size.
    const MAX_POOL_SIZE: u32 = 1000;
    /// Upper bound on identity attempts; the id space has 900 000 values.
    const MAX_IDENTITY_ATTEMPTS: u32 = 100;
    /// AES-256 key length.
    const ACCOUNT_KEY_LEN: usize = 32;

    /// Validates the entire application configuration.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut result = ValidationResult::new();

        Self::validate_database(&config.database, &mut result);
        Self::validate_identity(&config.identity, &mut result);
        Self::validate_security(config, &mut result);

        result.into_result()
    }

    fn validate_database(config: &crate::DatabaseConfig, result: &mut ValidationResult) {
        if config.url.is_empty() {
            result.add_error(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        } else if !config.url.starts_with("mysql://") && !config.url.starts_with("mariadb://") {
            result.add_error(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL must start with mysql:// or mariadb://".to_string(),
            });
        }

        if config.min_connections > config.max_connections {
            result.add_error(ConfigValidationError::InvalidPoolSize {
                min: config.min_connections,
                max: config.max_connections,
            });
        }
        if config.max_connections > Self::MAX_POOL_SIZE {
            result.add_error(ConfigValidationError::PoolSizeTooLarge {
                value: config.max_connections,
                maximum: Self::MAX_POOL_SIZE,
            });
        }

        if config.connect_timeout_secs == 0 {
            result.add_error(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
                value: 0,
            });
        }
        if config.idle_timeout_secs == 0 {
            result.add_error(ConfigValidationError::NonPositiveTimeout {
                name: "database.idle_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_identity(config: &crate::IdentityConfig, result: &mut ValidationResult) {
        if config.max_attempts == 0 || config.max_attempts > Self::MAX_IDENTITY_ATTEMPTS {
            result.add_error(ConfigValidationError::InvalidIdentityAttempts {
                value: config.max_attempts,
                maximum: Self::MAX_IDENTITY_ATTEMPTS,
            });
        }
        if config.multiplier < 1.0 {
            result.add_error(ConfigValidationError::InvalidBackoffMultiplier {
                value: config.multiplier,
            });
        }
    }

    fn validate_security(config: &AppConfig, result: &mut ValidationResult) {
        match &config.security.account_number_key {
            None if !config.app.is_development() => {
                result.add_error(ConfigValidationError::MissingAccountNumberKey);
            }
            None => {}
            Some(key) => match general_purpose::STANDARD.decode(key.trim()) {
                Ok(bytes) if bytes.len() == Self::ACCOUNT_KEY_LEN => {}
                Ok(bytes) => result.add_error(ConfigValidationError::InvalidAccountNumberKey {
                    message: format!(
                        "expected {} bytes, got {}",
                        Self::ACCOUNT_KEY_LEN,
                        bytes.len()
                    ),
                }),
                Err(e) => result.add_error(ConfigValidationError::InvalidAccountNumberKey {
                    message: e.to_string(),
                }),
            },
        }
    }
}

/// Formats validation errors for display.
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.security.account_number_key = Some(general_purpose::STANDARD.encode([7u8; 32]));
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(ConfigValidator::validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_invalid_pool_size() {
        let mut config = valid_config();
        config.database.min_connections = 20;
        config.database.max_connections = 5;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.contains(&ConfigValidationError::InvalidPoolSize { min: 20, max: 5 }));
    }

    #[test]
    fn test_non_mysql_url_rejected() {
        let mut config = valid_config();
        config.database.url = "postgres://localhost/db".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(errors[0], ConfigValidationError::InvalidUrl { .. }));
    }

    #[test]
    fn test_zero_identity_attempts_rejected() {
        let mut config = valid_config();
        config.identity.max_attempts = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.contains(&ConfigValidationError::InvalidIdentityAttempts {
            value: 0,
            maximum: 100,
        }));
    }

    #[test]
    fn test_shrinking_backoff_rejected() {
        let mut config = valid_config();
        config.identity.multiplier = 0.5;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.contains(&ConfigValidationError::InvalidBackoffMultiplier { value: 0.5 }));
    }

    #[test]
    fn test_missing_key_allowed_in_development_only() {
        let mut config = valid_config();
        config.security.account_number_key = None;
        assert!(ConfigValidator::validate(&config).is_ok());

        config.app.environment = "production".to_string();
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors, vec![ConfigValidationError::MissingAccountNumberKey]);
    }

    #[test]
    fn test_short_key_rejected() {
        let mut config = valid_config();
        config.security.account_number_key = Some(general_purpose::STANDARD.encode([1u8; 16]));

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ConfigValidationError::InvalidAccountNumberKey { .. }
        ));
    }

    #[test]
    fn test_multiple_errors() {
        let mut config = valid_config();
        config.database.url = String::new();
        config.database.connect_timeout_secs = 0;
        config.identity.max_attempts = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_format_validation_errors() {
        let errors = vec![
            ConfigValidationError::MissingAccountNumberKey,
            ConfigValidationError::InvalidPoolSize { min: 10, max: 5 },
        ];
        let formatted = format_validation_errors(&errors);
        assert!(formatted.contains("1."));
        assert!(formatted.contains("2."));
        assert!(formatted.contains("account_number_key"));
    }
}
