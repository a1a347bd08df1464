//! Error types for the PPh 21 engine.
//!
//! The calculation core never fails for business inputs; every out-of-range
//! case degrades to a numeric default. These errors cover the surrounding
//! layers: loading rate tables and validating HTTP requests.

use thiserror::Error;

/// The main error type for the PPh 21 engine.
///
/// # Example
///
/// ```
/// use pph21_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/ptkp.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/ptkp.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rate table parsed but violates its structural invariants.
    #[error("Invalid rate table '{table}': {message}")]
    InvalidRateTable {
        /// The table that failed validation (e.g. "brackets").
        table: String,
        /// What is wrong with it.
        message: String,
    },

    /// A calculation request field failed validation.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/ptkp.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/ptkp.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/ter.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/ter.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_rate_table_displays_table_and_message() {
        let error = EngineError::InvalidRateTable {
            table: "brackets".to_string(),
            message: "limits must be strictly increasing".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid rate table 'brackets': limits must be strictly increasing"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "gross_monthly".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input field 'gross_monthly': must not be negative"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_config_not_found() -> EngineResult<()> {
            Err(EngineError::ConfigNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_config_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
