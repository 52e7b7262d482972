//! Error types for scenario loading and validation.

use std::path::PathBuf;

use thiserror::Error;
use validator::ValidationErrors;

/// Unified configuration error type.
///
/// Everything here surfaces synchronously at load time; a scenario that
/// made it past loading cannot fail later for configuration reasons.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Scenario file missing on disk.
    #[error("scenario file not found: {0:?}")]
    FileNotFound(PathBuf),

    /// One or more fields failed validation.
    #[error("invalid scenario:\n{}", format_validation_errors(.0))]
    Validation(#[source] ValidationErrors),

    /// Figment parsing error.
    #[error("scenario parsing error: {0}")]
    Parsing(#[from] figment::Error),

    /// A distribution specification string did not parse.
    #[error("invalid distribution spec '{spec}': {reason}")]
    DistributionSpec { spec: String, reason: String },

    /// I/O error.
    #[error("scenario I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationErrors> for ConfigError {
    fn from(errors: ValidationErrors) -> Self {
        ConfigError::Validation(errors)
    }
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut lines = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map_or_else(|| error.code.to_string(), |m| m.to_string());
            lines.push(format!("  field '{field}': {message}"));
        }
    }
    lines.join("\n")
}
