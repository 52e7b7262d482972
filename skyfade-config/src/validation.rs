//! Custom validation functions shared across configuration modules.

use std::str::FromStr;

use validator::ValidationError;

use crate::distribution::DistributionSpec;

/// Validate that a float is neither NaN nor infinite.
pub fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("must_be_finite"))
    }
}

/// Validate that a distribution specification string parses.
pub fn validate_distribution_spec(value: &str) -> Result<(), ValidationError> {
    DistributionSpec::from_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_distribution_spec"))
}
