//! Propagation chain configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation;

fn default_exponent() -> f64 {
    3.0
}

fn default_reference_distance() -> f64 {
    1.0
}

fn default_reference_loss() -> f64 {
    // Free-space loss at 1 m for a 5.15 GHz carrier.
    46.6777
}

/// Attenuation mechanisms available to a chain link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossModelKind {
    LogDistance,
    LogNormalShadowing,
}

/// One link of the propagation loss chain.
///
/// Links are applied in document order; the first link sees the original
/// transmit power. Defaults follow the log-distance conventions
/// (exponent 3.0, reference 1 m / 46.6777 dB).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LossModelConfig {
    /// Attenuation mechanism for this link.
    pub model: LossModelKind,

    /// Path loss exponent.
    #[serde(default = "default_exponent")]
    #[validate(custom(function = validation::validate_finite))]
    pub exponent: f64,

    /// Reference distance anchoring the power-law formula (m).
    #[serde(default = "default_reference_distance")]
    #[validate(range(exclusive_min = 0.0))]
    #[validate(custom(function = validation::validate_finite))]
    pub reference_distance: f64,

    /// Loss at the reference distance (dB).
    #[serde(default = "default_reference_loss")]
    #[validate(custom(function = validation::validate_finite))]
    pub reference_loss: f64,

    /// Shadowing distribution spec, e.g. `normal[mean=0|variance=2]`.
    /// Only meaningful for shadowing links; omitted means the default
    /// zero-mean, variance-2 Gaussian.
    #[serde(default)]
    #[validate(custom(function = validation::validate_distribution_spec))]
    pub distribution: Option<String>,
}

impl LossModelConfig {
    /// A log-distance link with default parameters.
    pub fn log_distance() -> Self {
        Self {
            model: LossModelKind::LogDistance,
            exponent: default_exponent(),
            reference_distance: default_reference_distance(),
            reference_loss: default_reference_loss(),
            distribution: None,
        }
    }

    /// A shadowing link with default parameters and distribution.
    pub fn log_normal_shadowing() -> Self {
        Self {
            model: LossModelKind::LogNormalShadowing,
            ..Self::log_distance()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: LossModelConfig = serde_yaml::from_str("model: log_distance").unwrap();
        assert_eq!(config.model, LossModelKind::LogDistance);
        assert_eq!(config.exponent, 3.0);
        assert_eq!(config.reference_distance, 1.0);
        assert_eq!(config.reference_loss, 46.6777);
        assert!(config.distribution.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_reference_distance() {
        let config: LossModelConfig = serde_yaml::from_str(
            "model: log_distance\nreference_distance: 0.0",
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_distribution_spec() {
        let config: LossModelConfig = serde_yaml::from_str(
            "model: log_normal_shadowing\ndistribution: \"rayleigh[sigma=2]\"",
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_accepts_well_formed_shadowing_link() {
        let config: LossModelConfig = serde_yaml::from_str(
            "model: log_normal_shadowing\ndistribution: \"normal[mean=0|variance=2]\"",
        )
        .unwrap();
        assert!(config.validate().is_ok());
    }
}
