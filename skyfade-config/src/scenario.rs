//! Scenario configuration: node layout, link budget, loss chain.

use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ConfigError;
use crate::propagation::LossModelConfig;

fn default_tx_power() -> f64 {
    14.0
}

fn default_events() -> usize {
    100
}

fn default_receiver_sensitivity() -> f64 {
    -120.0
}

/// A named, fixed node position (meters).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NodeConfig {
    /// Node label used in logs.
    #[validate(length(min = 1))]
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

/// Top-level scenario document.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScenarioConfig {
    /// Transmit power handed to the head of the chain (dBm).
    #[serde(default = "default_tx_power")]
    pub tx_power_dbm: f64,

    /// First random stream index handed to the allocation pass.
    #[serde(default)]
    pub stream_start: i64,

    /// Number of transmission events to evaluate.
    #[serde(default = "default_events")]
    #[validate(range(min = 1))]
    pub events: usize,

    /// Weakest power a receiver can still decode (dBm).
    #[serde(default = "default_receiver_sensitivity")]
    pub receiver_sensitivity_dbm: f64,

    /// Static node layout; every ordered pair becomes a link.
    #[validate(length(min = 2))]
    #[validate(nested)]
    pub nodes: Vec<NodeConfig>,

    /// Ordered loss chain applied to every link.
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub chain: Vec<LossModelConfig>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            tx_power_dbm: default_tx_power(),
            stream_start: 0,
            events: default_events(),
            receiver_sensitivity_dbm: default_receiver_sensitivity(),
            nodes: vec![
                NodeConfig {
                    name: "tx".to_string(),
                    x: 0.0,
                    y: 0.0,
                    z: 0.0,
                },
                NodeConfig {
                    name: "rx".to_string(),
                    x: 100.0,
                    y: 0.0,
                    z: 0.0,
                },
            ],
            chain: vec![LossModelConfig::log_distance()],
        }
    }
}

impl ScenarioConfig {
    /// Loads a scenario from a YAML file, letting `SKYFADE_`-prefixed
    /// environment variables override file values, then validates it.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let config: Self = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("SKYFADE_").split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
tx_power_dbm: 20.0
events: 10
nodes:
  - { name: gateway, x: 0.0, y: 0.0, z: 15.0 }
  - { name: sensor, x: 250.0, y: 40.0 }
chain:
  - model: log_distance
    exponent: 2.7
  - model: log_normal_shadowing
    distribution: "normal[mean=0|variance=2]"
"#;

    #[test]
    fn test_full_scenario_parses_and_validates() {
        let config: ScenarioConfig = serde_yaml::from_str(SCENARIO).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.tx_power_dbm, 20.0);
        assert_eq!(config.nodes.len(), 2);
        assert_eq!(config.chain.len(), 2);
        // Omitted fields fall back to documented defaults.
        assert_eq!(config.stream_start, 0);
        assert_eq!(config.receiver_sensitivity_dbm, -120.0);
        assert_eq!(config.nodes[1].z, 0.0);
    }

    #[test]
    fn test_single_node_scenario_is_rejected() {
        let mut config = ScenarioConfig::default();
        config.nodes.truncate(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_chain_is_rejected() {
        let mut config = ScenarioConfig::default();
        config.chain.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nested_link_errors_surface_at_scenario_level() {
        let mut config = ScenarioConfig::default();
        config.chain[0].reference_distance = -5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_reports_file_not_found() {
        let result = ScenarioConfig::load_from_path("/nonexistent/scenario.yaml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
