//! # Skyfade Configuration
//!
//! Scenario and propagation-chain configuration for the skyfade
//! simulator.
//!
//! ## Features
//! - **Load-time validation**: every rejectable value (non-positive
//!   reference distance, malformed distribution spec, empty chain) fails
//!   synchronously when the scenario is loaded, never mid-run
//! - **Layered sources**: YAML file merged with `SKYFADE_`-prefixed
//!   environment overrides
//! - **Plain data**: this crate does not depend on the propagation core;
//!   parsed values are handed to the core's setters by the driver,
//!   keeping the configuration boundary explicit

mod distribution;
mod error;
mod propagation;
mod scenario;
mod validation;

pub use distribution::DistributionSpec;
pub use error::ConfigError;
pub use propagation::{LossModelConfig, LossModelKind};
pub use scenario::{NodeConfig, ScenarioConfig};
