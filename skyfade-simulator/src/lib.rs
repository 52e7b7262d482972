//! # Skyfade Simulator
//!
//! The engine-side driver for the propagation loss core. It owns the
//! pieces the core deliberately leaves outside: turning configuration
//! into concrete models, performing the single global random-stream
//! allocation pass, and evaluating transmission events over a static
//! node layout.
//!
//! ## Run lifecycle:
//! 1. Load and validate a [`ScenarioConfig`].
//! 2. [`build_chain`] the configured loss models, in document order.
//! 3. Assign random streams exactly once, starting at the scenario's
//!    `stream_start`.
//! 4. Evaluate every ordered transmitter→receiver pair per event and
//!    tally the link budget against the receiver sensitivity.

use thiserror::Error;
use tracing::{debug, info};

use skyfade_config::{
    ConfigError, DistributionSpec, LossModelConfig, LossModelKind, ScenarioConfig,
};
use skyfade_propagation::mobility::{ConstantPositionModel, Position};
use skyfade_propagation::model::{
    LogDistanceModel, LogNormalShadowingModel, LossChainBuilder, PropagationLossModel,
};
use skyfade_propagation::random::{ConstantVariable, NormalVariable, RandomVariable, UniformVariable};
use skyfade_propagation::PropagationError;

pub mod cli;
pub mod telemetry;

/// Errors raised while assembling a simulation from configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("scenario chain is empty")]
    EmptyChain,

    #[error(transparent)]
    Propagation(#[from] PropagationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Turns a parsed distribution spec into a concrete random variable.
fn build_variable(spec: &DistributionSpec) -> Result<Box<dyn RandomVariable>, PropagationError> {
    match *spec {
        DistributionSpec::Normal {
            mean_db,
            variance_db2,
        } => Ok(Box::new(NormalVariable::new(mean_db, variance_db2)?)),
        DistributionSpec::Uniform { min_db, max_db } => {
            Ok(Box::new(UniformVariable::new(min_db, max_db)?))
        }
        DistributionSpec::Constant { value_db } => Ok(Box::new(ConstantVariable::new(value_db))),
    }
}

/// Builds one chain link from its configuration.
fn build_model(link: &LossModelConfig) -> Result<Box<dyn PropagationLossModel>, BuildError> {
    match link.model {
        LossModelKind::LogDistance => {
            let mut model = LogDistanceModel::new();
            model.set_path_loss_exponent(link.exponent);
            model.set_reference(link.reference_distance, link.reference_loss)?;
            Ok(Box::new(model))
        }
        LossModelKind::LogNormalShadowing => {
            let mut model = match &link.distribution {
                Some(spec) => {
                    let spec: DistributionSpec = spec.parse()?;
                    LogNormalShadowingModel::with_variable(build_variable(&spec)?)
                }
                None => LogNormalShadowingModel::new(),
            };
            model.set_path_loss_exponent(link.exponent);
            model.set_reference(link.reference_distance, link.reference_loss)?;
            Ok(Box::new(model))
        }
    }
}

/// Builds the configured loss chain, applied in document order.
pub fn build_chain(
    links: &[LossModelConfig],
) -> Result<Box<dyn PropagationLossModel>, BuildError> {
    let mut builder = LossChainBuilder::new();
    for link in links {
        builder = builder.push(build_model(link)?);
    }
    builder.build().ok_or(BuildError::EmptyChain)
}

/// Aggregate results of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub events: usize,
    pub links_evaluated: usize,
    pub delivered: usize,
    pub dropped: usize,
    pub min_rx_power_dbm: Option<f64>,
    pub max_rx_power_dbm: Option<f64>,
}

/// Ties the loss chain, the node layout and the link budget together
/// and evaluates transmission events.
pub struct Simulator {
    chain: Box<dyn PropagationLossModel>,
    nodes: Vec<(String, ConstantPositionModel)>,
    tx_power_dbm: f64,
    receiver_sensitivity_dbm: f64,
    streams_used: i64,
}

impl Simulator {
    /// Builds a simulator from a validated scenario and performs the
    /// one-time random stream allocation pass.
    pub fn from_scenario(config: &ScenarioConfig) -> Result<Self, BuildError> {
        let mut chain = build_chain(&config.chain)?;

        // The allocation pass runs once, before any power computation;
        // in a multi-chain simulation the next instance would start at
        // `stream_start + streams_used`.
        let streams_used = chain.assign_streams(config.stream_start);
        info!(
            stream_start = config.stream_start,
            streams_used, "random streams assigned"
        );

        let nodes = config
            .nodes
            .iter()
            .map(|node| {
                (
                    node.name.clone(),
                    ConstantPositionModel::new(Position::new(node.x, node.y, node.z)),
                )
            })
            .collect();

        Ok(Self {
            chain,
            nodes,
            tx_power_dbm: config.tx_power_dbm,
            receiver_sensitivity_dbm: config.receiver_sensitivity_dbm,
            streams_used,
        })
    }

    /// Stream indices consumed by the chain during setup.
    pub fn streams_used(&self) -> i64 {
        self.streams_used
    }

    /// Evaluates `events` transmission events across every ordered
    /// transmitter→receiver pair and tallies the link budget.
    pub fn run(&mut self, events: usize) -> RunSummary {
        let mut summary = RunSummary {
            events,
            links_evaluated: 0,
            delivered: 0,
            dropped: 0,
            min_rx_power_dbm: None,
            max_rx_power_dbm: None,
        };

        for event in 0..events {
            for (tx_index, (tx_name, tx_position)) in self.nodes.iter().enumerate() {
                for (rx_index, (rx_name, rx_position)) in self.nodes.iter().enumerate() {
                    if tx_index == rx_index {
                        continue;
                    }
                    let rx_power_dbm =
                        self.chain
                            .calc_rx_power(self.tx_power_dbm, tx_position, rx_position);
                    summary.links_evaluated += 1;
                    summary.min_rx_power_dbm = Some(
                        summary
                            .min_rx_power_dbm
                            .map_or(rx_power_dbm, |min| min.min(rx_power_dbm)),
                    );
                    summary.max_rx_power_dbm = Some(
                        summary
                            .max_rx_power_dbm
                            .map_or(rx_power_dbm, |max| max.max(rx_power_dbm)),
                    );
                    let delivered = rx_power_dbm >= self.receiver_sensitivity_dbm;
                    if delivered {
                        summary.delivered += 1;
                    } else {
                        summary.dropped += 1;
                    }
                    debug!(
                        event,
                        tx = %tx_name,
                        rx = %rx_name,
                        rx_power_dbm,
                        delivered,
                        "link evaluated"
                    );
                }
            }
        }

        info!(
            events = summary.events,
            links = summary.links_evaluated,
            delivered = summary.delivered,
            dropped = summary.dropped,
            min_rx_power_dbm = ?summary.min_rx_power_dbm,
            max_rx_power_dbm = ?summary.max_rx_power_dbm,
            "simulation complete"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyfade_config::NodeConfig;

    fn pinned_shadowing_link(value_db: f64) -> LossModelConfig {
        LossModelConfig {
            distribution: Some(format!("constant[value={value_db}]")),
            ..LossModelConfig::log_normal_shadowing()
        }
    }

    #[test]
    fn test_build_chain_rejects_empty_config() {
        assert!(matches!(build_chain(&[]), Err(BuildError::EmptyChain)));
    }

    #[test]
    fn test_build_chain_rejects_bad_reference_distance() {
        let mut link = LossModelConfig::log_distance();
        link.reference_distance = -1.0;
        assert!(build_chain(&[link]).is_err());
    }

    #[test]
    fn test_pinned_shadowing_link_matches_log_distance() {
        let a = ConstantPositionModel::new(Position::new(0.0, 0.0, 0.0));
        let b = ConstantPositionModel::new(Position::new(100.0, 0.0, 0.0));

        let mut deterministic = build_chain(&[LossModelConfig::log_distance()]).unwrap();
        let mut pinned = build_chain(&[pinned_shadowing_link(0.0)]).unwrap();
        assert_eq!(
            pinned.calc_rx_power(14.0, &a, &b),
            deterministic.calc_rx_power(14.0, &a, &b)
        );
    }

    #[test]
    fn test_two_link_chain_composes_both_mechanisms() {
        let a = ConstantPositionModel::new(Position::new(0.0, 0.0, 0.0));
        let b = ConstantPositionModel::new(Position::new(10.0, 0.0, 0.0));

        // Log-distance at 10 m with defaults loses 76.6777 dB; the
        // second link then sees that output as its transmit power and
        // loses another 76.6777 dB plus the pinned 2 dB offset.
        let mut chain = build_chain(&[
            LossModelConfig::log_distance(),
            pinned_shadowing_link(2.0),
        ])
        .unwrap();
        let rx = chain.calc_rx_power(0.0, &a, &b);
        assert!((rx - (-76.6777 * 2.0 + 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_from_scenario_counts_streams_and_links() {
        let config = ScenarioConfig {
            chain: vec![LossModelConfig::log_distance(), pinned_shadowing_link(0.0)],
            ..ScenarioConfig::default()
        };
        let mut simulator = Simulator::from_scenario(&config).unwrap();
        // Only the shadowing link consumes a stream index, and the
        // constant variable ignores its seed.
        assert_eq!(simulator.streams_used(), 1);

        let summary = simulator.run(3);
        // Two nodes, two ordered pairs, three events.
        assert_eq!(summary.links_evaluated, 6);
        assert_eq!(summary.delivered + summary.dropped, 6);
    }

    #[test]
    fn test_default_scenario_link_is_delivered() {
        // 14 dBm − 46.6777 dB − 30·log10(100) ≈ −92.7 dBm, comfortably
        // above the −120 dBm sensitivity.
        let config = ScenarioConfig::default();
        let mut simulator = Simulator::from_scenario(&config).unwrap();
        let summary = simulator.run(1);
        assert_eq!(summary.delivered, 2);
        assert_eq!(summary.dropped, 0);
        let min = summary.min_rx_power_dbm.unwrap();
        assert!((min - (14.0 - 46.6777 - 60.0)).abs() < 1e-9);
    }

    #[test]
    fn test_equal_stream_starts_reproduce_runs() {
        let scenario = ScenarioConfig {
            nodes: vec![
                NodeConfig {
                    name: "tx".to_string(),
                    x: 0.0,
                    y: 0.0,
                    z: 0.0,
                },
                NodeConfig {
                    name: "rx".to_string(),
                    x: 300.0,
                    y: 0.0,
                    z: 0.0,
                },
            ],
            chain: vec![LossModelConfig::log_normal_shadowing()],
            ..ScenarioConfig::default()
        };

        let mut first = Simulator::from_scenario(&scenario).unwrap();
        let mut second = Simulator::from_scenario(&scenario).unwrap();
        assert_eq!(first.run(20), second.run(20));
    }
}
