//! CLI module for the simulator.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the skyfade simulator.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct SimulatorCli {
    /// Path to a scenario file (YAML); omitted means the built-in
    /// two-node default scenario
    #[arg(long)]
    pub scenario: Option<PathBuf>,

    /// Override the scenario transmit power (dBm)
    #[arg(long)]
    pub tx_power: Option<f64>,

    /// Override the number of transmission events to evaluate
    #[arg(long)]
    pub events: Option<usize>,

    /// Override the first random stream index
    #[arg(long)]
    pub stream_start: Option<i64>,
}

pub fn parse_args() -> SimulatorCli {
    SimulatorCli::parse()
}
