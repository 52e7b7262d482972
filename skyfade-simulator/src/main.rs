use anyhow::{Context, Result};

use skyfade_config::ScenarioConfig;
use skyfade_simulator::{cli, telemetry, Simulator};

fn main() -> Result<()> {
    telemetry::init();
    let args = cli::parse_args();

    let mut config = match &args.scenario {
        Some(path) => ScenarioConfig::load_from_path(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => ScenarioConfig::default(),
    };
    if let Some(tx_power) = args.tx_power {
        config.tx_power_dbm = tx_power;
    }
    if let Some(events) = args.events {
        config.events = events;
    }
    if let Some(stream_start) = args.stream_start {
        config.stream_start = stream_start;
    }

    let mut simulator = Simulator::from_scenario(&config)?;
    simulator.run(config.events);
    Ok(())
}
