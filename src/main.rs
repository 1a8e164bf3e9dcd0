mod commands;

use std::process::ExitCode;

use clap::Parser;
use supplyflow::config::SupplyFlowConfig;
use supplyflow::logging::init_tracing;

use crate::commands::analyze_cmd::analyze_command;
use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::completions_cmd::completions_command;
use crate::commands::forecast_cmd::forecast_command;
use crate::commands::models_cmd::models_command;
use crate::commands::route_cmd::route_command;
use crate::commands::sample_network_cmd::sample_network_command;
use crate::commands::scenarios_cmd::scenarios_command;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config = match SupplyFlowConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };
    let level = match args.log_level {
        Some(level) => level,
        None => match config.logging.level_filter() {
            Ok(level) => level,
            Err(e) => {
                eprintln!("Failed to load config: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    init_tracing(level, config.logging.json);

    match args.command {
        cmd @ Commands::Route { .. } => route_command(cmd, &config).await,
        cmd @ Commands::Analyze { .. } => analyze_command(cmd),
        cmd @ Commands::SampleNetwork { .. } => sample_network_command(cmd).await,
        Commands::Models => models_command(),
        cmd @ Commands::Forecast { .. } => forecast_command(cmd, &config).await,
        cmd @ Commands::Scenarios { .. } => scenarios_command(cmd, &config).await,
        Commands::Completions { shell } => completions_command(shell),
    }
}
