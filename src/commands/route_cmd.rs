use std::process::ExitCode;

use supplyflow::config::SupplyFlowConfig;
use supplyflow::services::route_planner::RoutePlanner;

use crate::commands::base_commands::Commands;
use crate::commands::load_network;
use crate::commands::report_format::format_route_report;

pub async fn route_command(cmd: Commands, config: &SupplyFlowConfig) -> ExitCode {
    let Commands::Route {
        source,
        target,
        algorithm,
        weighting,
        network,
        json,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let network = match load_network(network.as_deref()) {
        Ok(network) => network,
        Err(e) => {
            eprintln!("Failed to load network: {e}");
            return ExitCode::FAILURE;
        }
    };
    let planner = RoutePlanner::new(network, &config.routing);

    let calculation = match planner.calculate(algorithm, &source, &target, weighting).await {
        Ok(Some(calculation)) => calculation,
        Ok(None) => {
            eprintln!("No route found from {source} to {target}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Failed to calculate route: {e}");
            return ExitCode::FAILURE;
        }
    };

    if json {
        match serde_json::to_string_pretty(&calculation) {
            Ok(contents) => println!("{contents}"),
            Err(e) => {
                eprintln!("Failed to serialize route: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", format_route_report(&calculation, planner.network()));
    }
    ExitCode::SUCCESS
}
