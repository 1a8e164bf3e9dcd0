use std::process::ExitCode;

use supplyflow::config::SupplyFlowConfig;
use supplyflow::services::scenario_planner::ScenarioPlanner;

use crate::commands::base_commands::Commands;
use crate::commands::forecast_cmd::generate_snapshot;
use crate::commands::report_format::format_scenarios_report;

pub async fn scenarios_command(cmd: Commands, config: &SupplyFlowConfig) -> ExitCode {
    let Commands::Scenarios {
        model,
        horizon,
        seed,
        custom,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let snapshot = match generate_snapshot(config, model, horizon, None, seed).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Failed to generate baseline forecast: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut planner = ScenarioPlanner::default();
    for parameters in custom {
        planner.add_custom("Custom Scenario", parameters);
    }

    match planner.impacts(&snapshot.series) {
        Ok(impacts) => {
            println!("{}", format_scenarios_report(&impacts));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to calculate scenario impact: {e}");
            ExitCode::FAILURE
        }
    }
}
