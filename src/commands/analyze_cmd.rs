use std::process::ExitCode;

use supplyflow::services::network_analysis::analyze_network;

use crate::commands::base_commands::Commands;
use crate::commands::load_network;
use crate::commands::report_format::format_analysis_report;

pub fn analyze_command(cmd: Commands) -> ExitCode {
    let Commands::Analyze { network } = cmd else {
        return ExitCode::FAILURE;
    };

    match load_network(network.as_deref()) {
        Ok(network) => {
            println!("{}", format_analysis_report(&analyze_network(&network)));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to load network: {e}");
            ExitCode::FAILURE
        }
    }
}
