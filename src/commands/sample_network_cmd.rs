use std::process::ExitCode;

use supplyflow::services::network_yaml::serialize_network_to_yaml;
use supplyflow::services::sample_network::sample_network;

use crate::commands::base_commands::Commands;

pub async fn sample_network_command(cmd: Commands) -> ExitCode {
    let Commands::SampleNetwork { output } = cmd else {
        return ExitCode::FAILURE;
    };

    let network = match sample_network() {
        Ok(network) => network,
        Err(e) => {
            eprintln!("Failed to build sample network: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut buffer = Vec::new();
    if let Err(e) = serialize_network_to_yaml(&mut buffer, &network) {
        eprintln!("Failed to serialize network to YAML: {e}");
        return ExitCode::FAILURE;
    }
    if let Err(e) = tokio::fs::write(&output, buffer).await {
        eprintln!("Failed to write output file: {e}");
        return ExitCode::FAILURE;
    }
    println!("Sample network written to {}", output.display());
    ExitCode::SUCCESS
}
