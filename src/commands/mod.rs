pub mod analyze_cmd;
pub mod base_commands;
pub mod completions_cmd;
pub mod forecast_cmd;
pub mod models_cmd;
pub mod report_format;
pub mod route_cmd;
pub mod sample_network_cmd;
pub mod scenarios_cmd;

use std::path::Path;

use supplyflow::services::network_graph::SupplyNetwork;
use supplyflow::services::network_yaml::{NetworkYamlError, load_network_from_yaml_file};
use supplyflow::services::sample_network::sample_network;

/// Loads a network file, or the built-in sample network when no path is given.
pub fn load_network(path: Option<&Path>) -> Result<SupplyNetwork, NetworkYamlError> {
    match path {
        Some(path) => load_network_from_yaml_file(path),
        None => Ok(sample_network()?),
    }
}
