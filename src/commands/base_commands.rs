use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use tracing::level_filters::LevelFilter;

use supplyflow::domain::forecast::ModelId;
use supplyflow::domain::route::{RouteAlgorithm, Weighting};
use supplyflow::domain::scenario::ScenarioParameters;
use supplyflow::logging::parse_log_level;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Optional configuration YAML
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log level (off, error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_parser = parse_log_level)]
    pub log_level: Option<LevelFilter>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the best route between two nodes of a supply network
    Route {
        /// Source node id
        #[arg(short, long)]
        source: String,
        /// Target node id
        #[arg(short, long)]
        target: String,
        /// Routing algorithm (dijkstra, astar, ai-optimized)
        #[arg(short, long, default_value_t = RouteAlgorithm::Dijkstra)]
        algorithm: RouteAlgorithm,
        /// Edge attribute to minimise (cost, time, risk, distance)
        #[arg(short, long, default_value_t = Weighting::Cost)]
        weighting: Weighting,
        /// Network YAML file; the built-in sample network is used when omitted
        #[arg(short, long)]
        network: Option<PathBuf>,
        /// Print the calculation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report size, connectivity and capacity bottlenecks of a network
    Analyze {
        /// Network YAML file; the built-in sample network is used when omitted
        #[arg(short, long)]
        network: Option<PathBuf>,
    },
    /// Write the built-in sample network to a YAML file
    SampleNetwork {
        /// Output YAML file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List the available forecasting models
    Models,
    /// Generate a demand forecast from synthetic history
    Forecast {
        /// Model id (prophet, lstm, arima, ensemble, linear)
        #[arg(short, long, value_parser = parse_model)]
        model: Option<ModelId>,
        /// Number of days to forecast
        #[arg(long)]
        horizon: Option<usize>,
        /// Confidence level in percent
        #[arg(long)]
        confidence: Option<f64>,
        /// Seed for the synthetic history
        #[arg(long)]
        seed: Option<u64>,
        /// Output CSV file for the combined series
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output PNG chart of the combined series
        #[arg(long)]
        plot: Option<PathBuf>,
    },
    /// Project preset and custom scenarios onto a demand forecast
    Scenarios {
        /// Model id used for the baseline forecast
        #[arg(short, long, value_parser = parse_model)]
        model: Option<ModelId>,
        /// Number of days to forecast
        #[arg(long)]
        horizon: Option<usize>,
        /// Seed for the synthetic history
        #[arg(long)]
        seed: Option<u64>,
        /// Custom scenario as demand,seasonality,volatility (repeatable)
        #[arg(long, value_parser = parse_scenario_parameters)]
        custom: Vec<ScenarioParameters>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_model(value: &str) -> Result<ModelId, String> {
    ModelId::parse(value).ok_or_else(|| {
        format!("unknown model '{value}' (expected prophet, lstm, arima, ensemble or linear)")
    })
}

fn parse_scenario_parameters(value: &str) -> Result<ScenarioParameters, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let &[demand, seasonality, volatility] = parts.as_slice() else {
        return Err(format!(
            "expected demand,seasonality,volatility but got '{value}'"
        ));
    };
    let number = |part: &str| {
        part.parse::<f64>()
            .map_err(|_| format!("'{part}' is not a number"))
    };
    ScenarioParameters::new(number(demand)?, number(seasonality)?, number(volatility)?)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_defaults_to_cost_weighted_dijkstra() {
        let args = CliArgs::parse_from(["supplyflow", "route", "-s", "a", "-t", "b"]);

        if let Commands::Route {
            algorithm,
            weighting,
            network,
            json,
            ..
        } = args.command
        {
            assert_eq!(algorithm, RouteAlgorithm::Dijkstra);
            assert_eq!(weighting, Weighting::Cost);
            assert!(network.is_none());
            assert!(!json);
        } else {
            panic!("expected route command");
        }
    }

    #[test]
    fn route_rejects_unknown_algorithm() {
        let result = CliArgs::try_parse_from([
            "supplyflow", "route", "-s", "a", "-t", "b", "-a", "genetic",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_options_follow_the_subcommand() {
        let args = CliArgs::parse_from([
            "supplyflow",
            "models",
            "--config",
            "config.yaml",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("config.yaml")));
        assert_eq!(args.log_level, Some(LevelFilter::DEBUG));
    }

    #[test]
    fn forecast_parses_model_and_rejects_unknown_ones() {
        let args = CliArgs::parse_from(["supplyflow", "forecast", "-m", "LSTM", "--seed", "3"]);
        if let Commands::Forecast { model, seed, .. } = args.command {
            assert_eq!(model, Some(ModelId::Lstm));
            assert_eq!(seed, Some(3));
        } else {
            panic!("expected forecast command");
        }

        assert!(CliArgs::try_parse_from(["supplyflow", "forecast", "-m", "magic"]).is_err());
    }

    #[test]
    fn scenarios_accept_repeated_custom_parameters() {
        let args = CliArgs::parse_from([
            "supplyflow",
            "scenarios",
            "--custom",
            "1.5, 1.0, 1.2",
            "--custom",
            "0.7,1,1",
        ]);
        if let Commands::Scenarios { custom, .. } = args.command {
            assert_eq!(custom.len(), 2);
            assert_eq!(custom[0].demand_multiplier, 1.5);
            assert_eq!(custom[1].volatility_increase, 1.0);
        } else {
            panic!("expected scenarios command");
        }
    }

    #[test]
    fn scenario_parameters_must_have_three_positive_numbers() {
        assert!(parse_scenario_parameters("1.0,1.0").is_err());
        assert!(parse_scenario_parameters("1.0,x,1.0").is_err());
        assert!(parse_scenario_parameters("1.0,1.0,-1").is_err());
    }
}
