use std::process::ExitCode;

use chrono::Local;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use supplyflow::config::SupplyFlowConfig;
use supplyflow::domain::forecast::ModelId;
use supplyflow::services::forecast_csv::export_series_csv_file;
use supplyflow::services::forecast_engine::ForecastRequest;
use supplyflow::services::forecast_plot::plot_forecast_png;
use supplyflow::services::forecast_session::{
    ForecastSession, ForecastSessionError, ForecastSnapshot,
};

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_forecast_report;

/// Loads synthetic history and runs one generation. Ctrl-C cancels it.
pub(crate) async fn generate_snapshot(
    config: &SupplyFlowConfig,
    model: Option<ModelId>,
    horizon_days: Option<usize>,
    confidence_level: Option<f64>,
    seed: Option<u64>,
) -> Result<ForecastSnapshot, ForecastSessionError> {
    let forecasting = &config.forecasting;
    let today = Local::now().date_naive();
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let session = ForecastSession::new(forecasting);
    session.load_synthetic_history(forecasting.history_days, today, &mut rng)?;

    let request = ForecastRequest {
        model: model.unwrap_or_else(|| config.default_model()),
        horizon_days: horizon_days.unwrap_or(forecasting.horizon_days),
        confidence_level: confidence_level.unwrap_or(forecasting.confidence_level),
    };

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupt received, cancelling forecast");
                cancel.cancel();
            }
        })
    };
    let snapshot = session.generate(request, today, cancel).await;
    interrupt.abort();
    snapshot
}

pub async fn forecast_command(cmd: Commands, config: &SupplyFlowConfig) -> ExitCode {
    let Commands::Forecast {
        model,
        horizon,
        confidence,
        seed,
        output,
        plot,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let snapshot = match generate_snapshot(config, model, horizon, confidence, seed).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Failed to generate forecast: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!("{}", format_forecast_report(&snapshot));

    let mut status = ExitCode::SUCCESS;
    if let Some(output) = output {
        match export_series_csv_file(&output, &snapshot.series) {
            Ok(()) => println!("Forecast series written to {}", output.display()),
            Err(e) => {
                eprintln!("Failed to export forecast csv: {e}");
                status = ExitCode::FAILURE;
            }
        }
    }
    if let Some(plot) = plot {
        match plot_forecast_png(&plot, &snapshot.series).await {
            Ok(()) => println!("Forecast chart written to {}", plot.display()),
            Err(e) => {
                eprintln!("Failed to write forecast chart: {e}");
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}
