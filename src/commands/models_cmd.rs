use std::process::ExitCode;

use supplyflow::services::forecast_models::FORECAST_MODELS;

use crate::commands::report_format::format_models_report;

pub fn models_command() -> ExitCode {
    println!("{}", format_models_report(&FORECAST_MODELS));
    ExitCode::SUCCESS
}
