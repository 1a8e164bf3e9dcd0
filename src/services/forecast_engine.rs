use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::domain::forecast::{ForecastPoint, ModelId, Prediction, actual_values};
use crate::domain::metrics::AccuracyMetrics;
use crate::services::accuracy::{MetricComputationError, compute_accuracy};
use crate::services::forecast_models::ModelCoefficients;

/// Base level used when there is no history to anchor on.
pub const DEFAULT_BASE_LEVEL: f64 = 1000.0;
/// Longest forecast a request may ask for, five years of days.
pub const MAX_HORIZON_DAYS: usize = 1825;
/// Longest history a session generates, ten years of days.
pub const MAX_HISTORY_DAYS: usize = 3650;
const ANCHOR_WINDOW: usize = 7;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    #[error("horizon must be at least one day")]
    InvalidHorizon,
    #[error("horizon must be at most {max} days, got {requested}")]
    HorizonTooLong { requested: usize, max: usize },
    #[error("confidence level must be within (0, 100], got {0}")]
    InvalidConfidence(f64),
    #[error("need at least {required} historical points, got {available}")]
    InsufficientHistory { required: usize, available: usize },
    #[error("failed to compute accuracy: {0}")]
    Metric(#[from] MetricComputationError),
    #[error("date out of range: {days} days from {from}")]
    DateOutOfRange { from: NaiveDate, days: usize },
    #[error("forecast generation was cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRequest {
    pub model: ModelId,
    pub horizon_days: usize,
    /// Percent, e.g. `95.0`.
    pub confidence_level: f64,
}

impl ForecastRequest {
    pub fn validate(&self) -> Result<(), ForecastError> {
        if self.horizon_days == 0 {
            return Err(ForecastError::InvalidHorizon);
        }
        if self.horizon_days > MAX_HORIZON_DAYS {
            return Err(ForecastError::HorizonTooLong {
                requested: self.horizon_days,
                max: MAX_HORIZON_DAYS,
            });
        }
        if !(self.confidence_level > 0.0 && self.confidence_level <= 100.0) {
            return Err(ForecastError::InvalidConfidence(self.confidence_level));
        }
        Ok(())
    }
}

/// Predicts one point per day for `horizon_days` days.
///
/// The series continues the day after the last historical date, or the day
/// after `today` when there is no history. The model formula is anchored on
/// the mean of the last seven observed values.
pub fn generate_forecast(
    request: &ForecastRequest,
    historical: &[ForecastPoint],
    today: NaiveDate,
) -> Result<Vec<ForecastPoint>, ForecastError> {
    request.validate()?;

    let coefficients = ModelCoefficients::for_model(request.model);
    let base = base_level(historical);
    let last_date = historical
        .iter()
        .map(ForecastPoint::date)
        .max()
        .unwrap_or(today);
    let confidence = request.confidence_level / 100.0;

    (1..=request.horizon_days)
        .map(|step| {
            let date = last_date
                .checked_add_days(Days::new(step as u64))
                .ok_or(ForecastError::DateOutOfRange {
                    from: last_date,
                    days: step,
                })?;
            let raw = coefficients.predict(base, step);
            let uncertainty = raw * coefficients.band;
            Ok(ForecastPoint::Forecast {
                date,
                prediction: Prediction {
                    predicted: raw.max(0.0).round(),
                    upper_bound: (raw + uncertainty).max(0.0).round(),
                    lower_bound: (raw - uncertainty).max(0.0).round(),
                    confidence,
                },
            })
        })
        .collect()
}

/// Mean of the trailing observed values, or the default level without history.
pub fn base_level(historical: &[ForecastPoint]) -> f64 {
    let actuals = actual_values(historical);
    if actuals.is_empty() {
        return DEFAULT_BASE_LEVEL;
    }
    let window = &actuals[actuals.len().saturating_sub(ANCHOR_WINDOW)..];
    window.iter().sum::<f64>() / window.len() as f64
}

/// Forecasts the last `validation_days` observed points from the history
/// before them and scores the forecast against what was observed.
pub fn backtest(
    model: ModelId,
    historical: &[ForecastPoint],
    validation_days: usize,
) -> Result<AccuracyMetrics, ForecastError> {
    let observed: Vec<&ForecastPoint> = historical
        .iter()
        .filter(|point| point.actual().is_some())
        .collect();
    let required = validation_days + 1;
    if validation_days == 0 || observed.len() < required {
        return Err(ForecastError::InsufficientHistory {
            required,
            available: observed.len(),
        });
    }

    let split = observed.len() - validation_days;
    let training: Vec<ForecastPoint> = observed[..split]
        .iter()
        .map(|point| (*point).clone())
        .collect();
    let holdout: Vec<f64> = observed[split..]
        .iter()
        .filter_map(|point| point.actual())
        .collect();

    let request = ForecastRequest {
        model,
        horizon_days: validation_days,
        confidence_level: 100.0,
    };
    let last_training_date = training
        .last()
        .map(ForecastPoint::date)
        .unwrap_or(NaiveDate::MIN);
    let predicted: Vec<f64> = generate_forecast(&request, &training, last_training_date)?
        .iter()
        .filter_map(ForecastPoint::predicted)
        .collect();

    Ok(compute_accuracy(&holdout, &predicted)?)
}
