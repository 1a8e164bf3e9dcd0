use chrono::Utc;
use thiserror::Error;

use crate::domain::metrics::AccuracyMetrics;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricComputationError {
    #[error("no overlapping values to compare")]
    EmptySeries,
    #[error("actual value at index {index} is zero, percentage error is undefined")]
    ZeroActual { index: usize },
}

/// Compares the first `min(actual.len(), predicted.len())` pairs.
///
/// R² is measured against the mean of the whole `actual` slice, not only the
/// compared prefix. With zero variance in `actual` it is 1 for a perfect
/// prediction and 0 otherwise.
pub fn compute_accuracy(
    actual: &[f64],
    predicted: &[f64],
) -> Result<AccuracyMetrics, MetricComputationError> {
    let n = actual.len().min(predicted.len());
    if n == 0 {
        return Err(MetricComputationError::EmptySeries);
    }
    if let Some(index) = actual[..n].iter().position(|value| *value == 0.0) {
        return Err(MetricComputationError::ZeroActual { index });
    }

    let pairs = || actual[..n].iter().zip(&predicted[..n]);
    let count = n as f64;

    let mae = pairs().map(|(a, p)| (a - p).abs()).sum::<f64>() / count;
    let mape = pairs().map(|(a, p)| ((a - p) / a).abs()).sum::<f64>() / count * 100.0;
    let ss_res: f64 = pairs().map(|(a, p)| (a - p).powi(2)).sum();
    let rmse = (ss_res / count).sqrt();

    let actual_mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual[..n].iter().map(|a| (a - actual_mean).powi(2)).sum();
    let r2_score = if ss_tot == 0.0 {
        if ss_res == 0.0 { 1.0 } else { 0.0 }
    } else {
        1.0 - ss_res / ss_tot
    };

    let accuracy = (100.0 - mape).max(0.0);

    Ok(AccuracyMetrics {
        mae: round_to(mae, 2),
        mape: round_to(mape, 2),
        rmse: round_to(rmse, 2),
        accuracy: round_to(accuracy, 2),
        r2_score: round_to(r2_score, 3),
        last_updated: Utc::now(),
    })
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
