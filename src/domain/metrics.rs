use chrono::{DateTime, Utc};
use serde::Serialize;

/// Point-forecast accuracy against observed values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyMetrics {
    pub mae: f64,
    /// Percent.
    pub mape: f64,
    pub rmse: f64,
    /// `100 - mape`, floored at zero.
    pub accuracy: f64,
    pub r2_score: f64,
    pub last_updated: DateTime<Utc>,
}
