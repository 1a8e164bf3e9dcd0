use crate::domain::forecast::{ForecastPoint, actual_values};
use crate::domain::insights::{DemandInsights, Trend};

const TREND_WINDOW: usize = 30;
const TREND_THRESHOLD: f64 = 0.05;

const SEASONAL_PATTERN: &str = "Strong Q4 peaks, Q1 dips";
const INSIGHT_CONFIDENCE: f64 = 0.87;

const KEY_DRIVERS: [&str; 4] = [
    "Seasonal consumer behavior",
    "Market expansion",
    "Product launches",
    "Economic indicators",
];

const RISK_FACTORS: [&str; 4] = [
    "Supply chain disruptions",
    "Economic uncertainty",
    "Competitor actions",
    "Regulatory changes",
];

const RECOMMENDATIONS: [&str; 4] = [
    "Increase inventory buffer for Q4",
    "Diversify supplier base",
    "Implement dynamic pricing",
    "Monitor competitor activities",
];

/// Classifies the trend of the observed values in `series` and attaches the
/// fixed planning lists.
///
/// The last 30 observed values are compared with the 30 before them. Fewer
/// than 60 observed values yields a stable trend with no measured change.
pub fn derive_insights(series: &[ForecastPoint]) -> DemandInsights {
    let (trend, trend_change) = match relative_change(&actual_values(series)) {
        Some(change) => (classify(change), format!("{:+.1}%", change * 100.0)),
        None => (Trend::Stable, "n/a".to_string()),
    };

    DemandInsights {
        trend,
        trend_change,
        seasonality: true,
        seasonal_pattern: Some(SEASONAL_PATTERN.to_string()),
        key_drivers: to_strings(&KEY_DRIVERS),
        risk_factors: to_strings(&RISK_FACTORS),
        recommendations: to_strings(&RECOMMENDATIONS),
        confidence: INSIGHT_CONFIDENCE,
    }
}

fn relative_change(actuals: &[f64]) -> Option<f64> {
    if actuals.len() < TREND_WINDOW * 2 {
        return None;
    }
    let recent = &actuals[actuals.len() - TREND_WINDOW..];
    let older = &actuals[actuals.len() - TREND_WINDOW * 2..actuals.len() - TREND_WINDOW];
    let recent_mean = mean(recent);
    let older_mean = mean(older);

    if older_mean == 0.0 {
        // No baseline to compare against; any demand at all counts as growth.
        return Some(if recent_mean > 0.0 { 1.0 } else { 0.0 });
    }
    Some((recent_mean - older_mean) / older_mean)
}

fn classify(change: f64) -> Trend {
    if change > TREND_THRESHOLD {
        Trend::Increasing
    } else if change < -TREND_THRESHOLD {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
