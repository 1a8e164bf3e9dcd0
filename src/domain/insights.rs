use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
    Volatile,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
            Trend::Volatile => "volatile",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandInsights {
    pub trend: Trend,
    pub trend_change: String,
    pub seasonality: bool,
    pub seasonal_pattern: Option<String>,
    pub key_drivers: Vec<String>,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub confidence: f64,
}
