use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioParameters {
    pub demand_multiplier: f64,
    pub seasonality_factor: f64,
    pub volatility_increase: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub description: String,
    pub parameters: ScenarioParameters,
}

/// Projected effect of a scenario on aggregate forecast demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioImpact {
    pub scenario_id: String,
    /// Percent change against the baseline, one decimal.
    pub impact: f64,
    pub total_demand: f64,
    /// Percent, whole number.
    pub variance: i64,
}
