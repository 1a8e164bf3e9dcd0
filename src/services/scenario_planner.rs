use thiserror::Error;

use crate::domain::forecast::ForecastPoint;
use crate::domain::scenario::{Scenario, ScenarioImpact, ScenarioParameters};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioPlannerError {
    #[error("baseline forecast has no predicted demand")]
    EmptyBaseline,
    #[error("scenario parameter {name} must be a positive number, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),
}

impl ScenarioParameters {
    pub fn new(
        demand_multiplier: f64,
        seasonality_factor: f64,
        volatility_increase: f64,
    ) -> Result<Self, ScenarioPlannerError> {
        for (name, value) in [
            ("demand_multiplier", demand_multiplier),
            ("seasonality_factor", seasonality_factor),
            ("volatility_increase", volatility_increase),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScenarioPlannerError::InvalidParameter { name, value });
            }
        }
        Ok(Self {
            demand_multiplier,
            seasonality_factor,
            volatility_increase,
        })
    }
}

fn preset(id: &str, name: &str, description: &str, parameters: [f64; 3]) -> Scenario {
    let [demand_multiplier, seasonality_factor, volatility_increase] = parameters;
    Scenario {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        parameters: ScenarioParameters {
            demand_multiplier,
            seasonality_factor,
            volatility_increase,
        },
    }
}

pub fn preset_scenarios() -> Vec<Scenario> {
    vec![
        preset(
            "optimistic",
            "Optimistic Growth",
            "Market expansion and increased consumer demand",
            [1.2, 1.1, 0.8],
        ),
        preset(
            "pessimistic",
            "Economic Downturn",
            "Reduced consumer spending and market contraction",
            [0.8, 0.9, 1.3],
        ),
        preset(
            "disruption",
            "Supply Disruption",
            "Increased demand due to supply constraints",
            [1.1, 1.0, 1.8],
        ),
    ]
}

/// Projects a scenario onto the predicted demand of `baseline`.
///
/// Only the demand multiplier affects totals. Variance is the volatility
/// factor expressed as a whole-percent deviation from 100.
pub fn calculate_scenario_impact(
    scenario: &Scenario,
    baseline: &[ForecastPoint],
) -> Result<ScenarioImpact, ScenarioPlannerError> {
    let total_baseline: f64 = baseline.iter().filter_map(ForecastPoint::predicted).sum();
    if total_baseline == 0.0 {
        return Err(ScenarioPlannerError::EmptyBaseline);
    }

    let parameters = &scenario.parameters;
    let total_scenario = total_baseline * parameters.demand_multiplier;
    let impact = (total_scenario - total_baseline) / total_baseline * 100.0;

    Ok(ScenarioImpact {
        scenario_id: scenario.id.clone(),
        impact: (impact * 10.0).round() / 10.0,
        total_demand: total_scenario.round(),
        variance: (parameters.volatility_increase * 100.0 - 100.0).round() as i64,
    })
}

/// The preset scenarios plus any custom ones added during a session.
#[derive(Debug, Clone)]
pub struct ScenarioPlanner {
    scenarios: Vec<Scenario>,
    custom_sequence: u64,
}

impl Default for ScenarioPlanner {
    fn default() -> Self {
        Self {
            scenarios: preset_scenarios(),
            custom_sequence: 0,
        }
    }
}

impl ScenarioPlanner {
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn add_custom(&mut self, name: &str, parameters: ScenarioParameters) -> &Scenario {
        self.custom_sequence += 1;
        let name = if name.trim().is_empty() {
            "Custom Scenario"
        } else {
            name.trim()
        };
        self.scenarios.push(Scenario {
            id: format!("custom_{}", self.custom_sequence),
            name: name.to_string(),
            description: "Custom scenario configuration".to_string(),
            parameters,
        });
        &self.scenarios[self.scenarios.len() - 1]
    }

    pub fn remove(&mut self, id: &str) -> Result<Scenario, ScenarioPlannerError> {
        let index = self
            .scenarios
            .iter()
            .position(|scenario| scenario.id == id)
            .ok_or_else(|| ScenarioPlannerError::UnknownScenario(id.to_string()))?;
        Ok(self.scenarios.remove(index))
    }

    pub fn impacts(
        &self,
        baseline: &[ForecastPoint],
    ) -> Result<Vec<(Scenario, ScenarioImpact)>, ScenarioPlannerError> {
        self.scenarios
            .iter()
            .map(|scenario| {
                calculate_scenario_impact(scenario, baseline)
                    .map(|impact| (scenario.clone(), impact))
            })
            .collect()
    }
}
