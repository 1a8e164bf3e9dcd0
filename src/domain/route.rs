use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Edge attribute summed as the path weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    Cost,
    Time,
    Risk,
    Distance,
}

impl Weighting {
    pub const ALL: [Weighting; 4] = [
        Weighting::Cost,
        Weighting::Time,
        Weighting::Risk,
        Weighting::Distance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weighting::Cost => "cost",
            Weighting::Time => "time",
            Weighting::Risk => "risk",
            Weighting::Distance => "distance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAlgorithm {
    Dijkstra,
    #[serde(rename = "astar")]
    AStar,
    AiOptimized,
}

impl RouteAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "astar",
            RouteAlgorithm::AiOptimized => "ai-optimized",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRouteOptionError {
    #[error("unknown weighting: {0} (expected cost, time, risk or distance)")]
    Weighting(String),
    #[error("unknown algorithm: {0} (expected dijkstra, astar or ai-optimized)")]
    Algorithm(String),
}

impl FromStr for Weighting {
    type Err = ParseRouteOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cost" => Ok(Weighting::Cost),
            "time" => Ok(Weighting::Time),
            "risk" => Ok(Weighting::Risk),
            "distance" => Ok(Weighting::Distance),
            _ => Err(ParseRouteOptionError::Weighting(value.to_string())),
        }
    }
}

impl FromStr for RouteAlgorithm {
    type Err = ParseRouteOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "astar" | "a*" => Ok(RouteAlgorithm::AStar),
            "ai-optimized" | "ai" => Ok(RouteAlgorithm::AiOptimized),
            _ => Err(ParseRouteOptionError::Algorithm(value.to_string())),
        }
    }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeRoute {
    pub weighting: Weighting,
    pub path: Vec<String>,
    pub cost: f64,
    pub time: f64,
    pub confidence: f64,
}

/// A path from source to target with totals summed over its edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub path: Vec<String>,
    pub total_cost: f64,
    pub total_time: f64,
    pub total_distance: f64,
    pub efficiency: f64,
    pub risk_score: f64,
    pub alternative_routes: Vec<AlternativeRoute>,
}

impl OptimizationResult {
    pub fn source(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }

    pub fn target(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteCalculation {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub algorithm: RouteAlgorithm,
    pub weighting: Weighting,
    pub source: String,
    pub target: String,
    pub result: OptimizationResult,
}
