use crate::domain::route::{AlternativeRoute, OptimizationResult, RouteAlgorithm, Weighting};
use crate::services::network_graph::SupplyNetwork;
use crate::services::shortest_path::{compute_shortest_path, find_path, summarize_path};

/// A routing algorithm selectable by name. Every strategy runs on the same
/// Dijkstra core; they differ in the weighting they use and in any
/// post-processing applied to the found path.
pub trait RouteStrategy: Send + Sync {
    fn algorithm(&self) -> RouteAlgorithm;

    /// Weighting actually used for a requested one.
    fn effective_weighting(&self, requested: Weighting) -> Weighting {
        requested
    }

    fn find_route(
        &self,
        network: &SupplyNetwork,
        source_id: &str,
        target_id: &str,
        weighting: Weighting,
    ) -> Option<OptimizationResult>;

    /// Applies the strategy's post-processing to an alternative so its
    /// figures compare with the primary route's.
    fn adjust_alternative(&self, _alternative: &mut AlternativeRoute) {}
}

pub struct DijkstraStrategy;

impl RouteStrategy for DijkstraStrategy {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_route(
        &self,
        network: &SupplyNetwork,
        source_id: &str,
        target_id: &str,
        weighting: Weighting,
    ) -> Option<OptimizationResult> {
        compute_shortest_path(network, source_id, target_id, &weighting)
    }
}

/// Alias of cost-weighted Dijkstra. No heuristic is applied, so results are
/// identical to `DijkstraStrategy` with `Weighting::Cost`.
pub struct AStarStrategy;

impl RouteStrategy for AStarStrategy {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn effective_weighting(&self, _requested: Weighting) -> Weighting {
        Weighting::Cost
    }

    fn find_route(
        &self,
        network: &SupplyNetwork,
        source_id: &str,
        target_id: &str,
        _weighting: Weighting,
    ) -> Option<OptimizationResult> {
        compute_shortest_path(network, source_id, target_id, &Weighting::Cost)
    }
}

/// Cost-weighted Dijkstra followed by a fixed heuristic transform: the
/// efficiency score is raised and the total cost discounted.
pub struct AiOptimizedStrategy {
    pub efficiency_bonus: f64,
    pub cost_factor: f64,
}

impl Default for AiOptimizedStrategy {
    fn default() -> Self {
        Self {
            efficiency_bonus: 5.0,
            cost_factor: 0.95,
        }
    }
}

impl RouteStrategy for AiOptimizedStrategy {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AiOptimized
    }

    fn effective_weighting(&self, _requested: Weighting) -> Weighting {
        Weighting::Cost
    }

    fn find_route(
        &self,
        network: &SupplyNetwork,
        source_id: &str,
        target_id: &str,
        _weighting: Weighting,
    ) -> Option<OptimizationResult> {
        let mut result = compute_shortest_path(network, source_id, target_id, &Weighting::Cost)?;
        result.efficiency = (result.efficiency + self.efficiency_bonus).min(100.0);
        result.total_cost = self.discount(result.total_cost);
        Some(result)
    }

    fn adjust_alternative(&self, alternative: &mut AlternativeRoute) {
        alternative.cost = self.discount(alternative.cost);
    }
}

impl AiOptimizedStrategy {
    fn discount(&self, cost: f64) -> f64 {
        (cost * self.cost_factor).round()
    }
}

pub fn strategy_for(algorithm: RouteAlgorithm) -> Box<dyn RouteStrategy> {
    match algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraStrategy),
        RouteAlgorithm::AStar => Box::new(AStarStrategy),
        RouteAlgorithm::AiOptimized => Box::new(AiOptimizedStrategy::default()),
    }
}

/// Best paths under the other weightings that differ from `primary`, each
/// adjusted by `strategy` the same way as the primary route.
pub fn alternative_routes(
    network: &SupplyNetwork,
    source_id: &str,
    target_id: &str,
    primary: &OptimizationResult,
    strategy: &dyn RouteStrategy,
    used: Weighting,
) -> Vec<AlternativeRoute> {
    let mut alternatives: Vec<AlternativeRoute> = Vec::new();
    for weighting in Weighting::ALL {
        if weighting == used {
            continue;
        }
        let Some(found) = find_path(network, source_id, target_id, &weighting) else {
            continue;
        };
        let result = summarize_path(network, &found);
        if result.path == primary.path
            || alternatives.iter().any(|alternative| alternative.path == result.path)
        {
            continue;
        }
        let mut alternative = AlternativeRoute {
            weighting,
            confidence: 1.0 - result.risk_score,
            path: result.path,
            cost: result.total_cost,
            time: result.total_time,
        };
        strategy.adjust_alternative(&mut alternative);
        alternatives.push(alternative);
    }
    alternatives
}
