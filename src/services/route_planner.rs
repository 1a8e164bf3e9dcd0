use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::RoutingConfig;
use crate::domain::route::{OptimizationResult, RouteAlgorithm, RouteCalculation, Weighting};
use crate::services::busy_guard::BusyGuard;
use crate::services::network_graph::SupplyNetwork;
use crate::services::route_strategies::{alternative_routes, strategy_for};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutePlannerError {
    #[error("a route calculation is already in progress")]
    Busy,
    #[error("unknown node: {0}")]
    UnknownNode(String),
}

/// Owns a network and the observable routing state: the latest result, the
/// busy flag and a bounded, newest-first calculation history.
pub struct RoutePlanner {
    network: SupplyNetwork,
    history_limit: usize,
    simulated_delay: Duration,
    calculating: AtomicBool,
    sequence: AtomicU64,
    history: Mutex<VecDeque<RouteCalculation>>,
    current: Mutex<Option<OptimizationResult>>,
}

impl RoutePlanner {
    pub fn new(network: SupplyNetwork, config: &RoutingConfig) -> Self {
        Self {
            network,
            history_limit: config.history_limit.max(1),
            simulated_delay: Duration::from_millis(config.simulated_delay_ms),
            calculating: AtomicBool::new(false),
            sequence: AtomicU64::new(0),
            history: Mutex::new(VecDeque::new()),
            current: Mutex::new(None),
        }
    }

    pub fn network(&self) -> &SupplyNetwork {
        &self.network
    }

    pub fn is_calculating(&self) -> bool {
        self.calculating.load(Ordering::SeqCst)
    }

    /// Result of the latest calculation, `None` when it found no path.
    pub fn current_result(&self) -> Option<OptimizationResult> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded calculations, newest first.
    pub fn history(&self) -> Vec<RouteCalculation> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Computes a route and records it. `Ok(None)` means the target is
    /// unreachable from the source. Concurrent calls fail with `Busy`.
    pub async fn calculate(
        &self,
        algorithm: RouteAlgorithm,
        source_id: &str,
        target_id: &str,
        weighting: Weighting,
    ) -> Result<Option<RouteCalculation>, RoutePlannerError> {
        for id in [source_id, target_id] {
            if !self.network.contains(id) {
                return Err(RoutePlannerError::UnknownNode(id.to_string()));
            }
        }
        let _guard = BusyGuard::acquire(&self.calculating).ok_or(RoutePlannerError::Busy)?;
        info!(%algorithm, %weighting, source = source_id, target = target_id, "calculating route");

        if !self.simulated_delay.is_zero() {
            tokio::time::sleep(self.simulated_delay).await;
        }

        let strategy = strategy_for(algorithm);
        let used = strategy.effective_weighting(weighting);
        let result = strategy
            .find_route(&self.network, source_id, target_id, weighting)
            .map(|mut result| {
                result.alternative_routes = alternative_routes(
                    &self.network,
                    source_id,
                    target_id,
                    &result,
                    strategy.as_ref(),
                    used,
                );
                result
            });

        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = result.clone();
        let Some(result) = result else {
            info!(source = source_id, target = target_id, "no route found");
            return Ok(None);
        };
        info!(
            hops = result.hop_count(),
            total_cost = result.total_cost,
            total_time = result.total_time,
            "route found"
        );
        Ok(Some(self.record_calculation(
            algorithm, used, source_id, target_id, result,
        )))
    }

    /// Appends a calculation to the history, evicting the oldest entries
    /// beyond the configured limit.
    pub fn record_calculation(
        &self,
        algorithm: RouteAlgorithm,
        weighting: Weighting,
        source_id: &str,
        target_id: &str,
        result: OptimizationResult,
    ) -> RouteCalculation {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let calculation = RouteCalculation {
            id: format!("calc_{sequence}"),
            timestamp: Utc::now(),
            algorithm,
            weighting,
            source: source_id.to_string(),
            target: target_id.to_string(),
            result,
        };

        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        history.push_front(calculation.clone());
        while history.len() > self.history_limit {
            if let Some(evicted) = history.pop_back() {
                debug!(id = %evicted.id, "evicted route calculation from history");
            }
        }
        calculation
    }
}
