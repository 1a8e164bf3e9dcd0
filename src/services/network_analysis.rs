use petgraph::algo::connected_components;
use serde::Serialize;

use crate::domain::network::{Edge, NodeCategory, TransportMode};
use crate::services::network_connectivity::{
    average_node_connectivity, betweenness_centrality, edge_disjoint_paths,
};
use crate::services::network_graph::SupplyNetwork;

const BOTTLENECK_UTILIZATION: f64 = 0.9;
const HIGH_SEVERITY_UTILIZATION: f64 = 0.95;
const SMALL_NETWORK_NODES: usize = 5;
const CRITICAL_NODE_COUNT: usize = 3;
const TOP_ROUTE_COUNT: usize = 10;

const HIGH_RESILIENCE: f64 = 0.7;
const MEDIUM_RESILIENCE: f64 = 0.4;
const REDUNDANCY_THRESHOLD: f64 = 0.5;
/// Score used when connectivity is undefined, i.e. fewer than two nodes.
const FALLBACK_RESILIENCE: f64 = 0.5;

// Reference scales for route scoring: 1000 km, 1000 currency units, one day.
const DISTANCE_SCALE: f64 = 1000.0;
const COST_SCALE: f64 = 1000.0;
const TIME_SCALE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bottleneck {
    pub node_id: String,
    pub name: String,
    pub utilization: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalNode {
    pub node_id: String,
    pub name: String,
    pub category: NodeCategory,
    pub centrality: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResilienceLevel {
    Low,
    Medium,
    High,
}

impl ResilienceLevel {
    pub fn from_score(score: f64) -> Self {
        if score > HIGH_RESILIENCE {
            ResilienceLevel::High
        } else if score > MEDIUM_RESILIENCE {
            ResilienceLevel::Medium
        } else {
            ResilienceLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResilienceLevel::Low => "low",
            ResilienceLevel::Medium => "medium",
            ResilienceLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Resilience {
    pub score: f64,
    pub level: ResilienceLevel,
}

/// A single edge ranked by its composite score. Higher is better.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteScore {
    pub route_id: String,
    pub source: String,
    pub target: String,
    pub transport_mode: TransportMode,
    pub score: f64,
    pub distance: f64,
    pub cost: f64,
    pub time: f64,
    pub risk_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkAnalysis {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub density: f64,
    pub weakly_connected: bool,
    pub critical_nodes: Vec<CriticalNode>,
    pub resilience: Resilience,
    pub bottlenecks: Vec<Bottleneck>,
    pub top_routes: Vec<RouteScore>,
    pub recommendations: Vec<String>,
}

pub fn analyze_network(network: &SupplyNetwork) -> NetworkAnalysis {
    let total_nodes = network.node_count();
    let total_edges = network.edge_count();
    let density = if total_nodes > 1 {
        total_edges as f64 / (total_nodes * (total_nodes - 1)) as f64
    } else {
        0.0
    };
    let weakly_connected = total_nodes > 0 && connected_components(network.graph()) == 1;
    let critical_nodes = critical_nodes(network);
    let resilience = resilience(network);
    let bottlenecks = find_bottlenecks(network);
    let top_routes = top_routes(network);
    let recommendations = recommendations(total_nodes, resilience.score, &bottlenecks);

    NetworkAnalysis {
        total_nodes,
        total_edges,
        density,
        weakly_connected,
        critical_nodes,
        resilience,
        bottlenecks,
        top_routes,
        recommendations,
    }
}

/// The three nodes with the highest betweenness centrality. Ties keep
/// node insertion order.
pub fn critical_nodes(network: &SupplyNetwork) -> Vec<CriticalNode> {
    let centrality = betweenness_centrality(network);
    let mut ranked: Vec<CriticalNode> = network
        .nodes()
        .zip(centrality)
        .map(|(node, centrality)| CriticalNode {
            node_id: node.id.clone(),
            name: node.name.clone(),
            category: node.category,
            centrality,
        })
        .collect();
    ranked.sort_by(|a, b| b.centrality.total_cmp(&a.centrality));
    ranked.truncate(CRITICAL_NODE_COUNT);
    ranked
}

/// Connectivity plus redundancy over five, capped at one and rounded to
/// two decimals. Redundancy is the number of edge-disjoint paths between
/// the first and last node.
pub fn resilience(network: &SupplyNetwork) -> Resilience {
    let score = match average_node_connectivity(network) {
        Some(connectivity) => {
            let redundancy = edge_disjoint_paths(network, 0, network.node_count() - 1);
            let raw = ((connectivity + f64::from(redundancy)) / 5.0).min(1.0);
            (raw * 100.0).round() / 100.0
        }
        None => FALLBACK_RESILIENCE,
    };
    Resilience {
        score,
        level: ResilienceLevel::from_score(score),
    }
}

/// Weighted blend of distance, cost, time and inverted risk, rounded to
/// three decimals.
pub fn route_score(edge: &Edge) -> f64 {
    let distance = 1.0 / (1.0 + edge.distance / DISTANCE_SCALE);
    let cost = 1.0 / (1.0 + edge.cost / COST_SCALE);
    let time = 1.0 / (1.0 + edge.time / TIME_SCALE);
    let safety = 1.0 - edge.risk_factor;

    let composite = distance * 0.2 + cost * 0.3 + time * 0.3 + safety * 0.2;
    (composite * 1000.0).round() / 1000.0
}

/// Up to ten edges ordered by descending route score.
pub fn top_routes(network: &SupplyNetwork) -> Vec<RouteScore> {
    let mut routes: Vec<RouteScore> = network
        .edges()
        .map(|edge| RouteScore {
            route_id: edge.id.clone(),
            source: edge.from.clone(),
            target: edge.to.clone(),
            transport_mode: edge.transport_mode,
            score: route_score(edge),
            distance: edge.distance,
            cost: edge.cost,
            time: edge.time,
            risk_factor: edge.risk_factor,
        })
        .collect();
    routes.sort_by(|a, b| b.score.total_cmp(&a.score));
    routes.truncate(TOP_ROUTE_COUNT);
    routes
}

/// Nodes holding more than 90% of their capacity.
pub fn find_bottlenecks(network: &SupplyNetwork) -> Vec<Bottleneck> {
    network
        .nodes()
        .filter_map(|node| {
            let utilization = node.utilization()?;
            if utilization <= BOTTLENECK_UTILIZATION {
                return None;
            }
            let severity = if utilization > HIGH_SEVERITY_UTILIZATION {
                Severity::High
            } else {
                Severity::Medium
            };
            Some(Bottleneck {
                node_id: node.id.clone(),
                name: node.name.clone(),
                utilization: (utilization * 100.0).round() / 100.0,
                severity,
            })
        })
        .collect()
}

fn recommendations(total_nodes: usize, resilience: f64, bottlenecks: &[Bottleneck]) -> Vec<String> {
    let mut recommendations = Vec::new();
    if resilience < REDUNDANCY_THRESHOLD {
        recommendations
            .push("Consider adding redundant routes to improve network resilience".to_string());
    }
    if !bottlenecks.is_empty() {
        recommendations
            .push("Address capacity constraints at identified bottleneck nodes".to_string());
    }
    if total_nodes < SMALL_NETWORK_NODES {
        recommendations.push(
            "Expand network with additional suppliers or distribution centers".to_string(),
        );
    }
    recommendations.push("Implement real-time monitoring for critical network nodes".to_string());
    recommendations.push("Develop contingency plans for high-risk routes".to_string());
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::sample_network::sample_network;
    use crate::test_support::{build_edge, build_node};

    #[test]
    fn analyzes_the_sample_network() {
        let analysis = analyze_network(&sample_network().unwrap());

        assert_eq!(analysis.total_nodes, 7);
        assert_eq!(analysis.total_edges, 7);
        assert!((analysis.density - 7.0 / 42.0).abs() < 1e-12);
        assert!(analysis.weakly_connected);
        assert!(analysis.bottlenecks.is_empty());
        assert_eq!(analysis.top_routes.len(), 7);
        assert_eq!(analysis.recommendations.len(), 3);
        assert!(analysis.recommendations[0].contains("redundant routes"));
    }

    #[test]
    fn critical_nodes_rank_by_betweenness() {
        let critical = critical_nodes(&sample_network().unwrap());

        let ids: Vec<&str> = critical.iter().map(|node| node.node_id.as_str()).collect();
        assert_eq!(
            ids,
            ["port_rotterdam", "warehouse_singapore", "warehouse_dubai"]
        );
        assert!((critical[0].centrality - 0.2).abs() < 1e-12);
        assert_eq!(critical[0].name, "Port of Rotterdam");
        assert_eq!(critical[0].category, NodeCategory::Port);
    }

    #[test]
    fn sample_network_has_medium_resilience() {
        // (27 / 21 average connectivity + 1 disjoint path) / 5 = 0.457...
        let resilience = resilience(&sample_network().unwrap());

        assert_eq!(resilience.score, 0.46);
        assert_eq!(resilience.level, ResilienceLevel::Medium);
    }

    #[test]
    fn resilience_levels_follow_thresholds() {
        assert_eq!(ResilienceLevel::from_score(0.71), ResilienceLevel::High);
        assert_eq!(ResilienceLevel::from_score(0.7), ResilienceLevel::Medium);
        assert_eq!(ResilienceLevel::from_score(0.41), ResilienceLevel::Medium);
        assert_eq!(ResilienceLevel::from_score(0.4), ResilienceLevel::Low);
    }

    #[test]
    fn single_node_networks_use_the_fallback_resilience() {
        let network = SupplyNetwork::new(vec![build_node("A")], vec![]).unwrap();

        let resilience = resilience(&network);

        assert_eq!(resilience.score, 0.5);
        assert_eq!(resilience.level, ResilienceLevel::Medium);
        assert!(
            !analyze_network(&network)
                .recommendations
                .iter()
                .any(|item| item.contains("redundant routes"))
        );
    }

    #[test]
    fn well_connected_networks_skip_the_redundancy_recommendation() {
        // A four-node cycle with a chord: every pair has at least two
        // node-disjoint paths.
        let network = SupplyNetwork::new(
            vec![build_node("A"), build_node("B"), build_node("C"), build_node("D")],
            vec![
                build_edge("ab", "A", "B", 1.0),
                build_edge("bc", "B", "C", 1.0),
                build_edge("cd", "C", "D", 1.0),
                build_edge("da", "D", "A", 1.0),
                build_edge("ac", "A", "C", 1.0),
            ],
        )
        .unwrap();

        let analysis = analyze_network(&network);

        assert_eq!(analysis.resilience.level, ResilienceLevel::High);
        assert!(
            !analysis
                .recommendations
                .iter()
                .any(|item| item.contains("redundant routes"))
        );
    }

    #[test]
    fn routes_are_ranked_by_composite_score() {
        let routes = top_routes(&sample_network().unwrap());

        let ids: Vec<&str> = routes.iter().map(|route| route.route_id.as_str()).collect();
        assert_eq!(
            ids,
            ["edge_5", "edge_2", "edge_1", "edge_6", "edge_4", "edge_7", "edge_3"]
        );
        assert_eq!(routes[0].score, 0.728);
        assert_eq!(routes[0].source, "port_rotterdam");
        assert_eq!(routes[0].transport_mode, TransportMode::Road);
        assert_eq!(routes[6].score, 0.246);
    }

    #[test]
    fn only_the_ten_best_routes_are_kept() {
        let nodes: Vec<_> = (0..12).map(|i| build_node(&format!("n{i}"))).collect();
        let edges: Vec<_> = (0..11)
            .map(|i| {
                build_edge(
                    &format!("e{i}"),
                    &format!("n{i}"),
                    &format!("n{}", i + 1),
                    100.0 * (i + 1) as f64,
                )
            })
            .collect();
        let network = SupplyNetwork::new(nodes, edges).unwrap();

        let routes = top_routes(&network);

        assert_eq!(routes.len(), 10);
        assert_eq!(routes[0].route_id, "e0");
        assert!(routes.iter().all(|route| route.route_id != "e10"));
    }

    #[test]
    fn flags_nodes_above_ninety_percent_utilization() {
        let mut medium = build_node("M");
        medium.capacity = Some(100);
        medium.current_stock = Some(93);
        let mut high = build_node("H");
        high.capacity = Some(100);
        high.current_stock = Some(99);
        let mut fine = build_node("F");
        fine.capacity = Some(100);
        fine.current_stock = Some(90);
        let network = SupplyNetwork::new(vec![medium, high, fine], vec![]).unwrap();

        let bottlenecks = find_bottlenecks(&network);

        assert_eq!(bottlenecks.len(), 2);
        assert_eq!(bottlenecks[0].node_id, "M");
        assert_eq!(bottlenecks[0].severity, Severity::Medium);
        assert_eq!(bottlenecks[0].utilization, 0.93);
        assert_eq!(bottlenecks[1].node_id, "H");
        assert_eq!(bottlenecks[1].severity, Severity::High);
    }

    #[test]
    fn small_disconnected_networks_get_extra_recommendations() {
        let network = SupplyNetwork::new(
            vec![build_node("A"), build_node("B"), build_node("C")],
            vec![build_edge("e1", "A", "B", 1.0)],
        )
        .unwrap();

        let analysis = analyze_network(&network);

        assert!(!analysis.weakly_connected);
        assert_eq!(analysis.recommendations.len(), 4);
        assert!(analysis.recommendations[0].contains("redundant routes"));
        assert!(analysis.recommendations[1].contains("Expand network"));
    }
}
