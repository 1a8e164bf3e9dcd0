use petgraph::Direction;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::domain::network::Edge;
use crate::domain::route::{OptimizationResult, Weighting};
use crate::services::network_graph::SupplyNetwork;

/// Maps an edge to the non-negative weight minimised by the search.
pub trait PathWeighting {
    fn edge_weight(&self, edge: &Edge) -> f64;
}

impl PathWeighting for Weighting {
    fn edge_weight(&self, edge: &Edge) -> f64 {
        match self {
            Weighting::Cost => edge.cost,
            Weighting::Time => edge.time,
            Weighting::Risk => edge.risk_factor * 100.0,
            Weighting::Distance => edge.distance,
        }
    }
}

/// Edges of a found path, in travel order, with their summed weight.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEdges {
    pub nodes: Vec<NodeIndex>,
    pub edges: Vec<EdgeIndex>,
    pub weight: f64,
}

/// Single-source Dijkstra over the network.
///
/// The frontier is a linear scan of the unvisited nodes, so a run is O(V^2).
/// Among equally distant nodes the one inserted first wins, and among equally
/// good relaxations the edge inserted first wins. Returns `None` when either
/// id is unknown or the target cannot be reached.
pub fn find_path<W: PathWeighting + ?Sized>(
    network: &SupplyNetwork,
    source_id: &str,
    target_id: &str,
    weighting: &W,
) -> Option<PathEdges> {
    let source = network.node_index(source_id)?;
    let target = network.node_index(target_id)?;
    let graph = network.graph();
    let node_count = graph.node_count();

    let mut distances = vec![f64::INFINITY; node_count];
    let mut previous: Vec<Option<EdgeIndex>> = vec![None; node_count];
    let mut unvisited = vec![true; node_count];
    let mut remaining = node_count;
    distances[source.index()] = 0.0;

    while remaining > 0 {
        let mut current: Option<NodeIndex> = None;
        for candidate in graph.node_indices() {
            if !unvisited[candidate.index()] {
                continue;
            }
            match current {
                Some(best) if distances[candidate.index()] >= distances[best.index()] => {}
                _ => current = Some(candidate),
            }
        }
        let Some(current) = current else {
            break;
        };

        if distances[current.index()].is_infinite() || current == target {
            break;
        }
        unvisited[current.index()] = false;
        remaining -= 1;

        let mut outgoing: Vec<_> = graph.edges_directed(current, Direction::Outgoing).collect();
        outgoing.sort_by_key(|edge| edge.id());
        for edge in outgoing {
            let next = edge.target();
            if !unvisited[next.index()] {
                continue;
            }
            let candidate = distances[current.index()] + weighting.edge_weight(edge.weight());
            if candidate < distances[next.index()] {
                distances[next.index()] = candidate;
                previous[next.index()] = Some(edge.id());
            }
        }
    }

    let mut edges = Vec::new();
    let mut nodes = vec![target];
    let mut cursor = target;
    while let Some(edge_index) = previous[cursor.index()] {
        edges.push(edge_index);
        let (from, _) = graph.edge_endpoints(edge_index)?;
        nodes.push(from);
        cursor = from;
    }
    if cursor != source {
        return None;
    }
    edges.reverse();
    nodes.reverse();

    Some(PathEdges {
        nodes,
        edges,
        weight: distances[target.index()],
    })
}

/// Shortest path between two nodes with totals over its edges.
pub fn compute_shortest_path<W: PathWeighting + ?Sized>(
    network: &SupplyNetwork,
    source_id: &str,
    target_id: &str,
    weighting: &W,
) -> Option<OptimizationResult> {
    let found = find_path(network, source_id, target_id, weighting)?;
    Some(summarize_path(network, &found))
}

pub(crate) fn summarize_path(network: &SupplyNetwork, found: &PathEdges) -> OptimizationResult {
    let graph = network.graph();
    let path = found
        .nodes
        .iter()
        .map(|index| graph[*index].id.clone())
        .collect();
    let edges: Vec<&Edge> = found.edges.iter().map(|index| network.edge(*index)).collect();

    let total_cost: f64 = edges.iter().map(|edge| edge.cost).sum();
    let total_time: f64 = edges.iter().map(|edge| edge.time).sum();
    let total_distance: f64 = edges.iter().map(|edge| edge.distance).sum();
    let risk_score = if edges.is_empty() {
        0.0
    } else {
        edges.iter().map(|edge| edge.risk_factor).sum::<f64>() / edges.len() as f64
    };

    OptimizationResult {
        path,
        total_cost,
        total_time,
        total_distance,
        efficiency: efficiency_score(risk_score, total_time),
        risk_score,
        alternative_routes: Vec::new(),
    }
}

/// `max(0, 100 - risk * 50 - time * 2)`, rounded.
pub fn efficiency_score(mean_risk: f64, total_time: f64) -> f64 {
    (100.0 - mean_risk * 50.0 - total_time * 2.0).max(0.0).round()
}
