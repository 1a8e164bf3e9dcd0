use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use thiserror::Error;

use crate::domain::network::{Edge, Node};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphIntegrityError {
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),
    #[error("duplicate edge id: {0}")]
    DuplicateEdge(String),
    #[error("edge {edge} references unknown node {node}")]
    UnknownEndpoint { edge: String, node: String },
    #[error("invalid value for edge {edge}: {reason}")]
    InvalidEdge { edge: String, reason: String },
}

/// Immutable supply network. Nodes keep their insertion order, which is
/// also the tie-break order of the shortest-path search.
#[derive(Debug, Clone)]
pub struct SupplyNetwork {
    graph: DiGraph<Node, Edge>,
    indices: HashMap<String, NodeIndex>,
}

impl SupplyNetwork {
    /// Builds the network, rejecting duplicate ids, dangling edges and
    /// out-of-range edge attributes.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphIntegrityError> {
        let mut graph: DiGraph<Node, Edge> = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut indices: HashMap<String, NodeIndex> = HashMap::with_capacity(nodes.len());

        for node in nodes {
            if indices.contains_key(&node.id) {
                return Err(GraphIntegrityError::DuplicateNode(node.id));
            }
            let id = node.id.clone();
            let index = graph.add_node(node);
            indices.insert(id, index);
        }

        let mut edge_ids = HashSet::with_capacity(edges.len());
        for edge in edges {
            validate_edge(&edge)?;
            if !edge_ids.insert(edge.id.clone()) {
                return Err(GraphIntegrityError::DuplicateEdge(edge.id));
            }
            let from = endpoint(&indices, &edge, &edge.from)?;
            let to = endpoint(&indices, &edge, &edge.to)?;
            graph.add_edge(from, to, edge);
        }

        Ok(Self { graph, indices })
    }

    pub fn graph(&self) -> &DiGraph<Node, Edge> {
        &self.graph
    }

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.indices.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index(id).map(|index| &self.graph[index])
    }

    pub fn edge(&self, index: EdgeIndex) -> &Edge {
        &self.graph[index]
    }

    pub fn contains(&self, id: &str) -> bool {
        self.indices.contains_key(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_indices().map(move |index| &self.graph[index])
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_indices().map(move |index| &self.graph[index])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

fn endpoint(
    indices: &HashMap<String, NodeIndex>,
    edge: &Edge,
    node_id: &str,
) -> Result<NodeIndex, GraphIntegrityError> {
    indices
        .get(node_id)
        .copied()
        .ok_or_else(|| GraphIntegrityError::UnknownEndpoint {
            edge: edge.id.clone(),
            node: node_id.to_string(),
        })
}

fn validate_edge(edge: &Edge) -> Result<(), GraphIntegrityError> {
    let invalid = |reason: &str| GraphIntegrityError::InvalidEdge {
        edge: edge.id.clone(),
        reason: reason.to_string(),
    };

    if !(edge.distance.is_finite() && edge.distance > 0.0) {
        return Err(invalid("distance must be positive"));
    }
    if !(edge.cost.is_finite() && edge.cost > 0.0) {
        return Err(invalid("cost must be positive"));
    }
    if !(edge.time.is_finite() && edge.time > 0.0) {
        return Err(invalid("time must be positive"));
    }
    if !(0.0..=1.0).contains(&edge.risk_factor) {
        return Err(invalid("risk factor must be within [0, 1]"));
    }
    if edge.capacity == 0 {
        return Err(invalid("capacity must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{build_edge, build_node};

    #[test]
    fn keeps_nodes_and_edges_in_insertion_order() {
        let network = SupplyNetwork::new(
            vec![build_node("B"), build_node("A"), build_node("C")],
            vec![build_edge("e1", "B", "A", 1.0), build_edge("e2", "A", "C", 2.0)],
        )
        .unwrap();

        let ids: Vec<&str> = network.nodes().map(|node| node.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
        let edge_ids: Vec<&str> = network.edges().map(|edge| edge.id.as_str()).collect();
        assert_eq!(edge_ids, vec!["e1", "e2"]);
        assert_eq!(network.node_count(), 3);
        assert_eq!(network.edge_count(), 2);
        assert!(network.contains("C"));
        assert_eq!(network.node("A").map(|node| node.id.as_str()), Some("A"));
        assert!(network.node("Z").is_none());
    }

    #[test]
    fn rejects_edges_with_unknown_endpoints() {
        let error = SupplyNetwork::new(
            vec![build_node("A")],
            vec![build_edge("e1", "A", "missing", 1.0)],
        )
        .unwrap_err();

        assert_eq!(
            error,
            GraphIntegrityError::UnknownEndpoint {
                edge: "e1".to_string(),
                node: "missing".to_string(),
            }
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let error =
            SupplyNetwork::new(vec![build_node("A"), build_node("A")], vec![]).unwrap_err();
        assert_eq!(error, GraphIntegrityError::DuplicateNode("A".to_string()));

        let error = SupplyNetwork::new(
            vec![build_node("A"), build_node("B")],
            vec![build_edge("e1", "A", "B", 1.0), build_edge("e1", "B", "A", 1.0)],
        )
        .unwrap_err();
        assert_eq!(error, GraphIntegrityError::DuplicateEdge("e1".to_string()));
    }

    #[test]
    fn rejects_out_of_range_edge_attributes() {
        let mut risky = build_edge("e1", "A", "B", 1.0);
        risky.risk_factor = 1.5;
        let error =
            SupplyNetwork::new(vec![build_node("A"), build_node("B")], vec![risky]).unwrap_err();
        assert!(matches!(error, GraphIntegrityError::InvalidEdge { edge, .. } if edge == "e1"));

        let free = build_edge("e2", "A", "B", 0.0);
        let error =
            SupplyNetwork::new(vec![build_node("A"), build_node("B")], vec![free]).unwrap_err();
        assert!(matches!(error, GraphIntegrityError::InvalidEdge { .. }));
    }
}
