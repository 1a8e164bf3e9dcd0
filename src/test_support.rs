use crate::domain::network::{Edge, Node, NodeCategory, TransportMode};
use crate::services::network_graph::SupplyNetwork;

pub fn build_node(id: &str) -> Node {
    Node::new(id, id, NodeCategory::Warehouse, 0.0, 0.0)
}

/// A road leg of 100 km taking one day at risk 0.1.
pub fn build_edge(id: &str, from: &str, to: &str, cost: f64) -> Edge {
    Edge {
        id: id.to_string(),
        from: from.to_string(),
        to: to.to_string(),
        transport_mode: TransportMode::Road,
        distance: 100.0,
        cost,
        time: 1.0,
        risk_factor: 0.1,
        capacity: 100,
    }
}

// A -> B (10), B -> C (5), A -> C (20)
pub fn triangle_network() -> SupplyNetwork {
    SupplyNetwork::new(
        vec![build_node("A"), build_node("B"), build_node("C")],
        vec![
            build_edge("ab", "A", "B", 10.0),
            build_edge("bc", "B", "C", 5.0),
            build_edge("ac", "A", "C", 20.0),
        ],
    )
    .unwrap()
}
