use crate::domain::network::{Edge, Node, NodeCategory, TransportMode};
use crate::services::network_graph::{GraphIntegrityError, SupplyNetwork};

/// Seven-node demo network spanning Asia, Europe and North America.
pub fn sample_network() -> Result<SupplyNetwork, GraphIntegrityError> {
    SupplyNetwork::new(sample_nodes(), sample_edges())
}

pub fn sample_nodes() -> Vec<Node> {
    vec![
        Node {
            capacity: Some(1000),
            unit_cost: Some(10.0),
            ..Node::new(
                "supplier_shanghai",
                "Shanghai Supplier",
                NodeCategory::Supplier,
                31.2304,
                121.4737,
            )
        },
        Node {
            capacity: Some(800),
            unit_cost: Some(8.0),
            ..Node::new(
                "supplier_mumbai",
                "Mumbai Supplier",
                NodeCategory::Supplier,
                19.0760,
                72.8777,
            )
        },
        Node {
            capacity: Some(5000),
            current_stock: Some(2000),
            ..Node::new(
                "warehouse_singapore",
                "Singapore Warehouse",
                NodeCategory::Warehouse,
                1.3521,
                103.8198,
            )
        },
        Node {
            capacity: Some(3000),
            current_stock: Some(1500),
            ..Node::new(
                "warehouse_dubai",
                "Dubai Warehouse",
                NodeCategory::Warehouse,
                25.2048,
                55.2708,
            )
        },
        Node {
            capacity: Some(10000),
            ..Node::new(
                "port_rotterdam",
                "Port of Rotterdam",
                NodeCategory::Port,
                51.9244,
                4.4777,
            )
        },
        Node {
            capacity: Some(2000),
            current_stock: Some(800),
            ..Node::new(
                "distribution_london",
                "London Distribution",
                NodeCategory::Distribution,
                51.5074,
                -0.1278,
            )
        },
        Node {
            capacity: Some(1000),
            ..Node::new(
                "customer_newyork",
                "New York Customer",
                NodeCategory::Customer,
                40.7128,
                -74.0060,
            )
        },
    ]
}

pub fn sample_edges() -> Vec<Edge> {
    vec![
        leg("edge_1", "supplier_shanghai", "warehouse_singapore", TransportMode::Sea, 2400.0, 500.0, 3.0, 0.2, 1000),
        leg("edge_2", "supplier_mumbai", "warehouse_dubai", TransportMode::Sea, 1200.0, 300.0, 2.0, 0.3, 800),
        leg("edge_3", "warehouse_singapore", "port_rotterdam", TransportMode::Sea, 16000.0, 2000.0, 20.0, 0.4, 5000),
        leg("edge_4", "warehouse_dubai", "port_rotterdam", TransportMode::Sea, 6500.0, 1200.0, 12.0, 0.3, 3000),
        leg("edge_5", "port_rotterdam", "distribution_london", TransportMode::Road, 350.0, 200.0, 1.0, 0.1, 2000),
        leg("edge_6", "distribution_london", "customer_newyork", TransportMode::Air, 5500.0, 3000.0, 1.0, 0.2, 500),
        leg("edge_7", "warehouse_singapore", "customer_newyork", TransportMode::Air, 17000.0, 5000.0, 2.0, 0.3, 1000),
    ]
}

#[allow(clippy::too_many_arguments)]
fn leg(
    id: &str,
    from: &str,
    to: &str,
    transport_mode: TransportMode,
    distance: f64,
    cost: f64,
    time: f64,
    risk_factor: f64,
    capacity: u32,
) -> Edge {
    Edge {
        id: id.to_string(),
        from: from.to_string(),
        to: to.to_string(),
        transport_mode,
        distance,
        cost,
        time,
        risk_factor,
        capacity,
    }
}
