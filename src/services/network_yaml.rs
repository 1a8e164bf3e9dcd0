use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::network::{Coordinate, Edge, Node, NodeCategory, TransportMode};
use crate::services::network_graph::{GraphIntegrityError, SupplyNetwork};

#[derive(Error, Debug)]
pub enum NetworkYamlError {
    #[error("failed to read network yaml file {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("failed to parse network yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid node type for {node}: {value}")]
    InvalidNodeType { node: String, value: String },
    #[error("invalid transport mode for {edge}: {value}")]
    InvalidTransportMode { edge: String, value: String },
    #[error("invalid network: {0}")]
    Integrity(#[from] GraphIntegrityError),
}

#[derive(Debug, Serialize, Deserialize)]
struct NetworkRecord {
    nodes: Vec<NodeRecord>,
    #[serde(default)]
    edges: Vec<EdgeRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeRecord {
    id: String,
    name: Option<String>,
    #[serde(rename = "type")]
    node_type: String,
    location: LocationRecord,
    capacity: Option<u32>,
    cost: Option<f64>,
    current_stock: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LocationRecord {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct EdgeRecord {
    id: String,
    from: String,
    to: String,
    transport_mode: String,
    distance: f64,
    cost: f64,
    time: f64,
    risk_factor: f64,
    capacity: u32,
}

/// Reads a network document of the form `{ nodes: [...], edges: [...] }`.
pub fn load_network_from_yaml_file<P: AsRef<Path>>(
    path: P,
) -> Result<SupplyNetwork, NetworkYamlError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| NetworkYamlError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    deserialize_network_from_yaml_str(&contents)
}

pub fn deserialize_network_from_yaml_str(input: &str) -> Result<SupplyNetwork, NetworkYamlError> {
    let record: NetworkRecord = serde_yaml::from_str(input)?;

    let nodes = record
        .nodes
        .into_iter()
        .map(node_from_record)
        .collect::<Result<Vec<_>, _>>()?;
    let edges = record
        .edges
        .into_iter()
        .map(edge_from_record)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SupplyNetwork::new(nodes, edges)?)
}

pub fn serialize_network_to_yaml<W: Write>(
    writer: &mut W,
    network: &SupplyNetwork,
) -> io::Result<()> {
    let record = NetworkRecord {
        nodes: network.nodes().map(node_to_record).collect(),
        edges: network.edges().map(edge_to_record).collect(),
    };

    let yaml = serde_yaml::to_string(&record).map_err(io::Error::other)?;
    writer.write_all(yaml.as_bytes())
}

fn node_from_record(record: NodeRecord) -> Result<Node, NetworkYamlError> {
    let category = parse_node_type(&record.node_type).ok_or_else(|| {
        NetworkYamlError::InvalidNodeType {
            node: record.id.clone(),
            value: record.node_type.clone(),
        }
    })?;
    Ok(Node {
        name: record.name.unwrap_or_else(|| record.id.clone()),
        id: record.id,
        category,
        location: Coordinate {
            lat: record.location.lat,
            lng: record.location.lng,
        },
        capacity: record.capacity,
        unit_cost: record.cost,
        current_stock: record.current_stock,
    })
}

fn edge_from_record(record: EdgeRecord) -> Result<Edge, NetworkYamlError> {
    let transport_mode = parse_transport_mode(&record.transport_mode).ok_or_else(|| {
        NetworkYamlError::InvalidTransportMode {
            edge: record.id.clone(),
            value: record.transport_mode.clone(),
        }
    })?;
    Ok(Edge {
        id: record.id,
        from: record.from,
        to: record.to,
        transport_mode,
        distance: record.distance,
        cost: record.cost,
        time: record.time,
        risk_factor: record.risk_factor,
        capacity: record.capacity,
    })
}

fn node_to_record(node: &Node) -> NodeRecord {
    NodeRecord {
        id: node.id.clone(),
        name: Some(node.name.clone()),
        node_type: node.category.as_str().to_string(),
        location: LocationRecord {
            lat: node.location.lat,
            lng: node.location.lng,
        },
        capacity: node.capacity,
        cost: node.unit_cost,
        current_stock: node.current_stock,
    }
}

fn edge_to_record(edge: &Edge) -> EdgeRecord {
    EdgeRecord {
        id: edge.id.clone(),
        from: edge.from.clone(),
        to: edge.to.clone(),
        transport_mode: edge.transport_mode.as_str().to_string(),
        distance: edge.distance,
        cost: edge.cost,
        time: edge.time,
        risk_factor: edge.risk_factor,
        capacity: edge.capacity,
    }
}

fn parse_node_type(value: &str) -> Option<NodeCategory> {
    match value.trim().to_ascii_lowercase().as_str() {
        "supplier" => Some(NodeCategory::Supplier),
        "warehouse" => Some(NodeCategory::Warehouse),
        "distribution" | "distribution_center" => Some(NodeCategory::Distribution),
        "customer" | "store" => Some(NodeCategory::Customer),
        "port" => Some(NodeCategory::Port),
        _ => None,
    }
}

fn parse_transport_mode(value: &str) -> Option<TransportMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "road" | "truck" => Some(TransportMode::Road),
        "rail" => Some(TransportMode::Rail),
        "sea" | "ocean" => Some(TransportMode::Sea),
        "air" => Some(TransportMode::Air),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::sample_network::sample_network;
    use assert_fs::prelude::*;

    const NETWORK_YAML: &str = r#"nodes:
  - id: A
    name: Alpha Supplier
    type: supplier
    location: { lat: 1.0, lng: 2.0 }
    capacity: 100
    cost: 4.5
  - id: B
    type: Warehouse
    location: { lat: 3.0, lng: 4.0 }
    capacity: 50
    current_stock: 48
edges:
  - id: e1
    from: A
    to: B
    transport_mode: rail
    distance: 120
    cost: 30
    time: 2
    risk_factor: 0.1
    capacity: 40
"#;

    #[test]
    fn parses_nodes_and_edges() {
        let network = deserialize_network_from_yaml_str(NETWORK_YAML).unwrap();

        assert_eq!(network.node_count(), 2);
        let alpha = network.node("A").unwrap();
        assert_eq!(alpha.name, "Alpha Supplier");
        assert_eq!(alpha.category, NodeCategory::Supplier);
        assert_eq!(alpha.unit_cost, Some(4.5));
        let beta = network.node("B").unwrap();
        assert_eq!(beta.name, "B");
        assert_eq!(beta.current_stock, Some(48));

        let edge = network.edges().next().unwrap();
        assert_eq!(edge.transport_mode, TransportMode::Rail);
        assert_eq!(edge.distance, 120.0);
    }

    #[test]
    fn loads_network_from_file() {
        let file = assert_fs::NamedTempFile::new("network.yaml").unwrap();
        file.write_str(NETWORK_YAML).unwrap();

        let network = load_network_from_yaml_file(file.path()).unwrap();
        assert_eq!(network.edge_count(), 1);
    }

    #[test]
    fn returns_error_for_missing_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let error = load_network_from_yaml_file(temp.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(error, NetworkYamlError::ReadFile { .. }));
    }

    #[test]
    fn returns_error_on_invalid_node_type() {
        let yaml = "nodes:\n  - id: A\n    type: factory\n    location: { lat: 0, lng: 0 }\n";
        let error = deserialize_network_from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            error,
            NetworkYamlError::InvalidNodeType { node, value } if node == "A" && value == "factory"
        ));
    }

    #[test]
    fn returns_error_on_dangling_edge() {
        let yaml = "nodes:\n  - id: A\n    type: port\n    location: { lat: 0, lng: 0 }\nedges:\n  - id: e1\n    from: A\n    to: B\n    transport_mode: sea\n    distance: 1\n    cost: 1\n    time: 1\n    risk_factor: 0\n    capacity: 1\n";
        let error = deserialize_network_from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            error,
            NetworkYamlError::Integrity(GraphIntegrityError::UnknownEndpoint { .. })
        ));
    }

    #[test]
    fn serialized_sample_network_loads_back() {
        let network = sample_network().unwrap();
        let mut buffer = Vec::new();
        serialize_network_to_yaml(&mut buffer, &network).unwrap();
        let yaml = String::from_utf8(buffer).unwrap();
        assert!(yaml.contains("id: supplier_shanghai"));
        assert!(yaml.contains("transport_mode: air"));

        let reloaded = deserialize_network_from_yaml_str(&yaml).unwrap();
        assert_eq!(reloaded.node_count(), network.node_count());
        assert_eq!(reloaded.edge_count(), network.edge_count());
        assert_eq!(
            reloaded.node("distribution_london").map(|node| node.current_stock),
            Some(Some(800))
        );
    }
}
