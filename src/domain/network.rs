use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    Supplier,
    Warehouse,
    Distribution,
    Customer,
    Port,
}

impl NodeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeCategory::Supplier => "supplier",
            NodeCategory::Warehouse => "warehouse",
            NodeCategory::Distribution => "distribution",
            NodeCategory::Customer => "customer",
            NodeCategory::Port => "port",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Road,
    Rail,
    Sea,
    Air,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Road => "road",
            TransportMode::Rail => "rail",
            TransportMode::Sea => "sea",
            TransportMode::Air => "air",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// A location in the supply network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub category: NodeCategory,
    pub location: Coordinate,
    pub capacity: Option<u32>,
    pub unit_cost: Option<f64>,
    pub current_stock: Option<u32>,
}

impl Node {
    pub fn new(id: &str, name: &str, category: NodeCategory, lat: f64, lng: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            location: Coordinate { lat, lng },
            capacity: None,
            unit_cost: None,
            current_stock: None,
        }
    }

    /// Stock over capacity, when both are known and capacity is nonzero.
    pub fn utilization(&self) -> Option<f64> {
        match (self.current_stock, self.capacity) {
            (Some(stock), Some(capacity)) if capacity > 0 => Some(stock as f64 / capacity as f64),
            _ => None,
        }
    }
}

/// A directed transport leg. `from -> to` does not imply `to -> from`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub from: String,
    pub to: String,
    pub transport_mode: TransportMode,
    /// Kilometres.
    pub distance: f64,
    pub cost: f64,
    /// Days.
    pub time: f64,
    /// In `[0, 1]`.
    pub risk_factor: f64,
    pub capacity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utilization_requires_stock_and_capacity() {
        let mut node = Node::new("w", "Warehouse", NodeCategory::Warehouse, 0.0, 0.0);
        assert_eq!(node.utilization(), None);

        node.capacity = Some(200);
        assert_eq!(node.utilization(), None);

        node.current_stock = Some(50);
        assert_eq!(node.utilization(), Some(0.25));

        node.capacity = Some(0);
        assert_eq!(node.utilization(), None);
    }

    #[test]
    fn categories_serialize_in_snake_case() {
        let yaml = serde_yaml::to_string(&NodeCategory::Distribution).unwrap();
        assert_eq!(yaml.trim(), "distribution");
        assert_eq!(NodeCategory::Port.as_str(), "port");
        assert_eq!(TransportMode::Sea.as_str(), "sea");
    }
}
