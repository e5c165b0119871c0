use std::fmt;

use super::types::{Edge, Graph};

/// Named polymer topology: the configuration object of one pipeline run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    pub name: String,
    pub description: String,
    /// Labelled edge groups, e.g. `("ring", [...])`. Order is preserved.
    pub edge_groups: Vec<(String, Vec<Edge>)>,
}

/// Unknown topology name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyError {
    pub requested: String,
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown topology {:?} (known: {})",
            self.requested,
            Topology::NAMES.join(", ")
        )
    }
}

impl std::error::Error for TopologyError {}

impl Topology {
    /// Names accepted by `by_name`.
    pub const NAMES: [&'static str; 2] = ["theta", "tree"];

    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            edge_groups: Vec::new(),
        }
    }

    pub fn with_group(mut self, label: impl Into<String>, edges: &[Edge]) -> Self {
        self.edge_groups.push((label.into(), edges.to_vec()));
        self
    }

    /// Hexagonal ring 0..5 with a central vertex 6 joined to 1, 3, 5.
    pub fn theta() -> Self {
        Self::new(
            "theta",
            "Hexagonal ring with central vertex connected to alternating vertices",
        )
        .with_group("ring", &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)])
        .with_group("branches", &[(6, 1), (6, 3), (6, 5)])
    }

    /// Root 0 → children 1, 2, 3 → two leaves each.
    pub fn tree() -> Self {
        Self::new("tree", "1 central node → 3 secondary nodes → 6 leaf nodes")
            .with_group("primary", &[(0, 1), (0, 2), (0, 3)])
            .with_group(
                "secondary",
                &[(1, 4), (1, 5), (2, 6), (2, 7), (3, 8), (3, 9)],
            )
    }

    /// Case-insensitive preset lookup.
    pub fn by_name(name: &str) -> Result<Self, TopologyError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "theta" => Ok(Self::theta()),
            "tree" => Ok(Self::tree()),
            _ => Err(TopologyError {
                requested: name.to_string(),
            }),
        }
    }

    pub fn presets() -> Vec<Self> {
        vec![Self::theta(), Self::tree()]
    }

    /// All edges, groups concatenated in order.
    pub fn edges(&self) -> Vec<Edge> {
        self.edge_groups
            .iter()
            .flat_map(|(_, es)| es.iter().copied())
            .collect()
    }

    pub fn build_graph(&self) -> Graph {
        Graph::from_edges(&self.edges())
    }
}
