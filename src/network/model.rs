use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::transform::{WorldBounds, WorldPoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    /// The viewing user. Exactly one per graph.
    #[serde(alias = "self")]
    You,
    Direct,
    Mutual,
    Recommended,
    Potential,
}

impl NodeCategory {
    pub const ALL: [Self; 5] = [
        Self::You,
        Self::Direct,
        Self::Mutual,
        Self::Recommended,
        Self::Potential,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::You => "You",
            Self::Direct => "Direct connection",
            Self::Mutual => "Mutual connection",
            Self::Recommended => "Recommended",
            Self::Potential => "Potential connection",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthClass {
    Strong,
    Medium,
    Weak,
}

impl StrengthClass {
    pub const STRONG_THRESHOLD: f64 = 0.7;
    pub const MEDIUM_THRESHOLD: f64 = 0.4;

    /// Default banding for datasets that only carry a numeric strength.
    pub fn from_strength(strength: f64) -> Self {
        if strength >= Self::STRONG_THRESHOLD {
            Self::Strong
        } else if strength >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Weak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Medium => "medium",
            Self::Weak => "weak",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: String,
    pub display_name: String,
    pub title: String,
    pub company: Option<String>,
    pub position: WorldPoint,
    /// Radius in world units.
    pub visual_size: f64,
    pub category: NodeCategory,
    pub skills: BTreeSet<String>,
    pub connection_strength: f64,
    /// Unix seconds.
    pub last_activity_at: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    pub strength: f64,
    pub strength_class: StrengthClass,
}

/// Raw nodes and edges as supplied by a loader. Node order is z-order, edge order is draw order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphDataset {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Error, PartialEq)]
pub enum DataIntegrityError {
    #[error("duplicate node id `{0}`")]
    DuplicateNode(String),
    #[error("duplicate edge id `{0}`")]
    DuplicateEdge(String),
    #[error("edge `{edge}` references unknown node `{node}`")]
    DanglingEdge { edge: String, node: String },
    #[error("edge `{edge}` has strength {strength} outside [0, 1]")]
    EdgeStrengthOutOfRange { edge: String, strength: f64 },
    #[error("node `{node}` has connection strength {strength} outside [0, 1]")]
    NodeStrengthOutOfRange { node: String, strength: f64 },
    #[error("node `{node}` has visual size {size}, expected a finite positive radius")]
    InvalidVisualSize { node: String, size: f64 },
    #[error("node `{node}` has non-finite position ({x}, {y})")]
    NonFinitePosition { node: String, x: f64, y: f64 },
    #[error("expected exactly one `you` node, found {0}")]
    SelfNodeCount(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("no node with id `{0}`")]
    NodeNotFound(String),
}

/// Validated, indexed, read-only view of a [`GraphDataset`].
#[derive(Clone, Debug)]
pub struct GraphModel {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index_by_id: HashMap<String, usize>,
    endpoints: Vec<(usize, usize)>,
    touching: Vec<Vec<usize>>,
    self_index: usize,
}

fn in_unit_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

impl GraphModel {
    pub fn new(dataset: GraphDataset) -> Result<Self, DataIntegrityError> {
        let GraphDataset { nodes, edges } = dataset;

        let mut index_by_id = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if index_by_id.insert(node.id.clone(), index).is_some() {
                return Err(DataIntegrityError::DuplicateNode(node.id.clone()));
            }
            if !in_unit_range(node.connection_strength) {
                return Err(DataIntegrityError::NodeStrengthOutOfRange {
                    node: node.id.clone(),
                    strength: node.connection_strength,
                });
            }
            if !node.visual_size.is_finite() || node.visual_size <= 0.0 {
                return Err(DataIntegrityError::InvalidVisualSize {
                    node: node.id.clone(),
                    size: node.visual_size,
                });
            }
            if !node.position.x.is_finite() || !node.position.y.is_finite() {
                return Err(DataIntegrityError::NonFinitePosition {
                    node: node.id.clone(),
                    x: node.position.x,
                    y: node.position.y,
                });
            }
        }

        let self_indices = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.category == NodeCategory::You)
            .map(|(index, _)| index)
            .collect::<Vec<_>>();
        let [self_index] = self_indices[..] else {
            return Err(DataIntegrityError::SelfNodeCount(self_indices.len()));
        };

        let mut edge_ids = HashSet::with_capacity(edges.len());
        let mut endpoints = Vec::with_capacity(edges.len());
        let mut touching = vec![Vec::new(); nodes.len()];
        for (edge_index, edge) in edges.iter().enumerate() {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(DataIntegrityError::DuplicateEdge(edge.id.clone()));
            }
            if !in_unit_range(edge.strength) {
                return Err(DataIntegrityError::EdgeStrengthOutOfRange {
                    edge: edge.id.clone(),
                    strength: edge.strength,
                });
            }

            let resolve = |node_id: &str| {
                index_by_id
                    .get(node_id)
                    .copied()
                    .ok_or_else(|| DataIntegrityError::DanglingEdge {
                        edge: edge.id.clone(),
                        node: node_id.to_owned(),
                    })
            };
            let source = resolve(&edge.source_id)?;
            let target = resolve(&edge.target_id)?;

            endpoints.push((source, target));
            touching[source].push(edge_index);
            if target != source {
                touching[target].push(edge_index);
            }
        }

        log::debug!(
            "graph model built: {} nodes, {} edges",
            nodes.len(),
            edges.len()
        );

        Ok(Self {
            nodes,
            edges,
            index_by_id,
            endpoints,
            touching,
            self_index,
        })
    }

    pub fn get_node(&self, id: &str) -> Result<&Node, GraphError> {
        self.index_by_id
            .get(id)
            .map(|&index| &self.nodes[index])
            .ok_or_else(|| GraphError::NodeNotFound(id.to_owned()))
    }

    /// Nodes in z-order; later nodes are drawn on top.
    pub fn all_nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in draw order.
    pub fn all_edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Every edge paired with its resolved endpoints, in draw order.
    pub fn edges_with_endpoints(&self) -> impl Iterator<Item = (&Edge, &Node, &Node)> + '_ {
        self.edges
            .iter()
            .zip(&self.endpoints)
            .map(|(edge, &(source, target))| (edge, &self.nodes[source], &self.nodes[target]))
    }

    pub fn edges_touching(&self, id: &str) -> Result<Vec<&Edge>, GraphError> {
        let index = self
            .index_by_id
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::NodeNotFound(id.to_owned()))?;

        Ok(self.touching[index]
            .iter()
            .map(|&edge_index| &self.edges[edge_index])
            .collect())
    }

    /// The node at the other end of each edge touching `id`, paired with that edge.
    pub fn neighbors(&self, id: &str) -> Result<Vec<(&Edge, &Node)>, GraphError> {
        let index = self
            .index_by_id
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::NodeNotFound(id.to_owned()))?;

        Ok(self.touching[index]
            .iter()
            .map(|&edge_index| {
                let (source, target) = self.endpoints[edge_index];
                let other = if source == index { target } else { source };
                (&self.edges[edge_index], &self.nodes[other])
            })
            .collect())
    }

    pub fn self_node(&self) -> &Node {
        &self.nodes[self.self_index]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn bounds(&self) -> Option<WorldBounds> {
        let mut nodes = self.nodes.iter();
        let first = nodes.next()?;
        let init = WorldBounds {
            min: WorldPoint::new(
                first.position.x - first.visual_size,
                first.position.y - first.visual_size,
            ),
            max: WorldPoint::new(
                first.position.x + first.visual_size,
                first.position.y + first.visual_size,
            ),
        };

        Some(nodes.fold(init, |bounds, node| WorldBounds {
            min: WorldPoint::new(
                bounds.min.x.min(node.position.x - node.visual_size),
                bounds.min.y.min(node.position.y - node.visual_size),
            ),
            max: WorldPoint::new(
                bounds.max.x.max(node.position.x + node.visual_size),
                bounds.max.y.max(node.position.y + node.visual_size),
            ),
        }))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn node(id: &str, category: NodeCategory, x: f64, y: f64, size: f64) -> Node {
        Node {
            id: id.to_owned(),
            display_name: id.to_owned(),
            title: String::new(),
            company: None,
            position: WorldPoint::new(x, y),
            visual_size: size,
            category,
            skills: BTreeSet::new(),
            connection_strength: 0.5,
            last_activity_at: 0,
        }
    }

    pub(crate) fn edge(source: &str, target: &str, strength: f64) -> Edge {
        Edge {
            id: format!("{source}->{target}"),
            source_id: source.to_owned(),
            target_id: target.to_owned(),
            strength,
            strength_class: StrengthClass::from_strength(strength),
        }
    }

    /// `you` in the middle, `ana` and `ben` to either side, edges from `you` to both.
    pub(crate) fn small_model() -> GraphModel {
        GraphModel::new(GraphDataset {
            nodes: vec![
                node("ana", NodeCategory::Direct, -100.0, 0.0, 10.0),
                node("you", NodeCategory::You, 0.0, 0.0, 20.0),
                node("ben", NodeCategory::Mutual, 100.0, 0.0, 10.0),
            ],
            edges: vec![edge("you", "ana", 0.9), edge("you", "ben", 0.2)],
        })
        .expect("fixture graph is valid")
    }
}
