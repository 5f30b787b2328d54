use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::network::style::node_radius;
use crate::network::{
    Edge, GraphDataset, GraphModel, Node, NodeCategory, StrengthClass, WorldPoint,
};

const SAMPLE_NETWORK: &str = include_str!("../data/sample_network.json");

#[derive(Debug, Deserialize)]
struct RawDataset {
    nodes: Vec<RawNode>,
    #[serde(default)]
    edges: Vec<RawEdge>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: String,
    display_name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    company: Option<String>,
    x: f64,
    y: f64,
    #[serde(default)]
    visual_size: Option<f64>,
    #[serde(default)]
    connections: Option<u64>,
    category: NodeCategory,
    #[serde(default)]
    skills: BTreeSet<String>,
    #[serde(default = "default_connection_strength")]
    connection_strength: f64,
    #[serde(default)]
    last_activity_at: u64,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    #[serde(default)]
    id: Option<String>,
    source: String,
    target: String,
    strength: f64,
    #[serde(default)]
    strength_class: Option<StrengthClass>,
}

fn default_connection_strength() -> f64 {
    0.5
}

/// Parses the JSON dataset format. Nodes without an explicit `visual_size`
/// get one from their `connections` count, log-scaled across the dataset.
pub fn parse_dataset(raw: &str) -> Result<GraphDataset> {
    let parsed: RawDataset = serde_json::from_str(raw).context("invalid graph dataset JSON")?;

    let weights = parsed
        .nodes
        .iter()
        .filter_map(|node| node.connections)
        .collect::<Vec<_>>();
    let min_weight = weights.iter().copied().min().unwrap_or(1);
    let max_weight = weights.iter().copied().max().unwrap_or(1);

    let nodes = parsed
        .nodes
        .into_iter()
        .map(|raw| {
            let visual_size = raw.visual_size.unwrap_or_else(|| {
                node_radius(raw.connections.unwrap_or(min_weight), min_weight, max_weight)
            });
            Node {
                id: raw.id,
                display_name: raw.display_name,
                title: raw.title,
                company: raw.company,
                position: WorldPoint::new(raw.x, raw.y),
                visual_size,
                category: raw.category,
                skills: raw.skills,
                connection_strength: raw.connection_strength,
                last_activity_at: raw.last_activity_at,
            }
        })
        .collect();

    let edges = parsed
        .edges
        .into_iter()
        .map(|raw| Edge {
            id: raw
                .id
                .unwrap_or_else(|| format!("{}->{}", raw.source, raw.target)),
            strength_class: raw
                .strength_class
                .unwrap_or_else(|| StrengthClass::from_strength(raw.strength)),
            source_id: raw.source,
            target_id: raw.target,
            strength: raw.strength,
        })
        .collect();

    Ok(GraphDataset { nodes, edges })
}

pub fn load_dataset(path: &Path) -> Result<GraphDataset> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph dataset {}", path.display()))?;
    parse_dataset(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// The built-in demo network.
pub fn sample_dataset() -> Result<GraphDataset> {
    parse_dataset(SAMPLE_NETWORK).context("built-in sample network is invalid")
}

/// Loads `path` (or the sample network when `None`) and validates it into a model.
pub fn load_model(path: Option<&Path>) -> Result<GraphModel> {
    let dataset = match path {
        Some(path) => load_dataset(path)?,
        None => sample_dataset()?,
    };
    let source = path.map_or_else(
        || "sample network".to_owned(),
        |path| path.display().to_string(),
    );

    let model = GraphModel::new(dataset)
        .with_context(|| format!("graph dataset from {source} failed integrity checks"))?;
    log::info!(
        "loaded {} nodes and {} edges from {source}",
        model.node_count(),
        model.edge_count()
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_network_is_valid() {
        let model = load_model(None).unwrap();
        assert_eq!(model.self_node().id, "alex");
        let sarah = model.get_node("sarah").unwrap();
        assert_eq!(sarah.position, WorldPoint::new(300.0, 200.0));
        assert_eq!(sarah.visual_size, 16.0);
    }

    #[test]
    fn derives_sizes_from_connections() {
        let dataset = parse_dataset(
            r#"{
                "nodes": [
                    { "id": "a", "display_name": "A", "x": 0, "y": 0, "category": "self", "connections": 2 },
                    { "id": "b", "display_name": "B", "x": 1, "y": 0, "category": "direct", "connections": 400 },
                    { "id": "c", "display_name": "C", "x": 2, "y": 0, "category": "potential", "visual_size": 5 }
                ]
            }"#,
        )
        .unwrap();

        assert!(dataset.nodes[0].visual_size < dataset.nodes[1].visual_size);
        assert_eq!(dataset.nodes[2].visual_size, 5.0);
        assert_eq!(dataset.nodes[0].category, NodeCategory::You);
        assert_eq!(dataset.nodes[0].connection_strength, 0.5);
    }

    #[test]
    fn buckets_edges_unless_class_given() {
        let dataset = parse_dataset(
            r#"{
                "nodes": [],
                "edges": [
                    { "source": "a", "target": "b", "strength": 0.9 },
                    { "id": "e2", "source": "b", "target": "c", "strength": 0.9, "strength_class": "weak" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(dataset.edges[0].id, "a->b");
        assert_eq!(dataset.edges[0].strength_class, StrengthClass::Strong);
        assert_eq!(dataset.edges[1].id, "e2");
        assert_eq!(dataset.edges[1].strength_class, StrengthClass::Weak);
    }

    #[test]
    fn rejects_unknown_category() {
        let result = parse_dataset(
            r#"{ "nodes": [ { "id": "a", "display_name": "A", "x": 0, "y": 0, "category": "boss" } ] }"#,
        );
        assert!(result.is_err());
    }
}
