//! In-memory stand-ins for the graph store.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use nodegate_core::types::primary_label;
use nodegate_core::{
    Attributes, NeighborMode, NodeDetail, NodeSummary, NodeView, PreparedSegment,
    RelationshipView,
};
use nodegate_graph::{GraphError, GraphStore};

#[derive(Debug, Clone, PartialEq)]
struct StoredNode {
    label: String,
    id: i64,
    attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredRel {
    rel_type: String,
    from_id: i64,
    to_id: i64,
}

#[derive(Debug, Default)]
struct Graph {
    nodes: Vec<StoredNode>,
    rels: Vec<StoredRel>,
}

/// Follows MERGE semantics: nodes keyed by (label, id), relationships by
/// (type, from, to), relationships to missing endpoints dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    graph: Mutex<Graph>,
}

impl MemoryStore {
    pub fn node_count(&self) -> usize {
        self.graph.lock().unwrap().nodes.len()
    }

    pub fn rel_count(&self) -> usize {
        self.graph.lock().unwrap().rels.len()
    }

    fn view(node: &StoredNode) -> NodeView {
        NodeView {
            id: Some(node.id),
            label: primary_label(&[node.label.clone()]),
            attributes: node.attributes.clone(),
        }
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    async fn list_nodes(&self) -> Result<Vec<NodeSummary>, GraphError> {
        let graph = self.graph.lock().unwrap();
        Ok(graph
            .nodes
            .iter()
            .map(|n| NodeSummary {
                id: Some(n.id),
                label: n.label.clone(),
            })
            .collect())
    }

    async fn get_node(&self, id: i64, mode: NeighborMode) -> Result<NodeDetail, GraphError> {
        let graph = self.graph.lock().unwrap();
        let node = graph
            .nodes
            .iter()
            .find(|n| n.id == id)
            .ok_or(GraphError::NotFound { id })?;

        let mut relationships = Vec::new();
        let mut connected_nodes = Vec::new();
        for rel in graph.rels.iter().filter(|r| r.from_id == id || r.to_id == id) {
            let other = if rel.from_id == id { rel.to_id } else { rel.from_id };
            relationships.push(RelationshipView {
                rel_type: rel.rel_type.clone(),
                start_id: Some(rel.from_id),
                end_id: Some(rel.to_id),
            });
            if let Some(neighbor) = graph.nodes.iter().find(|n| n.id == other) {
                connected_nodes.push(Self::view(neighbor));
            }
        }

        let mut detail = NodeDetail {
            node: Self::view(node),
            relationships,
            connected_nodes,
        };
        detail.apply_neighbor_mode(mode);
        Ok(detail)
    }

    async fn apply_segment(&self, segment: &PreparedSegment) -> Result<(), GraphError> {
        let mut graph = self.graph.lock().unwrap();

        for input in &segment.nodes {
            let label = input.label.as_str();
            let existing = graph
                .nodes
                .iter()
                .position(|n| n.label == label && n.id == input.id);
            let idx = match existing {
                Some(idx) => idx,
                None => {
                    graph.nodes.push(StoredNode {
                        label: label.to_string(),
                        id: input.id,
                        attributes: Attributes::new(),
                    });
                    graph.nodes.len() - 1
                }
            };
            let node = &mut graph.nodes[idx];
            for (key, value) in &input.attributes {
                if value.is_null() {
                    node.attributes.remove(key);
                } else {
                    node.attributes.insert(key.clone(), value.clone());
                }
            }
        }

        for input in &segment.relationships {
            let ids: HashSet<i64> = graph.nodes.iter().map(|n| n.id).collect();
            if !ids.contains(&input.from_id) || !ids.contains(&input.to_id) {
                continue;
            }
            let rel = StoredRel {
                rel_type: input.rel_type.as_str().to_string(),
                from_id: input.from_id,
                to_id: input.to_id,
            };
            if !graph.rels.contains(&rel) {
                graph.rels.push(rel);
            }
        }
        Ok(())
    }

    async fn delete_nodes(&self, ids: &[i64]) -> Result<(), GraphError> {
        let mut graph = self.graph.lock().unwrap();
        graph.nodes.retain(|n| !ids.contains(&n.id));
        graph
            .rels
            .retain(|r| !ids.contains(&r.from_id) && !ids.contains(&r.to_id));
        Ok(())
    }
}

/// Fails every call the way an unreachable engine would.
pub struct DownStore;

#[async_trait]
impl GraphStore for DownStore {
    async fn list_nodes(&self) -> Result<Vec<NodeSummary>, GraphError> {
        Err(down())
    }

    async fn get_node(&self, _id: i64, _mode: NeighborMode) -> Result<NodeDetail, GraphError> {
        Err(down())
    }

    async fn apply_segment(&self, _segment: &PreparedSegment) -> Result<(), GraphError> {
        Err(down())
    }

    async fn delete_nodes(&self, _ids: &[i64]) -> Result<(), GraphError> {
        Err(down())
    }
}

fn down() -> GraphError {
    GraphError::Connection("connection refused".to_string())
}

/// Parse a response body, `Value::Null` when empty.
pub fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(bytes).unwrap()
    }
}
