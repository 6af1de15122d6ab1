//! Domain types for segment writes and neighborhood reads.
//!
//! Input types mirror the JSON request bodies; `prepare` turns them into
//! validated forms whose labels and relationship types are safe to splice
//! into Cypher. Output types mirror the JSON response bodies.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::ident::{storage_label, Identifier, IdentifierKind};

/// Open-ended attribute mapping carried by a node.
pub type Attributes = serde_json::Map<String, Value>;

/// Label reported for a node that carries no labels at all.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Property holding the caller-supplied node identity.
pub const ID_KEY: &str = "id";

// ── Segment Input ─────────────────────────────────────────────────

/// A node description inside a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInput {
    pub label: String,
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: Attributes,
}

/// A directed relationship description inside a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipInput {
    #[serde(rename = "type")]
    pub rel_type: String,
    pub from_id: i64,
    pub to_id: i64,
}

/// A batch of nodes and relationships submitted together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<NodeInput>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relationships: Vec<RelationshipInput>,
}

/// Ids of nodes to detach-delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentDelete {
    #[serde(default, deserialize_with = "null_as_default")]
    pub node_ids: Vec<i64>,
}

/// A node whose label and attributes passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedNode {
    pub label: Identifier,
    pub id: i64,
    pub attributes: Attributes,
}

/// A relationship whose type passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRelationship {
    pub rel_type: Identifier,
    pub from_id: i64,
    pub to_id: i64,
}

/// A fully validated segment, ready to be turned into queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparedSegment {
    pub nodes: Vec<PreparedNode>,
    pub relationships: Vec<PreparedRelationship>,
}

impl PreparedSegment {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relationships.is_empty()
    }
}

impl NodeInput {
    pub fn prepare(&self) -> Result<PreparedNode, ValidationError> {
        let label = storage_label(&self.label)?;
        for (key, value) in &self.attributes {
            if key == ID_KEY {
                return Err(ValidationError::ReservedAttribute { key: key.clone() });
            }
            Identifier::parse(IdentifierKind::AttributeKey, key)?;
            check_attribute_value(key, value)?;
        }
        Ok(PreparedNode {
            label,
            id: self.id,
            attributes: self.attributes.clone(),
        })
    }
}

impl RelationshipInput {
    pub fn prepare(&self) -> Result<PreparedRelationship, ValidationError> {
        Ok(PreparedRelationship {
            rel_type: Identifier::parse(IdentifierKind::RelationshipType, &self.rel_type)?,
            from_id: self.from_id,
            to_id: self.to_id,
        })
    }
}

impl Segment {
    /// Validate every element. The first bad element rejects the whole batch.
    pub fn prepare(&self) -> Result<PreparedSegment, ValidationError> {
        let nodes = self
            .nodes
            .iter()
            .map(NodeInput::prepare)
            .collect::<Result<Vec<_>, _>>()?;
        let relationships = self
            .relationships
            .iter()
            .map(RelationshipInput::prepare)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PreparedSegment {
            nodes,
            relationships,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScalarKind {
    Bool,
    Int,
    Float,
    Str,
}

fn scalar_kind(value: &Value) -> Option<ScalarKind> {
    match value {
        Value::Bool(_) => Some(ScalarKind::Bool),
        Value::Number(n) if n.is_i64() => Some(ScalarKind::Int),
        Value::Number(_) => Some(ScalarKind::Float),
        Value::String(_) => Some(ScalarKind::Str),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Property values must be scalars or arrays of one scalar type.
pub fn check_attribute_value(key: &str, value: &Value) -> Result<(), ValidationError> {
    let unsupported = |reason| ValidationError::UnsupportedValue {
        key: key.to_string(),
        reason,
    };

    match value {
        Value::Object(_) => Err(unsupported("nested objects cannot be stored")),
        Value::Array(items) => {
            let mut seen = None;
            for item in items {
                let kind = scalar_kind(item)
                    .ok_or_else(|| unsupported("arrays may only hold non-null scalars"))?;
                match seen {
                    Some(prev) if prev != kind => {
                        return Err(unsupported("arrays must hold a single value type"))
                    }
                    _ => seen = Some(kind),
                }
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

// ── Read Output ───────────────────────────────────────────────────

/// Entry of the node listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSummary {
    pub id: Option<i64>,
    pub label: String,
}

/// A node with its attributes, `id` reported separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: Option<i64>,
    pub label: String,
    pub attributes: Attributes,
}

impl NodeView {
    /// Split the `id` property out of a raw property map.
    pub fn from_properties(mut properties: Attributes, labels: &[String]) -> Self {
        let id = properties.remove(ID_KEY).and_then(|v| v.as_i64());
        Self {
            id,
            label: primary_label(labels),
            attributes: properties,
        }
    }
}

/// An incident relationship with absolute endpoint ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipView {
    #[serde(rename = "type")]
    pub rel_type: String,
    pub start_id: Option<i64>,
    pub end_id: Option<i64>,
}

/// A node together with its one-hop neighborhood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDetail {
    pub node: NodeView,
    pub relationships: Vec<RelationshipView>,
    pub connected_nodes: Vec<NodeView>,
}

/// How `connected_nodes` is populated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NeighborMode {
    /// One entry per traversed edge, duplicates included.
    #[default]
    PerEdge,
    /// One entry per neighbor id, first occurrence kept. Neighbors
    /// without an integer id are never collapsed.
    Distinct,
}

impl NodeDetail {
    pub fn apply_neighbor_mode(&mut self, mode: NeighborMode) {
        if mode == NeighborMode::Distinct {
            let mut seen = HashSet::new();
            self.connected_nodes
                .retain(|n| n.id.map_or(true, |id| seen.insert(id)));
        }
    }
}

/// First label wins; a label-less node reports [`UNKNOWN_LABEL`].
pub fn primary_label(labels: &[String]) -> String {
    labels
        .first()
        .cloned()
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
