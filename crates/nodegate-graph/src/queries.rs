//! Read operations: node listing and one-hop neighborhood snapshots.

use neo4rs::{query, Row};
use serde_json::Value;

use nodegate_core::types::primary_label;
use nodegate_core::{Attributes, NodeDetail, NodeSummary, NodeView, RelationshipView};

use crate::client::{GraphClient, GraphError};

const LIST_NODES: &str = "MATCH (n) RETURN n.id AS id, labels(n) AS labels";

const FIND_NODE: &str = "MATCH (n) WHERE n.id = $id
     RETURN properties(n) AS props, labels(n) AS labels
     LIMIT 1";

// Undirected match: one row per incident edge, endpoints reported absolutely.
const NEIGHBORHOOD: &str = "MATCH (n {id: $id})-[r]-(m)
     RETURN type(r) AS rel_type,
            startNode(r).id AS start_id,
            endNode(r).id AS end_id,
            properties(m) AS props,
            labels(m) AS labels";

impl GraphClient {
    // ── Listing ──────────────────────────────────────────────────

    /// Id and primary label of every node, in engine order.
    pub async fn list_nodes(&self) -> Result<Vec<NodeSummary>, GraphError> {
        let rows = self.query_rows(query(LIST_NODES)).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let labels = get_labels(&row)?;
            results.push(NodeSummary {
                id: get_id(&row, "id")?,
                label: primary_label(&labels),
            });
        }
        tracing::debug!(count = results.len(), "Listed nodes");
        Ok(results)
    }

    // ── Neighborhood ─────────────────────────────────────────────

    /// A node, its incident relationships, and one neighbor entry per edge.
    pub async fn get_node(&self, id: i64) -> Result<NodeDetail, GraphError> {
        let row = self
            .query_one(query(FIND_NODE).param("id", id))
            .await?
            .ok_or(GraphError::NotFound { id })?;
        let node = NodeView::from_properties(get_properties(&row)?, &get_labels(&row)?);

        let rows = self
            .query_rows(query(NEIGHBORHOOD).param("id", id))
            .await?;
        let mut relationships = Vec::with_capacity(rows.len());
        let mut connected_nodes = Vec::with_capacity(rows.len());
        for row in rows {
            let rel_type: String = row.get("rel_type").map_err(|e| {
                GraphError::Serialization(format!("Failed to get relationship type: {e}"))
            })?;
            relationships.push(RelationshipView {
                rel_type,
                start_id: get_id(&row, "start_id")?,
                end_id: get_id(&row, "end_id")?,
            });
            connected_nodes.push(NodeView::from_properties(
                get_properties(&row)?,
                &get_labels(&row)?,
            ));
        }

        tracing::debug!(id, edges = relationships.len(), "Fetched node neighborhood");
        Ok(NodeDetail {
            node,
            relationships,
            connected_nodes,
        })
    }
}

fn get_labels(row: &Row) -> Result<Vec<String>, GraphError> {
    row.get("labels")
        .map_err(|e| GraphError::Serialization(format!("Failed to get labels: {e}")))
}

fn get_properties(row: &Row) -> Result<Attributes, GraphError> {
    row.get("props")
        .map_err(|e| GraphError::Serialization(format!("Failed to get properties: {e}")))
}

/// Read an `id` column leniently: null or non-integer ids become `None`.
fn get_id(row: &Row, column: &str) -> Result<Option<i64>, GraphError> {
    let value: Value = row
        .get(column)
        .map_err(|e| GraphError::Serialization(format!("Failed to get {column}: {e}")))?;
    Ok(value.as_i64())
}
