//! Write operations: segment upserts and detach-deletes.
//!
//! All writes use MERGE so re-applying a segment leaves the graph
//! unchanged. Nodes are identified by their `id` property under the
//! storage label; relationships by `(type, from_id, to_id)`.

use neo4rs::{query, Query};

use nodegate_core::{Identifier, PreparedNode, PreparedRelationship, PreparedSegment};

use crate::client::{GraphClient, GraphError};
use crate::convert::attributes_to_bolt;

const DETACH_DELETE: &str = "MATCH (n) WHERE n.id IN $ids DETACH DELETE n";

impl GraphClient {
    // ── Segment Upserts ──────────────────────────────────────────

    /// Apply a validated segment: nodes first, then relationships.
    ///
    /// Runs in one transaction. A relationship whose endpoints do not
    /// exist matches nothing and writes nothing.
    pub async fn apply_segment(&self, segment: &PreparedSegment) -> Result<(), GraphError> {
        if segment.is_empty() {
            return Ok(());
        }

        let queries: Vec<Query> = segment
            .nodes
            .iter()
            .map(node_upsert)
            .chain(segment.relationships.iter().map(relationship_merge))
            .collect();

        self.run_in_txn(queries).await?;

        tracing::info!(
            nodes = segment.nodes.len(),
            relationships = segment.relationships.len(),
            "Applied segment"
        );
        Ok(())
    }

    // ── Deletes ──────────────────────────────────────────────────

    /// Detach-delete every node whose `id` is listed. Unknown ids are ignored.
    pub async fn delete_nodes(&self, ids: &[i64]) -> Result<(), GraphError> {
        if ids.is_empty() {
            return Ok(());
        }

        self.run(query(DETACH_DELETE).param("ids", ids.to_vec()))
            .await?;

        tracing::info!(requested = ids.len(), "Deleted nodes");
        Ok(())
    }
}

// ── Query Builders ───────────────────────────────────────────────

fn node_upsert(node: &PreparedNode) -> Query {
    query(&node_upsert_cypher(&node.label))
        .param("id", node.id)
        .param("attributes", attributes_to_bolt(&node.attributes))
}

fn relationship_merge(rel: &PreparedRelationship) -> Query {
    query(&relationship_merge_cypher(&rel.rel_type))
        .param("from_id", rel.from_id)
        .param("to_id", rel.to_id)
}

/// `SET +=` merges: keys missing from the payload stay untouched.
fn node_upsert_cypher(label: &Identifier) -> String {
    format!(
        "MERGE (n:{label} {{id: $id}})
         SET n += $attributes"
    )
}

fn relationship_merge_cypher(rel_type: &Identifier) -> String {
    format!(
        "MATCH (a {{id: $from_id}}), (b {{id: $to_id}})
         MERGE (a)-[:{rel_type}]->(b)"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodegate_core::{storage_label, IdentifierKind};

    #[test]
    fn node_upsert_keys_on_label_and_id() {
        let label = storage_label("user").unwrap();
        let cypher = node_upsert_cypher(&label);
        assert!(cypher.starts_with("MERGE (n:User {id: $id})"));
        assert!(cypher.contains("SET n += $attributes"));
    }

    #[test]
    fn relationship_merge_is_label_agnostic_and_directed() {
        let rel_type = Identifier::parse(IdentifierKind::RelationshipType, "MEMBER_OF").unwrap();
        let cypher = relationship_merge_cypher(&rel_type);
        assert!(cypher.contains("MATCH (a {id: $from_id}), (b {id: $to_id})"));
        assert!(cypher.contains("MERGE (a)-[:MEMBER_OF]->(b)"));
    }
}
