//! The storage seam the request gateway depends on.

use async_trait::async_trait;

use nodegate_core::{NeighborMode, NodeDetail, NodeSummary, PreparedSegment};

use crate::client::{GraphClient, GraphError};

/// Node reads and segment writes against some graph backend.
///
/// Implementations must be `Send + Sync`; the gateway shares one instance
/// across every request.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Id and primary label of every node. Order is unspecified.
    async fn list_nodes(&self) -> Result<Vec<NodeSummary>, GraphError>;

    /// A node and its neighborhood, or [`GraphError::NotFound`].
    async fn get_node(&self, id: i64, mode: NeighborMode) -> Result<NodeDetail, GraphError>;

    /// Upsert nodes, then merge relationships.
    async fn apply_segment(&self, segment: &PreparedSegment) -> Result<(), GraphError>;

    /// Detach-delete nodes by id. Empty input and unknown ids are no-ops.
    async fn delete_nodes(&self, ids: &[i64]) -> Result<(), GraphError>;
}

#[async_trait]
impl GraphStore for GraphClient {
    async fn list_nodes(&self) -> Result<Vec<NodeSummary>, GraphError> {
        GraphClient::list_nodes(self).await
    }

    async fn get_node(&self, id: i64, mode: NeighborMode) -> Result<NodeDetail, GraphError> {
        let mut detail = GraphClient::get_node(self, id).await?;
        detail.apply_neighbor_mode(mode);
        Ok(detail)
    }

    async fn apply_segment(&self, segment: &PreparedSegment) -> Result<(), GraphError> {
        GraphClient::apply_segment(self, segment).await
    }

    async fn delete_nodes(&self, ids: &[i64]) -> Result<(), GraphError> {
        GraphClient::delete_nodes(self, ids).await
    }
}
