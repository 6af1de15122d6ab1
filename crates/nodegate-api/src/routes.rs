//! Route table and handlers.
//!
//! # Endpoints
//!
//! - `GET /nodes` - id and label of every node
//! - `GET /nodes/:id` - a node with its relationships and neighbors
//! - `POST /segments` - upsert nodes and relationships (bearer token)
//! - `DELETE /segments` - detach-delete nodes by id (bearer token)

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use nodegate_core::{NeighborMode, NodeDetail, NodeSummary, Segment, SegmentDelete};
use nodegate_graph::GraphStore;

use crate::auth::require_bearer;
use crate::error::ApiError;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GraphStore>,
    pub token: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn GraphStore>, token: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            token: token.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NodeList {
    pub nodes: Vec<NodeSummary>,
}

#[derive(Debug, Serialize)]
pub struct Ack {
    pub status: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct NodeParams {
    /// Collapse `connected_nodes` to one entry per neighbor.
    #[serde(default)]
    pub distinct_neighbors: bool,
}

async fn list_nodes(State(state): State<AppState>) -> Result<Json<NodeList>, ApiError> {
    let nodes = state.store.list_nodes().await?;
    Ok(Json(NodeList { nodes }))
}

async fn get_node(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    params: Result<Query<NodeParams>, QueryRejection>,
) -> Result<Json<NodeDetail>, ApiError> {
    let Path(id) = path?;
    let Query(params) = params?;
    let mode = if params.distinct_neighbors {
        NeighborMode::Distinct
    } else {
        NeighborMode::PerEdge
    };

    let detail = state.store.get_node(id, mode).await?;
    Ok(Json(detail))
}

async fn create_segment(
    State(state): State<AppState>,
    body: Result<Json<Segment>, JsonRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Json(segment) = body?;
    let prepared = segment.prepare()?;
    state.store.apply_segment(&prepared).await?;
    Ok(Json(Ack { status: "success" }))
}

async fn delete_segment(
    State(state): State<AppState>,
    body: Result<Json<SegmentDelete>, JsonRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Json(request) = body?;
    state.store.delete_nodes(&request.node_ids).await?;
    Ok(Json(Ack { status: "deleted" }))
}

/// Build the full router. Only the segment routes sit behind the token.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/segments", post(create_segment).delete(delete_segment))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));

    Router::new()
        .route("/nodes", get(list_nodes))
        .route("/nodes/:id", get(get_node))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
