//! nodegate-core: Shared types and validation for the nodegate graph facade.
//!
//! This crate provides the foundational types used across all nodegate components:
//! - Segment inputs (nodes, relationships, delete sets) and their validated forms
//! - Neighborhood snapshots returned by node reads
//! - The identifier sanitizer guarding interpolated Cypher fragments
//! - The payload validation error type

pub mod error;
pub mod ident;
pub mod types;

pub use error::ValidationError;
pub use ident::{storage_label, Identifier, IdentifierKind};
pub use types::{
    Attributes, NeighborMode, NodeDetail, NodeInput, NodeSummary, NodeView, PreparedNode,
    PreparedRelationship, PreparedSegment, RelationshipInput, RelationshipView, Segment,
    SegmentDelete,
};
