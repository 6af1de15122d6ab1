//! nodegate-graph — Neo4j adapter for the nodegate REST facade.
//!
//! This crate is the single access point to the graph engine. Reads
//! (`queries`) and writes (`mutations`) are methods on [`GraphClient`];
//! the [`GraphStore`] trait exposes them to the request gateway.

pub mod client;
pub mod convert;
pub mod mutations;
pub mod queries;
pub mod store;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use store::GraphStore;
