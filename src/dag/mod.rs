//! DAG Module - acyclicity check for submitted pipelines
//!
//! Contains:
//! - `adjacency`: AdjacencyList built from nodes + edges (dangling edges dropped)
//! - `cycle`: CycleDetector, explicit-stack three-color DFS
//! - `summary`: PipelineSummary (node count, edge count, is_dag)
//!
//! Everything here is pure and built per call; no state outlives a request.

mod adjacency;
mod cycle;
mod summary;

// Re-export public types
pub use adjacency::AdjacencyList;
pub use cycle::{detect, find_cycle, CycleDetector};
pub use summary::PipelineSummary;
