//! AST Module - pipeline payload types
//!
//! Contains the Rust types decoded from a submitted pipeline:
//! - `pipeline`: Pipeline, Node, Edge
//!
//! These types represent the "what" - the raw graph as the editor sent it.
//! For structural analysis, see the `dag` module.

mod pipeline;

// Re-export all public types
pub use pipeline::{Edge, Node, Pipeline};
