//! Pipeline Types - the graph payload submitted by the editor
//!
//! Contains:
//! - `Pipeline`: root payload with nodes and edges
//! - `Node`: a vertex identified by an opaque string id
//! - `Edge`: a directed `source → target` pair
//!
//! Only `id`, `source` and `target` mean anything here. Every other field
//! (position, type, data, handles...) is kept in a pass-through map and never
//! inspected.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A pipeline as submitted by the editor: nodes plus directed edges.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Pipeline {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Pipeline {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Raw node count, duplicates included
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Raw edge count, dangling edges included
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
}

/// Graph vertex
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub id: String,
    /// Everything else the editor attached to the node
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extra: Map::new(),
        }
    }
}

/// Directed edge between two node ids
///
/// Endpoints are optional: a missing, null or non-string endpoint decodes to
/// `None` instead of failing the whole payload. Such edges are dropped later
/// when the adjacency list is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    #[serde(default, deserialize_with = "lenient_endpoint")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_endpoint")]
    pub target: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            target: Some(target.into()),
            extra: Map::new(),
        }
    }

    /// Both endpoints, if present and non-empty
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        let source = self.source.as_deref().filter(|s| !s.is_empty())?;
        let target = self.target.as_deref().filter(|t| !t.is_empty())?;
        Some((source, target))
    }
}

fn lenient_endpoint<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}
