//! AdjacencyList - successor map built from a submitted pipeline
//!
//! Performance notes:
//! - Borrows ids straight out of the payload (no per-id allocation)
//! - FxHashMap/FxHashSet for faster hashing (non-crypto)
//! - SmallVec for stack-allocated small successor lists (0-4 items)
//!
//! Edges whose source or target is missing, empty, or not a declared node
//! are dropped here and never reach the cycle search.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::ast::{Edge, Node, Pipeline};

/// Stack-allocated successors: most pipeline nodes fan out to 0-4 others
type NeighborVec<'a> = SmallVec<[&'a str; 4]>;

/// node id -> ordered list of target ids, one entry per kept edge
#[derive(Debug, Default)]
pub struct AdjacencyList<'a> {
    successors: FxHashMap<&'a str, NeighborVec<'a>>,
    /// Unique node ids in first-occurrence order (DFS root order)
    node_ids: Vec<&'a str>,
    dropped_edges: usize,
    duplicate_nodes: usize,
}

impl<'a> AdjacencyList<'a> {
    /// Build the adjacency list for `nodes` and `edges`.
    ///
    /// Duplicate node ids collapse into one vertex; the first occurrence
    /// decides its position in `node_ids()`.
    pub fn build(nodes: &'a [Node], edges: &'a [Edge]) -> Self {
        let capacity = nodes.len();
        let mut successors: FxHashMap<&'a str, NeighborVec<'a>> =
            FxHashMap::with_capacity_and_hasher(capacity, Default::default());
        let mut node_ids: Vec<&'a str> = Vec::with_capacity(capacity);
        let mut duplicate_nodes = 0;

        for node in nodes {
            let id = node.id.as_str();
            if successors.contains_key(id) {
                duplicate_nodes += 1;
            } else {
                node_ids.push(id);
                successors.insert(id, NeighborVec::new());
            }
        }

        let mut dropped_edges = 0;
        for edge in edges {
            match edge.endpoints() {
                Some((source, target)) if successors.contains_key(target) => {
                    if let Some(targets) = successors.get_mut(source) {
                        targets.push(target);
                    } else {
                        dropped_edges += 1;
                    }
                }
                _ => dropped_edges += 1,
            }
        }

        if dropped_edges > 0 || duplicate_nodes > 0 {
            tracing::debug!(
                dropped_edges,
                duplicate_nodes,
                "ignored dangling edges / duplicate node ids"
            );
        }

        Self {
            successors,
            node_ids,
            dropped_edges,
            duplicate_nodes,
        }
    }

    pub fn from_pipeline(pipeline: &'a Pipeline) -> Self {
        Self::build(&pipeline.nodes, &pipeline.edges)
    }

    /// Unique node ids in first-occurrence order
    #[inline]
    pub fn node_ids(&self) -> &[&'a str] {
        &self.node_ids
    }

    /// Targets of the kept edges leaving `id`, in edge input order
    #[inline]
    pub fn successors(&self, id: &str) -> &[&'a str] {
        self.successors.get(id).map_or(&[][..], SmallVec::as_slice)
    }

    /// Number of edges ignored for a missing/empty/unknown endpoint
    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    /// Number of node entries that repeated an earlier id
    pub fn duplicate_nodes(&self) -> usize {
        self.duplicate_nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nodes(ids: &[&str]) -> Vec<Node> {
        ids.iter().map(|id| Node::new(*id)).collect()
    }

    #[test]
    fn test_successors_keep_edge_input_order() {
        let nodes = nodes(&["a", "b", "c"]);
        let edges = vec![Edge::new("a", "c"), Edge::new("a", "b")];
        let adj = AdjacencyList::build(&nodes, &edges);

        assert_eq!(adj.successors("a"), &["c", "b"]);
        assert!(adj.successors("b").is_empty());
        assert_eq!(adj.dropped_edges(), 0);
    }

    #[test]
    fn test_dangling_edges_are_dropped() {
        let nodes = nodes(&["a", "b"]);
        let edges = vec![
            Edge::new("a", "b"),
            Edge::new("b", "ghost"),
            Edge::new("ghost", "a"),
            Edge::new("", "a"),
            Edge {
                source: Some("a".into()),
                ..Edge::default()
            },
        ];
        let adj = AdjacencyList::build(&nodes, &edges);

        assert_eq!(adj.successors("a"), &["b"]);
        assert!(adj.successors("b").is_empty());
        assert!(adj.successors("ghost").is_empty());
        assert_eq!(adj.node_ids(), &["a", "b"]);
        assert_eq!(adj.dropped_edges(), 4);
    }

    #[test]
    fn test_duplicate_ids_collapse_to_first_occurrence() {
        let nodes = nodes(&["b", "a", "b"]);
        let adj = AdjacencyList::build(&nodes, &[]);

        assert_eq!(adj.node_ids(), &["b", "a"]);
        assert_eq!(adj.duplicate_nodes(), 1);
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let nodes = nodes(&["a", "b"]);
        let edges = vec![Edge::new("a", "b"), Edge::new("a", "b")];
        let adj = AdjacencyList::build(&nodes, &edges);

        assert_eq!(adj.successors("a"), &["b", "b"]);
    }

    #[test]
    fn test_unknown_id_has_no_successors() {
        let adj = AdjacencyList::build(&[], &[]);
        assert!(adj.successors("nope").is_empty());
        assert!(adj.node_ids().is_empty());
    }
}
