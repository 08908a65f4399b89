//! CycleDetector - DFS three-color cycle search over an AdjacencyList
//!
//! Colors:
//! - White: not in `visited`
//! - Gray: in `visited` and `on_stack` (on the current DFS path)
//! - Black: in `visited` only (fully explored, no cycle below it)
//!
//! A cycle exists iff the walk reaches a Gray node (a back-edge).
//!
//! The walk runs on an explicit frame stack instead of call recursion, so a
//! single chain of any length never overflows the thread stack. All state
//! lives in one `CycleDetector` per call; nothing is shared between calls.

use rustc_hash::FxHashSet;

use crate::ast::{Edge, Node};

use super::adjacency::AdjacencyList;

/// Returns `true` if the graph has no directed cycle.
///
/// An empty node list or an empty edge list short-circuits to `true`
/// without building anything. Edges with a missing, empty or unknown
/// endpoint are ignored.
pub fn detect(nodes: &[Node], edges: &[Edge]) -> bool {
    find_cycle(nodes, edges).is_none()
}

/// Returns the first cycle found, as `start → … → start`.
///
/// Same short-circuit and edge rules as [`detect`].
pub fn find_cycle(nodes: &[Node], edges: &[Edge]) -> Option<Vec<String>> {
    if nodes.is_empty() || edges.is_empty() {
        return None;
    }

    let graph = AdjacencyList::build(nodes, edges);
    let cycle = CycleDetector::new(&graph).find_cycle()?;
    tracing::debug!(cycle = %cycle.join(" → "), "cycle detected");
    Some(cycle.into_iter().map(str::to_owned).collect())
}

/// One pending node on the DFS path
#[derive(Debug, Clone, Copy)]
struct Frame<'a> {
    node: &'a str,
    /// Index of the next successor to explore
    next: usize,
}

/// Single-use DFS state for one detection run
pub struct CycleDetector<'g, 'a> {
    graph: &'g AdjacencyList<'a>,
    visited: FxHashSet<&'a str>,
    on_stack: FxHashSet<&'a str>,
    stack: Vec<Frame<'a>>,
}

impl<'g, 'a> CycleDetector<'g, 'a> {
    pub fn new(graph: &'g AdjacencyList<'a>) -> Self {
        let capacity = graph.node_ids().len();
        Self {
            graph,
            visited: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
            on_stack: FxHashSet::default(),
            stack: Vec::new(),
        }
    }

    /// Walk from every unvisited node, in node order, and stop at the first
    /// back-edge.
    pub fn find_cycle(mut self) -> Option<Vec<&'a str>> {
        let graph = self.graph;
        for &root in graph.node_ids() {
            if self.visited.contains(root) {
                continue;
            }
            if let Some(cycle) = self.walk(root) {
                return Some(cycle);
            }
        }
        None
    }

    fn walk(&mut self, root: &'a str) -> Option<Vec<&'a str>> {
        let graph = self.graph;
        self.enter(root);

        while let Some(frame) = self.stack.last_mut() {
            let Some(&next) = graph.successors(frame.node).get(frame.next) else {
                // All successors explored: Gray -> Black
                let done = frame.node;
                self.stack.pop();
                self.on_stack.remove(done);
                continue;
            };
            frame.next += 1;

            if self.on_stack.contains(next) {
                return Some(self.cycle_closing_at(next));
            }
            if !self.visited.contains(next) {
                self.enter(next);
            }
        }

        None
    }

    #[inline]
    fn enter(&mut self, node: &'a str) {
        self.visited.insert(node);
        self.on_stack.insert(node);
        self.stack.push(Frame { node, next: 0 });
    }

    /// Path from `target` (Gray, so it is on the stack) to the top of the
    /// stack, closed back onto `target`.
    fn cycle_closing_at(&self, target: &'a str) -> Vec<&'a str> {
        let start = self
            .stack
            .iter()
            .position(|frame| frame.node == target)
            .unwrap_or(0);
        let mut cycle: Vec<&'a str> = self.stack[start..].iter().map(|f| f.node).collect();
        cycle.push(target);
        cycle
    }
}
