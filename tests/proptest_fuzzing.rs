//! Property-Based Testing for the cycle check
//!
//! Coverage targets:
//! - Short-circuit on empty node/edge lists
//! - Chains and forward-only edges are always acyclic
//! - Any back-edge (including self-loops) makes the graph cyclic
//! - Dangling edges never change the verdict
//! - Verdict matches an independent Kahn's-algorithm reference

use std::collections::{HashMap, VecDeque};

use pipeline_dag::{detect, find_cycle, Edge, Node};
use proptest::prelude::*;

fn nodes(n: usize) -> Vec<Node> {
    (0..n).map(|i| Node::new(format!("n{i}"))).collect()
}

fn edge(s: usize, t: usize) -> Edge {
    Edge::new(format!("n{s}"), format!("n{t}"))
}

/// Reference verdict: Kahn's algorithm over the same (filtered) edges
fn kahn_is_dag(n: usize, pairs: &[(usize, usize)]) -> bool {
    let mut indegree = vec![0usize; n];
    let mut out: HashMap<usize, Vec<usize>> = HashMap::new();
    for &(s, t) in pairs {
        out.entry(s).or_default().push(t);
        indegree[t] += 1;
    }
    let mut queue: VecDeque<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();
    let mut seen = 0;
    while let Some(v) = queue.pop_front() {
        seen += 1;
        for &t in out.get(&v).into_iter().flatten() {
            indegree[t] -= 1;
            if indegree[t] == 0 {
                queue.push_back(t);
            }
        }
    }
    seen == n
}

prop_compose! {
    /// Node count plus arbitrary edges among those nodes
    fn arb_graph()(n in 1usize..30)(
        n in Just(n),
        pairs in prop::collection::vec((0..n, 0..n), 0..60)
    ) -> (usize, Vec<(usize, usize)>) {
        (n, pairs)
    }
}

prop_compose! {
    /// Edges that only go from a lower index to a higher one
    fn arb_forward_graph()(n in 2usize..40)(
        n in Just(n),
        raw in prop::collection::vec((0..n, 0..n), 1..80)
    ) -> (usize, Vec<(usize, usize)>) {
        let pairs = raw
            .into_iter()
            .filter(|(s, t)| s != t)
            .map(|(s, t)| if s < t { (s, t) } else { (t, s) })
            .collect();
        (n, pairs)
    }
}

proptest! {
    #[test]
    fn test_edgeless_graph_is_dag(n in 0usize..50) {
        prop_assert!(detect(&nodes(n), &[]));
    }

    #[test]
    fn test_nodeless_graph_is_dag(pairs in prop::collection::vec((0usize..10, 0usize..10), 0..20)) {
        let edges: Vec<Edge> = pairs.iter().map(|&(s, t)| edge(s, t)).collect();
        prop_assert!(detect(&[], &edges));
    }

    #[test]
    fn test_chain_is_dag(n in 2usize..500) {
        let edges: Vec<Edge> = (1..n).map(|i| edge(i - 1, i)).collect();
        prop_assert!(detect(&nodes(n), &edges));
    }

    #[test]
    fn test_forward_edges_are_dag((n, pairs) in arb_forward_graph()) {
        let edges: Vec<Edge> = pairs.iter().map(|&(s, t)| edge(s, t)).collect();
        prop_assert!(detect(&nodes(n), &edges));
    }

    #[test]
    fn test_self_loop_is_cyclic((n, pairs) in arb_graph(), pick in any::<prop::sample::Index>()) {
        let looped = pick.index(n);
        let mut edges: Vec<Edge> = pairs.iter().map(|&(s, t)| edge(s, t)).collect();
        edges.push(edge(looped, looped));
        prop_assert!(!detect(&nodes(n), &edges));
    }

    #[test]
    fn test_back_edge_on_chain_is_cyclic(n in 2usize..200, a in any::<prop::sample::Index>(), b in any::<prop::sample::Index>()) {
        let (i, j) = (a.index(n), b.index(n));
        prop_assume!(i != j);
        let (lo, hi) = (i.min(j), i.max(j));
        let mut edges: Vec<Edge> = (1..n).map(|k| edge(k - 1, k)).collect();
        edges.push(edge(hi, lo));
        prop_assert!(!detect(&nodes(n), &edges));
    }

    #[test]
    fn test_dangling_edges_do_not_change_verdict((n, pairs) in arb_graph(), ghosts in prop::collection::vec(0usize..30, 1..10)) {
        let all = nodes(n);
        let mut edges: Vec<Edge> = pairs.iter().map(|&(s, t)| edge(s, t)).collect();
        let before = detect(&all, &edges);
        for g in ghosts {
            edges.push(Edge::new(format!("n{g}"), "ghost"));
            edges.push(Edge::new("ghost", format!("n{g}")));
        }
        prop_assert_eq!(detect(&all, &edges), before);
    }

    #[test]
    fn test_matches_kahn_reference((n, pairs) in arb_graph()) {
        let edges: Vec<Edge> = pairs.iter().map(|&(s, t)| edge(s, t)).collect();
        if edges.is_empty() {
            prop_assert!(detect(&nodes(n), &edges));
        } else {
            prop_assert_eq!(detect(&nodes(n), &edges), kahn_is_dag(n, &pairs));
        }
    }

    #[test]
    fn test_cycle_witness_is_a_real_cycle((n, pairs) in arb_graph()) {
        let edges: Vec<Edge> = pairs.iter().map(|&(s, t)| edge(s, t)).collect();
        if let Some(cycle) = find_cycle(&nodes(n), &edges) {
            prop_assert!(cycle.len() >= 2);
            prop_assert_eq!(cycle.first(), cycle.last());
            for step in cycle.windows(2) {
                let hop = edges.iter().any(|e| {
                    e.source.as_deref() == Some(step[0].as_str())
                        && e.target.as_deref() == Some(step[1].as_str())
                });
                prop_assert!(hop, "no edge {} → {}", step[0], step[1]);
            }
        }
    }

    #[test]
    fn test_detect_is_idempotent((n, pairs) in arb_graph()) {
        let all = nodes(n);
        let edges: Vec<Edge> = pairs.iter().map(|&(s, t)| edge(s, t)).collect();
        prop_assert_eq!(detect(&all, &edges), detect(&all, &edges));
    }
}
