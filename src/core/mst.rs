/*!
# Minimum Spanning Tree

Kruskal's and Prim's algorithms over a [`WeightedGraph`], treating the graph's edges as
undirected for MST purposes even when the graph itself is directed (there is no
well-defined directed analogue of "spanning tree", so a directed input is flattened to
its underlying undirected edge set before either algorithm runs). Kruskal sorts edges
and grows disjoint components with [`UnionFind`]; Prim grows a single tree outward using
an [`IndexedMinHeap`], with the heap's lazy-deletion fallback standing in for true
decrease-key on candidate edges whose endpoint has already joined the tree.
*/

use crate::core::graph::{WeightedGraph, WEIGHT_EPSILON};
use crate::core::heap::IndexedMinHeap;
use crate::core::union_find::UnionFind;
use std::collections::HashSet;

/// An edge as it appears in an MST result, decoupled from the source graph's edge
/// record (so a canonical direction can be chosen once for undirected input).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MstEdge {
    pub from: u32,
    pub to: u32,
    pub weight: f32,
}

/// Result of an MST run.
#[derive(Debug, Clone)]
pub struct MstResult {
    pub algorithm_used: &'static str,
    pub edges: Vec<MstEdge>,
    pub total_weight: f32,
    pub nodes_in_mst: usize,
    pub is_connected: bool,
    pub edges_considered: usize,
}

impl MstResult {
    fn new(algorithm_used: &'static str) -> Self {
        Self {
            algorithm_used,
            edges: Vec::new(),
            total_weight: 0.0,
            nodes_in_mst: 0,
            is_connected: false,
            edges_considered: 0,
        }
    }

    /// `edges.len() / (nodes_in_mst - 1)`; `0.0` when there are fewer than two nodes.
    pub fn density(&self) -> f64 {
        if self.nodes_in_mst <= 1 {
            return 0.0;
        }
        self.edges.len() as f64 / (self.nodes_in_mst - 1) as f64
    }

    /// All distinct node ids touched by the MST's edges.
    pub fn get_nodes(&self) -> Vec<u32> {
        let mut nodes: Vec<u32> = self.edges.iter().flat_map(|e| [e.from, e.to]).collect();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }

    /// Connected and acyclic: `|E| == |V| - 1`.
    pub fn is_valid_mst(&self) -> bool {
        if !self.is_connected {
            return false;
        }
        if self.nodes_in_mst == 0 {
            return true;
        }
        self.edges.len() == self.nodes_in_mst - 1
    }
}

fn undirected_edges(graph: &WeightedGraph) -> Vec<MstEdge> {
    graph
        .get_all_edges()
        .into_iter()
        .map(|e| MstEdge {
            from: e.from,
            to: e.to,
            weight: e.effective_weight(),
        })
        .collect()
}

/// Builds an MST with Kruskal's algorithm: sort all edges by weight, then add each in
/// order unless it would connect two nodes already in the same component.
pub fn kruskal(graph: &WeightedGraph) -> MstResult {
    let mut result = MstResult::new("Kruskal");

    if graph.num_nodes() == 0 {
        result.is_connected = true;
        return result;
    }

    let mut edges = undirected_edges(graph);
    // get_all_edges() iterates a HashMap, so edges of equal weight can arrive in any
    // order across runs; break ties by (from, to) so the chosen MST is deterministic.
    edges.sort_by(|a, b| {
        a.weight
            .partial_cmp(&b.weight)
            .unwrap()
            .then_with(|| a.from.cmp(&b.from))
            .then_with(|| a.to.cmp(&b.to))
    });
    result.edges_considered = edges.len();

    let mut uf = UnionFind::new();
    let node_ids: Vec<u32> = graph.get_all_node_ids().collect();
    for &id in &node_ids {
        uf.make_set(id);
    }
    result.nodes_in_mst = node_ids.len();

    for edge in edges {
        if uf.union(edge.from, edge.to) {
            result.edges.push(edge);
            result.total_weight += edge.weight;
            if result.edges.len() == result.nodes_in_mst - 1 {
                break;
            }
        }
    }

    result.is_connected = result.edges.len() == result.nodes_in_mst.saturating_sub(1);
    result
}

fn less(a: &MstEdge, b: &MstEdge) -> bool {
    a.weight < b.weight
}

/// Builds an MST with Prim's algorithm starting from `start_node`: repeatedly pull the
/// lightest edge with exactly one endpoint already in the tree.
pub fn prim(graph: &WeightedGraph, start_node: u32) -> MstResult {
    let mut result = MstResult::new("Prim");

    if graph.num_nodes() == 0 {
        result.is_connected = true;
        return result;
    }
    if !graph.has_node(start_node) {
        return result;
    }

    let mut in_mst: HashSet<u32> = HashSet::new();
    in_mst.insert(start_node);
    result.nodes_in_mst = 1;

    let mut edge_queue: IndexedMinHeap<MstEdge, _> = IndexedMinHeap::with_comparator(less);

    let push_frontier = |node: u32, in_mst: &HashSet<u32>, queue: &mut IndexedMinHeap<MstEdge, _>| {
        let mut pushed = 0;
        for edge in graph.get_neighbors(node) {
            if !in_mst.contains(&edge.to) {
                queue.push(MstEdge {
                    from: edge.from,
                    to: edge.to,
                    weight: edge.effective_weight(),
                });
                pushed += 1;
            }
        }
        pushed
    };

    result.edges_considered += push_frontier(start_node, &in_mst, &mut edge_queue);

    while !edge_queue.is_empty() && result.edges.len() < graph.num_nodes() - 1 {
        let min_edge = match edge_queue.pop() {
            Ok(e) => e,
            Err(_) => break,
        };

        let from_in = in_mst.contains(&min_edge.from);
        let to_in = in_mst.contains(&min_edge.to);
        if from_in && to_in {
            continue; // both endpoints joined already; this entry is stale
        }
        if !from_in && !to_in {
            continue; // neither endpoint is attached yet; not a valid frontier edge
        }

        result.edges.push(min_edge);
        result.total_weight += min_edge.weight;

        let new_node = if to_in { min_edge.from } else { min_edge.to };
        in_mst.insert(new_node);
        result.nodes_in_mst += 1;

        result.edges_considered += push_frontier(new_node, &in_mst, &mut edge_queue);
    }

    result.is_connected = result.edges.len() == result.nodes_in_mst.saturating_sub(1);
    result
}

/// Runs Prim starting from the node with the fewest neighbors, as a cheap heuristic for
/// a small initial frontier.
pub fn prim_auto_start(graph: &WeightedGraph) -> MstResult {
    if graph.num_nodes() == 0 {
        return MstResult::new("Prim (auto-start)");
    }

    let node_ids: Vec<u32> = graph.get_all_node_ids().collect();
    let start = node_ids
        .iter()
        .copied()
        .min_by_key(|&id| graph.get_neighbors(id).len())
        .expect("graph has at least one node");

    let mut result = prim(graph, start);
    result.algorithm_used = "Prim (auto-start)";
    result
}

/// Confirms `mst` is a valid spanning tree and that every one of its edges corresponds
/// to a real edge (in either direction) in `graph` with a matching effective weight.
pub fn verify_mst(mst: &MstResult, graph: &WeightedGraph) -> bool {
    if !mst.is_valid_mst() {
        return false;
    }

    for edge in &mst.edges {
        let graph_edge = graph
            .get_edge(edge.from, edge.to)
            .or_else(|| graph.get_edge(edge.to, edge.from));
        let Some(graph_edge) = graph_edge else {
            return false;
        };
        if (graph_edge.effective_weight() - edge.weight).abs() > WEIGHT_EPSILON {
            return false;
        }
    }
    true
}

/// Sum of the `|V| - 1` lightest edges in the graph — a lower bound on any spanning
/// tree's weight, but not necessarily realizable (the lightest edges need not connect
/// the graph).
pub fn mst_lower_bound(graph: &WeightedGraph) -> f32 {
    if graph.num_nodes() <= 1 {
        return 0.0;
    }

    let mut weights: Vec<f32> = graph.get_all_edges().iter().map(|e| e.effective_weight()).collect();
    weights.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let edges_needed = graph.num_nodes() - 1;
    weights.iter().take(edges_needed).sum()
}
