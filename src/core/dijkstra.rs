/*!
# Dijkstra's Shortest Path Algorithm

Single-source shortest paths over non-negative edge weights, built on
[`IndexedMinHeap`](crate::core::heap::IndexedMinHeap) so that relaxing an edge to a node
already in the open set is a `decrease_key` rather than a fresh push-and-filter. Negative
effective weights are skipped rather than rejected outright, matching this crate's
position that negative-weight shortest paths are out of scope rather than an error (see
`find_shortest_paths`'s doc comment and [`validate_non_negative_weights`]).
*/

use crate::core::graph::WeightedGraph;
use crate::core::heap::{Handle, IndexedMinHeap};
use std::collections::HashMap;

/// Processing state of a node during a run of Dijkstra's algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Unvisited,
    InQueue,
    Visited,
}

/// Result of a Dijkstra run from a single source.
#[derive(Debug, Clone)]
pub struct DijkstraResult {
    pub source: u32,
    pub distances: HashMap<u32, f32>,
    pub parent: HashMap<u32, u32>,
    pub state: HashMap<u32, NodeState>,
    pub nodes_processed: usize,
}

impl DijkstraResult {
    fn new(source: u32) -> Self {
        Self {
            source,
            distances: HashMap::new(),
            parent: HashMap::new(),
            state: HashMap::new(),
            nodes_processed: 0,
        }
    }

    /// Shortest distance to `target`, or `f32::INFINITY` if unreachable or unknown.
    pub fn get_distance(&self, target: u32) -> f32 {
        self.distances.get(&target).copied().unwrap_or(f32::INFINITY)
    }

    /// True iff `target` was reached by a finite-weight path.
    pub fn is_reachable(&self, target: u32) -> bool {
        self.get_distance(target).is_finite()
    }

    /// Path from source to `target`, following `parent` pointers. Empty if `target` is
    /// unreachable.
    pub fn get_path(&self, target: u32) -> Vec<u32> {
        if !self.is_reachable(target) {
            return Vec::new();
        }
        let mut path = Vec::new();
        let mut current = target;
        while current != self.source {
            path.push(current);
            match self.parent.get(&current) {
                Some(&p) => current = p,
                None => break,
            }
        }
        path.push(self.source);
        path.reverse();
        path
    }

    /// All reached nodes paired with their shortest distance.
    pub fn get_all_distances(&self) -> Vec<(u32, f32)> {
        self.distances
            .iter()
            .filter(|(_, d)| d.is_finite())
            .map(|(&id, &d)| (id, d))
            .collect()
    }
}

#[derive(Clone, Copy, PartialEq)]
struct DistanceNode {
    distance: f32,
    node_id: u32,
}

fn less(a: &DistanceNode, b: &DistanceNode) -> bool {
    a.distance < b.distance
}

/// Runs Dijkstra's algorithm from `source` over every node reachable through
/// non-negative effective-weight edges.
///
/// Edges with a negative effective weight are silently skipped during relaxation (this
/// crate does not implement negative-weight shortest paths — see `validate_non_negative_weights`
/// to check a graph up front instead of discovering skipped edges after the fact).
pub fn find_shortest_paths(graph: &WeightedGraph, source: u32) -> DijkstraResult {
    let mut result = DijkstraResult::new(source);
    if !graph.has_node(source) {
        return result;
    }

    let mut pq: IndexedMinHeap<DistanceNode, _> = IndexedMinHeap::with_comparator(less);
    let mut heap_handles: HashMap<u32, Handle> = HashMap::new();

    result.distances.insert(source, 0.0);
    result.state.insert(source, NodeState::InQueue);
    let h = pq.push(DistanceNode {
        distance: 0.0,
        node_id: source,
    });
    heap_handles.insert(source, h);

    while let Ok(min_node) = pq.pop() {
        let u = min_node.node_id;
        let dist_u = min_node.distance;
        heap_handles.remove(&u);

        result.state.insert(u, NodeState::Visited);
        result.nodes_processed += 1;

        if dist_u > result.get_distance(u) {
            continue;
        }

        for edge in graph.get_neighbors(u) {
            let v = edge.to;
            let weight = edge.effective_weight();
            if weight < 0.0 {
                continue;
            }

            let new_distance = dist_u + weight;
            let current_distance = result.get_distance(v);

            if new_distance < current_distance {
                result.distances.insert(v, new_distance);
                result.parent.insert(v, u);

                let v_state = result.state.get(&v).copied().unwrap_or(NodeState::Unvisited);
                match v_state {
                    NodeState::Unvisited => {
                        result.state.insert(v, NodeState::InQueue);
                        let handle = pq.push(DistanceNode {
                            distance: new_distance,
                            node_id: v,
                        });
                        heap_handles.insert(v, handle);
                    }
                    NodeState::InQueue => {
                        if let Some(&handle) = heap_handles.get(&v) {
                            let new_entry = DistanceNode {
                                distance: new_distance,
                                node_id: v,
                            };
                            if pq.decrease_key(handle, new_entry).is_err() {
                                let fresh = pq.push(new_entry);
                                heap_handles.insert(v, fresh);
                            }
                        }
                    }
                    NodeState::Visited => {}
                }
            }
        }
    }

    result
}

/// Like [`find_shortest_paths`], but stops as soon as `target` is popped from the open
/// set rather than exhausting the whole reachable component. The result is identical to
/// the full run for every node processed before termination; nodes beyond that frontier
/// are simply absent.
pub fn find_shortest_path_to_target(
    graph: &WeightedGraph,
    source: u32,
    target: u32,
) -> DijkstraResult {
    let mut result = DijkstraResult::new(source);
    if !graph.has_node(source) || !graph.has_node(target) {
        return result;
    }
    if source == target {
        result.distances.insert(source, 0.0);
        result.state.insert(source, NodeState::Visited);
        result.nodes_processed = 1;
        return result;
    }

    let mut pq: IndexedMinHeap<DistanceNode, _> = IndexedMinHeap::with_comparator(less);
    let mut heap_handles: HashMap<u32, Handle> = HashMap::new();

    result.distances.insert(source, 0.0);
    result.state.insert(source, NodeState::InQueue);
    let h = pq.push(DistanceNode {
        distance: 0.0,
        node_id: source,
    });
    heap_handles.insert(source, h);

    while let Ok(min_node) = pq.pop() {
        let u = min_node.node_id;
        let dist_u = min_node.distance;
        heap_handles.remove(&u);
        result.state.insert(u, NodeState::Visited);
        result.nodes_processed += 1;

        if u == target {
            break;
        }
        if dist_u > result.get_distance(u) {
            continue;
        }

        for edge in graph.get_neighbors(u) {
            let v = edge.to;
            let weight = edge.effective_weight();
            if weight < 0.0 {
                continue;
            }

            let new_distance = dist_u + weight;
            let current_distance = result.get_distance(v);

            if new_distance < current_distance {
                result.distances.insert(v, new_distance);
                result.parent.insert(v, u);

                let v_state = result.state.get(&v).copied().unwrap_or(NodeState::Unvisited);
                match v_state {
                    NodeState::Unvisited => {
                        result.state.insert(v, NodeState::InQueue);
                        let handle = pq.push(DistanceNode {
                            distance: new_distance,
                            node_id: v,
                        });
                        heap_handles.insert(v, handle);
                    }
                    NodeState::InQueue => {
                        if let Some(&handle) = heap_handles.get(&v) {
                            let new_entry = DistanceNode {
                                distance: new_distance,
                                node_id: v,
                            };
                            if pq.decrease_key(handle, new_entry).is_err() {
                                let fresh = pq.push(new_entry);
                                heap_handles.insert(v, fresh);
                            }
                        }
                    }
                    NodeState::Visited => {}
                }
            }
        }
    }

    result
}

pub fn find_path(graph: &WeightedGraph, source: u32, target: u32) -> Vec<u32> {
    find_shortest_paths(graph, source).get_path(target)
}

pub fn find_distance(graph: &WeightedGraph, source: u32, target: u32) -> f32 {
    find_shortest_paths(graph, source).get_distance(target)
}

pub fn has_path(graph: &WeightedGraph, source: u32, target: u32) -> bool {
    find_shortest_paths(graph, source).is_reachable(target)
}

/// True iff every edge's effective weight is non-negative.
pub fn validate_non_negative_weights(graph: &WeightedGraph) -> bool {
    graph.get_all_edges().iter().all(|e| e.effective_weight() >= 0.0)
}
