/*!
# A* Pathfinding

Best-first search between a single source and target, guided by a pluggable admissible
[`Heuristic`]. Structurally this is Dijkstra with an `f_score = g_score + h(n)` ordering
and a Closed set that is never reopened: once a node is expanded, this implementation
trusts that the heuristic kept it optimal and will not revisit it even if a cheaper path
surfaces later. That is a deliberate efficiency trade rather than an oversight — it is
correct for any consistent (not just admissible) heuristic, and all three heuristics
shipped here (Haversine, Euclidean, Manhattan) are consistent, but a caller supplying a
merely-admissible-but-inconsistent heuristic can get a suboptimal path as a result.
*/

use crate::core::graph::{Node, WeightedGraph};
use crate::core::heap::{Handle, IndexedMinHeap};
use std::collections::HashMap;

/// Processing state of a node during a run of A*.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Unvisited,
    Open,
    Closed,
}

/// An admissible distance estimate between two geo-located nodes, used to bias A*'s
/// search toward the target.
pub trait Heuristic {
    /// Estimated cost from `from` to `to`. Must never exceed the true shortest-path
    /// cost for A* to guarantee optimality.
    fn estimate(&self, from: &Node, to: &Node) -> f32;
    fn name(&self) -> &'static str;
}

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers; admissible for road/transit routing where edge
/// weights are real-world distances.
pub struct HaversineHeuristic;

impl Heuristic for HaversineHeuristic {
    fn estimate(&self, from: &Node, to: &Node) -> f32 {
        let lat1 = from.lat.to_radians();
        let lon1 = from.lon.to_radians();
        let lat2 = to.lat.to_radians();
        let lon2 = to.lon.to_radians();

        let dlat = lat2 - lat1;
        let dlon = lon2 - lon1;

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        (EARTH_RADIUS_KM * c) as f32
    }

    fn name(&self) -> &'static str {
        "Haversine"
    }
}

/// Straight-line distance treating `lat`/`lon` as planar (x, y) coordinates. Admissible
/// only when edge weights are themselves planar distances in the same units.
pub struct EuclideanHeuristic;

impl Heuristic for EuclideanHeuristic {
    fn estimate(&self, from: &Node, to: &Node) -> f32 {
        let dx = to.lat - from.lat;
        let dy = to.lon - from.lon;
        (dx * dx + dy * dy).sqrt() as f32
    }

    fn name(&self) -> &'static str {
        "Euclidean"
    }
}

/// Taxicab distance over `lat`/`lon` treated as planar coordinates. Admissible when the
/// underlying movement is grid-constrained.
pub struct ManhattanHeuristic;

impl Heuristic for ManhattanHeuristic {
    fn estimate(&self, from: &Node, to: &Node) -> f32 {
        let dx = (to.lat - from.lat).abs();
        let dy = (to.lon - from.lon).abs();
        (dx + dy) as f32
    }

    fn name(&self) -> &'static str {
        "Manhattan"
    }
}

/// Result of an A* run from `source` to `target`.
#[derive(Debug, Clone)]
pub struct AstarResult {
    pub source: u32,
    pub target: u32,
    pub path_found: bool,
    pub g_scores: HashMap<u32, f32>,
    pub f_scores: HashMap<u32, f32>,
    pub parent: HashMap<u32, u32>,
    pub state: HashMap<u32, NodeState>,
    pub nodes_expanded: usize,
    pub nodes_generated: usize,
    pub heuristic_name: &'static str,
}

impl AstarResult {
    fn new(source: u32, target: u32, heuristic_name: &'static str) -> Self {
        Self {
            source,
            target,
            path_found: false,
            g_scores: HashMap::new(),
            f_scores: HashMap::new(),
            parent: HashMap::new(),
            state: HashMap::new(),
            nodes_expanded: 0,
            nodes_generated: 0,
            heuristic_name,
        }
    }

    /// Actual cost of the path found, or infinity if no path was found.
    pub fn get_cost(&self) -> f32 {
        if !self.path_found {
            return f32::INFINITY;
        }
        self.g_scores.get(&self.target).copied().unwrap_or(f32::INFINITY)
    }

    /// Path from source to target. Empty if no path was found.
    pub fn get_path(&self) -> Vec<u32> {
        if !self.path_found {
            return Vec::new();
        }
        let mut path = Vec::new();
        let mut current = self.target;
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
}

#[derive(Clone, Copy, PartialEq)]
struct FScoreNode {
    f_score: f32,
    g_score: f32,
    node_id: u32,
}

/// Smaller f_score has priority; ties broken by lower g_score (closer to the start,
/// matching the source algorithm's tie-break rule).
fn less(a: &FScoreNode, b: &FScoreNode) -> bool {
    const TOLERANCE: f32 = 1e-9;
    if (a.f_score - b.f_score).abs() < TOLERANCE {
        a.g_score < b.g_score
    } else {
        a.f_score < b.f_score
    }
}

/// Runs A* from `source` to `target` using `heuristic`.
///
/// Once a node moves to the Closed set it is never reopened — see the module doc
/// comment for why that is safe for a consistent heuristic.
pub fn find_path(
    graph: &WeightedGraph,
    source: u32,
    target: u32,
    heuristic: &dyn Heuristic,
) -> AstarResult {
    let mut result = AstarResult::new(source, target, heuristic.name());

    if !graph.has_node(source) || !graph.has_node(target) {
        return result;
    }
    if source == target {
        result.path_found = true;
        result.g_scores.insert(source, 0.0);
        result.f_scores.insert(source, 0.0);
        result.nodes_expanded = 1;
        return result;
    }

    let (source_node, target_node) = match (graph.get_node(source), graph.get_node(target)) {
        (Some(s), Some(t)) => (*s, *t),
        _ => return result,
    };

    let mut open_set: IndexedMinHeap<FScoreNode, _> = IndexedMinHeap::with_comparator(less);
    let mut heap_handles: HashMap<u32, Handle> = HashMap::new();

    let initial_h = heuristic.estimate(&source_node, &target_node);
    result.g_scores.insert(source, 0.0);
    result.f_scores.insert(source, initial_h);
    result.state.insert(source, NodeState::Open);

    let h = open_set.push(FScoreNode {
        f_score: initial_h,
        g_score: 0.0,
        node_id: source,
    });
    heap_handles.insert(source, h);
    result.nodes_generated += 1;

    while let Ok(current) = open_set.pop() {
        let current_id = current.node_id;
        let current_g = current.g_score;
        heap_handles.remove(&current_id);

        result.state.insert(current_id, NodeState::Closed);
        result.nodes_expanded += 1;

        if current_id == target {
            result.path_found = true;
            break;
        }

        let stored_g = result.g_scores.get(&current_id).copied();
        if let Some(stored) = stored_g {
            if current_g > stored + 1e-9 {
                continue;
            }
        }

        for edge in graph.get_neighbors(current_id) {
            let neighbor_id = edge.to;
            let edge_weight = edge.effective_weight();
            if edge_weight < 0.0 {
                continue;
            }

            let neighbor_state = result
                .state
                .get(&neighbor_id)
                .copied()
                .unwrap_or(NodeState::Unvisited);
            if neighbor_state == NodeState::Closed {
                continue;
            }

            let tentative_g = current_g + edge_weight;
            let stored_g = result.g_scores.get(&neighbor_id).copied().unwrap_or(f32::INFINITY);

            if tentative_g < stored_g {
                let neighbor_node = match graph.get_node(neighbor_id) {
                    Some(n) => *n,
                    None => continue,
                };
                let h_score = heuristic.estimate(&neighbor_node, &target_node);
                let f_score = tentative_g + h_score;

                result.g_scores.insert(neighbor_id, tentative_g);
                result.f_scores.insert(neighbor_id, f_score);
                result.parent.insert(neighbor_id, current_id);

                match neighbor_state {
                    NodeState::Unvisited => {
                        result.state.insert(neighbor_id, NodeState::Open);
                        let handle = open_set.push(FScoreNode {
                            f_score,
                            g_score: tentative_g,
                            node_id: neighbor_id,
                        });
                        heap_handles.insert(neighbor_id, handle);
                        result.nodes_generated += 1;
                    }
                    NodeState::Open => {
                        if let Some(&handle) = heap_handles.get(&neighbor_id) {
                            let new_entry = FScoreNode {
                                f_score,
                                g_score: tentative_g,
                                node_id: neighbor_id,
                            };
                            if open_set.decrease_key(handle, new_entry).is_err() {
                                let fresh = open_set.push(new_entry);
                                heap_handles.insert(neighbor_id, fresh);
                            }
                        }
                    }
                    NodeState::Closed => unreachable!("filtered out above"),
                }
            }
        }
    }

    result
}

pub fn find_path_haversine(graph: &WeightedGraph, source: u32, target: u32) -> AstarResult {
    find_path(graph, source, target, &HaversineHeuristic)
}

pub fn find_path_euclidean(graph: &WeightedGraph, source: u32, target: u32) -> AstarResult {
    find_path(graph, source, target, &EuclideanHeuristic)
}

pub fn find_path_manhattan(graph: &WeightedGraph, source: u32, target: u32) -> AstarResult {
    find_path(graph, source, target, &ManhattanHeuristic)
}

/// Weak sanity check: confirms the heuristic never returns a negative estimate over a
/// sample of node pairs. This does not prove admissibility (that would require
/// comparing against true shortest-path distances) and is not meant to.
pub fn validate_heuristic_admissibility(
    graph: &WeightedGraph,
    heuristic: &dyn Heuristic,
    sample_size: usize,
) -> bool {
    let node_ids: Vec<u32> = graph.get_all_node_ids().collect();
    if node_ids.len() < 2 {
        return true;
    }

    let mut tested = 0;
    for i in 0..node_ids.len() {
        if tested >= sample_size {
            break;
        }
        for j in (i + 1)..node_ids.len().min(i + 10) {
            let (Some(n1), Some(n2)) = (graph.get_node(node_ids[i]), graph.get_node(node_ids[j]))
            else {
                continue;
            };
            if heuristic.estimate(n1, n2) < 0.0 {
                return false;
            }
            tested += 1;
        }
    }
    true
}
