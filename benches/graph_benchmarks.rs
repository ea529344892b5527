/*!
# Performance Benchmarks

Criterion benchmarks for the heap, Dijkstra, A*, and MST over synthetic grid graphs
(no random-graph generator is in scope, so inputs are built deterministically).
*/

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use transit_graph_core::core::astar;
use transit_graph_core::core::dijkstra;
use transit_graph_core::core::graph::{Edge, Node, WeightedGraph};
use transit_graph_core::core::heap::IndexedMinHeap;
use transit_graph_core::core::mst;

/// An n x n grid of nodes with unit-weight edges to their right and down neighbors.
fn grid_graph(n: u32) -> WeightedGraph {
    let mut g = WeightedGraph::new(false);
    for row in 0..n {
        for col in 0..n {
            let id = row * n + col;
            g.add_node(Node::new(id, row as f64, col as f64));
        }
    }
    for row in 0..n {
        for col in 0..n {
            let id = row * n + col;
            if col + 1 < n {
                g.add_edge(Edge::new(id, id + 1, 1.0));
            }
            if row + 1 < n {
                g.add_edge(Edge::new(id, id + n, 1.0));
            }
        }
    }
    g
}

fn bench_heap_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap_push_pop");
    for size in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut heap = IndexedMinHeap::new();
                for v in 0..size {
                    heap.push(size - v);
                }
                while !heap.is_empty() {
                    black_box(heap.pop().unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra_grid");
    for n in [5, 10, 25].iter() {
        let graph = grid_graph(*n);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, _| {
            b.iter(|| black_box(dijkstra::find_shortest_paths(&graph, 0)));
        });
    }
    group.finish();
}

fn bench_astar(c: &mut Criterion) {
    let mut group = c.benchmark_group("astar_grid");
    for n in [5, 10, 25].iter() {
        let graph = grid_graph(*n);
        let target = n * n - 1;
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, _| {
            b.iter(|| black_box(astar::find_path_euclidean(&graph, 0, target)));
        });
    }
    group.finish();
}

fn bench_mst(c: &mut Criterion) {
    let mut group = c.benchmark_group("mst_grid");
    for n in [5, 10, 25].iter() {
        let graph = grid_graph(*n);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::new("kruskal", n), n, |b, _| {
            b.iter(|| black_box(mst::kruskal(&graph)));
        });
        group.bench_with_input(BenchmarkId::new("prim", n), n, |b, _| {
            b.iter(|| black_box(mst::prim(&graph, 0)));
        });
    }
    group.finish();
}

criterion_group!(heap, bench_heap_push_pop);
criterion_group!(shortest_paths, bench_dijkstra, bench_astar);
criterion_group!(spanning_trees, bench_mst);

criterion_main!(heap, shortest_paths, spanning_trees);
