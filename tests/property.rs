//! Integration tests over randomly generated graphs, cross-checking the
//! CSR construction invariants and the Dijkstra engine against a
//! reference Bellman-Ford implementation.
//!
//! Edge lists are generated with `rand::rngs::StdRng` and a fixed seed
//! for reproducibility, rather than via `compact_graph::rng::Pcg32` (the
//! crate's own PRNG is a library primitive under test, not a test
//! dependency).

use rand::prelude::*;

use compact_graph::{Dijkstra, Graph, SpatialIndex, SpatialQuery};

fn random_edge_list(node_count: u32, edge_count: usize, seed: u64) -> (Vec<u32>, Vec<u32>, Vec<u16>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sources = Vec::with_capacity(edge_count);
    let mut targets = Vec::with_capacity(edge_count);
    let mut weights = Vec::with_capacity(edge_count);
    for _ in 0..edge_count {
        sources.push(rng.gen_range(0..node_count));
        targets.push(rng.gen_range(0..node_count));
        weights.push(rng.gen_range(0..=500u16));
    }
    (sources, targets, weights)
}

/// A reference shortest-path computed independently of the crate's
/// lazy-deletion heap, via plain Bellman-Ford relaxation.
fn bellman_ford(num_nodes: usize, sources: &[u32], targets: &[u32], weights: &[u16], s: u32) -> Vec<u32> {
    let mut dist = vec![u32::MAX; num_nodes];
    dist[s as usize] = 0;
    for _ in 0..num_nodes {
        let mut changed = false;
        for ((&u, &v), &w) in sources.iter().zip(targets.iter()).zip(weights.iter()) {
            if dist[u as usize] == u32::MAX {
                continue;
            }
            let alt = dist[u as usize].saturating_add(w as u32);
            if alt < dist[v as usize] {
                dist[v as usize] = alt;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    dist
}

#[test]
fn dijkstra_matches_bellman_ford_on_random_graphs() {
    for seed in 0..8u64 {
        let node_count = 40u32;
        let (sources, targets, weights) = random_edge_list(node_count, 150, seed);
        let g = Graph::construct_from_unsorted_edges(&sources, &targets).unwrap();
        assert_eq!(g.num_nodes(), node_count as usize);

        // Pad the weight vector out to the graph's actual edge count;
        // duplicate (s, t) pairs across the random draws all still get
        // one weight each since construction preserves edge count.
        assert_eq!(weights.len(), g.num_edges());

        // construct_from_unsorted_edges permutes edges, so weights must
        // be re-derived per-edge from (source, target) via the graph
        // itself rather than reused positionally.
        let mut per_edge_weight = vec![0u16; g.num_edges()];
        let mut by_source: Vec<Vec<(u32, u16)>> = vec![Vec::new(); g.num_nodes()];
        for (&u, (&v, &w)) in sources.iter().zip(targets.iter().zip(weights.iter())) {
            by_source[u as usize].push((v, w));
        }
        for v in 0..g.num_nodes() as u32 {
            let (first, last) = g.get_out_edges(v);
            let mut remaining = by_source[v as usize].clone();
            for e in first..last {
                let t = g.get_edge_target(e);
                let pos = remaining.iter().position(|&(rt, _)| rt == t).unwrap();
                let (_, w) = remaining.remove(pos);
                per_edge_weight[e as usize] = w;
            }
        }

        let reference = bellman_ford(g.num_nodes(), &sources, &targets, &weights, 0);

        let mut dijkstra = Dijkstra::construct(&g, &per_edge_weight).unwrap();
        for t in 0..node_count {
            let reachable = dijkstra.shortest_path(0, t);
            assert_eq!(reachable, reference[t as usize] != u32::MAX, "seed {seed}, t {t}");
            if reachable {
                assert_eq!(dijkstra.get_distance(), reference[t as usize], "seed {seed}, t {t}");
                let path = dijkstra.get_path();
                if t != 0 {
                    assert_eq!(path[0], 0);
                    assert_eq!(*path.last().unwrap(), t);
                    let sum: u32 = path
                        .windows(2)
                        .map(|w| {
                            let (first, last) = g.get_out_edges(w[0]);
                            (first..last)
                                .find(|&e| g.get_edge_target(e) == w[1])
                                .map(|e| per_edge_weight[e as usize] as u32)
                                .expect("path edges must exist in the graph")
                        })
                        .sum();
                    assert_eq!(sum, reference[t as usize]);
                }
            }
        }
    }
}

#[test]
fn csr_invariants_hold_on_random_sorted_input() {
    for seed in 0..5u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let node_count = 25u32;
        let edge_count = 120usize;
        let mut edges: Vec<(u32, u32)> = (0..edge_count)
            .map(|_| (rng.gen_range(0..node_count), rng.gen_range(0..node_count)))
            .collect();
        edges.sort_unstable();

        let sources: Vec<u32> = edges.iter().map(|e| e.0).collect();
        let targets: Vec<u32> = edges.iter().map(|e| e.1).collect();

        let g = Graph::construct_from_sorted_edges(&sources, &targets).unwrap();
        assert_eq!(g.num_edges(), edge_count);

        let mut concatenated = Vec::with_capacity(edge_count);
        for v in 0..g.num_nodes() as u32 {
            assert_eq!(g.get_out_degree(v) as usize, g.get_neighbors(v).len());
            concatenated.extend_from_slice(g.get_neighbors(v));
        }
        assert_eq!(concatenated, targets);
    }
}

#[test]
fn reversed_twice_preserves_neighbor_multisets_on_random_graph() {
    let (sources, targets, _) = random_edge_list(30, 100, 7);
    let g = Graph::construct_from_unsorted_edges(&sources, &targets).unwrap();
    let rr = g.copy_reversed().unwrap().copy_reversed().unwrap();
    for v in 0..g.num_nodes() as u32 {
        let mut a: Vec<u32> = g.get_neighbors(v).to_vec();
        let mut b: Vec<u32> = rr.get_neighbors(v).to_vec();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }
}

#[test]
fn spatial_index_matches_brute_force_on_random_points() {
    let mut rng = StdRng::seed_from_u64(99);
    let n = 500;
    let nodes: Vec<u32> = (0..n).collect();
    let lngs: Vec<u32> = (0..n).map(|_| rng.gen_range(0..1000)).collect();
    let lats: Vec<u32> = (0..n).map(|_| rng.gen_range(0..1000)).collect();

    let index = SpatialIndex::construct(&nodes, &lngs, &lats).unwrap();

    for _ in 0..10 {
        let a = rng.gen_range(0..1000);
        let b = rng.gen_range(0..1000);
        let (lngmin, lngmax) = (a.min(b), a.max(b));
        let c = rng.gen_range(0..1000);
        let d = rng.gen_range(0..1000);
        let (latmin, latmax) = (c.min(d), c.max(d));

        let query = SpatialQuery {
            lngmin,
            latmin,
            lngmax,
            latmax,
            n: usize::MAX,
        };
        let mut out = Vec::new();
        index.search(&query, &mut out);

        let mut expected: Vec<u32> = (0..n as usize)
            .filter(|&i| {
                lngs[i] >= lngmin && lngs[i] <= lngmax && lats[i] >= latmin && lats[i] <= latmax
            })
            .map(|i| nodes[i])
            .collect();
        out.sort_unstable();
        expected.sort_unstable();
        assert_eq!(out, expected);
    }
}
