//! A directed graph over a dense prefix of 32-bit node ids, stored as a
//! compressed sparse row: an `offsets` array of length `num_nodes + 1`
//! and a `targets` array of length `num_edges`.

use log::{debug, trace};

use crate::sort::sort_u32;

const SENTINEL: u32 = u32::MAX;

/// A directed graph in CSR form. Node ids are a dense prefix of `u32`
/// starting at 0; `u32::MAX` is reserved and never a valid node id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    offsets: Box<[u32]>,
    targets: Box<[u32]>,
}

impl Graph {
    /// Builds a graph from edges already sorted by `(source, target)`.
    ///
    /// Requires (checked with `debug_assert!` — a violation is a
    /// programmer error, not a recoverable failure): `sources` is
    /// non-decreasing; within a run of equal sources, `targets` is
    /// non-decreasing; no id in either array equals `u32::MAX`;
    /// `sources.len() != u32::MAX as usize`; the minimum node id across
    /// both arrays is 0.
    ///
    /// Returns `None` on allocation failure.
    pub fn construct_from_sorted_edges(sources: &[u32], targets: &[u32]) -> Option<Self> {
        assert_eq!(sources.len(), targets.len());
        let n = sources.len();
        debug_assert_ne!(n, SENTINEL as usize);
        debug_assert!(is_non_decreasing(sources));
        debug_assert!(has_no_sentinel(sources) && has_no_sentinel(targets));
        debug_assert!(sorted_runs_have_non_decreasing_targets(sources, targets));
        debug_assert_eq!(
            sources.iter().chain(targets.iter()).copied().min().unwrap_or(0),
            0
        );

        if n == 0 {
            debug!("constructing empty graph");
            return Some(Self {
                offsets: Box::new([]),
                targets: Box::new([]),
            });
        }

        let max_source = sources.iter().copied().max().unwrap_or(0);
        let max_id = sources
            .iter()
            .chain(targets.iter())
            .copied()
            .max()
            .unwrap_or(0);
        let num_nodes = max_id as usize + 1;

        let mut owned_targets = Vec::new();
        owned_targets.try_reserve_exact(n).ok()?;
        owned_targets.extend_from_slice(targets);

        let mut offsets = Vec::new();
        offsets.try_reserve_exact(num_nodes + 1).ok()?;
        offsets.push(0u32);

        let mut idx = 0usize;
        for v in 0..=max_source {
            while idx < n && sources[idx] == v {
                idx += 1;
            }
            offsets.push(idx as u32);
        }
        for _ in (max_source as usize + 1)..num_nodes {
            offsets.push(n as u32);
        }

        debug!(
            "constructed CSR graph from sorted edges: {num_nodes} nodes, {n} edges",
        );

        Some(Self {
            offsets: offsets.into_boxed_slice(),
            targets: owned_targets.into_boxed_slice(),
        })
    }

    /// Builds a graph from edges in arbitrary order: sorts a permutation
    /// of `0..n` by `(sources[i], targets[i])` lexicographically, then
    /// delegates to [`Self::construct_from_sorted_edges`].
    pub fn construct_from_unsorted_edges(sources: &[u32], targets: &[u32]) -> Option<Self> {
        assert_eq!(sources.len(), targets.len());
        let n = sources.len();

        let mut perm: Vec<u32> = Vec::new();
        perm.try_reserve_exact(n).ok()?;
        perm.extend(0..n as u32);

        let ctx = (sources, targets);
        sort_u32(&mut perm, &ctx, |a, b, (s, t)| {
            let a = a as usize;
            let b = b as usize;
            (s[a], t[a]).cmp(&(s[b], t[b]))
        });

        let mut sorted_sources = Vec::new();
        sorted_sources.try_reserve_exact(n).ok()?;
        let mut sorted_targets = Vec::new();
        sorted_targets.try_reserve_exact(n).ok()?;
        for &i in perm.iter() {
            sorted_sources.push(sources[i as usize]);
            sorted_targets.push(targets[i as usize]);
        }

        trace!("sorted {n} unsorted edges prior to CSR construction");
        Self::construct_from_sorted_edges(&sorted_sources, &sorted_targets)
    }

    /// Returns a fresh, independent copy, or `None` on allocation
    /// failure.
    pub fn copy(&self) -> Option<Self> {
        let mut offsets = Vec::new();
        offsets.try_reserve_exact(self.offsets.len()).ok()?;
        offsets.extend_from_slice(&self.offsets);
        let mut targets = Vec::new();
        targets.try_reserve_exact(self.targets.len()).ok()?;
        targets.extend_from_slice(&self.targets);
        Some(Self {
            offsets: offsets.into_boxed_slice(),
            targets: targets.into_boxed_slice(),
        })
    }

    /// Builds the graph with every edge's direction reversed.
    pub fn copy_reversed(&self) -> Option<Self> {
        let n = self.num_edges();
        let mut rev_sources = Vec::new();
        rev_sources.try_reserve_exact(n).ok()?;
        let mut rev_targets = Vec::new();
        rev_targets.try_reserve_exact(n).ok()?;

        for v in 0..self.num_nodes() as u32 {
            for &t in self.get_neighbors(v) {
                rev_sources.push(t);
                rev_targets.push(v);
            }
        }

        Self::construct_from_unsorted_edges(&rev_sources, &rev_targets)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.targets.len()
    }

    /// Writes the `[first, last)` half-open range into `targets` for
    /// `v`'s outgoing edges.
    pub fn get_out_edges(&self, v: u32) -> (u32, u32) {
        debug_assert!(self.has_node(v));
        (self.offsets[v as usize], self.offsets[v as usize + 1])
    }

    pub fn get_edge_target(&self, e: u32) -> u32 {
        debug_assert!(self.has_edge(e));
        self.targets[e as usize]
    }

    pub fn get_out_degree(&self, v: u32) -> u32 {
        let (first, last) = self.get_out_edges(v);
        last - first
    }

    pub fn get_neighbors(&self, v: u32) -> &[u32] {
        let (first, last) = self.get_out_edges(v);
        &self.targets[first as usize..last as usize]
    }

    #[inline]
    pub fn has_node(&self, v: u32) -> bool {
        (v as usize) < self.num_nodes()
    }

    #[inline]
    pub fn has_edge(&self, e: u32) -> bool {
        (e as usize) < self.num_edges()
    }

    /// `O(degree(s))` linear scan of `s`'s neighbor slice.
    pub fn has_edge_from_to(&self, s: u32, t: u32) -> bool {
        if !self.has_node(s) {
            return false;
        }
        self.get_neighbors(s).iter().any(|&n| n == t)
    }

    /// All-pairs shortest path distances (Floyd-Warshall) over
    /// saturating `u8` weights, parallel edges resolved to their
    /// minimum. `weights[e]` must correspond to edge `e`. Returns a
    /// flattened `num_nodes * num_nodes` row-major matrix, or `None` on
    /// allocation failure.
    pub fn apsp(&self, weights: &[u8]) -> Option<Vec<u8>> {
        assert_eq!(weights.len(), self.num_edges());
        let n = self.num_nodes();

        let mut results = Vec::new();
        results.try_reserve_exact(n * n).ok()?;
        results.resize(n * n, u8::MAX);

        for v in 0..n {
            results[v * n + v] = 0;
        }

        for v in 0..n as u32 {
            let (first, last) = self.get_out_edges(v);
            for e in first..last {
                let t = self.get_edge_target(e) as usize;
                let w = weights[e as usize];
                let slot = &mut results[v as usize * n + t];
                if w < *slot {
                    *slot = w;
                }
            }
        }
        for v in 0..n {
            results[v * n + v] = 0;
        }

        for k in 0..n {
            for i in 0..n {
                let via = results[i * n + k];
                if via == u8::MAX {
                    continue;
                }
                for j in 0..n {
                    let candidate = via.saturating_add(results[k * n + j]);
                    if candidate < results[i * n + j] {
                        results[i * n + j] = candidate;
                    }
                }
            }
        }

        Some(results)
    }

    /// Approximate in-memory footprint in bytes.
    pub fn size_in_bytes(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.offsets.len() * std::mem::size_of::<u32>()
            + self.targets.len() * std::mem::size_of::<u32>()
    }

    /// Diagnostic dump to stderr: one line per node listing its
    /// out-neighbors.
    pub fn print(&self) {
        eprintln!(
            "graph: {} nodes, {} edges",
            self.num_nodes(),
            self.num_edges()
        );
        for v in 0..self.num_nodes() as u32 {
            eprintln!("  {v} -> {:?}", self.get_neighbors(v));
        }
    }
}

fn is_non_decreasing(data: &[u32]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

fn has_no_sentinel(data: &[u32]) -> bool {
    data.iter().all(|&v| v != SENTINEL)
}

fn sorted_runs_have_non_decreasing_targets(sources: &[u32], targets: &[u32]) -> bool {
    (1..sources.len()).all(|i| sources[i - 1] != sources[i] || targets[i - 1] <= targets[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph() {
        let g = Graph::construct_from_sorted_edges(&[], &[]).unwrap();
        assert_eq!(g.num_nodes(), 0);
        assert_eq!(g.num_edges(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn small_sorted_graph() {
        let g = Graph::construct_from_sorted_edges(&[0, 1], &[0, 2]).unwrap();
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.get_edge_target(0), 0);
        assert_eq!(g.get_edge_target(1), 2);
        assert_eq!(g.get_out_degree(0), 1);
        assert_eq!(g.get_out_degree(1), 1);
        assert_eq!(g.get_out_degree(2), 0);
    }

    #[test]
    fn unsorted_construction_matches_sorted() {
        let sorted = Graph::construct_from_sorted_edges(
            &[0, 0, 1, 2, 3],
            &[1, 2, 0, 3, 2],
        )
        .unwrap();
        let unsorted = Graph::construct_from_unsorted_edges(
            &[2, 0, 3, 0, 1],
            &[3, 2, 2, 1, 0],
        )
        .unwrap();
        assert_eq!(sorted, unsorted);
    }

    #[test]
    fn copy_is_independent() {
        let g = Graph::construct_from_sorted_edges(&[0, 1], &[0, 2]).unwrap();
        let c = g.copy().unwrap();
        assert_eq!(g, c);
    }

    #[test]
    fn reversed_twice_has_same_neighbor_multiset() {
        let g = Graph::construct_from_sorted_edges(
            &[0, 0, 1, 2, 3],
            &[1, 2, 0, 3, 2],
        )
        .unwrap();
        let rr = g.copy_reversed().unwrap().copy_reversed().unwrap();
        assert_eq!(rr.num_nodes(), g.num_nodes());
        for v in 0..g.num_nodes() as u32 {
            let mut a: Vec<u32> = g.get_neighbors(v).to_vec();
            let mut b: Vec<u32> = rr.get_neighbors(v).to_vec();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn has_edge_from_to_scans_neighbors() {
        let g = Graph::construct_from_sorted_edges(&[0, 1], &[0, 2]).unwrap();
        assert!(g.has_edge_from_to(0, 0));
        assert!(g.has_edge_from_to(1, 2));
        assert!(!g.has_edge_from_to(0, 2));
        assert!(!g.has_edge_from_to(5, 0));
    }

    #[test]
    fn apsp_disconnected_pairs_saturate() {
        let g = Graph::construct_from_sorted_edges(&[0, 2], &[1, 3]).unwrap();
        let weights = [2u8, 3u8];
        let d = g.apsp(&weights).unwrap();
        let n = g.num_nodes();
        assert_eq!(d[0 * n + 1], 2);
        assert_eq!(d[2 * n + 3], 3);
        assert_eq!(d[0 * n + 0], 0);
        assert_eq!(d[0 * n + 3], u8::MAX);
    }

    #[test]
    fn apsp_combines_paths_through_intermediate() {
        let g = Graph::construct_from_sorted_edges(&[0, 1], &[1, 2]).unwrap();
        let weights = [3u8, 4u8];
        let d = g.apsp(&weights).unwrap();
        let n = g.num_nodes();
        assert_eq!(d[0 * n + 2], 7);
    }

    #[test]
    fn apsp_self_loop_weight_does_not_survive_diagonal() {
        let g = Graph::construct_from_sorted_edges(&[0], &[0]).unwrap();
        let weights = [7u8];
        let d = g.apsp(&weights).unwrap();
        assert_eq!(d[0], 0);
    }
}
