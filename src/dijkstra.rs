//! Single-source shortest path search over a [`crate::graph::Graph`],
//! using a lazy-deletion binary min-heap and a search cache that's
//! reusable across repeated queries sharing the same source.
//!
//! Edge weights are `u16` (so distances sum in `u32` with saturation at
//! `u32::MAX` — see [`Self::shortest_path`]'s step 5). Changing only the
//! target of a query retains the search frontier (`dist`/`parent`/
//! `seen`/`heap`) and only invalidates the cached path; changing the
//! source resets everything.

use log::{debug, trace};

use crate::bitset::Bitset;
use crate::graph::Graph;
use crate::heap::MinHeap;

const NONE: u32 = u32::MAX;

/// A Dijkstra search context borrowing a graph and its edge weights.
///
/// `weights[e]` is the weight of edge `e`, in `[0, 65535]`; `weights`
/// must have one entry per edge of `graph` and both must outlive the
/// context and not mutate during its lifetime.
pub struct Dijkstra<'g> {
    graph: &'g Graph,
    weights: &'g [u16],
    s: u32,
    t: u32,
    dist: Vec<u32>,
    parent: Vec<u32>,
    seen: Bitset,
    heap: MinHeap,
    path: Option<Vec<u32>>,
}

impl<'g> Dijkstra<'g> {
    /// Returns `None` on allocation failure. `weights.len()` must equal
    /// `graph.num_edges()`.
    pub fn construct(graph: &'g Graph, weights: &'g [u16]) -> Option<Self> {
        assert_eq!(weights.len(), graph.num_edges());
        let n = graph.num_nodes();

        let mut dist = Vec::new();
        dist.try_reserve_exact(n).ok()?;
        dist.resize(n, NONE);

        let mut parent = Vec::new();
        parent.try_reserve_exact(n).ok()?;
        parent.extend(0..n as u32);

        let seen = Bitset::construct(n)?;

        Some(Self {
            graph,
            weights,
            s: NONE,
            t: NONE,
            dist,
            parent,
            seen,
            heap: MinHeap::new(),
            path: None,
        })
    }

    /// Returns `true` iff some directed walk from `s` to `t` exists.
    ///
    /// `s == t` always short-circuits to an empty, zero-distance path;
    /// otherwise a source change does a full reset, a target-only change
    /// retains the frontier, and the heap is lazily-deleting (no
    /// decrease-key — stale entries are skipped when popped).
    pub fn shortest_path(&mut self, s: u32, t: u32) -> bool {
        debug_assert!(self.graph.has_node(s));
        debug_assert!(self.graph.has_node(t));

        if s == t {
            self.s = s;
            self.t = t;
            self.path = Some(Vec::new());
            return true;
        }

        if s != self.s {
            debug!("dijkstra: source changed to {s}, resetting search state");
            if !self.reset_from(s) {
                self.invalidate();
                return false;
            }
            self.s = s;
        } else {
            self.path = None;
            if self.seen.get(t as usize) {
                trace!("dijkstra: target {t} already settled, reusing frontier");
                self.t = t;
                return true;
            }
        }
        self.t = t;

        while !self.heap.is_empty() {
            let entry = self.heap.pop();
            let u = entry.value;
            if self.seen.get(u as usize) {
                continue;
            }
            self.seen.set(u as usize);
            let du = self.dist[u as usize];

            let (first, last) = self.graph.get_out_edges(u);
            for e in first..last {
                let v = self.graph.get_edge_target(e);
                let w = self.weights[e as usize] as u32;
                let alt = du.saturating_add(w);
                if alt < self.dist[v as usize] {
                    self.dist[v as usize] = alt;
                    self.parent[v as usize] = u;
                    if !self.heap.push(v, alt) {
                        self.invalidate();
                        return false;
                    }
                }
            }

            if u == t {
                return true;
            }
            if du == NONE {
                // Distances beyond this point are indistinguishable from
                // "unreached" — further progress can't be trusted.
                self.invalidate();
                return false;
            }
        }
        false
    }

    /// Sum of edge weights along the last successful search's path,
    /// saturating at `u32::MAX`. Only meaningful after
    /// [`Self::shortest_path`] returned `true`.
    pub fn get_distance(&self) -> u32 {
        if self.s == self.t {
            0
        } else {
            self.dist[self.t as usize]
        }
    }

    /// The cached path from `s` to `t`, `s` first and `t` last. Only
    /// meaningful after [`Self::shortest_path`] returned `true`; built
    /// lazily on first access and cached until the next
    /// [`Self::shortest_path`] call with a different `(s, t)`.
    pub fn get_path(&mut self) -> &[u32] {
        if self.path.is_none() {
            self.path = Some(self.rebuild_path());
        }
        self.path.as_deref().expect("just populated above")
    }

    fn rebuild_path(&self) -> Vec<u32> {
        if self.s == self.t {
            return Vec::new();
        }
        let mut rev = Vec::new();
        let mut p = self.t;
        loop {
            rev.push(p);
            let next = self.parent[p as usize];
            if next == p {
                break;
            }
            p = next;
        }
        debug_assert_eq!(p, self.s, "path retrieval must terminate at the source");
        rev.reverse();
        rev
    }

    fn reset_from(&mut self, s: u32) -> bool {
        self.dist.fill(NONE);
        for (v, p) in self.parent.iter_mut().enumerate() {
            *p = v as u32;
        }
        self.seen.clear();
        self.heap.clear();
        self.path = None;
        self.dist[s as usize] = 0;
        self.heap.push(s, 0)
    }

    fn invalidate(&mut self) {
        self.s = NONE;
        self.t = NONE;
        self.dist.fill(NONE);
        for (v, p) in self.parent.iter_mut().enumerate() {
            *p = v as u32;
        }
        self.seen.clear();
        self.heap.clear();
        self.path = None;
    }
}
