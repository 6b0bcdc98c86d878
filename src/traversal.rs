//! Re-usable breadth-first and depth-first traversal contexts over a
//! [`crate::graph::Graph`].
//!
//! Both share the same lifecycle: `construct(graph)` allocates a
//! visited [`crate::bitset::Bitset`] and an empty frontier; `set_start`
//! seeds the frontier with one node; `step` reports the next frontier
//! node and enqueues its unvisited out-neighbors; `clear` resets the
//! context (without reallocating) so it can be driven from a new start
//! node. [`Bfs`] drains its frontier as a [`crate::containers::Queue`],
//! [`Dfs`] as a [`crate::containers::Stack`] — the only difference
//! between the two.
//!
//! The graph borrowed by a context must not mutate during the context's
//! lifetime (this crate never mutates a constructed graph, so the
//! invariant holds trivially).

use crate::bitset::Bitset;
use crate::containers::{Queue, Stack};
use crate::graph::Graph;

/// Depth-first traversal context, frontier driven as a stack.
pub struct Dfs<'g> {
    graph: &'g Graph,
    visited: Bitset,
    frontier: Stack,
}

/// Breadth-first traversal context, frontier driven as a queue.
pub struct Bfs<'g> {
    graph: &'g Graph,
    visited: Bitset,
    frontier: Queue,
}

macro_rules! impl_traversal {
    ($ty:ident, $frontier:ty, $push:ident, $pop:ident) => {
        impl<'g> $ty<'g> {
            pub fn construct(graph: &'g Graph) -> Option<Self> {
                let visited = Bitset::construct(graph.num_nodes())?;
                Some(Self {
                    graph,
                    visited,
                    frontier: <$frontier>::new(),
                })
            }

            /// Marks `v` visited and seeds the frontier with it. Returns
            /// `false` on allocation failure (frontier left unchanged).
            pub fn set_start(&mut self, v: u32) -> bool {
                debug_assert!(self.graph.has_node(v));
                self.visited.set(v as usize);
                self.frontier.$push(v)
            }

            #[inline]
            pub fn is_done(&self) -> bool {
                self.frontier.is_empty()
            }

            /// Pops the next frontier node into `out`, reports it, and
            /// enqueues its unvisited out-neighbors (marking them
            /// visited). Requires `!is_done()`. Returns `false` if
            /// enqueuing a neighbor fails (allocation failure); the
            /// popped node is still written to `out`.
            pub fn step(&mut self, out: &mut u32) -> bool {
                debug_assert!(!self.is_done());
                let v = self.frontier.$pop().expect("checked !is_done above");
                *out = v;
                for &n in self.graph.get_neighbors(v) {
                    if !self.visited.get(n as usize) {
                        self.visited.set(n as usize);
                        if !self.frontier.$push(n) {
                            return false;
                        }
                    }
                }
                true
            }

            /// Resets `visited` and the frontier without deallocating,
            /// so the context can be re-driven from a new start node.
            pub fn clear(&mut self) {
                self.visited.clear();
                self.frontier.clear();
            }
        }
    };
}

impl_traversal!(Dfs, Stack, push, pop);
impl_traversal!(Bfs, Queue, push, pop);
