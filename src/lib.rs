//! A compact, in-memory library for directed graphs with 32-bit node
//! ids, built around two uses: topology queries (neighbors, degree,
//! adjacency tests) and weighted shortest-path search.
//!
//! The core is a compressed sparse row ([`graph`]) graph representation,
//! a reusable-cache Dijkstra engine ([`dijkstra`]), and a handful of
//! succinct / compression primitives ([`bitset`], [`rank_select`],
//! [`codec`]) and a spatial utility ([`zorder`], [`reorder`],
//! [`spatial_index`]) that support them.
//!
//! All operations are single-threaded over private, owned state; there
//! is no persistence format, no concurrency, and no dynamic mutation of
//! an existing graph (construction is batch). See each module for its
//! specific contract.

pub mod bits;
pub mod bitset;
pub mod codec;
pub mod containers;
pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod heap;
pub mod rank_select;
pub mod reorder;
pub mod rng;
pub mod sort;
pub mod spatial_index;
pub mod traversal;
pub mod zorder;

pub use dijkstra::Dijkstra;
pub use error::Error;
pub use graph::Graph;
pub use rank_select::RankSelect;
pub use spatial_index::{SpatialIndex, SpatialQuery};
pub use traversal::{Bfs, Dfs};
