//! Spatial nearest-neighbor index backed by a Z-order space-filling
//! curve: four parallel arrays (node, z-value, lng, lat) sorted
//! ascending by z-value, queried by two binary searches and a linear
//! scan pruned by BIGMIN jumps whenever the curve exits the query
//! bounding box for too long.
//!
//! Grounded directly in `tinygraph_index_{construct,search,bigmin}`
//! (the original Tropf & Herzog BIGMIN formulation, as in the upstream
//! C implementation this crate's spatial index is ported from).

use crate::sort::sort_u32;
use crate::zorder;

/// Consecutive out-of-box entries tolerated before paying for a BIGMIN
/// jump and a binary search to skip ahead.
const OUTSIDE_THRESHOLD: u32 = 64;

/// A sorted-by-Z-order spatial index over `(node, lng, lat)` triples.
pub struct SpatialIndex {
    nodes: Box<[u32]>,
    zvals: Box<[u64]>,
    lngs: Box<[u32]>,
    lats: Box<[u32]>,
}

/// A bounding-box range query, capped at `n` results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpatialQuery {
    pub lngmin: u32,
    pub latmin: u32,
    pub lngmax: u32,
    pub latmax: u32,
    pub n: usize,
}

impl SpatialIndex {
    /// Builds the index from parallel `nodes`/`lngs`/`lats` arrays of
    /// equal length. Returns `None` on allocation failure.
    pub fn construct(nodes: &[u32], lngs: &[u32], lats: &[u32]) -> Option<Self> {
        assert_eq!(nodes.len(), lngs.len());
        assert_eq!(nodes.len(), lats.len());
        let n = nodes.len();

        let mut perm: Vec<u32> = Vec::new();
        perm.try_reserve_exact(n).ok()?;
        perm.extend(0..n as u32);

        let ctx = (lngs, lats);
        sort_u32(&mut perm, &ctx, |a, b, (lngs, lats)| {
            let za = zorder::encode64(lngs[a as usize], lats[a as usize]);
            let zb = zorder::encode64(lngs[b as usize], lats[b as usize]);
            za.cmp(&zb)
        });

        let mut out_nodes = Vec::new();
        out_nodes.try_reserve_exact(n).ok()?;
        let mut out_zvals = Vec::new();
        out_zvals.try_reserve_exact(n).ok()?;
        let mut out_lngs = Vec::new();
        out_lngs.try_reserve_exact(n).ok()?;
        let mut out_lats = Vec::new();
        out_lats.try_reserve_exact(n).ok()?;

        for &i in perm.iter() {
            let i = i as usize;
            out_nodes.push(nodes[i]);
            out_zvals.push(zorder::encode64(lngs[i], lats[i]));
            out_lngs.push(lngs[i]);
            out_lats.push(lats[i]);
        }

        Some(Self {
            nodes: out_nodes.into_boxed_slice(),
            zvals: out_zvals.into_boxed_slice(),
            lngs: out_lngs.into_boxed_slice(),
            lats: out_lats.into_boxed_slice(),
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends up to `query.n` node ids within `query`'s bounding box to
    /// `out` (not cleared first). Returns `true` iff at least one
    /// result was appended.
    pub fn search(&self, query: &SpatialQuery, out: &mut Vec<u32>) -> bool {
        debug_assert!(query.lngmin <= query.lngmax);
        debug_assert!(query.latmin <= query.latmax);

        if query.n == 0 || self.is_empty() {
            return false;
        }

        let zmin = zorder::encode64(query.lngmin, query.latmin);
        let zmax = zorder::encode64(query.lngmax, query.latmax);

        let first = self.zvals.partition_point(|&z| z < zmin);
        let last = first + self.zvals[first..].partition_point(|&z| z <= zmax);

        if first == last {
            return false;
        }

        let mut found = 0usize;
        let mut outside = 0u32;
        let mut i = first;

        while i < last {
            if found >= query.n {
                break;
            }

            let lng = self.lngs[i];
            let lat = self.lats[i];

            if lng >= query.lngmin && lng <= query.lngmax && lat >= query.latmin && lat <= query.latmax {
                out.push(self.nodes[i]);
                found += 1;
                outside = 0;
                i += 1;
            } else {
                outside += 1;
                let zval = self.zvals[i];

                if outside > OUTSIDE_THRESHOLD && zval < zmax {
                    let bigmin = bigmin(zval, zmin, zmax);
                    let skip = i + self.zvals[i..last].partition_point(|&z| z < bigmin);
                    i = skip;
                } else {
                    i += 1;
                }
            }
        }

        found > 0
    }
}

/// Given a z-value outside the box defined by `(zmin, zmax)`, the
/// smallest z-value strictly greater than it that lies back inside.
/// Requires `zmin <= zval < zmax` and `zmin <= zmax`.
fn bigmin(zval: u64, zmin: u64, zmax: u64) -> u64 {
    debug_assert!(zval >= zmin);
    debug_assert!(zval < zmax);
    debug_assert!(zmin <= zmax);

    let mut bigmin = zmin;
    let mut zmin = zmin;
    let mut zmax = zmax;

    let mut load_mask: u64 = 0x5555_5555_5555_5555;
    let mut load_ones: u64 = 0x2aaa_aaaa_aaaa_aaaa;
    let mut mask: u64 = 0x8000_0000_0000_0000;

    while mask != 0 {
        let bzval = zval & mask;
        let bzmin = zmin & mask;
        let bzmax = zmax & mask;

        if bzval == 0 && bzmin == 0 && bzmax == 0 {
            // all fixed at 0, nothing to decide at this bit
        } else if bzval == 0 && bzmin == 0 && bzmax != 0 {
            bigmin = (zmin & load_mask) | mask;
            zmax = (zmax & load_mask) | load_ones;
        } else if bzval == 0 && bzmin != 0 && bzmax != 0 {
            debug_assert!(zmin > zval);
            return zmin;
        } else if bzval != 0 && bzmin == 0 && bzmax == 0 {
            debug_assert!(bigmin > zval);
            return bigmin;
        } else if bzval != 0 && bzmin == 0 && bzmax != 0 {
            zmin = (zmin & load_mask) | mask;
        } else if bzval != 0 && bzmin != 0 && bzmax != 0 {
            // all fixed at 1, nothing to decide at this bit
        } else {
            unreachable!("zmin <= zval <= zmax rules out the remaining bit patterns");
        }

        mask >>= 1;
        load_ones >>= 1;
        load_mask = (load_mask >> 1) | 0x8000_0000_0000_0000;
    }

    debug_assert!(bigmin > zval);
    bigmin
}
