//! Spatial node reordering: sorting a set of node ids by the Z-order key
//! of their `(lng, lat)` coordinates, for memory-locality reordering of
//! a graph's node numbering.

use crate::sort::sort_u32;
use crate::zorder;

/// Sorts `nodes` in place by the Z-order key of `(lngs[nodes[i]],
/// lats[nodes[i]])`. `lngs` and `lats` must be long enough to index by
/// every value in `nodes`. Ties between identical keys are left in an
/// arbitrary (but deterministic) order.
///
/// Always succeeds (the `bool` return is for forward compatibility with
/// a fallible sort); `false` is never produced today.
pub fn reorder(nodes: &mut [u32], lngs: &[u16], lats: &[u16]) -> bool {
    let ctx = (lngs, lats);
    sort_u32(nodes, &ctx, |a, b, (lngs, lats)| {
        let za = zorder::encode32(lngs[a as usize], lats[a as usize]);
        let zb = zorder::encode32(lngs[b as usize], lats[b as usize]);
        za.cmp(&zb)
    });
    true
}
