//! Delta coding: each value is replaced by its (wrapping) difference from
//! the previous one, which tends to shrink downstream variable-byte output
//! for monotonic-ish sequences such as sorted node/edge id arrays.

/// Writes `out[i] = data[i] - prev_i` with `prev_0 = prev`, otherwise
/// `prev_i = data[i-1]`. Subtraction wraps at 32 bits.
pub fn encode(data: &[u32], out: &mut [u32], prev: u32) {
    assert_eq!(data.len(), out.len());
    let mut p = prev;
    for (o, &d) in out.iter_mut().zip(data.iter()) {
        *o = d.wrapping_sub(p);
        p = d;
    }
}

/// The additive inverse of [`encode`].
pub fn decode(data: &[u32], out: &mut [u32], prev: u32) {
    assert_eq!(data.len(), out.len());
    let mut p = prev;
    for (o, &d) in out.iter_mut().zip(data.iter()) {
        *o = d.wrapping_add(p);
        p = *o;
    }
}
