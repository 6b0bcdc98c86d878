//! Integer-sequence compression primitives: [`delta`] coding, [`zigzag`]
//! coding, and [`vbyte`] (variable-byte) coding. Typically composed as
//! delta → zig-zag → variable-byte for a sorted-ish `u32` sequence.

pub mod delta;
pub mod vbyte;
pub mod zigzag;
