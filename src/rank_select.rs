//! Succinct rank/select over an immutable [`crate::bitset::Bitset`]: a
//! two-level index giving `O(1)` rank and near-`O(1)` select, built from
//! a 512-bit (cache-line) block rank inventory plus a sparse sample of
//! every 8192nd set bit's position.
//!
//! The borrowed bitset's size must be a positive multiple of 512 (its
//! backing storage, a boxed slice of `u64`, is naturally 8-byte aligned;
//! the 64-byte cache-line alignment this block size is meant to exploit
//! is an optimization this crate doesn't further enforce beyond that).

use crate::bits::{count_512, rank_512, select_512};
use crate::bitset::Bitset;
use crate::error::Error;

const BLOCK_BITS: usize = 512;
const BLOCK_WORDS: usize = 8;
const SAMPLE_RATE: u32 = 8192;

/// A rank/select index over a borrowed [`Bitset`].
pub struct RankSelect<'b> {
    bitset: &'b Bitset,
    ranks: Box<[u32]>,
    samples: Box<[u32]>,
    popcount: u32,
}

impl<'b> RankSelect<'b> {
    /// Builds the rank inventory and select samples over `bitset`.
    ///
    /// Returns [`Error::NotBlockAligned`] if `bitset.size()` isn't a
    /// positive multiple of 512, or [`Error::AllocationFailure`] on OOM.
    pub fn construct(bitset: &'b Bitset) -> Result<Self, Error> {
        let size = bitset.size();
        if size == 0 || size % BLOCK_BITS != 0 {
            return Err(Error::NotBlockAligned(size));
        }
        let num_blocks = size / BLOCK_BITS;
        let words = bitset.raw_blocks();
        debug_assert_eq!(words.len(), num_blocks * BLOCK_WORDS);

        let mut ranks = Vec::new();
        ranks
            .try_reserve_exact(num_blocks)
            .map_err(|_| Error::AllocationFailure)?;
        let mut samples: Vec<u32> = Vec::new();

        let mut running = 0u32;
        let mut next_threshold = SAMPLE_RATE;
        for block_idx in 0..num_blocks {
            let block = block_at(words, block_idx);
            let before = running;
            running += count_512(block);
            ranks.push(running);

            while next_threshold <= running {
                let n = next_threshold - 1;
                let local = n - before;
                let pos = (block_idx * BLOCK_BITS) as u32 + select_512(block, local);
                samples
                    .try_reserve_exact(1)
                    .map_err(|_| Error::AllocationFailure)?;
                samples.push(pos);
                next_threshold += SAMPLE_RATE;
            }
        }

        Ok(Self {
            bitset,
            ranks: ranks.into_boxed_slice(),
            samples: samples.into_boxed_slice(),
            popcount: running,
        })
    }

    /// Total number of set bits in the underlying bitset.
    #[inline]
    pub fn popcount(&self) -> u32 {
        self.popcount
    }

    /// Number of 1-bits in `[0, n)`. Requires `n <= bitset.size()`.
    pub fn rank(&self, n: usize) -> u32 {
        debug_assert!(n <= self.bitset.size());
        let p = n / BLOCK_BITS;
        let r = (n % BLOCK_BITS) as u16;
        let words = self.bitset.raw_blocks();
        if p == 0 {
            rank_512(block_at(words, 0), r)
        } else {
            self.ranks[p - 1] + rank_512(block_at(words, p), r)
        }
    }

    /// Zero-based position of the `n`-th set bit. Requires `n <
    /// popcount()`.
    pub fn select(&self, n: u32) -> u32 {
        debug_assert!(n < self.popcount);
        let q = (n / SAMPLE_RATE) as usize;
        let first = if q > 0 { self.samples[q - 1] as usize } else { 0 };
        let start_block = first / BLOCK_BITS;

        let words = self.bitset.raw_blocks();
        let mut before = if start_block == 0 {
            0
        } else {
            self.ranks[start_block - 1]
        };
        for (block_idx, &cumulative) in self.ranks.iter().enumerate().skip(start_block) {
            if cumulative > n {
                let local = n - before;
                return (block_idx * BLOCK_BITS) as u32 + select_512(block_at(words, block_idx), local);
            }
            before = cumulative;
        }
        unreachable!("n < popcount() guarantees a hit above")
    }
}

fn block_at(words: &[u64], block_idx: usize) -> &[u64; 8] {
    words[block_idx * BLOCK_WORDS..block_idx * BLOCK_WORDS + BLOCK_WORDS]
        .try_into()
        .expect("exactly 8 words per block")
}
