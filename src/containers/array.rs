//! A growable array with an explicit, OOM-fallible growth path.

const INITIAL_CAPACITY: usize = 16;
const GROWTH_FACTOR: f64 = 1.5;

/// A growable array over `u32`, 1.5x growth on overflow, initial capacity
/// 16 (one cache line of `u32`).
#[derive(Debug, Clone, Default)]
pub struct Array {
    data: Vec<u32>,
}

impl Array {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Option<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity).ok()?;
        Some(Self { data })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> u32 {
        self.data[i]
    }

    #[inline]
    pub fn set(&mut self, i: usize, v: u32) {
        self.data[i] = v;
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.data
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn reverse(&mut self) {
        self.data.reverse();
    }

    /// Grows capacity to at least `new_cap`, in place where possible.
    /// Returns `false` on allocation failure.
    pub fn reserve(&mut self, new_cap: usize) -> bool {
        if new_cap <= self.data.capacity() {
            return true;
        }
        self.data.try_reserve_exact(new_cap - self.data.len()).is_ok()
    }

    /// Shrinks (truncating) or grows (zero-filling) to `new_len`. Returns
    /// `false` on allocation failure while growing.
    pub fn resize(&mut self, new_len: usize) -> bool {
        if new_len <= self.data.len() {
            self.data.truncate(new_len);
            return true;
        }
        if self.data.try_reserve_exact(new_len - self.data.len()).is_err() {
            return false;
        }
        self.data.resize(new_len, 0);
        true
    }

    /// Appends `v`, growing by 1.5x (from an initial capacity of 16) if
    /// the backing buffer is full. Returns `false` on allocation failure.
    pub fn push(&mut self, v: u32) -> bool {
        if self.data.len() == self.data.capacity() {
            let new_cap = next_capacity(self.data.capacity());
            if !self.reserve(new_cap) {
                return false;
            }
        }
        self.data.push(v);
        true
    }

    /// Removes and returns the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<u32> {
        self.data.pop()
    }
}

fn next_capacity(current: usize) -> usize {
    if current == 0 {
        INITIAL_CAPACITY
    } else {
        ((current as f64 * GROWTH_FACTOR).ceil() as usize).max(current + 1)
    }
}
