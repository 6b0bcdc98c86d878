use thiserror::Error;

/// Errors surfaced to callers as an explicit return value.
///
/// Allocation failure is modeled separately (constructors return
/// `Option<Self>`, growing mutators return `bool`); this enum covers the
/// handful of structural preconditions that are violated often enough in
/// practice to deserve a named error rather than an assert.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A [`crate::rank_select::RankSelect`] requires a bitset whose size is a
    /// positive multiple of 512.
    #[error("bitset size {0} is not a positive multiple of 512")]
    NotBlockAligned(usize),

    /// A constructor that also has a structural precondition (and so
    /// returns `Result` rather than `Option`) failed to allocate.
    #[error("allocation failed")]
    AllocationFailure,
}
