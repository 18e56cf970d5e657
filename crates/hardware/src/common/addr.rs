//! Address and handle types.
//!
//! The tag store never hands out references into its sets. Callers receive a
//! [`BlockHandle`], a copyable `(set, way)` pair that stays valid for the whole
//! lifetime of the store because ways are fixed at construction.

use std::fmt;

/// A physical address presented to the tag store.
///
/// Only the set-index and tag bits matter to the store; the block offset is
/// discarded by the [`AddressDecoder`](crate::tags::AddressDecoder).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Addr(pub u64);

impl Addr {
    /// Creates a new address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Addr {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::LowerHex for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Stable handle to one entry of the tag store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockHandle {
    /// Index of the owning set.
    pub set: usize,
    /// Way within the set.
    pub way: usize,
}

impl BlockHandle {
    /// Creates a handle for `way` in `set`.
    #[inline(always)]
    pub const fn new(set: usize, way: usize) -> Self {
        Self { set, way }
    }
}

impl fmt::Display for BlockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "set {:#x} way {}", self.set, self.way)
    }
}
