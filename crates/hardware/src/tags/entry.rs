//! Per-way tag store entry.
//!
//! One [`CacheEntry`] exists for every way of every set. Entries are created
//! when the tag store is built and are overwritten in place on every
//! insert/invalidate cycle; they are never freed while the store lives.

/// Saturation value of the re-reference prediction counter (2-bit counter).
pub const RRPV_MAX: u8 = 3;

/// Prediction value given to a freshly inserted block ("long" re-reference interval).
pub const RRPV_INIT: u8 = 2;

/// Metadata for one way of a set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheEntry {
    /// Tag of the resident block. Meaningless while `valid` is false.
    pub tag: u64,
    set: usize,
    /// Slot within the set; fixed at construction.
    way: usize,
    /// Whether the entry holds a live block.
    pub valid: bool,
    /// Security domain of the resident block.
    pub secure: bool,
    /// Only written through `set_rrpv`.
    rrpv: u8,
}

impl CacheEntry {
    /// Creates an invalid entry for `way` of `set`.
    ///
    /// Empty ways start saturated so the first victim searches fill a set in
    /// way order without any aging pass.
    pub const fn new(set: usize, way: usize) -> Self {
        Self {
            tag: 0,
            set,
            way,
            valid: false,
            secure: false,
            rrpv: RRPV_MAX,
        }
    }

    /// Returns the index of the owning set.
    #[inline(always)]
    pub const fn set(&self) -> usize {
        self.set
    }

    /// Returns the re-reference prediction value, always within `0..=RRPV_MAX`.
    #[inline(always)]
    pub const fn rrpv(&self) -> u8 {
        self.rrpv
    }

    /// Stores a new re-reference prediction value.
    ///
    /// # Panics
    ///
    /// Panics if `rrpv` exceeds [`RRPV_MAX`].
    pub(crate) fn set_rrpv(&mut self, rrpv: u8) {
        assert!(rrpv <= RRPV_MAX, "rrpv {rrpv} exceeds RRPV_MAX ({RRPV_MAX})");
        self.rrpv = rrpv;
    }

    /// Returns the way index of this entry.
    #[inline(always)]
    pub const fn way(&self) -> usize {
        self.way
    }

    /// Returns `true` if this entry holds `tag` in the given security domain.
    #[inline(always)]
    pub const fn matches(&self, tag: u64, secure: bool) -> bool {
        self.valid && self.tag == tag && self.secure == secure
    }
}
