//! Address decomposition into set index and tag.
//!
//! The tag store treats decomposition as a collaborator behind
//! [`AddressDecoder`]. [`BlockDecoder`] is the conventional bit-slicing scheme:
//!
//! ```text
//!   63                 tag_shift        set_shift         0
//!   ┌─────────────────────┬─────────────────┬─────────────┐
//!   │         tag         │    set index    │   offset    │
//!   └─────────────────────┴─────────────────┴─────────────┘
//! ```

use crate::common::{Addr, ConfigError};

/// Maps addresses onto sets and tags, and back.
pub trait AddressDecoder: Send + Sync {
    /// Returns the set index for `addr`.
    fn extract_set(&self, addr: Addr) -> usize;

    /// Returns the tag for `addr`.
    fn extract_tag(&self, addr: Addr) -> u64;

    /// Rebuilds the block-aligned address from a tag and set index.
    ///
    /// Used for diagnostics only; replacement decisions never depend on it.
    fn regenerate_block_addr(&self, tag: u64, set: usize) -> Addr;
}

/// Power-of-two bit-slicing decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockDecoder {
    set_shift: u32,
    set_mask: u64,
    tag_shift: u32,
}

impl BlockDecoder {
    /// Creates a decoder for `num_sets` sets of `block_size`-byte blocks.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSetCount`] unless `num_sets` is a non-zero
    /// power of two, and [`ConfigError::InvalidBlockSize`] unless `block_size`
    /// is a power of two of at least 4 bytes.
    pub fn new(num_sets: usize, block_size: usize) -> Result<Self, ConfigError> {
        if !num_sets.is_power_of_two() {
            return Err(ConfigError::InvalidSetCount(num_sets));
        }
        if block_size < 4 || !block_size.is_power_of_two() {
            return Err(ConfigError::InvalidBlockSize(block_size));
        }
        let set_shift = block_size.trailing_zeros();
        Ok(Self {
            set_shift,
            set_mask: (num_sets - 1) as u64,
            tag_shift: set_shift + num_sets.trailing_zeros(),
        })
    }

    /// Bit position where the set index starts.
    #[inline(always)]
    pub const fn set_shift(&self) -> u32 {
        self.set_shift
    }

    /// Bit position where the tag starts.
    #[inline(always)]
    pub const fn tag_shift(&self) -> u32 {
        self.tag_shift
    }

    /// Clears the block offset bits of `addr`.
    #[inline(always)]
    pub const fn block_align(&self, addr: Addr) -> Addr {
        Addr(addr.0 & !((1u64 << self.set_shift) - 1))
    }
}

impl AddressDecoder for BlockDecoder {
    #[inline(always)]
    fn extract_set(&self, addr: Addr) -> usize {
        ((addr.0 >> self.set_shift) & self.set_mask) as usize
    }

    #[inline(always)]
    fn extract_tag(&self, addr: Addr) -> u64 {
        // A 64-bit shift would overflow when sets * block_size == 2^64.
        addr.0.checked_shr(self.tag_shift).unwrap_or(0)
    }

    #[inline(always)]
    fn regenerate_block_addr(&self, tag: u64, set: usize) -> Addr {
        let tag_bits = tag.checked_shl(self.tag_shift).unwrap_or(0);
        Addr(tag_bits | ((set as u64) << self.set_shift))
    }
}
