//! Set-Associative Tag Store.
//!
//! This module implements the metadata side of a set-associative cache: the
//! per-way entries, the sets that own them, and the [`TagStore`] that routes
//! requests to a set and runs a pluggable replacement policy against it.
//!
//! The store holds no data and models no timing. A surrounding controller
//! drives it with four operations:
//!
//! - [`TagStore::access`]: look up a block; on a hit the policy is notified.
//! - [`TagStore::find_victim`]: ask the policy which way to evict.
//! - [`TagStore::insert_block`]: install a block in a chosen way.
//! - [`TagStore::invalidate`]: drop a block.

/// Per-way entry metadata and counter constants.
pub mod entry;

/// Address decomposition into set index and tag.
pub mod indexing;

/// Replacement policy strategies (SRRIP-HP, LRU).
pub mod policies;

/// Cache set with its traversal order list.
pub mod set;

use std::fmt;

use tracing::debug;

pub use self::entry::{CacheEntry, RRPV_INIT, RRPV_MAX};
pub use self::indexing::{AddressDecoder, BlockDecoder};
pub use self::policies::ReplacementPolicy;
pub use self::set::CacheSet;
use crate::common::{Addr, BlockHandle, ConfigError};
use crate::config::{TagStoreConfig, check_ways};
use crate::stats::TagStats;

/// Tag store for a set-associative cache.
///
/// Entries never move: a [`BlockHandle`] returned by [`access`](Self::access),
/// [`find_block`](Self::find_block) or [`find_victim`](Self::find_victim) stays
/// valid for the life of the store. Every mutating operation takes `&mut self`
/// and runs to completion, so a victim search never interleaves with another
/// update of the same set.
pub struct TagStore {
    sets: Box<[CacheSet]>,
    assoc: usize,
    alloc_assoc: usize,
    decoder: Box<dyn AddressDecoder>,
    policy: Box<dyn ReplacementPolicy>,
    stats: TagStats,
}

impl TagStore {
    /// Builds a tag store from a configuration.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`TagStoreConfig::validate`],
    /// including [`ConfigError::ZeroAllocatableWays`].
    pub fn new(config: &TagStoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let decoder = BlockDecoder::new(config.num_sets, config.block_size)?;
        Self::with_parts(
            config.num_sets,
            config.associativity,
            config.alloc_ways(),
            Box::new(decoder),
            policies::build(config.policy),
        )
    }

    /// Builds a tag store from explicit parts.
    ///
    /// `decoder` must only produce set indices below `num_sets`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSetCount`] when `num_sets` is zero and
    /// the way-count errors of [`TagStoreConfig::validate`].
    pub fn with_parts(
        num_sets: usize,
        assoc: usize,
        alloc_assoc: usize,
        decoder: Box<dyn AddressDecoder>,
        policy: Box<dyn ReplacementPolicy>,
    ) -> Result<Self, ConfigError> {
        check_ways(assoc, alloc_assoc)?;
        if num_sets == 0 {
            return Err(ConfigError::InvalidSetCount(num_sets));
        }

        let sets = (0..num_sets).map(|i| CacheSet::new(i, assoc)).collect();
        debug!(
            target: "cache_repl",
            num_sets,
            assoc,
            alloc_assoc,
            policy = policy.name(),
            "tag store created"
        );

        Ok(Self {
            sets,
            assoc,
            alloc_assoc,
            decoder,
            policy,
            stats: TagStats::default(),
        })
    }

    /// Looks up `addr` and notifies the policy on a hit.
    ///
    /// Every way of the set is searched, reserved ways included.
    ///
    /// # Returns
    ///
    /// The handle of the matching valid block, or `None` on a miss. A miss
    /// leaves every entry untouched.
    ///
    /// # Panics
    ///
    /// Panics if the decoder maps `addr` outside the store.
    pub fn access(&mut self, addr: Addr, secure: bool) -> Option<BlockHandle> {
        self.stats.accesses += 1;
        let set_idx = self.set_index(addr);
        let tag = self.decoder.extract_tag(addr);

        let Some(way) = self.sets[set_idx].find(tag, secure) else {
            self.stats.misses += 1;
            return None;
        };

        self.stats.hits += 1;
        let set = &mut self.sets[set_idx];
        self.policy.on_access(set, way);
        debug!(
            target: "cache_repl",
            set = set_idx,
            way,
            addr = %self.decoder.regenerate_block_addr(tag, set_idx),
            secure,
            rrpv = set.entry(way).rrpv(),
            "hit; replacement state updated"
        );
        Some(BlockHandle::new(set_idx, way))
    }

    /// Looks up `addr` without touching replacement state or statistics.
    ///
    /// # Panics
    ///
    /// Panics if the decoder maps `addr` outside the store.
    pub fn find_block(&self, addr: Addr, secure: bool) -> Option<BlockHandle> {
        let set_idx = self.set_index(addr);
        let tag = self.decoder.extract_tag(addr);
        self.sets[set_idx]
            .find(tag, secure)
            .map(|way| BlockHandle::new(set_idx, way))
    }

    /// Chooses the entry to replace for a block at `addr`.
    ///
    /// The victim keeps its contents and validity; the caller evicts it by
    /// passing the handle to [`insert_block`](Self::insert_block).
    ///
    /// # Panics
    ///
    /// Panics if the decoder maps `addr` outside the store, or if the policy
    /// returns a reserved way.
    pub fn find_victim(&mut self, addr: Addr) -> BlockHandle {
        let set_idx = self.set_index(addr);
        let set = &mut self.sets[set_idx];
        let way = self.policy.find_victim(set, self.alloc_assoc);
        assert!(
            way < self.alloc_assoc,
            "{} policy chose reserved way {way} (alloc_assoc {})",
            self.policy.name(),
            self.alloc_assoc
        );

        let victim = set.entry(way);
        if victim.valid {
            debug!(
                target: "cache_repl",
                set = set_idx,
                way,
                addr = %self.decoder.regenerate_block_addr(victim.tag, set_idx),
                "selecting block for replacement"
            );
        }
        BlockHandle::new(set_idx, way)
    }

    /// Installs the block for `addr` in the entry at `handle`.
    ///
    /// `handle` must name a way of the set `addr` maps to, normally the one
    /// returned by [`find_victim`](Self::find_victim).
    ///
    /// # Panics
    ///
    /// Panics if `handle` lies outside the store.
    pub fn insert_block(&mut self, addr: Addr, secure: bool, handle: BlockHandle) {
        debug_assert_eq!(
            handle.set,
            self.decoder.extract_set(addr),
            "insert target is not in the addressed set"
        );
        let tag = self.decoder.extract_tag(addr);
        let set = &mut self.sets[handle.set];
        let entry = set.entry_mut(handle.way);

        if entry.valid {
            self.stats.replacements += 1;
        } else {
            self.stats.tags_in_use += 1;
        }
        self.stats.insertions += 1;

        entry.tag = tag;
        entry.secure = secure;
        entry.valid = true;
        self.policy.on_insert(set, handle.way);

        debug!(
            target: "cache_repl",
            set = handle.set,
            way = handle.way,
            addr = %self.decoder.regenerate_block_addr(tag, handle.set),
            secure,
            rrpv = set.entry(handle.way).rrpv(),
            "inserted block"
        );
    }

    /// Invalidates the entry at `handle` and notifies the policy.
    ///
    /// # Panics
    ///
    /// Panics if `handle` lies outside the store.
    pub fn invalidate(&mut self, handle: BlockHandle) {
        let set = &mut self.sets[handle.set];
        let entry = set.entry_mut(handle.way);

        if entry.valid {
            self.stats.tags_in_use -= 1;
            self.stats.invalidations += 1;
        }
        entry.valid = false;
        entry.secure = false;
        self.policy.on_invalidate(set, handle.way);

        debug!(
            target: "cache_repl",
            set = handle.set,
            way = handle.way,
            rrpv = set.entry(handle.way).rrpv(),
            "invalidated block"
        );
    }

    /// Returns the entry at `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` lies outside the store.
    pub fn entry(&self, handle: BlockHandle) -> &CacheEntry {
        self.sets[handle.set].entry(handle.way)
    }

    /// Returns set `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`num_sets`](Self::num_sets).
    pub fn set(&self, index: usize) -> &CacheSet {
        &self.sets[index]
    }

    /// Iterates over all sets.
    pub fn sets(&self) -> impl Iterator<Item = &CacheSet> {
        self.sets.iter()
    }

    /// Number of sets.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Ways per set.
    pub const fn associativity(&self) -> usize {
        self.assoc
    }

    /// Number of leading ways the policy may allocate into.
    pub const fn way_allocation_max(&self) -> usize {
        self.alloc_assoc
    }

    /// Restricts allocation to the first `ways` ways of every set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroAllocatableWays`] for zero and
    /// [`ConfigError::AllocExceedsAssociativity`] above the associativity;
    /// the current limit is kept in both cases.
    pub fn set_way_allocation_max(&mut self, ways: usize) -> Result<(), ConfigError> {
        check_ways(self.assoc, ways)?;
        self.alloc_assoc = ways;
        Ok(())
    }

    /// Name of the active replacement policy.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Address decoder in use.
    pub fn decoder(&self) -> &dyn AddressDecoder {
        self.decoder.as_ref()
    }

    /// Block-aligned address of the block held at `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` lies outside the store.
    pub fn block_addr(&self, handle: BlockHandle) -> Addr {
        let tag = self.entry(handle).tag;
        self.decoder.regenerate_block_addr(tag, handle.set)
    }

    /// Event counters.
    pub const fn stats(&self) -> &TagStats {
        &self.stats
    }

    /// Zeroes event counters, keeping the occupancy count.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    fn set_index(&self, addr: Addr) -> usize {
        let set = self.decoder.extract_set(addr);
        assert!(
            set < self.sets.len(),
            "address {addr} decoded to set {set}, store has {}",
            self.sets.len()
        );
        set
    }
}

impl fmt::Debug for TagStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagStore")
            .field("num_sets", &self.sets.len())
            .field("assoc", &self.assoc)
            .field("alloc_assoc", &self.alloc_assoc)
            .field("policy", &self.policy.name())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
