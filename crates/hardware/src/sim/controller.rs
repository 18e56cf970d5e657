//! Cache controller for trace replay.
//!
//! Plays the role of the cache that owns a [`TagStore`]: it turns each trace
//! event into the lookup / victim / insert / invalidate sequence a real cache
//! would issue, and reports what happened.

use tracing::trace;

use super::trace::TraceOp;
use crate::common::{Addr, BlockHandle, ConfigError};
use crate::config::TagStoreConfig;
use crate::stats::TagStats;
use crate::tags::TagStore;

/// Result of replaying one trace event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The block was resident.
    Hit(BlockHandle),
    /// The block was installed at the handle, displacing `evicted` if that
    /// way held a valid block.
    Miss {
        /// Where the block now lives.
        handle: BlockHandle,
        /// Block-aligned address of the displaced block.
        evicted: Option<Addr>,
    },
    /// The block was resident and has been invalidated.
    Invalidated(BlockHandle),
    /// An invalidation found nothing to drop.
    NotPresent,
}

/// Drives a [`TagStore`] the way a cache front end would.
#[derive(Debug)]
pub struct CacheController {
    tags: TagStore,
}

impl CacheController {
    /// Wraps an existing tag store.
    pub fn new(tags: TagStore) -> Self {
        Self { tags }
    }

    /// Builds the tag store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns the configuration error from [`TagStore::new`].
    pub fn from_config(config: &TagStoreConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(TagStore::new(config)?))
    }

    /// Performs a demand access, filling the block on a miss.
    pub fn access(&mut self, addr: Addr, secure: bool) -> AccessOutcome {
        if let Some(handle) = self.tags.access(addr, secure) {
            return AccessOutcome::Hit(handle);
        }

        let handle = self.tags.find_victim(addr);
        let evicted = self
            .tags
            .entry(handle)
            .valid
            .then(|| self.tags.block_addr(handle));
        self.tags.insert_block(addr, secure, handle);
        trace!(addr = %addr, %handle, ?evicted, "miss filled");
        AccessOutcome::Miss { handle, evicted }
    }

    /// Invalidates the block at `addr` if it is resident.
    pub fn invalidate(&mut self, addr: Addr, secure: bool) -> AccessOutcome {
        match self.tags.find_block(addr, secure) {
            Some(handle) => {
                self.tags.invalidate(handle);
                AccessOutcome::Invalidated(handle)
            }
            None => AccessOutcome::NotPresent,
        }
    }

    /// Replays one trace event.
    pub fn step(&mut self, op: TraceOp) -> AccessOutcome {
        match op {
            TraceOp::Access { addr, secure } => self.access(addr, secure),
            TraceOp::Invalidate { addr, secure } => self.invalidate(addr, secure),
        }
    }

    /// Replays a sequence of events and returns the resulting statistics.
    pub fn run<I>(&mut self, ops: I) -> &TagStats
    where
        I: IntoIterator<Item = TraceOp>,
    {
        for op in ops {
            let _ = self.step(op);
        }
        self.tags.stats()
    }

    /// The underlying tag store.
    pub const fn tags(&self) -> &TagStore {
        &self.tags
    }

    /// The underlying tag store, mutably.
    pub const fn tags_mut(&mut self) -> &mut TagStore {
        &mut self.tags
    }

    /// Consumes the controller and returns the tag store.
    pub fn into_tags(self) -> TagStore {
        self.tags
    }
}
