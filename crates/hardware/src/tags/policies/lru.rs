//! Least Recently Used (LRU) Replacement Policy.
//!
//! Recency is kept in the set order list: the head is the most recently used
//! way, the tail the least. Hits and insertions move a way to the head,
//! invalidations push it to the tail so it is reused first.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_access()` / `on_insert()` / `on_invalidate()`: O(1)
//!   - `find_victim()`: O(W) where W is the number of ways
//! - **Space Complexity:** Two links per way
//! - **Best Case:** Sequential/streaming accesses with good temporal locality
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::ReplacementPolicy;
use crate::tags::set::CacheSet;

/// LRU policy. Stateless: recency lives in the set order list.
#[derive(Clone, Copy, Debug, Default)]
pub struct LruPolicy;

impl LruPolicy {
    /// Creates a new LRU policy instance.
    pub const fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for LruPolicy {
    fn name(&self) -> &'static str {
        "lru"
    }

    /// Updates the policy state on a hit.
    ///
    /// Moves `way` to the head of the order list (MRU position).
    fn on_access(&mut self, set: &mut CacheSet, way: usize) {
        set.move_to_head(way);
    }

    /// A fill counts as a use: `way` becomes MRU.
    fn on_insert(&mut self, set: &mut CacheSet, way: usize) {
        set.move_to_head(way);
    }

    /// Pushes `way` to the tail so it is reused before any live block.
    fn on_invalidate(&mut self, set: &mut CacheSet, way: usize) {
        set.move_to_tail(way);
    }

    /// Returns the allocatable way closest to the tail.
    ///
    /// # Panics
    ///
    /// Panics if no way below `alloc_assoc` exists.
    fn find_victim(&mut self, set: &mut CacheSet, alloc_assoc: usize) -> usize {
        let victim = set.order_rev().find(|&way| way < alloc_assoc);
        match victim {
            Some(way) => way,
            None => panic!("no allocatable way below {alloc_assoc} in set {:#x}", set.index()),
        }
    }
}
