//! Static Re-Reference Interval Prediction, Hit-Priority variant (SRRIP-HP).
//!
//! Every entry carries a 2-bit re-reference prediction value (RRPV). Low values
//! predict a near re-reference, [`RRPV_MAX`] predicts a distant one.
//!
//! | Event      | Effect                                      |
//! |------------|---------------------------------------------|
//! | hit        | RRPV ← 0                                    |
//! | insert     | RRPV ← [`RRPV_INIT`], move to order tail     |
//! | invalidate | RRPV ← [`RRPV_MAX`], move to order tail     |
//!
//! Victim search picks the lowest allocatable way at [`RRPV_MAX`]. When none
//! is saturated, all allocatable ways age by one and the search repeats.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_access()` / `on_insert()` / `on_invalidate()`: O(1)
//!   - `find_victim()`: O(W × `RRPV_MAX`) worst case, W = allocatable ways
//! - **Space Complexity:** 2 bits per entry
//! - **Best Case:** Mixed workloads where scans would flush an LRU cache
//! - **Worst Case:** Working sets with a single re-reference just past insertion

use tracing::trace;

use super::ReplacementPolicy;
pub use crate::tags::entry::{RRPV_INIT, RRPV_MAX};
use crate::tags::set::CacheSet;

/// SRRIP-HP policy. Stateless: counters live in the entries.
#[derive(Clone, Copy, Debug, Default)]
pub struct SrripPolicy;

impl SrripPolicy {
    /// Creates a new SRRIP-HP policy instance.
    pub const fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for SrripPolicy {
    fn name(&self) -> &'static str {
        "srrip"
    }

    /// Updates the policy state on a hit.
    ///
    /// Predicts a near-immediate re-reference by clearing the counter of
    /// `way`. The order list is left alone, so a hit never changes which way
    /// a later invalidation or insertion lands behind.
    fn on_access(&mut self, set: &mut CacheSet, way: usize) {
        let entry = set.entry_mut(way);
        if entry.rrpv() > 0 {
            entry.set_rrpv(0);
        }
    }

    /// Updates the policy state after a fill.
    ///
    /// Moves `way` to the tail of the order list and sets its counter to
    /// [`RRPV_INIT`], a long re-reference interval: the new block survives
    /// one aging pass but loses to any block that has hit since.
    fn on_insert(&mut self, set: &mut CacheSet, way: usize) {
        set.move_to_tail(way);
        set.entry_mut(way).set_rrpv(RRPV_INIT);
    }

    /// Updates the policy state after an explicit invalidation.
    ///
    /// Moves `way` to the tail of the order list and saturates its counter
    /// at [`RRPV_MAX`], making it a victim candidate without any aging pass.
    fn on_invalidate(&mut self, set: &mut CacheSet, way: usize) {
        set.move_to_tail(way);
        set.entry_mut(way).set_rrpv(RRPV_MAX);
    }

    /// Finds the leftmost allocatable way at `RRPV_MAX`, aging the set until
    /// one exists.
    ///
    /// Each aging pass raises the minimum counter by one, so at most
    /// `RRPV_MAX` passes run.
    ///
    /// # Panics
    ///
    /// Panics if `alloc_assoc` is zero or larger than the set, since no way
    /// could ever qualify, and if the chosen way violates the victim
    /// post-condition.
    fn find_victim(&mut self, set: &mut CacheSet, alloc_assoc: usize) -> usize {
        assert!(
            alloc_assoc > 0 && alloc_assoc <= set.ways(),
            "alloc_assoc {alloc_assoc} out of range for a {}-way set",
            set.ways()
        );

        let mut passes = 0u32;
        let victim = loop {
            let found = set
                .entries()
                .iter()
                .find(|e| e.way() < alloc_assoc && e.rrpv() == RRPV_MAX)
                .map(|e| e.way());
            if let Some(way) = found {
                break way;
            }

            for entry in set.entries_mut().iter_mut().filter(|e| e.way() < alloc_assoc) {
                // No allocatable way is saturated here, so this stays in range.
                entry.set_rrpv(entry.rrpv() + 1);
            }
            passes += 1;
            trace!(target: "cache_repl", set = set.index(), pass = passes, "aged allocatable ways");
        };

        let chosen = set.entry(victim);
        assert!(
            chosen.way() < alloc_assoc && chosen.rrpv() == RRPV_MAX,
            "victim way {} (rrpv {}) breaks selection post-condition",
            chosen.way(),
            chosen.rrpv()
        );
        victim
    }
}
