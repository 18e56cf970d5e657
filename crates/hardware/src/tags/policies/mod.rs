//! Cache Replacement Policies.
//!
//! A policy is a strategy the [`TagStore`](crate::tags::TagStore) calls on
//! every state change of a set. All replacement state lives in the set itself
//! (entry counters and the order list), so a policy object only carries its
//! own constants and can be swapped without touching sets or the store.
//!
//! # Policies
//!
//! - `Srrip`: Static Re-Reference Interval Prediction, hit-priority variant.
//! - `Lru`: Least Recently Used, kept in the set order list.

/// Least Recently Used replacement policy.
pub mod lru;

/// SRRIP-HP replacement policy.
pub mod srrip;

pub use lru::LruPolicy;
pub use srrip::SrripPolicy;

use super::set::CacheSet;
use crate::config::PolicyKind;

/// Trait for tag store replacement policies.
///
/// Each transition receives the set that owns the affected way. Ways at or
/// beyond `alloc_assoc` are reserved and must never be chosen as victims or
/// have their replacement state changed by victim selection.
pub trait ReplacementPolicy: Send + Sync {
    /// Short policy name for diagnostics.
    fn name(&self) -> &'static str;

    /// Updates the policy state when `way` hits on an access.
    fn on_access(&mut self, set: &mut CacheSet, way: usize);

    /// Updates the policy state after a block is installed in `way`.
    fn on_insert(&mut self, set: &mut CacheSet, way: usize);

    /// Updates the policy state after `way` is explicitly invalidated.
    fn on_invalidate(&mut self, set: &mut CacheSet, way: usize);

    /// Selects the way to evict from `set`.
    ///
    /// # Arguments
    ///
    /// * `set` - The target set; selection may update its replacement state.
    /// * `alloc_assoc` - Number of leading ways eligible for allocation.
    ///
    /// # Returns
    ///
    /// A way index strictly below `alloc_assoc`.
    fn find_victim(&mut self, set: &mut CacheSet, alloc_assoc: usize) -> usize;
}

/// Builds the policy selected by `kind`.
pub fn build(kind: PolicyKind) -> Box<dyn ReplacementPolicy> {
    match kind {
        PolicyKind::Srrip => Box::new(SrripPolicy::new()),
        PolicyKind::Lru => Box::new(LruPolicy::new()),
    }
}
