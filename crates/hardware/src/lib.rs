//! Set-associative cache tag store with SRRIP-HP replacement.
//!
//! This crate implements the replacement-policy core of a cache tag store:
//! 1. **Tags:** Per-way entries, sets with an intrusive order list, and the
//!    [`TagStore`] dispatching access / victim / insert / invalidate.
//! 2. **Policies:** SRRIP-HP (2-bit re-reference prediction) and LRU behind
//!    the [`ReplacementPolicy`](tags::ReplacementPolicy) strategy trait.
//! 3. **Configuration:** Geometry and policy selection, deserialized from JSON.
//! 4. **Simulation:** Trace parsing and a controller that replays traces.
//! 5. **Statistics:** Hit, miss, replacement and occupancy counters.
//!
//! # Examples
//!
//! ```
//! use rrip_core::{Addr, TagStore, TagStoreConfig};
//!
//! let mut tags = TagStore::new(&TagStoreConfig::default()).unwrap();
//! let addr = Addr::new(0x8000_1000);
//!
//! assert!(tags.access(addr, false).is_none());
//! let victim = tags.find_victim(addr);
//! tags.insert_block(addr, false, victim);
//! assert_eq!(tags.entry(victim).rrpv(), rrip_core::tags::RRPV_INIT);
//!
//! let hit = tags.access(addr, false).unwrap();
//! assert_eq!(tags.entry(hit).rrpv(), 0);
//! ```

/// Common types (addresses, handles, errors).
pub mod common;
/// Tag store configuration (defaults, policy selection).
pub mod config;
/// Trace parsing and replay.
pub mod sim;
/// Tag store statistics.
pub mod stats;
/// Entries, sets, address decoding, policies, and the tag store.
pub mod tags;

/// Address and entry handle types.
pub use crate::common::{Addr, BlockHandle};
/// Root configuration type; use `TagStoreConfig::default()` or load from JSON.
pub use crate::config::TagStoreConfig;
/// Tag store; construct with `TagStore::new`.
pub use crate::tags::TagStore;
