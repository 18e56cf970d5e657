//! Trace-driven simulation of a tag store.
//!
//! Provides a text trace format and a minimal cache controller that replays
//! it: misses pick a victim and install the block, invalidations drop it.

/// Controller issuing tag store operations for trace events.
pub mod controller;

/// Memory trace parsing.
pub mod trace;

pub use controller::{AccessOutcome, CacheController};
pub use trace::{TraceOp, load_trace, parse_trace};
