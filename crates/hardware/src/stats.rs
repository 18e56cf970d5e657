//! Tag store statistics.
//!
//! This module tracks the events the tag store sees. It provides:
//! 1. **Lookups:** Accesses split into hits and misses.
//! 2. **Allocation:** Insertions, and how many of them displaced a valid block.
//! 3. **Occupancy:** Explicit invalidations and the current count of valid tags.

use std::fmt;

use serde::Serialize;

/// Counters maintained by a [`TagStore`](crate::tags::TagStore).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TagStats {
    /// Calls to `access`.
    pub accesses: u64,
    /// Accesses that found a matching valid block.
    pub hits: u64,
    /// Accesses that found nothing.
    pub misses: u64,
    /// Blocks installed with `insert_block`.
    pub insertions: u64,
    /// Insertions that overwrote a valid block.
    pub replacements: u64,
    /// Valid blocks removed with `invalidate`.
    pub invalidations: u64,
    /// Entries currently holding a valid block.
    pub tags_in_use: u64,
}

impl TagStats {
    /// Fraction of accesses that hit, or `0.0` before the first access.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }

    /// Zeroes the event counters. `tags_in_use` describes the current
    /// contents of the store and is kept.
    pub fn reset(&mut self) {
        *self = Self {
            tags_in_use: self.tags_in_use,
            ..Self::default()
        };
    }
}

impl fmt::Display for TagStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "accesses        {}", self.accesses)?;
        writeln!(f, "  hits          {}", self.hits)?;
        writeln!(f, "  misses        {}", self.misses)?;
        writeln!(f, "  hit rate      {:.2}%", self.hit_rate() * 100.0)?;
        writeln!(f, "insertions      {}", self.insertions)?;
        writeln!(f, "  replacements  {}", self.replacements)?;
        writeln!(f, "invalidations   {}", self.invalidations)?;
        write!(f, "tags in use     {}", self.tags_in_use)
    }
}
