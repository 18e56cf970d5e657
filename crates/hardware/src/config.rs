//! Configuration for the tag store.
//!
//! This module defines the construction-time parameters of a tag store. It provides:
//! 1. **Defaults:** Baseline geometry (sets, ways, block size).
//! 2. **Structures:** [`TagStoreConfig`], deserialized from JSON.
//! 3. **Enums:** [`PolicyKind`] selecting the replacement strategy.
//!
//! The SRRIP counter width is not configurable: `RRPV_MAX = 3` and
//! `RRPV_INIT = 2` are fixed (see [`crate::tags::entry`]).

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::ConfigError;
use crate::tags::BlockDecoder;

/// Default configuration constants.
mod defaults {
    /// Default number of sets (64).
    pub const NUM_SETS: usize = 64;

    /// Default associativity (4 ways).
    pub const ASSOCIATIVITY: usize = 4;

    /// Default block size in bytes (64 bytes).
    ///
    /// Matches typical modern processor cache line sizes and DRAM burst length.
    pub const BLOCK_SIZE: usize = 64;
}

/// Replacement strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolicyKind {
    /// Static Re-Reference Interval Prediction, hit-priority variant.
    #[default]
    #[serde(alias = "Srrip", alias = "srrip")]
    Srrip,
    /// Least Recently Used, tracked in the set order list.
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
}

/// Tag store geometry and policy.
///
/// # Examples
///
/// ```
/// use rrip_core::config::{PolicyKind, TagStoreConfig};
///
/// let config = TagStoreConfig::from_json(r#"{
///     "num_sets": 128,
///     "associativity": 8,
///     "alloc_assoc": 6,
///     "policy": "Srrip"
/// }"#).unwrap();
///
/// assert_eq!(config.block_size, 64);
/// assert_eq!(config.alloc_ways(), 6);
/// assert_eq!(config.policy, PolicyKind::Srrip);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagStoreConfig {
    /// Number of sets; a non-zero power of two.
    #[serde(default = "TagStoreConfig::default_num_sets")]
    pub num_sets: usize,

    /// Ways per set.
    #[serde(default = "TagStoreConfig::default_associativity")]
    pub associativity: usize,

    /// Leading ways eligible for allocation. `None` means every way.
    #[serde(default)]
    pub alloc_assoc: Option<usize>,

    /// Block size in bytes; a power of two of at least 4.
    #[serde(default = "TagStoreConfig::default_block_size")]
    pub block_size: usize,

    /// Replacement policy.
    #[serde(default)]
    pub policy: PolicyKind,
}

impl TagStoreConfig {
    fn default_num_sets() -> usize {
        defaults::NUM_SETS
    }

    fn default_associativity() -> usize {
        defaults::ASSOCIATIVITY
    }

    fn default_block_size() -> usize {
        defaults::BLOCK_SIZE
    }

    /// Parses a configuration from JSON text. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields.
    /// Geometry is not checked here; see [`validate`](Self::validate).
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Number of allocatable ways after applying the default.
    pub fn alloc_ways(&self) -> usize {
        self.alloc_assoc.unwrap_or(self.associativity)
    }

    /// Checks the geometry.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: zero associativity, an
    /// allocatable way count of zero or above the associativity, a set count
    /// that is not a non-zero power of two, or a bad block size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_ways(self.associativity, self.alloc_ways())?;
        let _ = BlockDecoder::new(self.num_sets, self.block_size)?;
        Ok(())
    }
}

impl Default for TagStoreConfig {
    /// 64 sets of 4 ways, 64-byte blocks, all ways allocatable, SRRIP.
    fn default() -> Self {
        Self {
            num_sets: defaults::NUM_SETS,
            associativity: defaults::ASSOCIATIVITY,
            alloc_assoc: None,
            block_size: defaults::BLOCK_SIZE,
            policy: PolicyKind::default(),
        }
    }
}

/// Validates an associativity / allocatable-ways pair.
pub(crate) fn check_ways(assoc: usize, alloc: usize) -> Result<(), ConfigError> {
    if assoc == 0 {
        return Err(ConfigError::ZeroAssociativity);
    }
    if alloc == 0 {
        return Err(ConfigError::ZeroAllocatableWays);
    }
    if alloc > assoc {
        return Err(ConfigError::AllocExceedsAssociativity { alloc, assoc });
    }
    Ok(())
}
