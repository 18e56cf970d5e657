//! Error definitions.
//!
//! Only two things can fail at runtime: building a tag store from a bad
//! configuration, and reading a malformed trace. Broken replacement invariants
//! are bugs and panic at the point of detection instead of surfacing here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Rejected tag store configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A set must hold at least one way.
    #[error("associativity must be greater than zero")]
    ZeroAssociativity,

    /// Victim selection needs at least one allocatable way or it never terminates.
    #[error("allocatable associativity must be at least 1")]
    ZeroAllocatableWays,

    /// More allocatable ways were requested than the set holds.
    #[error("allocatable associativity {alloc} exceeds associativity {assoc}")]
    AllocExceedsAssociativity {
        /// Requested allocatable ways.
        alloc: usize,
        /// Ways per set.
        assoc: usize,
    },

    /// Set count is zero or not a power of two.
    #[error("number of sets must be a non-zero power of two, got {0}")]
    InvalidSetCount(usize),

    /// Block size is below 4 bytes or not a power of two.
    #[error("block size must be a power of two of at least 4 bytes, got {0}")]
    InvalidBlockSize(usize),

    /// The configuration file could not be read.
    #[error("failed to read configuration {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The configuration text is not valid JSON for [`TagStoreConfig`](crate::config::TagStoreConfig).
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Malformed memory trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The operation mnemonic is not one of `R`, `W`, `A`, `I`.
    #[error("line {line}: unknown operation `{op}`")]
    UnknownOp {
        /// 1-based line number.
        line: usize,
        /// Offending mnemonic.
        op: String,
    },

    /// The operation has no address operand.
    #[error("line {line}: missing address")]
    MissingAddress {
        /// 1-based line number.
        line: usize,
    },

    /// The address operand is not a hex or decimal integer.
    #[error("line {line}: invalid address `{text}`")]
    BadAddress {
        /// 1-based line number.
        line: usize,
        /// Offending operand.
        text: String,
    },

    /// The security operand is not `s` or `ns`.
    #[error("line {line}: invalid security attribute `{text}`")]
    BadSecurity {
        /// 1-based line number.
        line: usize,
        /// Offending operand.
        text: String,
    },

    /// Tokens follow the last operand.
    #[error("line {line}: unexpected trailing input `{text}`")]
    TrailingInput {
        /// 1-based line number.
        line: usize,
        /// First unexpected token.
        text: String,
    },

    /// The trace file could not be read.
    #[error("failed to read trace {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}
