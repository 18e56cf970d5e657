//! Memory Trace Parsing.
//!
//! One operation per line:
//!
//! ```text
//! # op  address      [security]
//! R     0x80001000
//! W     0x80001040   s
//! I     2147487808   ns
//! ```
//!
//! `R`, `W` and `A` are all plain accesses (the tag store holds no data, so
//! reads and writes behave alike). `I` invalidates the block if present. The
//! security attribute defaults to non-secure. `#` starts a comment; any
//! other token after the operands is an error.

use std::fs;
use std::path::Path;

use crate::common::{Addr, TraceError};

/// One replayable trace event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceOp {
    /// Demand access (read, write, or generic).
    Access {
        /// Requested address.
        addr: Addr,
        /// Security domain of the request.
        secure: bool,
    },
    /// Explicit invalidation.
    Invalidate {
        /// Address of the block to drop.
        addr: Addr,
        /// Security domain of the block.
        secure: bool,
    },
}

/// Parses a whole trace.
///
/// # Errors
///
/// Returns the first malformed line as a [`TraceError`].
pub fn parse_trace(text: &str) -> Result<Vec<TraceOp>, TraceError> {
    let mut ops = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(op) = parse_line(idx + 1, line)? {
            ops.push(op);
        }
    }
    Ok(ops)
}

/// Reads and parses a trace file.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be read, otherwise the
/// errors of [`parse_trace`].
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<TraceOp>, TraceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_trace(&text)
}

/// Parses line number `line`. Blank and comment-only lines yield `None`.
///
/// # Errors
///
/// Returns a [`TraceError`] naming `line` when an operand is missing or malformed.
pub fn parse_line(line: usize, text: &str) -> Result<Option<TraceOp>, TraceError> {
    let body = text.split_once('#').map_or(text, |(body, _)| body);
    let mut fields = body.split_whitespace();

    let Some(op) = fields.next() else {
        return Ok(None);
    };
    let addr_text = fields.next().ok_or(TraceError::MissingAddress { line })?;
    let addr = parse_addr(addr_text).ok_or_else(|| TraceError::BadAddress {
        line,
        text: addr_text.to_string(),
    })?;
    let secure = match fields.next() {
        None => false,
        Some(s) if s.eq_ignore_ascii_case("s") => true,
        Some(s) if s.eq_ignore_ascii_case("ns") => false,
        Some(s) => {
            return Err(TraceError::BadSecurity {
                line,
                text: s.to_string(),
            });
        }
    };

    if let Some(extra) = fields.next() {
        return Err(TraceError::TrailingInput {
            line,
            text: extra.to_string(),
        });
    }

    match op.to_ascii_uppercase().as_str() {
        "R" | "W" | "A" => Ok(Some(TraceOp::Access { addr, secure })),
        "I" => Ok(Some(TraceOp::Invalidate { addr, secure })),
        _ => Err(TraceError::UnknownOp {
            line,
            op: op.to_string(),
        }),
    }
}

fn parse_addr(text: &str) -> Option<Addr> {
    let value = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16).ok()?,
        None => text.replace('_', "").parse().ok()?,
    };
    Some(Addr(value))
}
