//! Common types shared by the tag store, its policies, and the trace driver.
//!
//! This module provides:
//! 1. **Address Types:** A strong type for block addresses and `(set, way)` handles.
//! 2. **Error Handling:** Configuration and trace error enums.

/// Block address and entry handle types.
pub mod addr;

/// Error types for configuration and trace parsing.
pub mod error;

pub use addr::{Addr, BlockHandle};
pub use error::{ConfigError, TraceError};
