//! CQL3 diagnostics and error handling
//!
//! This crate provides the error handling infrastructure shared by the
//! marshalling layer and the type algebra: error codes, the error type raised
//! at type construction, and diagnostic rendering for callers.

mod error;
mod error_code;

pub use error::*;
pub use error_code::*;

/// Result type for CQL3 type operations
pub type Result<T> = std::result::Result<T, Cql3Error>;
