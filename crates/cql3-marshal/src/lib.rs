//! CQL3 marshalling types
//!
//! This crate defines the descriptors of the storage-level types that CQL3
//! column types map onto:
//! - Built-in scalar types and their singleton instances
//! - Parametric types (reversed, list, set, map)
//! - Composite user types
//! - The parser that resolves class names into descriptors
//!
//! Descriptors only describe a type; encoding and comparing values is left to
//! the storage engine.

mod abstract_type;
mod parser;
mod user_type;

pub use abstract_type::*;
pub use parser::{MAX_NESTING, TypeParser, TypeParserBuilder};
pub use user_type::UserType;
