//! CQL3 type algebra
//!
//! This crate models the column types a schema statement can name:
//! - Native keyword types (`int`, `text`, ...)
//! - Custom types given by marshalling class name
//! - Collections (`list<X>`, `set<X>`, `map<K, V>`) with their composition rules
//! - User-defined types resolved through a registry
//!
//! Each type is an immutable value wrapping the marshalling type that stores
//! it, and displays in the spelling persisted to schema metadata.

mod collection;
mod cql3_type;
mod custom;
mod identifier;
mod native;
mod registry;
mod user_defined;

pub use collection::CollectionType;
pub use cql3_type::Cql3Type;
pub use custom::{CustomType, CustomTypeResolver};
pub use identifier::ColumnIdentifier;
pub use native::NativeType;
pub use registry::{UserTypeRegistry, UserTypes};
pub use user_defined::UserDefinedType;

pub use cql3_diagnostics::{Cql3Error, Result};
pub use cql3_marshal::{AbstractType, ClassName, CollectionKind, TypeParser, UserType};
