//! The CQL3 type algebra
//!
//! [`Cql3Type`] is the single entry point for column types:
//! - Native keyword types
//! - Custom types named by class
//! - Collections (validated at construction)
//! - User-defined types
//!
//! Every variant answers the same questions (is it a collection, a counter,
//! a user type, and which marshalling type backs it) and displays in its
//! canonical CQL spelling.

use crate::{CollectionType, ColumnIdentifier, CustomType, NativeType, UserDefinedType};
use cql3_diagnostics::Result;
use cql3_marshal::AbstractType;
use std::fmt;
use std::sync::Arc;

/// A CQL3 column type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cql3Type {
    Native(NativeType),
    Custom(CustomType),
    Collection(CollectionType),
    UserDefined(UserDefinedType),
}

impl Cql3Type {
    // === Constructors ===

    /// Create `list<element>`
    pub fn list(element: &Cql3Type) -> Result<Self> {
        CollectionType::list(element).map(Self::Collection)
    }

    /// Create `set<element>`
    pub fn set(element: &Cql3Type) -> Result<Self> {
        CollectionType::set(element).map(Self::Collection)
    }

    /// Create `map<key, value>`
    pub fn map(key: &Cql3Type, value: &Cql3Type) -> Result<Self> {
        CollectionType::map(key, value).map(Self::Collection)
    }

    /// View a marshalling type as the CQL3 type it is spelled as
    ///
    /// Native singletons map back to their keyword (`UTF8Type` reads as
    /// `text`), reversed types to their base type, collections and user types
    /// to their own variants, and everything else to a custom type. No
    /// validation happens here; the descriptor already exists.
    pub fn from_marshal(ty: &Arc<AbstractType>) -> Self {
        if let Some(kind) = NativeType::from_marshal(ty) {
            return Self::Native(kind);
        }
        if let Some(kind) = ty.collection_kind() {
            return Self::Collection(CollectionType::from_shared(kind, Arc::clone(ty)));
        }

        match ty.as_ref() {
            AbstractType::Reversed(base) => Self::from_marshal(base),
            AbstractType::User(user_type) => Self::UserDefined(UserDefinedType::from_shared(
                ColumnIdentifier::from_bytes(user_type.name()),
                Arc::clone(user_type),
                Arc::clone(ty),
            )),
            _ => Self::Custom(CustomType::new(Arc::clone(ty))),
        }
    }

    // === Type Properties ===

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }

    pub fn is_counter(&self) -> bool {
        match self {
            Self::Native(kind) => kind.is_counter(),
            Self::Custom(_) | Self::Collection(_) | Self::UserDefined(_) => false,
        }
    }

    pub fn is_user_type(&self) -> bool {
        matches!(self, Self::UserDefined(_))
    }

    /// The marshalling type this column type denotes
    pub fn underlying_type(&self) -> &AbstractType {
        match self {
            Self::Native(kind) => kind.underlying_type(),
            Self::Custom(custom) => custom.underlying_type(),
            Self::Collection(collection) => collection.underlying_type(),
            Self::UserDefined(udt) => udt.underlying_type(),
        }
    }

    /// Shared handle to the marshalling type, for building parametric types
    pub fn to_shared_type(&self) -> Arc<AbstractType> {
        match self {
            Self::Native(kind) => Arc::new(kind.underlying_type().clone()),
            Self::Custom(custom) => Arc::clone(custom.shared_type()),
            Self::Collection(collection) => Arc::clone(collection.shared_type()),
            Self::UserDefined(udt) => Arc::clone(udt.shared_type()),
        }
    }
}

impl From<NativeType> for Cql3Type {
    fn from(kind: NativeType) -> Self {
        Self::Native(kind)
    }
}

impl From<CustomType> for Cql3Type {
    fn from(custom: CustomType) -> Self {
        Self::Custom(custom)
    }
}

impl From<CollectionType> for Cql3Type {
    fn from(collection: CollectionType) -> Self {
        Self::Collection(collection)
    }
}

impl From<UserDefinedType> for Cql3Type {
    fn from(udt: UserDefinedType) -> Self {
        Self::UserDefined(udt)
    }
}

impl fmt::Display for Cql3Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(kind) => fmt::Display::fmt(kind, f),
            Self::Custom(custom) => fmt::Display::fmt(custom, f),
            Self::Collection(collection) => fmt::Display::fmt(collection, f),
            Self::UserDefined(udt) => fmt::Display::fmt(udt, f),
        }
    }
}
