//! CQL3 collection types
//!
//! Collections are one level deep: a list, set or map component can be any
//! type except another collection or a counter. Both rules are enforced by
//! the constructors, so every `CollectionType` value is well formed.

use crate::Cql3Type;
use cql3_diagnostics::{CQL0100, CQL0101, Cql3Error, Result};
use cql3_marshal::{AbstractType, CollectionKind};
use std::fmt;
use std::sync::Arc;

/// A `list<X>`, `set<X>` or `map<K, V>` column type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionType {
    kind: CollectionKind,
    ty: Arc<AbstractType>,
}

impl CollectionType {
    /// Build `list<element>`
    pub fn list(element: &Cql3Type) -> Result<Self> {
        check_not_collection(CollectionKind::List, element)?;
        check_not_counter(element)?;
        let ty = AbstractType::list(element.to_shared_type());
        Ok(Self::from_shared(CollectionKind::List, Arc::new(ty)))
    }

    /// Build `set<element>`
    pub fn set(element: &Cql3Type) -> Result<Self> {
        check_not_collection(CollectionKind::Set, element)?;
        check_not_counter(element)?;
        let ty = AbstractType::set(element.to_shared_type());
        Ok(Self::from_shared(CollectionKind::Set, Arc::new(ty)))
    }

    /// Build `map<key, value>`
    pub fn map(key: &Cql3Type, value: &Cql3Type) -> Result<Self> {
        check_not_collection(CollectionKind::Map, key)?;
        check_not_collection(CollectionKind::Map, value)?;
        check_not_counter(key)?;
        check_not_counter(value)?;
        let ty = AbstractType::map(key.to_shared_type(), value.to_shared_type());
        Ok(Self::from_shared(CollectionKind::Map, Arc::new(ty)))
    }

    /// Wrap an existing collection descriptor without validating its components
    ///
    /// `kind` is what `ty.collection_kind()` reported.
    pub(crate) fn from_shared(kind: CollectionKind, ty: Arc<AbstractType>) -> Self {
        debug_assert_eq!(ty.collection_kind(), Some(kind));
        Self { kind, ty }
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Element type of a list or set
    pub fn elements(&self) -> Option<Cql3Type> {
        match self.ty.as_ref() {
            AbstractType::List(elements) | AbstractType::Set(elements) => {
                Some(Cql3Type::from_marshal(elements))
            }
            _ => None,
        }
    }

    /// Key type of a map
    pub fn keys(&self) -> Option<Cql3Type> {
        match self.ty.as_ref() {
            AbstractType::Map { keys, .. } => Some(Cql3Type::from_marshal(keys)),
            _ => None,
        }
    }

    /// Value type of a map
    pub fn values(&self) -> Option<Cql3Type> {
        match self.ty.as_ref() {
            AbstractType::Map { values, .. } => Some(Cql3Type::from_marshal(values)),
            _ => None,
        }
    }

    pub fn underlying_type(&self) -> &AbstractType {
        &self.ty
    }

    pub(crate) fn shared_type(&self) -> &Arc<AbstractType> {
        &self.ty
    }
}

fn check_not_collection(kind: CollectionKind, component: &Cql3Type) -> Result<()> {
    if component.is_collection() {
        log::trace!("rejecting {} as component of a {}", component, kind);
        return Err(Cql3Error::invalid_type(
            CQL0100,
            format!("{} type cannot contain another collection", kind),
        ));
    }
    Ok(())
}

fn check_not_counter(component: &Cql3Type) -> Result<()> {
    if component.is_counter() {
        log::trace!("rejecting counter as collection component");
        return Err(Cql3Error::invalid_type(
            CQL0101,
            "counters are not allowed inside a collection",
        ));
    }
    Ok(())
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ty.as_ref() {
            AbstractType::List(elements) => {
                write!(f, "list<{}>", Cql3Type::from_marshal(elements))
            }
            AbstractType::Set(elements) => {
                write!(f, "set<{}>", Cql3Type::from_marshal(elements))
            }
            AbstractType::Map { keys, values } => write!(
                f,
                "map<{}, {}>",
                Cql3Type::from_marshal(keys),
                Cql3Type::from_marshal(values)
            ),
            other => write!(f, "{}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NativeType;
    use pretty_assertions::assert_eq;

    fn native(kind: NativeType) -> Cql3Type {
        Cql3Type::Native(kind)
    }

    #[test]
    fn test_kind_and_components() {
        let map = CollectionType::map(&native(NativeType::Text), &native(NativeType::Int)).unwrap();
        assert_eq!(map.kind(), CollectionKind::Map);
        assert_eq!(map.keys(), Some(native(NativeType::Text)));
        assert_eq!(map.values(), Some(native(NativeType::Int)));
        assert_eq!(map.elements(), None);

        let set = CollectionType::set(&native(NativeType::Uuid)).unwrap();
        assert_eq!(set.kind(), CollectionKind::Set);
        assert_eq!(set.elements(), Some(native(NativeType::Uuid)));
    }

    #[test]
    fn test_collection_message_names_outer_kind() {
        let inner = Cql3Type::Collection(CollectionType::list(&native(NativeType::Int)).unwrap());
        let err = CollectionType::set(&inner).unwrap_err();
        assert_eq!(err.message(), "set type cannot contain another collection");
        assert_eq!(err.code(), CQL0100);
    }

    #[test]
    fn test_map_checks_collections_before_counters() {
        let inner = Cql3Type::Collection(CollectionType::list(&native(NativeType::Int)).unwrap());
        let err = CollectionType::map(&native(NativeType::Counter), &inner).unwrap_err();
        assert_eq!(err.code(), CQL0100);
    }

    #[test]
    fn test_counter_rejected() {
        let err = CollectionType::list(&native(NativeType::Counter)).unwrap_err();
        assert!(matches!(err, Cql3Error::InvalidType { .. }));
        assert_eq!(err.message(), "counters are not allowed inside a collection");
    }

    #[test]
    fn test_varchar_element_reads_back_as_text() {
        let list = CollectionType::list(&native(NativeType::Varchar)).unwrap();
        assert_eq!(list.to_string(), "list<text>");
        assert_eq!(list, CollectionType::list(&native(NativeType::Text)).unwrap());
    }
}
