//! User type registry
//!
//! User-defined types are resolved by name when a schema statement refers to
//! them. The [`UserTypeRegistry`] trait is the read side the type algebra
//! depends on; [`UserTypes`] is an in-memory implementation.

use crate::ColumnIdentifier;
use cql3_marshal::{AbstractType, UserType};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Read access to registered user types
pub trait UserTypeRegistry: Send + Sync {
    /// Find the type registered under `name`
    fn lookup_user_type(&self, name: &ColumnIdentifier) -> Option<Arc<AbstractType>>;
}

/// In-memory registry of user types, keyed by type name
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct UserTypes {
    types: Arc<RwLock<IndexMap<String, Arc<AbstractType>>>>,
}

impl UserTypes {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user type under its own name, returning the type it replaced
    pub fn add_type(&self, user_type: UserType) -> Option<Arc<AbstractType>> {
        let name = user_type.name_as_str().into_owned();
        log::debug!("registering user type '{}' in keyspace '{}'", name, user_type.keyspace());
        self.types
            .write()
            .insert(name, Arc::new(AbstractType::user(user_type)))
    }

    /// Remove the type registered under `name`
    pub fn remove_type(&self, name: &ColumnIdentifier) -> Option<Arc<AbstractType>> {
        let removed = self.types.write().shift_remove(name.as_str());
        if removed.is_some() {
            log::debug!("removed user type '{}'", name);
        }
        removed
    }

    pub fn get_type(&self, name: &ColumnIdentifier) -> Option<Arc<AbstractType>> {
        self.types.read().get(name.as_str()).cloned()
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<String> {
        self.types.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

impl UserTypeRegistry for UserTypes {
    fn lookup_user_type(&self, name: &ColumnIdentifier) -> Option<Arc<AbstractType>> {
        self.get_type(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserDefinedType;
    use std::thread;

    fn address() -> UserType {
        UserType::new("ks", "address").with_field("street", Arc::new(AbstractType::Utf8))
    }

    #[test]
    fn test_add_and_get() {
        let registry = UserTypes::new();
        assert!(registry.add_type(address()).is_none());

        let found = registry.get_type(&ColumnIdentifier::new("address", false)).unwrap();
        assert_eq!(found.as_user_type(), Some(&address()));
        assert!(registry.get_type(&ColumnIdentifier::new("phone", false)).is_none());
    }

    #[test]
    fn test_add_replaces_existing() {
        let registry = UserTypes::new();
        registry.add_type(UserType::new("ks", "address"));
        let replaced = registry.add_type(address());

        assert!(replaced.is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_keeps_order() {
        let registry = UserTypes::new();
        registry.add_type(UserType::new("ks", "a"));
        registry.add_type(UserType::new("ks", "b"));
        registry.add_type(UserType::new("ks", "c"));

        assert!(registry.remove_type(&ColumnIdentifier::new("b", false)).is_some());
        assert!(registry.remove_type(&ColumnIdentifier::new("b", false)).is_none());
        assert_eq!(registry.names(), vec!["a", "c"]);
    }

    #[test]
    fn test_clones_share_state() {
        let registry = UserTypes::new();
        let reader = registry.clone();
        registry.add_type(address());

        assert!(!reader.is_empty());
        assert!(reader
            .lookup_user_type(&ColumnIdentifier::new("ADDRESS", false))
            .is_some());
    }

    #[test]
    fn test_lookups_while_another_thread_writes() {
        let registry = UserTypes::new();
        registry.add_type(address());

        thread::scope(|scope| {
            for _ in 0..4 {
                let reader = registry.clone();
                scope.spawn(move || {
                    let name = ColumnIdentifier::new("address", false);
                    for _ in 0..500 {
                        let udt = UserDefinedType::lookup(name.clone(), &reader).unwrap();
                        assert_eq!(udt.user_type(), &address());
                    }
                });
            }

            let writer = registry.clone();
            scope.spawn(move || {
                for i in 0..200 {
                    let name = format!("scratch_{}", i);
                    writer.add_type(UserType::new("ks", name.as_str()));
                    assert!(writer.remove_type(&ColumnIdentifier::new(&name, false)).is_some());
                }
            });
        });

        assert_eq!(registry.names(), vec!["address"]);
    }
}
