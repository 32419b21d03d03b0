//! User-defined column types

use crate::{ColumnIdentifier, UserTypeRegistry};
use cql3_diagnostics::{CQL0200, CQL0201, Cql3Error, Result};
use cql3_marshal::{AbstractType, UserType};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A column type that refers to a registered user type by name
///
/// The name is kept next to the marshalling type so the type displays the
/// way it was written. Equality ignores the name.
#[derive(Debug, Clone)]
pub struct UserDefinedType {
    name: ColumnIdentifier,
    user_type: Arc<UserType>,
    ty: Arc<AbstractType>,
}

impl UserDefinedType {
    /// Wrap a user type whose definition is already at hand
    pub fn from_known(name: ColumnIdentifier, user_type: UserType) -> Self {
        let user_type = Arc::new(user_type);
        let ty = Arc::new(AbstractType::User(Arc::clone(&user_type)));
        Self::from_shared(name, user_type, ty)
    }

    /// Resolve `name` against `registry`
    pub fn lookup<R>(name: ColumnIdentifier, registry: &R) -> Result<Self>
    where
        R: UserTypeRegistry + ?Sized,
    {
        let Some(ty) = registry.lookup_user_type(&name) else {
            log::debug!("user type '{}' is not registered", name);
            return Err(Cql3Error::invalid_request(
                CQL0200,
                format!("Unknown type {}", name),
            ));
        };

        let AbstractType::User(user_type) = ty.as_ref() else {
            return Err(Cql3Error::invalid_request(
                CQL0201,
                format!("{} is not a user type", name),
            ));
        };

        let user_type = Arc::clone(user_type);
        Ok(Self::from_shared(name, user_type, ty))
    }

    /// Wrap a shared user type descriptor
    ///
    /// `ty` must be `AbstractType::User(user_type)`.
    pub(crate) fn from_shared(
        name: ColumnIdentifier,
        user_type: Arc<UserType>,
        ty: Arc<AbstractType>,
    ) -> Self {
        debug_assert_eq!(ty.as_user_type(), Some(user_type.as_ref()));
        Self {
            name,
            user_type,
            ty,
        }
    }

    pub fn name(&self) -> &ColumnIdentifier {
        &self.name
    }

    /// The composite definition behind this type
    pub fn user_type(&self) -> &UserType {
        &self.user_type
    }

    pub fn underlying_type(&self) -> &AbstractType {
        &self.ty
    }

    pub(crate) fn shared_type(&self) -> &Arc<AbstractType> {
        &self.ty
    }
}

impl PartialEq for UserDefinedType {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
    }
}

impl Eq for UserDefinedType {}

impl Hash for UserDefinedType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.hash(state);
    }
}

impl fmt::Display for UserDefinedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserTypes;

    fn address() -> UserType {
        UserType::new("ks", "address").with_field("street", Arc::new(AbstractType::Utf8))
    }

    struct RawRegistry;

    impl UserTypeRegistry for RawRegistry {
        fn lookup_user_type(&self, _name: &ColumnIdentifier) -> Option<Arc<AbstractType>> {
            Some(Arc::new(AbstractType::Utf8))
        }
    }

    #[test]
    fn test_display_uses_given_name() {
        let udt = UserDefinedType::from_known(ColumnIdentifier::new("Address", true), address());
        assert_eq!(udt.to_string(), "Address");
        assert_eq!(udt.user_type().name_as_str(), "address");
    }

    #[test]
    fn test_name_excluded_from_equality() {
        let a = UserDefinedType::from_known(ColumnIdentifier::new("address", false), address());
        let b =
            UserDefinedType::from_known(ColumnIdentifier::new("home_address", false), address());
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_type() {
        let err = UserDefinedType::lookup(ColumnIdentifier::new("phone", false), &UserTypes::new())
            .unwrap_err();
        assert!(matches!(err, Cql3Error::InvalidRequest { .. }));
        assert_eq!(err.message(), "Unknown type phone");
    }

    #[test]
    fn test_lookup_shares_registered_definition() {
        let registry = UserTypes::new();
        registry.add_type(address());

        let udt = UserDefinedType::lookup(ColumnIdentifier::new("Address", false), &registry)
            .unwrap();
        assert_eq!(udt.user_type(), &address());
        assert_eq!(udt.underlying_type().as_user_type(), Some(udt.user_type()));
    }

    #[test]
    fn test_registry_returning_non_user_type() {
        let err = UserDefinedType::lookup(ColumnIdentifier::new("phone", false), &RawRegistry)
            .unwrap_err();
        assert_eq!(err.code(), CQL0201);
    }
}
