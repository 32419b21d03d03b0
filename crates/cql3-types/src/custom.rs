//! Custom types named by marshalling class

use cql3_diagnostics::Result;
use cql3_marshal::{AbstractType, TypeParser};
use std::fmt;
use std::sync::Arc;

/// Resolves a class-name string into a marshalling type
pub trait CustomTypeResolver {
    /// Resolve `name`, failing with a syntax error if it is malformed and a
    /// configuration error if it names nothing loadable
    fn resolve_custom_type(&self, name: &str) -> Result<Arc<AbstractType>>;
}

impl CustomTypeResolver for TypeParser {
    fn resolve_custom_type(&self, name: &str) -> Result<Arc<AbstractType>> {
        self.parse(name)
    }
}

/// A column type given by class name, e.g. `'org.example.Foo'`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomType {
    ty: Arc<AbstractType>,
}

impl CustomType {
    /// Wrap an already resolved marshalling type
    pub fn new(ty: Arc<AbstractType>) -> Self {
        Self { ty }
    }

    /// Resolve `name` through `resolver` and wrap the result
    pub fn from_type_name<R>(name: &str, resolver: &R) -> Result<Self>
    where
        R: CustomTypeResolver + ?Sized,
    {
        resolver.resolve_custom_type(name).map(Self::new)
    }

    pub fn underlying_type(&self) -> &AbstractType {
        &self.ty
    }

    pub(crate) fn shared_type(&self) -> &Arc<AbstractType> {
        &self.ty
    }
}

impl fmt::Display for CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cql3_diagnostics::Cql3Error;

    #[test]
    fn test_display_is_quoted_class_name() {
        let custom = CustomType::new(Arc::new(AbstractType::external("org.example.Foo").unwrap()));
        assert_eq!(custom.to_string(), "'org.example.Foo'");
    }

    #[test]
    fn test_builtin_class_displays_qualified() {
        let custom = CustomType::from_type_name("UTF8Type", &TypeParser::new()).unwrap();
        assert_eq!(custom.to_string(), "'org.apache.cassandra.db.marshal.UTF8Type'");
    }

    #[test]
    fn test_resolver_errors_propagate() {
        let parser = TypeParser::new();
        assert!(matches!(
            CustomType::from_type_name("Foo#", &parser),
            Err(Cql3Error::Syntax { .. })
        ));
        assert!(matches!(
            CustomType::from_type_name("org.example.Missing", &parser),
            Err(Cql3Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_equality_is_over_wrapped_type() {
        let a = CustomType::new(Arc::new(AbstractType::LexicalUuid));
        let b = CustomType::from_type_name("LexicalUUIDType", &TypeParser::new()).unwrap();
        assert_eq!(a, b);
    }
}
