//! Composite user-defined marshalling type

use crate::AbstractType;
use std::borrow::Cow;
use std::sync::Arc;

/// A registered composite type: a keyspace-scoped name and ordered fields
///
/// Names are kept as raw bytes, the way they are stored in schema tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserType {
    keyspace: String,
    name: Vec<u8>,
    fields: Vec<(Vec<u8>, Arc<AbstractType>)>,
}

impl UserType {
    /// Create a user type with no fields
    pub fn new(keyspace: impl Into<String>, name: impl Into<Vec<u8>>) -> Self {
        Self {
            keyspace: keyspace.into(),
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field
    pub fn with_field(mut self, name: impl Into<Vec<u8>>, ty: Arc<AbstractType>) -> Self {
        self.fields.push((name.into(), ty));
        self
    }

    pub fn keyspace(&self) -> &str {
        &self.keyspace
    }

    /// Raw type name
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// Type name decoded as UTF-8, replacing invalid sequences
    pub fn name_as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    /// Iterate over `(field name, field type)` pairs in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&[u8], &Arc<AbstractType>)> {
        self.fields.iter().map(|(name, ty)| (name.as_slice(), ty))
    }

    pub fn field_type(&self, index: usize) -> Option<&Arc<AbstractType>> {
        self.fields.get(index).map(|(_, ty)| ty)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_keep_declaration_order() {
        let address = UserType::new("ks", "address")
            .with_field("street", Arc::new(AbstractType::Utf8))
            .with_field("zip", Arc::new(AbstractType::Int32));

        let names: Vec<&[u8]> = address.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec![b"street".as_slice(), b"zip".as_slice()]);
        assert_eq!(address.field_type(1).map(|t| t.as_ref()), Some(&AbstractType::Int32));
        assert_eq!(address.len(), 2);
    }

    #[test]
    fn test_name_as_str_is_lossy() {
        let ty = UserType::new("ks", vec![0x61, 0xff]);
        assert_eq!(ty.name_as_str(), "a\u{fffd}");
    }
}
