//! Schema identifiers

use std::fmt;

/// A name as written in a schema statement
///
/// Unquoted identifiers are case-insensitive and folded to lowercase; quoted
/// identifiers keep their case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnIdentifier {
    text: String,
}

impl ColumnIdentifier {
    /// Create an identifier, folding case unless `keep_case` is set
    pub fn new(raw: &str, keep_case: bool) -> Self {
        let text = if keep_case {
            raw.to_string()
        } else {
            raw.to_lowercase()
        };
        Self { text }
    }

    /// Create an identifier from stored UTF-8 bytes, keeping case
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            text: String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ColumnIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquoted_folds_case() {
        assert_eq!(ColumnIdentifier::new("Address", false).as_str(), "address");
        assert_eq!(ColumnIdentifier::new("Address", true).as_str(), "Address");
    }

    #[test]
    fn test_from_bytes_keeps_case() {
        let ident = ColumnIdentifier::from_bytes(b"PhoneNumber");
        assert_eq!(ident, ColumnIdentifier::new("PhoneNumber", true));
        assert_ne!(ident, ColumnIdentifier::new("PhoneNumber", false));
    }
}
