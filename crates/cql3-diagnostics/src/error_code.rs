//! CQL3 error codes following a structured numbering system
//!
//! Error code ranges:
//! - CQL0001-CQL0099: Syntax errors (malformed type names)
//! - CQL0100-CQL0199: Invalid type errors (collection composition)
//! - CQL0200-CQL0299: Invalid request errors (user type resolution)
//! - CQL0300-CQL0399: Configuration errors (unloadable types)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CQL{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Syntax errors (0001-0099)
    map.insert(1, ErrorInfo::new("Illegal character in type name"));
    map.insert(2, ErrorInfo::new("Unbalanced type parameter list"));
    map.insert(3, ErrorInfo::new("Unexpected trailing input"));
    map.insert(4, ErrorInfo::new("Empty type parameter"));
    map.insert(5, ErrorInfo::new("Invalid hex-encoded name"));
    map.insert(
        6,
        ErrorInfo::new("Type nesting too deep")
            .with_help("Type names may nest parameters at most 64 levels deep"),
    );

    // Invalid type errors (0100-0199)
    map.insert(
        100,
        ErrorInfo::new("Collection inside a collection")
            .with_help("Collections are one level deep; use a user type or a frozen value instead"),
    );
    map.insert(
        101,
        ErrorInfo::new("Counter inside a collection")
            .with_help("Counters can only be used as top-level column types"),
    );

    // Invalid request errors (0200-0299)
    map.insert(
        200,
        ErrorInfo::new("Unknown user type")
            .with_help("Check that the type was created before it is referenced"),
    );
    map.insert(201, ErrorInfo::new("Not a user type"));

    // Configuration errors (0300-0399)
    map.insert(300, ErrorInfo::new("Unknown type class"));
    map.insert(301, ErrorInfo::new("Wrong number of type parameters"));
    map.insert(302, ErrorInfo::new("Type does not take parameters"));
    map.insert(303, ErrorInfo::new("Class name shadows a built-in type"));

    map
});

// Syntax errors
pub const CQL0001: ErrorCode = ErrorCode::new(1);
pub const CQL0002: ErrorCode = ErrorCode::new(2);
pub const CQL0003: ErrorCode = ErrorCode::new(3);
pub const CQL0004: ErrorCode = ErrorCode::new(4);
pub const CQL0005: ErrorCode = ErrorCode::new(5);
pub const CQL0006: ErrorCode = ErrorCode::new(6);

// Invalid type errors
pub const CQL0100: ErrorCode = ErrorCode::new(100);
pub const CQL0101: ErrorCode = ErrorCode::new(101);

// Invalid request errors
pub const CQL0200: ErrorCode = ErrorCode::new(200);
pub const CQL0201: ErrorCode = ErrorCode::new(201);

// Configuration errors
pub const CQL0300: ErrorCode = ErrorCode::new(300);
pub const CQL0301: ErrorCode = ErrorCode::new(301);
pub const CQL0302: ErrorCode = ErrorCode::new(302);
pub const CQL0303: ErrorCode = ErrorCode::new(303);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(CQL0001.to_string(), "CQL0001");
        assert_eq!(CQL0100.to_string(), "CQL0100");
    }

    #[test]
    fn test_error_info() {
        assert_eq!(CQL0101.info().description, "Counter inside a collection");
        assert!(CQL0200.info().help.is_some());
        assert_eq!(CQL0006.info().description, "Type nesting too deep");
        assert_eq!(ErrorCode::new(999).info().description, "Unknown error");
    }
}
