//! CQL3 native types

use cql3_marshal::{
    ASCII_TYPE, AbstractType, BOOLEAN_TYPE, BYTES_TYPE, COUNTER_COLUMN_TYPE, DECIMAL_TYPE,
    DOUBLE_TYPE, FLOAT_TYPE, INET_ADDRESS_TYPE, INT32_TYPE, INTEGER_TYPE, LONG_TYPE,
    TIME_UUID_TYPE, TIMESTAMP_TYPE, UTF8_TYPE, UUID_TYPE,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in column types with a keyword spelling
///
/// Each kind is bound to one static marshalling instance. `Text` and
/// `Varchar` are two spellings of the same storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeType {
    /// US-ASCII character string
    Ascii,
    /// 64-bit signed long
    Bigint,
    /// Arbitrary bytes
    Blob,
    Boolean,
    /// 64-bit signed counter
    Counter,
    /// Variable-precision decimal
    Decimal,
    /// 64-bit IEEE-754 floating point
    Double,
    /// 32-bit IEEE-754 floating point
    Float,
    /// IPv4 or IPv6 address
    Inet,
    /// 32-bit signed int
    Int,
    /// UTF-8 encoded string
    Text,
    /// Date and time with millisecond precision
    Timestamp,
    /// UUID of any version
    Uuid,
    /// UTF-8 encoded string
    Varchar,
    /// Arbitrary-precision integer
    Varint,
    /// Version 1 UUID
    Timeuuid,
}

impl NativeType {
    /// Every native kind, in declaration order
    pub const ALL: [NativeType; 16] = [
        Self::Ascii,
        Self::Bigint,
        Self::Blob,
        Self::Boolean,
        Self::Counter,
        Self::Decimal,
        Self::Double,
        Self::Float,
        Self::Inet,
        Self::Int,
        Self::Text,
        Self::Timestamp,
        Self::Uuid,
        Self::Varchar,
        Self::Varint,
        Self::Timeuuid,
    ];

    /// Lowercase keyword for this kind
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Bigint => "bigint",
            Self::Blob => "blob",
            Self::Boolean => "boolean",
            Self::Counter => "counter",
            Self::Decimal => "decimal",
            Self::Double => "double",
            Self::Float => "float",
            Self::Inet => "inet",
            Self::Int => "int",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Uuid => "uuid",
            Self::Varchar => "varchar",
            Self::Varint => "varint",
            Self::Timeuuid => "timeuuid",
        }
    }

    /// The marshalling singleton this kind is bound to
    pub fn underlying_type(&self) -> &'static AbstractType {
        match self {
            Self::Ascii => &ASCII_TYPE,
            Self::Bigint => &LONG_TYPE,
            Self::Blob => &BYTES_TYPE,
            Self::Boolean => &BOOLEAN_TYPE,
            Self::Counter => &COUNTER_COLUMN_TYPE,
            Self::Decimal => &DECIMAL_TYPE,
            Self::Double => &DOUBLE_TYPE,
            Self::Float => &FLOAT_TYPE,
            Self::Inet => &INET_ADDRESS_TYPE,
            Self::Int => &INT32_TYPE,
            Self::Text | Self::Varchar => &UTF8_TYPE,
            Self::Timestamp => &TIMESTAMP_TYPE,
            Self::Uuid => &UUID_TYPE,
            Self::Varint => &INTEGER_TYPE,
            Self::Timeuuid => &TIME_UUID_TYPE,
        }
    }

    pub const fn is_counter(&self) -> bool {
        matches!(self, Self::Counter)
    }

    /// Look up a kind by keyword, ignoring case
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(keyword))
    }

    /// Map a marshalling type back to its native kind
    ///
    /// `UTF8Type` reads back as `text`. Types without a keyword spelling
    /// return `None`.
    pub fn from_marshal(ty: &AbstractType) -> Option<Self> {
        let kind = match ty {
            AbstractType::Ascii => Self::Ascii,
            AbstractType::Long => Self::Bigint,
            AbstractType::Bytes => Self::Blob,
            AbstractType::Boolean => Self::Boolean,
            AbstractType::CounterColumn => Self::Counter,
            AbstractType::Decimal => Self::Decimal,
            AbstractType::Double => Self::Double,
            AbstractType::Float => Self::Float,
            AbstractType::InetAddress => Self::Inet,
            AbstractType::Int32 => Self::Int,
            AbstractType::Utf8 => Self::Text,
            AbstractType::Timestamp => Self::Timestamp,
            AbstractType::Uuid => Self::Uuid,
            AbstractType::Integer => Self::Varint,
            AbstractType::TimeUuid => Self::Timeuuid,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_varchar_share_storage() {
        assert!(std::ptr::eq(
            NativeType::Text.underlying_type(),
            NativeType::Varchar.underlying_type()
        ));
        assert_ne!(NativeType::Text, NativeType::Varchar);
        assert_ne!(NativeType::Text.to_string(), NativeType::Varchar.to_string());
    }

    #[test]
    fn test_from_keyword() {
        assert_eq!(NativeType::from_keyword("TIMEUUID"), Some(NativeType::Timeuuid));
        assert_eq!(NativeType::from_keyword("varchar"), Some(NativeType::Varchar));
        assert_eq!(NativeType::from_keyword("string"), None);
    }

    #[test]
    fn test_from_marshal_prefers_text() {
        assert_eq!(NativeType::from_marshal(&UTF8_TYPE), Some(NativeType::Text));
        assert_eq!(NativeType::from_marshal(&AbstractType::Empty), None);
    }

    #[test]
    fn test_serde_uses_keyword() {
        let json = serde_json::to_string(&NativeType::Timeuuid).unwrap();
        assert_eq!(json, "\"timeuuid\"");
        let kind: NativeType = serde_json::from_str("\"bigint\"").unwrap();
        assert_eq!(kind, NativeType::Bigint);
    }
}
