//! Marshalling type descriptors
//!
//! This module defines the descriptors that the storage layer uses to encode
//! and compare column values:
//! - AbstractType enum covering the built-in, parametric and external types
//! - Static singleton instances for the native kinds
//! - Class-name rendering that the type parser reads back

use crate::UserType;
use cql3_diagnostics::{CQL0001, CQL0303, Cql3Error, Result};
use std::fmt;
use std::sync::Arc;

/// Package that built-in marshalling classes live in
pub const MARSHAL_PACKAGE: &str = "org.apache.cassandra.db.marshal";

/// A marshalling type descriptor
///
/// Descriptors are immutable and shared through `Arc`. Equality and hashing
/// are structural, so two separately built `ListType(Int32Type)` descriptors
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbstractType {
    // === Built-in scalar types ===
    /// US-ASCII strings
    Ascii,
    /// 64-bit signed integers
    Long,
    /// Raw bytes
    Bytes,
    /// Booleans
    Boolean,
    /// Counter column deltas
    CounterColumn,
    /// Arbitrary precision decimals
    Decimal,
    /// 64-bit IEEE-754 floats
    Double,
    /// 32-bit IEEE-754 floats
    Float,
    /// IPv4 or IPv6 addresses
    InetAddress,
    /// 32-bit signed integers
    Int32,
    /// UTF-8 strings
    Utf8,
    /// Millisecond timestamps
    Timestamp,
    /// UUIDs of any version
    Uuid,
    /// Arbitrary precision integers
    Integer,
    /// Version 1 UUIDs ordered by time
    TimeUuid,
    /// UUIDs compared lexically
    LexicalUuid,
    /// Legacy date type
    Date,
    /// Type with no values
    Empty,

    // === Parametric types ===
    /// Base type with its ordering reversed
    Reversed(Arc<AbstractType>),
    /// List of elements
    List(Arc<AbstractType>),
    /// Set of elements
    Set(Arc<AbstractType>),
    /// Map from keys to values
    Map {
        keys: Arc<AbstractType>,
        values: Arc<AbstractType>,
    },
    /// Registered composite type
    User(Arc<UserType>),

    /// Externally provided class, identified by its fully qualified name
    External(ClassName),
}

/// Fully qualified name of an externally provided marshalling class
///
/// Only names the type parser reads back as the same class can be built:
/// every character is a name character, and the name does not denote one of
/// the built-in classes. Names without a package land in [`MARSHAL_PACKAGE`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassName(String);

impl ClassName {
    pub fn new(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Cql3Error::syntax(CQL0001, "empty class name", name));
        }
        if let Some(bad) = name.chars().find(|c| !is_identifier_char(*c)) {
            return Err(Cql3Error::syntax(
                CQL0001,
                format!("illegal character '{}' in class name", bad),
                name,
            ));
        }

        let qualified = qualify(name);
        if marshal_simple_name(&qualified).is_some_and(is_builtin_class) {
            return Err(Cql3Error::configuration(
                CQL0303,
                format!("'{}' names a built-in marshalling class", qualified),
            ));
        }

        Ok(Self(qualified))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Characters allowed in class names and type parameters
pub(crate) fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.' | '_' | '&')
}

/// Put names without a package into [`MARSHAL_PACKAGE`]
pub(crate) fn qualify(name: &str) -> String {
    if name.contains('.') {
        name.to_string()
    } else {
        format!("{}.{}", MARSHAL_PACKAGE, name)
    }
}

/// Simple name of a class in [`MARSHAL_PACKAGE`]
pub(crate) fn marshal_simple_name(class_name: &str) -> Option<&str> {
    class_name
        .strip_prefix(MARSHAL_PACKAGE)
        .and_then(|s| s.strip_prefix('.'))
}

fn is_builtin_class(simple_name: &str) -> bool {
    AbstractType::builtin(simple_name).is_some()
        || matches!(
            simple_name,
            "ReversedType" | "ListType" | "SetType" | "MapType" | "UserType"
        )
}

/// The three collection shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    List,
    Set,
    Map,
}

impl CollectionKind {
    /// Lowercase keyword used in CQL syntax
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

// Singleton instances for the native kinds
pub static ASCII_TYPE: AbstractType = AbstractType::Ascii;
pub static LONG_TYPE: AbstractType = AbstractType::Long;
pub static BYTES_TYPE: AbstractType = AbstractType::Bytes;
pub static BOOLEAN_TYPE: AbstractType = AbstractType::Boolean;
pub static COUNTER_COLUMN_TYPE: AbstractType = AbstractType::CounterColumn;
pub static DECIMAL_TYPE: AbstractType = AbstractType::Decimal;
pub static DOUBLE_TYPE: AbstractType = AbstractType::Double;
pub static FLOAT_TYPE: AbstractType = AbstractType::Float;
pub static INET_ADDRESS_TYPE: AbstractType = AbstractType::InetAddress;
pub static INT32_TYPE: AbstractType = AbstractType::Int32;
pub static UTF8_TYPE: AbstractType = AbstractType::Utf8;
pub static TIMESTAMP_TYPE: AbstractType = AbstractType::Timestamp;
pub static UUID_TYPE: AbstractType = AbstractType::Uuid;
pub static INTEGER_TYPE: AbstractType = AbstractType::Integer;
pub static TIME_UUID_TYPE: AbstractType = AbstractType::TimeUuid;

impl AbstractType {
    // === Constructors ===

    /// Create a list type
    pub fn list(elements: Arc<AbstractType>) -> Self {
        Self::List(elements)
    }

    /// Create a set type
    pub fn set(elements: Arc<AbstractType>) -> Self {
        Self::Set(elements)
    }

    /// Create a map type
    pub fn map(keys: Arc<AbstractType>, values: Arc<AbstractType>) -> Self {
        Self::Map { keys, values }
    }

    /// Create a reversed type
    pub fn reversed(base: Arc<AbstractType>) -> Self {
        Self::Reversed(base)
    }

    /// Create a user type
    pub fn user(user_type: UserType) -> Self {
        Self::User(Arc::new(user_type))
    }

    /// Create an external type from its class name
    ///
    /// Fails when the name would not read back as the same class.
    pub fn external(class_name: &str) -> Result<Self> {
        ClassName::new(class_name).map(Self::External)
    }

    /// Look up a built-in type that takes no parameters by simple class name
    pub fn builtin(simple_name: &str) -> Option<Self> {
        let ty = match simple_name {
            "AsciiType" => Self::Ascii,
            "LongType" => Self::Long,
            "BytesType" => Self::Bytes,
            "BooleanType" => Self::Boolean,
            "CounterColumnType" => Self::CounterColumn,
            "DecimalType" => Self::Decimal,
            "DoubleType" => Self::Double,
            "FloatType" => Self::Float,
            "InetAddressType" => Self::InetAddress,
            "Int32Type" => Self::Int32,
            "UTF8Type" => Self::Utf8,
            "TimestampType" => Self::Timestamp,
            "UUIDType" => Self::Uuid,
            "IntegerType" => Self::Integer,
            "TimeUUIDType" => Self::TimeUuid,
            "LexicalUUIDType" => Self::LexicalUuid,
            "DateType" => Self::Date,
            "EmptyType" => Self::Empty,
            _ => return None,
        };
        Some(ty)
    }

    // === Type Properties ===

    /// Simple class name, without package or parameters
    pub fn simple_name(&self) -> &str {
        match self {
            Self::Ascii => "AsciiType",
            Self::Long => "LongType",
            Self::Bytes => "BytesType",
            Self::Boolean => "BooleanType",
            Self::CounterColumn => "CounterColumnType",
            Self::Decimal => "DecimalType",
            Self::Double => "DoubleType",
            Self::Float => "FloatType",
            Self::InetAddress => "InetAddressType",
            Self::Int32 => "Int32Type",
            Self::Utf8 => "UTF8Type",
            Self::Timestamp => "TimestampType",
            Self::Uuid => "UUIDType",
            Self::Integer => "IntegerType",
            Self::TimeUuid => "TimeUUIDType",
            Self::LexicalUuid => "LexicalUUIDType",
            Self::Date => "DateType",
            Self::Empty => "EmptyType",
            Self::Reversed(_) => "ReversedType",
            Self::List(_) => "ListType",
            Self::Set(_) => "SetType",
            Self::Map { .. } => "MapType",
            Self::User(_) => "UserType",
            Self::External(class_name) => class_name
                .as_str()
                .rsplit_once('.')
                .map_or(class_name.as_str(), |(_, simple)| simple),
        }
    }

    /// Check if this is the counter type
    pub fn is_counter(&self) -> bool {
        matches!(self, Self::CounterColumn)
    }

    /// Check if this is a list, set or map
    pub fn is_collection(&self) -> bool {
        self.collection_kind().is_some()
    }

    /// Get the collection shape, if this is a collection
    pub fn collection_kind(&self) -> Option<CollectionKind> {
        match self {
            Self::List(_) => Some(CollectionKind::List),
            Self::Set(_) => Some(CollectionKind::Set),
            Self::Map { .. } => Some(CollectionKind::Map),
            _ => None,
        }
    }

    /// Get the composite definition for user types
    pub fn as_user_type(&self) -> Option<&UserType> {
        match self {
            Self::User(user_type) => Some(user_type.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for AbstractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::External(class_name) => fmt::Display::fmt(class_name, f),
            Self::Reversed(base) => write!(f, "{}.ReversedType({})", MARSHAL_PACKAGE, base),
            Self::List(elements) => write!(f, "{}.ListType({})", MARSHAL_PACKAGE, elements),
            Self::Set(elements) => write!(f, "{}.SetType({})", MARSHAL_PACKAGE, elements),
            Self::Map { keys, values } => {
                write!(f, "{}.MapType({},{})", MARSHAL_PACKAGE, keys, values)
            }
            // Keyspace, name and field names are hex so any text reads back
            Self::User(user_type) => {
                write!(
                    f,
                    "{}.UserType({},{}",
                    MARSHAL_PACKAGE,
                    hex::encode(user_type.keyspace()),
                    hex::encode(user_type.name())
                )?;
                for (name, ty) in user_type.fields() {
                    write!(f, ",{}:{}", hex::encode(name), ty)?;
                }
                f.write_str(")")
            }
            _ => write!(f, "{}.{}", MARSHAL_PACKAGE, self.simple_name()),
        }
    }
}
