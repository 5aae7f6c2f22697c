//! Resource value definitions for .NET resource sets.
//!
//! A resource set (`.resources`) stores every entry with a type code. The built-in codes
//! below `0x40` carry a value the runtime knows how to read without any serializer:
//! primitives, strings, the three well-known structs and raw byte blobs. Everything else is
//! a *user type* whose bytes were produced by some legacy serialization mechanism and can
//! only be carried through verbatim.
//!
//! # Payload Shapes
//!
//! - [`ResourceType`] - A built-in value together with its native representation
//! - [`BinaryResourceData`] - An already serialized value plus the serializer that produced it
//! - [`ResourcePayload`] - The tagged union of the two
//!
//! # Examples
//!
//! ```rust
//! use dotresx::metadata::resources::{ResourceEntry, ResourceType, ResourceTypeCode};
//!
//! let entry = ResourceEntry::built_in("Retries", ResourceType::Int32(3));
//! assert_eq!(entry.code(), Some(ResourceTypeCode::Int32));
//! ```

use strum::{Display, EnumIter, FromRepr, IntoStaticStr};

/// Type codes of the built-in resource types, as stored in a resource set.
///
/// The numeric values match the runtime's `ResourceTypeCode` enumeration.
///
/// # Examples
///
/// ```rust
/// use dotresx::metadata::resources::ResourceTypeCode;
///
/// assert_eq!(ResourceTypeCode::from_repr(0x21), Some(ResourceTypeCode::Stream));
/// assert_eq!(ResourceTypeCode::ByteArray.to_string(), "ByteArray");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, FromRepr, IntoStaticStr,
)]
#[repr(u8)]
pub enum ResourceTypeCode {
    /// A null reference
    Null = 0x00,
    /// System.String
    String = 0x01,
    /// System.Boolean
    Boolean = 0x02,
    /// System.Char
    Char = 0x03,
    /// System.Byte
    Byte = 0x04,
    /// System.SByte
    SByte = 0x05,
    /// System.Int16
    Int16 = 0x06,
    /// System.UInt16
    UInt16 = 0x07,
    /// System.Int32
    Int32 = 0x08,
    /// System.UInt32
    UInt32 = 0x09,
    /// System.Int64
    Int64 = 0x0A,
    /// System.UInt64
    UInt64 = 0x0B,
    /// System.Single
    Single = 0x0C,
    /// System.Double
    Double = 0x0D,
    /// System.Decimal
    Decimal = 0x0E,
    /// System.DateTime
    DateTime = 0x0F,
    /// System.TimeSpan
    TimeSpan = 0x10,
    /// System.Byte[]
    ByteArray = 0x20,
    /// System.IO.Stream, stored as its raw content
    Stream = 0x21,
    /// First code used for user types; not a value type of its own
    StartOfUserTypes = 0x40,
}

/// A built-in resource value.
///
/// Each variant corresponds to one [`ResourceTypeCode`] and holds the value in the
/// representation the resource set stores it in.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceType {
    /// Null resource value (type code 0x00)
    Null,
    /// String resource (type code 0x01)
    String(String),
    /// Boolean resource value (type code 0x02)
    Boolean(bool),
    /// Single character resource (type code 0x03)
    Char(char),
    /// Unsigned 8-bit integer resource (type code 0x04)
    Byte(u8),
    /// Signed 8-bit integer resource (type code 0x05)
    SByte(i8),
    /// Signed 16-bit integer resource (type code 0x06)
    Int16(i16),
    /// Unsigned 16-bit integer resource (type code 0x07)
    UInt16(u16),
    /// Signed 32-bit integer resource (type code 0x08)
    Int32(i32),
    /// Unsigned 32-bit integer resource (type code 0x09)
    UInt32(u32),
    /// Signed 64-bit integer resource (type code 0x0A)
    Int64(i64),
    /// Unsigned 64-bit integer resource (type code 0x0B)
    UInt64(u64),
    /// 32-bit floating point resource (type code 0x0C)
    Single(f32),
    /// 64-bit floating point resource (type code 0x0D)
    Double(f64),
    /// .NET Decimal resource value stored as raw bits (type code 0x0E)
    ///
    /// Uses the binary layout of `System.Decimal.GetBits`:
    /// ```text
    /// lo    low 32 bits of the 96-bit mantissa
    /// mid   middle 32 bits of the 96-bit mantissa
    /// hi    high 32 bits of the 96-bit mantissa
    /// flags sign in bit 31, scale (0-28) in bits 16-23
    /// ```
    ///
    /// The value `3.261` is mantissa `3261` with scale `3`.
    Decimal {
        /// Low 32 bits of the 96-bit mantissa
        lo: i32,
        /// Middle 32 bits of the 96-bit mantissa
        mid: i32,
        /// High 32 bits of the 96-bit mantissa
        hi: i32,
        /// Flags containing sign (bit 31) and scale (bits 16-23)
        flags: i32,
    },
    /// .NET DateTime resource value in `DateTime.ToBinary()` form (type code 0x0F)
    ///
    /// ```text
    /// ticks = binary_value & 0x3FFFFFFFFFFFFFFF
    /// kind  = (binary_value >> 62) & 0x3
    /// ```
    ///
    /// Ticks count 100-nanosecond intervals since 0001-01-01 00:00:00.
    DateTime(i64),
    /// .NET TimeSpan resource value in ticks (type code 0x10)
    ///
    /// Negative values represent negative time spans.
    TimeSpan(i64),
    /// Byte array resource (type code 0x20)
    ByteArray(Vec<u8>),
    /// Stream resource, holding the stream's content (type code 0x21)
    Stream(Vec<u8>),
    /// Marker for the beginning of user-defined types (type code 0x40)
    StartOfUserTypes,
}

impl ResourceType {
    /// Returns the type code of this value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dotresx::metadata::resources::{ResourceType, ResourceTypeCode};
    ///
    /// assert_eq!(ResourceType::Double(0.5).code(), ResourceTypeCode::Double);
    /// assert_eq!(ResourceType::Null.code(), ResourceTypeCode::Null);
    /// ```
    #[must_use]
    pub fn code(&self) -> ResourceTypeCode {
        match self {
            ResourceType::Null => ResourceTypeCode::Null,
            ResourceType::String(_) => ResourceTypeCode::String,
            ResourceType::Boolean(_) => ResourceTypeCode::Boolean,
            ResourceType::Char(_) => ResourceTypeCode::Char,
            ResourceType::Byte(_) => ResourceTypeCode::Byte,
            ResourceType::SByte(_) => ResourceTypeCode::SByte,
            ResourceType::Int16(_) => ResourceTypeCode::Int16,
            ResourceType::UInt16(_) => ResourceTypeCode::UInt16,
            ResourceType::Int32(_) => ResourceTypeCode::Int32,
            ResourceType::UInt32(_) => ResourceTypeCode::UInt32,
            ResourceType::Int64(_) => ResourceTypeCode::Int64,
            ResourceType::UInt64(_) => ResourceTypeCode::UInt64,
            ResourceType::Single(_) => ResourceTypeCode::Single,
            ResourceType::Double(_) => ResourceTypeCode::Double,
            ResourceType::Decimal { .. } => ResourceTypeCode::Decimal,
            ResourceType::DateTime(_) => ResourceTypeCode::DateTime,
            ResourceType::TimeSpan(_) => ResourceTypeCode::TimeSpan,
            ResourceType::ByteArray(_) => ResourceTypeCode::ByteArray,
            ResourceType::Stream(_) => ResourceTypeCode::Stream,
            ResourceType::StartOfUserTypes => ResourceTypeCode::StartOfUserTypes,
        }
    }

    /// Returns the official .NET type code for this value.
    #[must_use]
    pub fn type_code(&self) -> u8 {
        self.code() as u8
    }
}

/// The mechanism that produced the bytes of a [`BinaryResourceData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum SerializationFormat {
    /// A `BinaryFormatter` object graph
    BinaryFormatter,
    /// The byte array produced by the type's `TypeConverter`
    TypeConverterByteArray,
    /// Stream content handed to the type's constructor through `Activator`
    ActivatorStream,
    /// The UTF-8 encoded string produced by the type's `TypeConverter`
    TypeConverterString,
}

/// A user-type resource carried through in serialized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryResourceData {
    /// How `data` was produced
    pub format: SerializationFormat,
    /// Assembly-qualified name of the serialized type, as stored in the resource set
    pub type_name: String,
    /// The serialized bytes
    pub data: Vec<u8>,
}

impl BinaryResourceData {
    /// Create a new serialized resource value.
    pub fn new(format: SerializationFormat, type_name: impl Into<String>, data: Vec<u8>) -> Self {
        BinaryResourceData {
            format,
            type_name: type_name.into(),
            data,
        }
    }
}

/// The value of a resource entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourcePayload {
    /// A value of one of the built-in resource types
    BuiltIn(ResourceType),
    /// A user type in serialized form
    Binary(BinaryResourceData),
}

impl From<ResourceType> for ResourcePayload {
    fn from(value: ResourceType) -> Self {
        ResourcePayload::BuiltIn(value)
    }
}

impl From<BinaryResourceData> for ResourcePayload {
    fn from(value: BinaryResourceData) -> Self {
        ResourcePayload::Binary(value)
    }
}

/// A named resource, as read from a resource set.
///
/// Names are neither validated nor deduplicated; every entry becomes one `data` element.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceEntry {
    /// The name of the resource
    pub name: String,
    /// The resource value
    pub payload: ResourcePayload,
}

impl ResourceEntry {
    /// Create an entry from a name and any payload.
    pub fn new(name: impl Into<String>, payload: impl Into<ResourcePayload>) -> Self {
        ResourceEntry {
            name: name.into(),
            payload: payload.into(),
        }
    }

    /// Create an entry holding a built-in value.
    pub fn built_in(name: impl Into<String>, value: ResourceType) -> Self {
        Self::new(name, value)
    }

    /// Create an entry holding a serialized user type.
    pub fn binary(
        name: impl Into<String>,
        format: SerializationFormat,
        type_name: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self::new(name, BinaryResourceData::new(format, type_name, data))
    }

    /// The built-in type code of the payload, `None` for serialized user types.
    #[must_use]
    pub fn code(&self) -> Option<ResourceTypeCode> {
        match &self.payload {
            ResourcePayload::BuiltIn(value) => Some(value.code()),
            ResourcePayload::Binary(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_type_codes_match_runtime() {
        assert_eq!(ResourceType::String("x".into()).type_code(), 0x01);
        assert_eq!(ResourceType::Int32(42).type_code(), 0x08);
        assert_eq!(
            ResourceType::Decimal {
                lo: 1,
                mid: 0,
                hi: 0,
                flags: 0
            }
            .type_code(),
            0x0E
        );
        assert_eq!(ResourceType::TimeSpan(0).type_code(), 0x10);
        assert_eq!(ResourceType::ByteArray(vec![]).type_code(), 0x20);
        assert_eq!(ResourceType::Stream(vec![]).type_code(), 0x21);
        assert_eq!(ResourceType::StartOfUserTypes.type_code(), 0x40);
    }

    #[test]
    fn test_code_from_repr() {
        for code in ResourceTypeCode::iter() {
            assert_eq!(ResourceTypeCode::from_repr(code as u8), Some(code));
        }
        assert_eq!(ResourceTypeCode::from_repr(0x11), None);
        assert_eq!(ResourceTypeCode::from_repr(0x41), None);
    }

    #[test]
    fn test_entry_constructors() {
        let text = ResourceEntry::built_in("Greeting", ResourceType::String("hello".into()));
        assert_eq!(text.name, "Greeting");
        assert_eq!(text.code(), Some(ResourceTypeCode::String));

        let icon = ResourceEntry::binary(
            "Icon",
            SerializationFormat::BinaryFormatter,
            "System.Drawing.Icon, System.Drawing",
            vec![0, 1, 0, 0],
        );
        assert_eq!(icon.code(), None);
        match icon.payload {
            ResourcePayload::Binary(data) => {
                assert_eq!(data.format, SerializationFormat::BinaryFormatter);
                assert_eq!(data.type_name, "System.Drawing.Icon, System.Drawing");
            }
            ResourcePayload::BuiltIn(_) => panic!("expected a binary payload"),
        }
    }
}
