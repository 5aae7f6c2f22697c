//! Text representation of resource values in resx documents.
//!
//! Every resource becomes a [`ResourceInfo`]: the text of its `value` element plus the
//! optional `type` and `mimetype` attributes of its `data` element. Formatting is
//! locale-invariant and mirrors what the .NET type converters produce, so that a document
//! written here reads back into the same values.
//!
//! # Value Forms
//!
//! | Payload                          | Value text                  | `type` | `mimetype` |
//! |----------------------------------|-----------------------------|--------|------------|
//! | `Null`                           | empty                       | yes    | no         |
//! | `String`                         | the string                  | no     | no         |
//! | primitives, `Decimal`, temporals | invariant text              | yes    | no         |
//! | `ByteArray`                      | wrapped base64              | yes    | no         |
//! | `Stream`                         | wrapped base64 object graph | no     | binary     |
//! | `BinaryFormatter`                | wrapped base64              | yes    | binary     |
//! | `TypeConverterByteArray`         | wrapped base64              | yes    | bytearray  |
//! | `ActivatorStream`                | wrapped base64              | yes    | bytearray  |
//! | `TypeConverterString`            | UTF-8 decoded text          | yes    | no         |

mod numeric;
mod temporal;

use crate::{
    metadata::resources::{
        BinaryResourceData, ResourcePayload, ResourceType, SerializationFormat,
    },
    resx::{
        serialize_memory_stream, to_wrapped_base64, TypeNameResolver,
        BIN_SERIALIZED_OBJECT_MIME_TYPE, BYTE_ARRAY_SERIALIZED_OBJECT_MIME_TYPE,
    },
    Result,
};

/// The pieces of a `data` element.
///
/// One of four shapes: a plain value, a typed value, a typed serialized value, or a
/// serialized value without a type (streams).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceInfo {
    /// Text of the `value` element
    pub value: String,
    /// Content of the `type` attribute
    pub type_name: Option<String>,
    /// Content of the `mimetype` attribute
    pub mime_type: Option<&'static str>,
}

impl ResourceInfo {
    /// A value without attributes.
    pub fn plain(value: impl Into<String>) -> Self {
        ResourceInfo {
            value: value.into(),
            type_name: None,
            mime_type: None,
        }
    }

    /// A value converted from text by the converter of `type_name`.
    pub fn typed(value: impl Into<String>, type_name: impl Into<String>) -> Self {
        ResourceInfo {
            value: value.into(),
            type_name: Some(type_name.into()),
            mime_type: None,
        }
    }

    /// A serialized value of `type_name`.
    pub fn serialized(
        value: impl Into<String>,
        type_name: impl Into<String>,
        mime_type: &'static str,
    ) -> Self {
        ResourceInfo {
            value: value.into(),
            type_name: Some(type_name.into()),
            mime_type: Some(mime_type),
        }
    }

    /// A serialized value that names its own type.
    pub fn untyped_serialized(value: impl Into<String>, mime_type: &'static str) -> Self {
        ResourceInfo {
            value: value.into(),
            type_name: None,
            mime_type: Some(mime_type),
        }
    }

    /// Returns `true` if the `data` element needs `xml:space="preserve"`.
    ///
    /// Plain strings and characters keep their whitespace; everything else is parsed by a
    /// converter that does not care.
    #[must_use]
    pub fn preserves_space(&self) -> bool {
        match (&self.type_name, self.mime_type) {
            (None, None) => true,
            (Some(type_name), _) => type_name.starts_with("System.Char"),
            (None, Some(_)) => false,
        }
    }
}

/// Build the `data` element pieces for `payload`.
///
/// # Errors
///
/// - [`crate::Error::UnsupportedPayload`] for values the format cannot represent
/// - [`crate::Error::TypeResolutionFailure`] if a required type name cannot be resolved
pub fn format_payload(payload: &ResourcePayload, names: &TypeNameResolver<'_>) -> Result<ResourceInfo> {
    match payload {
        ResourcePayload::BuiltIn(value) => format_built_in(value, names),
        ResourcePayload::Binary(data) => Ok(format_binary(data)),
    }
}

fn format_built_in(value: &ResourceType, names: &TypeNameResolver<'_>) -> Result<ResourceInfo> {
    let text = match value {
        ResourceType::String(text) => return Ok(ResourceInfo::plain(text.as_str())),
        ResourceType::Stream(content) => {
            let graph = serialize_memory_stream(content)?;
            return Ok(ResourceInfo::untyped_serialized(
                to_wrapped_base64(&graph),
                BIN_SERIALIZED_OBJECT_MIME_TYPE,
            ));
        }
        ResourceType::StartOfUserTypes => {
            return Err(unsupported_payload!(
                "type code {} carries no value",
                value.code()
            ))
        }
        ResourceType::Null => String::new(),
        ResourceType::Boolean(flag) => String::from(if *flag { "True" } else { "False" }),
        ResourceType::Char('\0') => String::new(),
        ResourceType::Char(character) => character.to_string(),
        ResourceType::Byte(number) => number.to_string(),
        ResourceType::SByte(number) => number.to_string(),
        ResourceType::Int16(number) => number.to_string(),
        ResourceType::UInt16(number) => number.to_string(),
        ResourceType::Int32(number) => number.to_string(),
        ResourceType::UInt32(number) => number.to_string(),
        ResourceType::Int64(number) => number.to_string(),
        ResourceType::UInt64(number) => number.to_string(),
        ResourceType::Single(number) => numeric::format_single(*number),
        ResourceType::Double(number) => numeric::format_double(*number),
        ResourceType::Decimal { lo, mid, hi, flags } => {
            numeric::format_decimal(*lo, *mid, *hi, *flags)?
        }
        ResourceType::TimeSpan(ticks) => temporal::format_time_span(*ticks),
        ResourceType::DateTime(binary) => temporal::format_date_time(*binary)?,
        ResourceType::ByteArray(bytes) => to_wrapped_base64(bytes),
    };

    Ok(ResourceInfo::typed(text, names.code_type_name(value.code())?))
}

fn format_binary(data: &BinaryResourceData) -> ResourceInfo {
    match data.format {
        SerializationFormat::BinaryFormatter => ResourceInfo::serialized(
            to_wrapped_base64(&data.data),
            data.type_name.as_str(),
            BIN_SERIALIZED_OBJECT_MIME_TYPE,
        ),
        // resx cannot express construction through Activator; the reader hands the bytes
        // to the type converter instead
        SerializationFormat::TypeConverterByteArray | SerializationFormat::ActivatorStream => {
            ResourceInfo::serialized(
                to_wrapped_base64(&data.data),
                data.type_name.as_str(),
                BYTE_ARRAY_SERIALIZED_OBJECT_MIME_TYPE,
            )
        }
        SerializationFormat::TypeConverterString => ResourceInfo::typed(
            String::from_utf8_lossy(&data.data),
            data.type_name.as_str(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::typesystem::{HostEnvironment, ModuleInfo},
        Error,
    };

    const MSCORLIB: &str =
        "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089";

    fn format(value: ResourceType) -> Result<ResourceInfo> {
        let module = ModuleInfo::net_framework("App");
        let names = TypeNameResolver::new(&module, HostEnvironment::default());
        format_payload(&ResourcePayload::BuiltIn(value), &names)
    }

    fn format_serialized(format: SerializationFormat, data: &[u8]) -> ResourceInfo {
        let module = ModuleInfo::net_framework("App");
        let names = TypeNameResolver::new(&module, HostEnvironment::default());
        let payload = ResourcePayload::Binary(BinaryResourceData::new(
            format,
            "Vendor.Widget, Vendor",
            data.to_vec(),
        ));
        format_payload(&payload, &names).unwrap()
    }

    #[test]
    fn test_string_is_plain() {
        let info = format(ResourceType::String("hello".into())).unwrap();

        assert_eq!(info, ResourceInfo::plain("hello"));
        assert!(info.preserves_space());
    }

    #[test]
    fn test_char() {
        let zero = format(ResourceType::Char('\0')).unwrap();
        assert_eq!(zero.value, "");
        assert_eq!(zero.type_name, Some(format!("System.Char, {MSCORLIB}")));
        assert!(zero.preserves_space());

        assert_eq!(format(ResourceType::Char('x')).unwrap().value, "x");
    }

    #[test]
    fn test_primitives() {
        assert_eq!(format(ResourceType::Boolean(true)).unwrap().value, "True");
        assert_eq!(format(ResourceType::Boolean(false)).unwrap().value, "False");
        assert_eq!(format(ResourceType::SByte(-128)).unwrap().value, "-128");
        assert_eq!(format(ResourceType::UInt64(u64::MAX)).unwrap().value, "18446744073709551615");
        assert_eq!(format(ResourceType::Double(2.5)).unwrap().value, "2.5");

        let int = format(ResourceType::Int32(7)).unwrap();
        assert_eq!(int.type_name, Some(format!("System.Int32, {MSCORLIB}")));
        assert_eq!(int.mime_type, None);
        assert!(!int.preserves_space());
    }

    #[test]
    fn test_null() {
        let info = format(ResourceType::Null).unwrap();

        assert_eq!(info.value, "");
        assert_eq!(
            info.type_name.as_deref(),
            Some("System.Resources.ResXNullRef, System.Windows.Forms, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089")
        );
    }

    #[test]
    fn test_byte_array() {
        let info = format(ResourceType::ByteArray(vec![1, 2, 3])).unwrap();

        assert_eq!(info.value, "AQID");
        assert_eq!(info.type_name, Some(format!("System.Byte[], {MSCORLIB}")));
        assert_eq!(info.mime_type, None);
    }

    #[test]
    fn test_stream_has_mime_type_only() {
        let info = format(ResourceType::Stream(vec![0xFF; 4])).unwrap();

        assert_eq!(info.type_name, None);
        assert_eq!(info.mime_type, Some(BIN_SERIALIZED_OBJECT_MIME_TYPE));
        assert!(!info.preserves_space());
        assert!(info.value.starts_with("\r\n        AAEAAAD/////"));
    }

    #[test]
    fn test_start_of_user_types_is_rejected() {
        assert!(matches!(
            format(ResourceType::StartOfUserTypes),
            Err(Error::UnsupportedPayload(_))
        ));
    }

    #[test]
    fn test_serialized_formats() {
        let binary = format_serialized(SerializationFormat::BinaryFormatter, &[0, 1]);
        assert_eq!(binary.value, "AAE=");
        assert_eq!(binary.type_name.as_deref(), Some("Vendor.Widget, Vendor"));
        assert_eq!(binary.mime_type, Some(BIN_SERIALIZED_OBJECT_MIME_TYPE));

        for serialization in [
            SerializationFormat::TypeConverterByteArray,
            SerializationFormat::ActivatorStream,
        ] {
            let info = format_serialized(serialization, &[0, 1]);
            assert_eq!(info.mime_type, Some(BYTE_ARRAY_SERIALIZED_OBJECT_MIME_TYPE));
            assert_eq!(info.value, "AAE=");
        }

        let text = format_serialized(SerializationFormat::TypeConverterString, b"12, 34");
        assert_eq!(text, ResourceInfo::typed("12, 34", "Vendor.Widget, Vendor"));
    }

    #[test]
    fn test_converter_string_replaces_invalid_utf8() {
        let text = format_serialized(SerializationFormat::TypeConverterString, &[b'a', 0xFF, b'b']);
        assert_eq!(text.value, "a\u{FFFD}b");
    }
}
