//! Core library types referenced by resource type names.
//!
//! Every built-in resource type code maps onto a type defined in the core library of the
//! module (`mscorlib`, `System.Private.CoreLib`, `System.Runtime`, ...). The writer never
//! hard-codes the assembly part of those names; it only knows the namespace and name of the
//! type and asks the [`crate::metadata::typesystem::ModuleContext`] for a reference in the
//! module's own core library.

use strum::{EnumIter, IntoStaticStr};

/// Types from the core library that resource values are typed with.
///
/// The set covers the primitive value types, `System.String`, the three well-known
/// structs without an ECMA-335 element type (`Decimal`, `DateTime`, `TimeSpan`) and
/// `System.IO.MemoryStream`, which stream resources are deserialized as.
///
/// # Examples
///
/// ```rust
/// use dotresx::metadata::typesystem::CorLibType;
///
/// assert_eq!(CorLibType::Int32.full_name(), "System.Int32");
/// assert_eq!(CorLibType::MemoryStream.namespace(), "System.IO");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum CorLibType {
    /// System.Boolean - true/false value
    Boolean,
    /// System.Char - Unicode 16-bit character
    Char,
    /// System.SByte - signed 8-bit integer
    SByte,
    /// System.Byte - unsigned 8-bit integer
    Byte,
    /// System.Int16 - signed 16-bit integer
    Int16,
    /// System.UInt16 - unsigned 16-bit integer
    UInt16,
    /// System.Int32 - signed 32-bit integer
    Int32,
    /// System.UInt32 - unsigned 32-bit integer
    UInt32,
    /// System.Int64 - signed 64-bit integer
    Int64,
    /// System.UInt64 - unsigned 64-bit integer
    UInt64,
    /// System.Single - 32-bit floating point
    Single,
    /// System.Double - 64-bit floating point
    Double,
    /// System.String - immutable string of Unicode characters
    String,
    /// System.Decimal - 128-bit decimal floating point
    Decimal,
    /// System.DateTime - point in time
    DateTime,
    /// System.TimeSpan - time interval
    TimeSpan,
    /// System.IO.MemoryStream - growable in-memory byte stream
    MemoryStream,
}

impl CorLibType {
    /// Get the namespace of this type
    #[must_use]
    pub fn namespace(&self) -> &'static str {
        match self {
            CorLibType::MemoryStream => "System.IO",
            _ => "System",
        }
    }

    /// Get the short name (without namespace)
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Get the CLR full type name (with namespace)
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace(), self.name())
    }
}
