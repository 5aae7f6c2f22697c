//! Minimal .NET type references for producing assembly-qualified type names.
//!
//! The resx writer only needs to *name* types, never to inspect them. This module
//! provides the two sides it names types against:
//!
//! - The **module under export**, described by a [`ModuleContext`]: its declared
//!   assembly references and its core library. Type names resolved through the module
//!   always match the framework version the module was compiled against.
//! - The **host**, described by [`HostTypes`]: the types the exporting process itself has
//!   loaded. Names resolved through the host carry the host's assembly versions and are
//!   retargeted by the writer before being emitted.
//!
//! # Key Components
//!
//! - [`TypeRef`] - Namespace, name and defining assembly of a type
//! - [`TypeSig`] - A type reference or a single-dimension array of one
//! - [`CorLibType`] - Core library types used by built-in resource values
//! - [`ModuleContext`] / [`ModuleInfo`] - The exported module's view of types
//! - [`HostTypes`] / [`HostType`] / [`HostEnvironment`] - The exporting host's view of types
//!
//! # Examples
//!
//! ```rust
//! use dotresx::metadata::typesystem::{CorLibType, ModuleContext, ModuleInfo};
//!
//! let module = ModuleInfo::net_framework("MyApp");
//! let string = module.corlib_type(CorLibType::String);
//!
//! assert_eq!(
//!     string.assembly_qualified_name(),
//!     "System.String, mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
//! );
//! ```

mod host;
mod module;
mod primitives;

pub use host::{HostEnvironment, HostType, HostTypes};
pub(crate) use host::{RESX_NULL_REF, RESX_RESOURCE_READER, RESX_RESOURCE_WRITER};
pub use module::{ModuleContext, ModuleInfo};
pub use primitives::CorLibType;

use crate::metadata::identity::AssemblyIdentity;

/// Public key token of the ECMA key, used by `mscorlib` and Windows Forms.
pub(crate) const ECMA_TOKEN: [u8; 8] = [0xb7, 0x7a, 0x5c, 0x56, 0x19, 0x34, 0xe0, 0x89];
/// Public key token of the Microsoft key, used by the .NET reference assemblies.
pub(crate) const MICROSOFT_TOKEN: [u8; 8] = [0xb0, 0x3f, 0x5f, 0x7f, 0x11, 0xd5, 0x0a, 0x3a];

/// A reference to a type defined in another assembly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// `TypeNamespace` (can be empty)
    pub namespace: String,
    /// `TypeName`
    pub name: String,
    /// The assembly the type is defined in
    pub assembly: AssemblyIdentity,
}

impl TypeRef {
    /// Create a new type reference.
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        assembly: AssemblyIdentity,
    ) -> Self {
        TypeRef {
            namespace: namespace.into(),
            name: name.into(),
            assembly,
        }
    }

    /// Returns the full name (Namespace.Name) of the type
    #[must_use]
    pub fn fullname(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{0}.{1}", self.namespace, self.name)
        }
    }

    /// Returns the full name followed by the display name of the defining assembly
    #[must_use]
    pub fn assembly_qualified_name(&self) -> String {
        format!("{}, {}", self.fullname(), self.assembly.display_name())
    }
}

/// A type signature as far as resource type names need one.
///
/// # Examples
///
/// ```rust
/// use dotresx::metadata::typesystem::{CorLibType, ModuleContext, ModuleInfo, TypeSig};
///
/// let module = ModuleInfo::net_framework("MyApp");
/// let bytes = TypeSig::sz_array(module.corlib_type(CorLibType::Byte));
///
/// assert!(bytes.assembly_qualified_name().starts_with("System.Byte[], mscorlib, "));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSig {
    /// A plain type reference
    TypeRef(TypeRef),
    /// A single-dimension, zero-based array of the element type
    SzArray(Box<TypeSig>),
}

impl TypeSig {
    /// Build a single-dimension array of `element`.
    #[must_use]
    pub fn sz_array(element: TypeSig) -> Self {
        TypeSig::SzArray(Box::new(element))
    }

    /// The type reference at the innermost level of this signature.
    #[must_use]
    pub fn element(&self) -> &TypeRef {
        match self {
            TypeSig::TypeRef(type_ref) => type_ref,
            TypeSig::SzArray(inner) => inner.element(),
        }
    }

    /// Returns the full name, including array suffixes.
    #[must_use]
    pub fn fullname(&self) -> String {
        match self {
            TypeSig::TypeRef(type_ref) => type_ref.fullname(),
            TypeSig::SzArray(inner) => format!("{}[]", inner.fullname()),
        }
    }

    /// Returns the full name followed by the display name of the defining assembly.
    #[must_use]
    pub fn assembly_qualified_name(&self) -> String {
        format!(
            "{}, {}",
            self.fullname(),
            self.element().assembly.display_name()
        )
    }
}

impl From<TypeRef> for TypeSig {
    fn from(type_ref: TypeRef) -> Self {
        TypeSig::TypeRef(type_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::identity::AssemblyVersion;

    fn mscorlib() -> AssemblyIdentity {
        AssemblyIdentity::parse(
            "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
        )
        .unwrap()
    }

    #[test]
    fn test_type_ref_names() {
        let type_ref = TypeRef::new("System.IO", "MemoryStream", mscorlib());

        assert_eq!(type_ref.fullname(), "System.IO.MemoryStream");
        assert_eq!(
            type_ref.assembly_qualified_name(),
            "System.IO.MemoryStream, mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
        );
    }

    #[test]
    fn test_type_ref_without_namespace() {
        let assembly = AssemblyIdentity::new("Lib", AssemblyVersion::new(1, 0, 0, 0), None, None);
        let type_ref = TypeRef::new("", "Globals", assembly);

        assert_eq!(type_ref.fullname(), "Globals");
    }

    #[test]
    fn test_sz_array_names() {
        let byte = TypeSig::from(TypeRef::new("System", "Byte", mscorlib()));
        let jagged = TypeSig::sz_array(TypeSig::sz_array(byte));

        assert_eq!(jagged.fullname(), "System.Byte[][]");
        assert_eq!(jagged.element().name, "Byte");
        assert_eq!(
            jagged.assembly_qualified_name(),
            "System.Byte[][], mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
        );
    }
}
