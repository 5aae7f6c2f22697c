//! Assembly-qualified type names for resx documents.
//!
//! Every `type` attribute of a resx document and the `reader`/`writer` headers carry an
//! assembly-qualified type name. Those names must point at the assemblies the exported
//! module was compiled against, not at whatever the exporting process happens to have
//! loaded.
//!
//! # Resolution
//!
//! - Built-in resource type codes resolve through the module's core library, following a
//!   fixed table ([`TypeRecipe::for_code`]).
//! - The null marker `System.Resources.ResXNullRef` resolves against the module's
//!   `System.Windows.Forms` reference if there is one, otherwise against the host.
//! - Host types are retargeted: when the module declares a reference to the same assembly
//!   at another version, the declared identity replaces the loaded one.

use std::collections::HashMap;

use crate::{
    metadata::{
        identity::{AssemblyIdentity, AssemblyKey, AssemblyNameComparer},
        resources::ResourceTypeCode,
        typesystem::{
            CorLibType, HostType, HostTypes, ModuleContext, TypeRef, TypeSig, RESX_NULL_REF,
            RESX_RESOURCE_READER, RESX_RESOURCE_WRITER,
        },
    },
    Error, Result,
};

/// Simple name of the assembly defining the Windows Forms resx types.
const FORMS_ASSEMBLY: &str = "System.Windows.Forms";

/// How the type name of a built-in resource type code is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRecipe {
    /// A type of the module's core library
    CorLib(CorLibType),
    /// A single-dimension array of a core library type
    CorLibArray(CorLibType),
    /// The `ResXNullRef` marker type
    NullRef,
}

impl TypeRecipe {
    /// The recipe for `code`, `None` for codes without a type name.
    #[must_use]
    pub const fn for_code(code: ResourceTypeCode) -> Option<Self> {
        Some(match code {
            ResourceTypeCode::Null => TypeRecipe::NullRef,
            ResourceTypeCode::String => TypeRecipe::CorLib(CorLibType::String),
            ResourceTypeCode::Boolean => TypeRecipe::CorLib(CorLibType::Boolean),
            ResourceTypeCode::Char => TypeRecipe::CorLib(CorLibType::Char),
            ResourceTypeCode::Byte => TypeRecipe::CorLib(CorLibType::Byte),
            ResourceTypeCode::SByte => TypeRecipe::CorLib(CorLibType::SByte),
            ResourceTypeCode::Int16 => TypeRecipe::CorLib(CorLibType::Int16),
            ResourceTypeCode::UInt16 => TypeRecipe::CorLib(CorLibType::UInt16),
            ResourceTypeCode::Int32 => TypeRecipe::CorLib(CorLibType::Int32),
            ResourceTypeCode::UInt32 => TypeRecipe::CorLib(CorLibType::UInt32),
            ResourceTypeCode::Int64 => TypeRecipe::CorLib(CorLibType::Int64),
            ResourceTypeCode::UInt64 => TypeRecipe::CorLib(CorLibType::UInt64),
            ResourceTypeCode::Single => TypeRecipe::CorLib(CorLibType::Single),
            ResourceTypeCode::Double => TypeRecipe::CorLib(CorLibType::Double),
            ResourceTypeCode::Decimal => TypeRecipe::CorLib(CorLibType::Decimal),
            ResourceTypeCode::DateTime => TypeRecipe::CorLib(CorLibType::DateTime),
            ResourceTypeCode::TimeSpan => TypeRecipe::CorLib(CorLibType::TimeSpan),
            ResourceTypeCode::ByteArray => TypeRecipe::CorLibArray(CorLibType::Byte),
            ResourceTypeCode::Stream => TypeRecipe::CorLib(CorLibType::MemoryStream),
            ResourceTypeCode::StartOfUserTypes => return None,
        })
    }
}

/// Resolves the type names written into a resx document.
///
/// The map from declared assembly references is built once, keyed by identity without
/// version, and never changes afterwards. When a module declares the same assembly more
/// than once, the last declaration wins.
///
/// # Examples
///
/// ```rust
/// use dotresx::{
///     metadata::{
///         identity::AssemblyIdentity,
///         resources::ResourceTypeCode,
///         typesystem::{HostEnvironment, ModuleInfo},
///     },
///     resx::TypeNameResolver,
/// };
///
/// let forms = AssemblyIdentity::parse(
///     "System.Windows.Forms, Version=2.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
/// )?;
/// let module = ModuleInfo::net_framework("LegacyApp").with_assembly_ref(forms);
/// let resolver = TypeNameResolver::new(&module, HostEnvironment::net_framework());
///
/// assert_eq!(
///     resolver.reader_type_name()?,
///     "System.Resources.ResXResourceReader, System.Windows.Forms, Version=2.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
/// );
/// assert_eq!(
///     resolver.code_type_name(ResourceTypeCode::Int32)?,
///     "System.Int32, mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
/// );
/// # Ok::<(), dotresx::Error>(())
/// ```
pub struct TypeNameResolver<'a> {
    module: &'a dyn ModuleContext,
    host: Box<dyn HostTypes + 'a>,
    declared: HashMap<AssemblyKey, AssemblyIdentity>,
}

impl<'a> TypeNameResolver<'a> {
    /// Create a resolver for `module`, exported from a process described by `host`.
    pub fn new(module: &'a dyn ModuleContext, host: impl HostTypes + 'a) -> Self {
        let comparer = AssemblyNameComparer::IGNORE_VERSION;
        let declared = module
            .assembly_refs()
            .iter()
            .map(|asm_ref| (comparer.key(asm_ref), asm_ref.clone()))
            .collect();

        TypeNameResolver {
            module,
            host: Box::new(host),
            declared,
        }
    }

    /// The type name of a built-in resource type code.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedPayload`] for codes without a type name
    /// - [`Error::TypeResolutionFailure`] if the null marker type cannot be resolved
    pub fn code_type_name(&self, code: ResourceTypeCode) -> Result<String> {
        let recipe = TypeRecipe::for_code(code)
            .ok_or_else(|| unsupported_payload!("type code {} has no type name", code))?;

        Ok(match recipe {
            TypeRecipe::CorLib(ty) => self.module.corlib_type(ty).assembly_qualified_name(),
            TypeRecipe::CorLibArray(ty) => {
                TypeSig::sz_array(self.module.corlib_type(ty)).assembly_qualified_name()
            }
            TypeRecipe::NullRef => self.null_ref_type_name()?,
        })
    }

    /// The type name of `System.Resources.ResXNullRef`.
    ///
    /// A module referencing `System.Windows.Forms` gets the marker in that exact
    /// reference. Otherwise the host's marker type is used and retargeted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeResolutionFailure`] if the host does not know the marker type.
    pub fn null_ref_type_name(&self) -> Result<String> {
        if let Some(forms) = self.module.assembly_ref(FORMS_ASSEMBLY) {
            let (namespace, name) = split_full_name(RESX_NULL_REF);
            return Ok(TypeRef::new(namespace, name, forms.clone()).assembly_qualified_name());
        }

        self.resolve_host_type(RESX_NULL_REF)
    }

    /// The type name for the `reader` header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeResolutionFailure`] if the host does not know the reader type.
    pub fn reader_type_name(&self) -> Result<String> {
        self.resolve_host_type(RESX_RESOURCE_READER)
    }

    /// The type name for the `writer` header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeResolutionFailure`] if the host does not know the writer type.
    pub fn writer_type_name(&self) -> Result<String> {
        self.resolve_host_type(RESX_RESOURCE_WRITER)
    }

    /// Look up a host type by full name and return its retargeted name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeResolutionFailure`] if the host does not know the type.
    pub fn resolve_host_type(&self, full_name: &str) -> Result<String> {
        let ty = self.host.find_type(full_name).ok_or_else(|| {
            Error::TypeResolutionFailure(format!("{full_name} is not loaded by the host"))
        })?;

        Ok(self.retarget(&ty))
    }

    /// The assembly-qualified name of a host type, pointed at the module's references.
    ///
    /// Generic types, types from assemblies the module does not reference and types whose
    /// declared reference is identical to the loaded assembly keep their loaded name.
    #[must_use]
    pub fn retarget(&self, ty: &HostType) -> String {
        let key = AssemblyNameComparer::IGNORE_VERSION.key(&ty.assembly);
        let Some(declared) = self.declared.get(&key) else {
            return ty.assembly_qualified_name();
        };

        if ty.is_generic() || AssemblyNameComparer::ALL.equals(declared, &ty.assembly) {
            return ty.assembly_qualified_name();
        }

        format!("{}, {}", ty.full_name(), declared.display_name())
    }
}

fn split_full_name(full_name: &str) -> (&str, &str) {
    full_name.rsplit_once('.').unwrap_or(("", full_name))
}
