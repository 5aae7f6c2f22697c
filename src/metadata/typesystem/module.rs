//! The exported module's view of the type system.

use crate::metadata::{
    identity::{AssemblyIdentity, AssemblyVersion},
    typesystem::{CorLibType, TypeRef, TypeSig, ECMA_TOKEN, MICROSOFT_TOKEN},
};

/// What the resx writer needs to know about the module whose resources it exports.
///
/// Implemented by whatever metadata layer loaded the module. Type references handed out
/// here must be expressed in terms of the module's own references, so that emitted type
/// names target the same framework the module was built against.
pub trait ModuleContext {
    /// The assembly references declared by the module, in metadata order.
    fn assembly_refs(&self) -> &[AssemblyIdentity];

    /// A reference to the type `namespace.name` in the module's core library.
    fn corlib_type_ref(&self, namespace: &str, name: &str) -> TypeRef;

    /// A reference to one of the well-known core library types.
    fn corlib_type(&self, ty: CorLibType) -> TypeSig {
        TypeSig::TypeRef(self.corlib_type_ref(ty.namespace(), ty.name()))
    }

    /// The first declared assembly reference whose simple name is exactly `name`.
    fn assembly_ref(&self, name: &str) -> Option<&AssemblyIdentity> {
        self.assembly_refs().iter().find(|asm_ref| asm_ref.name == name)
    }
}

/// A plain [`ModuleContext`] built from a core library identity and a list of references.
///
/// # Examples
///
/// ```rust
/// use dotresx::metadata::{identity::AssemblyIdentity, typesystem::{ModuleContext, ModuleInfo}};
///
/// let forms = AssemblyIdentity::parse(
///     "System.Windows.Forms, Version=2.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
/// )?;
/// let module = ModuleInfo::net_framework("WinApp").with_assembly_ref(forms);
///
/// assert_eq!(module.assembly_refs().len(), 2);
/// assert!(module.assembly_ref("System.Windows.Forms").is_some());
/// # Ok::<(), dotresx::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Module name, used for diagnostics only
    pub name: String,
    /// The identity of the core library the module was compiled against
    pub corlib: AssemblyIdentity,
    /// Declared assembly references
    pub assembly_refs: Vec<AssemblyIdentity>,
}

impl ModuleInfo {
    /// Create a module that references nothing but its core library.
    pub fn new(name: impl Into<String>, corlib: AssemblyIdentity) -> Self {
        ModuleInfo {
            name: name.into(),
            assembly_refs: vec![corlib.clone()],
            corlib,
        }
    }

    /// A module compiled against .NET Framework 4.x (`mscorlib, Version=4.0.0.0`).
    pub fn net_framework(name: impl Into<String>) -> Self {
        Self::new(
            name,
            AssemblyIdentity::new(
                "mscorlib",
                AssemblyVersion::new(4, 0, 0, 0),
                None,
                Some(ECMA_TOKEN),
            ),
        )
    }

    /// A module compiled against reference assemblies of .NET `major` (`System.Runtime`).
    pub fn net(name: impl Into<String>, major: u16) -> Self {
        Self::new(
            name,
            AssemblyIdentity::new(
                "System.Runtime",
                AssemblyVersion::new(major, 0, 0, 0),
                None,
                Some(MICROSOFT_TOKEN),
            ),
        )
    }

    /// Add a declared assembly reference.
    #[must_use]
    pub fn with_assembly_ref(mut self, assembly: AssemblyIdentity) -> Self {
        self.assembly_refs.push(assembly);
        self
    }
}

impl ModuleContext for ModuleInfo {
    fn assembly_refs(&self) -> &[AssemblyIdentity] {
        &self.assembly_refs
    }

    fn corlib_type_ref(&self, namespace: &str, name: &str) -> TypeRef {
        TypeRef::new(namespace, name, self.corlib.clone())
    }
}
