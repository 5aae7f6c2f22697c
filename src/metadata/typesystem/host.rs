//! The exporting host's view of the type system.
//!
//! A handful of names in a resx document refer to types of the Windows Forms resx
//! implementation itself (`ResXResourceReader`, `ResXResourceWriter` and the
//! `ResXNullRef` marker). The original writers obtained those names from the types loaded
//! into the running process. [`HostTypes`] abstracts that lookup; [`HostEnvironment`]
//! describes the usual hosts without needing a runtime.

use crate::metadata::{
    identity::{AssemblyIdentity, AssemblyVersion},
    typesystem::ECMA_TOKEN,
};

/// Full name of the null marker type.
pub(crate) const RESX_NULL_REF: &str = "System.Resources.ResXNullRef";
/// Full name of the canonical resx reader.
pub(crate) const RESX_RESOURCE_READER: &str = "System.Resources.ResXResourceReader";
/// Full name of the canonical resx writer.
pub(crate) const RESX_RESOURCE_WRITER: &str = "System.Resources.ResXResourceWriter";

/// A type as loaded by the exporting host.
///
/// Unlike [`crate::metadata::typesystem::TypeRef`] a host type can be a generic
/// instantiation, in which case its assembly-qualified name embeds the assembly-qualified
/// names of its generic arguments.
///
/// # Examples
///
/// ```rust
/// use dotresx::metadata::{identity::AssemblyIdentity, typesystem::HostType};
///
/// let mscorlib = AssemblyIdentity::parse("mscorlib, Version=4.0.0.0, PublicKeyToken=b77a5c561934e089")?;
/// let string = HostType::new("System", "String", mscorlib.clone());
/// let list = HostType::new("System.Collections.Generic", "List`1", mscorlib)
///     .with_generic_arguments(vec![string]);
///
/// assert!(list.is_generic());
/// assert_eq!(
///     list.full_name(),
///     "System.Collections.Generic.List`1[[System.String, mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089]]"
/// );
/// # Ok::<(), dotresx::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostType {
    /// `TypeNamespace` (can be empty)
    pub namespace: String,
    /// `TypeName`, including the generic arity suffix for generic types
    pub name: String,
    /// The assembly the host loaded the type from
    pub assembly: AssemblyIdentity,
    /// Generic arguments of a closed generic instantiation
    pub generic_arguments: Vec<HostType>,
    /// `true` for an open generic type definition
    pub is_generic_definition: bool,
}

impl HostType {
    /// Create a non-generic host type.
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        assembly: AssemblyIdentity,
    ) -> Self {
        HostType {
            namespace: namespace.into(),
            name: name.into(),
            assembly,
            generic_arguments: Vec::new(),
            is_generic_definition: false,
        }
    }

    /// Turn this type into a closed generic instantiation over `arguments`.
    #[must_use]
    pub fn with_generic_arguments(mut self, arguments: Vec<HostType>) -> Self {
        self.generic_arguments = arguments;
        self.is_generic_definition = false;
        self
    }

    /// Turn this type into an open generic type definition.
    #[must_use]
    pub fn into_generic_definition(mut self) -> Self {
        self.generic_arguments.clear();
        self.is_generic_definition = true;
        self
    }

    /// Returns `true` for open and closed generic types.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.is_generic_definition || !self.generic_arguments.is_empty()
    }

    /// The full name without generic arguments (Namespace.Name).
    #[must_use]
    pub fn plain_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// The full name as reported by the runtime.
    ///
    /// Closed generic instantiations append `[[arg1],[arg2]]`, each argument in its
    /// assembly-qualified form.
    #[must_use]
    pub fn full_name(&self) -> String {
        let mut full_name = self.plain_name();
        if !self.generic_arguments.is_empty() {
            let arguments: Vec<String> = self
                .generic_arguments
                .iter()
                .map(|argument| format!("[{}]", argument.assembly_qualified_name()))
                .collect();
            full_name.push('[');
            full_name.push_str(&arguments.join(","));
            full_name.push(']');
        }
        full_name
    }

    /// The full name followed by the display name of the loaded assembly.
    #[must_use]
    pub fn assembly_qualified_name(&self) -> String {
        format!("{}, {}", self.full_name(), self.assembly.display_name())
    }
}

/// Lookup of types loaded by the exporting host.
pub trait HostTypes {
    /// Find a loaded type by its full name (Namespace.Name).
    fn find_type(&self, full_name: &str) -> Option<HostType>;
}

impl<T: HostTypes + ?Sized> HostTypes for &T {
    fn find_type(&self, full_name: &str) -> Option<HostType> {
        (**self).find_type(full_name)
    }
}

/// A description of the host process the export pretends to run in.
///
/// The environment knows the three Windows Forms resx types, all defined in
/// `forms_assembly`, plus any additional types registered with
/// [`HostEnvironment::with_type`].
///
/// # Examples
///
/// ```rust
/// use dotresx::metadata::typesystem::{HostEnvironment, HostTypes};
///
/// let host = HostEnvironment::net(8);
/// let reader = host.find_type("System.Resources.ResXResourceReader").unwrap();
///
/// assert_eq!(
///     reader.assembly_qualified_name(),
///     "System.Resources.ResXResourceReader, System.Windows.Forms, Version=8.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnvironment {
    /// The Windows Forms assembly the resx types are loaded from
    pub forms_assembly: AssemblyIdentity,
    /// Additional loaded types
    pub types: Vec<HostType>,
}

impl HostEnvironment {
    /// Create an environment whose resx types live in `forms_assembly`.
    #[must_use]
    pub fn new(forms_assembly: AssemblyIdentity) -> Self {
        HostEnvironment {
            forms_assembly,
            types: Vec::new(),
        }
    }

    /// A .NET Framework 4.x host (`System.Windows.Forms, Version=4.0.0.0`).
    #[must_use]
    pub fn net_framework() -> Self {
        Self::net(4)
    }

    /// A modern .NET `major` host (`System.Windows.Forms, Version=major.0.0.0`).
    #[must_use]
    pub fn net(major: u16) -> Self {
        Self::new(AssemblyIdentity::new(
            "System.Windows.Forms",
            AssemblyVersion::new(major, 0, 0, 0),
            None,
            Some(ECMA_TOKEN),
        ))
    }

    /// Register an additional loaded type.
    #[must_use]
    pub fn with_type(mut self, ty: HostType) -> Self {
        self.types.push(ty);
        self
    }
}

impl Default for HostEnvironment {
    fn default() -> Self {
        Self::net_framework()
    }
}

impl HostTypes for HostEnvironment {
    fn find_type(&self, full_name: &str) -> Option<HostType> {
        if let Some(found) = self.types.iter().find(|ty| ty.plain_name() == full_name) {
            return Some(found.clone());
        }

        match full_name {
            RESX_NULL_REF | RESX_RESOURCE_READER | RESX_RESOURCE_WRITER => {
                let (namespace, name) = full_name.rsplit_once('.')?;
                Some(HostType::new(namespace, name, self.forms_assembly.clone()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_net_framework() {
        let host = HostEnvironment::default();
        let null_ref = host.find_type(RESX_NULL_REF).unwrap();

        assert_eq!(
            null_ref.assembly_qualified_name(),
            "System.Resources.ResXNullRef, System.Windows.Forms, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
        );
        assert!(!null_ref.is_generic());
    }

    #[test]
    fn test_unknown_type() {
        assert!(HostEnvironment::net(8).find_type("System.Drawing.Bitmap").is_none());
    }

    #[test]
    fn test_registered_type_wins() {
        let custom = AssemblyIdentity::parse("Custom.Forms, Version=1.2.0.0").unwrap();
        let host = HostEnvironment::net_framework().with_type(HostType::new(
            "System.Resources",
            "ResXResourceWriter",
            custom.clone(),
        ));

        assert_eq!(host.find_type(RESX_RESOURCE_WRITER).unwrap().assembly, custom);
    }

    #[test]
    fn test_generic_shapes() {
        let mscorlib = AssemblyIdentity::parse("mscorlib, Version=4.0.0.0").unwrap();
        let open = HostType::new("System", "Nullable`1", mscorlib.clone()).into_generic_definition();
        let closed = HostType::new("System", "Nullable`1", mscorlib.clone())
            .with_generic_arguments(vec![HostType::new("System", "Int32", mscorlib)]);

        assert!(open.is_generic());
        assert_eq!(open.full_name(), "System.Nullable`1");
        assert!(closed.is_generic());
        assert!(closed.full_name().starts_with("System.Nullable`1[[System.Int32, mscorlib, "));
    }
}
