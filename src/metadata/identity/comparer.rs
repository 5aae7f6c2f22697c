//! Configurable equality over [`AssemblyIdentity`] values.
//!
//! The runtime binder and dnlib both compare assembly names loosely: simple names and
//! cultures are case-insensitive, and an absent culture is the same as `neutral`.
//! [`AssemblyNameComparer`] implements that policy and lets callers drop individual
//! components from the comparison. The resx writer uses
//! [`AssemblyNameComparer::IGNORE_VERSION`] to find the declared reference that
//! corresponds to an assembly loaded by the host at a different version.

use bitflags::bitflags;

use crate::metadata::identity::{AssemblyIdentity, AssemblyVersion};

bitflags! {
    /// Identity components taken into account by an [`AssemblyNameComparer`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AssemblyNameComparerFlags: u8 {
        /// Compare the simple name (case-insensitive)
        const NAME = 0x01;
        /// Compare the four-part version
        const VERSION = 0x02;
        /// Compare the culture (case-insensitive, `None` equals `neutral`)
        const CULTURE = 0x04;
        /// Compare the public key token
        const PUBLIC_KEY_TOKEN = 0x08;
        /// Compare every component
        const ALL = Self::NAME.bits()
            | Self::VERSION.bits()
            | Self::CULTURE.bits()
            | Self::PUBLIC_KEY_TOKEN.bits();
    }
}

/// Normalized projection of an [`AssemblyIdentity`] under a comparer policy.
///
/// Two identities are equal under a comparer exactly when their keys are equal, which
/// makes the key usable in a `HashMap` without wrapping the identity itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssemblyKey {
    name: Option<String>,
    version: Option<AssemblyVersion>,
    culture: Option<Option<String>>,
    public_key_token: Option<Option<[u8; 8]>>,
}

/// Equality policy over assembly identities.
///
/// # Examples
///
/// ```rust
/// use dotresx::metadata::identity::{AssemblyIdentity, AssemblyNameComparer};
///
/// let a = AssemblyIdentity::parse("System.Windows.Forms, Version=4.0.0.0, Culture=neutral")?;
/// let b = AssemblyIdentity::parse("system.windows.forms, Version=8.0.0.0")?;
///
/// assert!(AssemblyNameComparer::IGNORE_VERSION.equals(&a, &b));
/// assert!(!AssemblyNameComparer::ALL.equals(&a, &b));
/// # Ok::<(), dotresx::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyNameComparer {
    flags: AssemblyNameComparerFlags,
}

impl AssemblyNameComparer {
    /// Compares every identity component.
    pub const ALL: Self = Self::new(AssemblyNameComparerFlags::ALL);

    /// Compares every identity component except the version.
    pub const IGNORE_VERSION: Self = Self::new(AssemblyNameComparerFlags::ALL.difference(
        AssemblyNameComparerFlags::VERSION,
    ));

    /// Create a comparer that looks at the given components.
    #[must_use]
    pub const fn new(flags: AssemblyNameComparerFlags) -> Self {
        Self { flags }
    }

    /// The components this comparer looks at.
    #[must_use]
    pub const fn flags(&self) -> AssemblyNameComparerFlags {
        self.flags
    }

    /// Returns `true` if `a` and `b` are equal under this policy.
    #[must_use]
    pub fn equals(&self, a: &AssemblyIdentity, b: &AssemblyIdentity) -> bool {
        self.key(a) == self.key(b)
    }

    /// Project `identity` onto the components this comparer looks at.
    #[must_use]
    pub fn key(&self, identity: &AssemblyIdentity) -> AssemblyKey {
        let flags = self.flags;

        AssemblyKey {
            name: flags
                .contains(AssemblyNameComparerFlags::NAME)
                .then(|| identity.name.to_ascii_lowercase()),
            version: flags
                .contains(AssemblyNameComparerFlags::VERSION)
                .then_some(identity.version),
            culture: flags.contains(AssemblyNameComparerFlags::CULTURE).then(|| {
                if identity.is_culture_neutral() {
                    None
                } else {
                    identity.culture.as_deref().map(str::to_ascii_lowercase)
                }
            }),
            public_key_token: flags
                .contains(AssemblyNameComparerFlags::PUBLIC_KEY_TOKEN)
                .then_some(identity.public_key_token),
        }
    }
}

impl Default for AssemblyNameComparer {
    fn default() -> Self {
        Self::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(display_name: &str) -> AssemblyIdentity {
        AssemblyIdentity::parse(display_name).unwrap()
    }

    #[test]
    fn test_all_requires_same_version() {
        let v1 = identity("LibA, Version=1.0.0.0, Culture=neutral, PublicKeyToken=null");
        let v2 = identity("LibA, Version=2.0.0.0, Culture=neutral, PublicKeyToken=null");

        assert!(AssemblyNameComparer::ALL.equals(&v1, &v1.clone()));
        assert!(!AssemblyNameComparer::ALL.equals(&v1, &v2));
    }

    #[test]
    fn test_ignore_version() {
        let v1 = identity("LibA, Version=1.0.0.0, Culture=neutral, PublicKeyToken=null");
        let v2 = identity("LibA, Version=2.0.0.0, Culture=neutral, PublicKeyToken=null");

        assert!(AssemblyNameComparer::IGNORE_VERSION.equals(&v1, &v2));
        assert_eq!(
            AssemblyNameComparer::IGNORE_VERSION.key(&v1),
            AssemblyNameComparer::IGNORE_VERSION.key(&v2)
        );
    }

    #[test]
    fn test_name_is_case_insensitive() {
        let a = identity("System.Windows.Forms, Version=4.0.0.0");
        let b = identity("SYSTEM.WINDOWS.FORMS, Version=4.0.0.0");

        assert!(AssemblyNameComparer::ALL.equals(&a, &b));
    }

    #[test]
    fn test_neutral_culture_equivalence() {
        let implicit = identity("LibA, Version=1.0.0.0");
        let explicit = AssemblyIdentity {
            culture: Some("neutral".to_string()),
            ..implicit.clone()
        };
        let german = identity("LibA, Version=1.0.0.0, Culture=de-DE");

        assert!(AssemblyNameComparer::ALL.equals(&implicit, &explicit));
        assert!(!AssemblyNameComparer::ALL.equals(&implicit, &german));
    }

    #[test]
    fn test_token_is_compared() {
        let signed = identity("LibA, Version=1.0.0.0, PublicKeyToken=b77a5c561934e089");
        let unsigned = identity("LibA, Version=1.0.0.0, PublicKeyToken=null");

        assert!(!AssemblyNameComparer::IGNORE_VERSION.equals(&signed, &unsigned));

        let name_only = AssemblyNameComparer::new(AssemblyNameComparerFlags::NAME);
        assert!(name_only.equals(&signed, &unsigned));
    }

    #[test]
    fn test_flags() {
        assert!(!AssemblyNameComparer::IGNORE_VERSION
            .flags()
            .contains(AssemblyNameComparerFlags::VERSION));
        assert_eq!(AssemblyNameComparer::default(), AssemblyNameComparer::ALL);
    }
}
