//! Assembly identities as they appear in assembly-qualified type names.
//!
//! # Identity Components
//!
//! .NET assemblies referenced from a type name are identified by:
//! - **Simple Name**: The primary assembly name (e.g., "mscorlib", "System.Windows.Forms")
//! - **Version**: Four-part version number for binding and compatibility
//! - **Culture**: Localization culture (None for culture-neutral assemblies)
//! - **Public Key Token**: 8-byte token of the strong name key, if signed
//!
//! # Display Names
//!
//! The display name format matches the one produced by the .NET runtime and by dnlib
//! when rendering `AssemblyQualifiedName`:
//!
//! ```text
//! Name, Version=Major.Minor.Build.Revision, Culture=neutral, PublicKeyToken=b77a5c561934e089
//! ```
//!
//! Culture-neutral assemblies print `Culture=neutral`, unsigned assemblies print
//! `PublicKeyToken=null`. [`AssemblyIdentity::parse`] accepts the same format, with
//! any of the trailing components omitted.

use std::{fmt, str::FromStr};

use crate::{Error, Result};

/// Complete identity information for a .NET assembly reference.
///
/// Equality and hashing consider all four components exactly as stored. Use
/// [`crate::metadata::identity::AssemblyNameComparer`] for the looser policies
/// (case-insensitive names, ignoring the version) the resx writer relies on.
///
/// # Examples
///
/// ```rust
/// use dotresx::metadata::identity::{AssemblyIdentity, AssemblyVersion};
///
/// let identity = AssemblyIdentity::new(
///     "System.Windows.Forms",
///     AssemblyVersion::new(4, 0, 0, 0),
///     None,
///     Some([0xb7, 0x7a, 0x5c, 0x56, 0x19, 0x34, 0xe0, 0x89]),
/// );
///
/// assert_eq!(
///     identity.display_name(),
///     "System.Windows.Forms, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssemblyIdentity {
    /// Simple assembly name (e.g., "mscorlib", "System.Core").
    pub name: String,

    /// Four-part version number.
    pub version: AssemblyVersion,

    /// Culture information for localized assemblies.
    ///
    /// `None` indicates a culture-neutral assembly.
    pub culture: Option<String>,

    /// Public key token of the strong name, in display order.
    ///
    /// `None` for assemblies without a strong name.
    pub public_key_token: Option<[u8; 8]>,
}

/// Four-part version numbering for .NET assemblies.
///
/// Versions are compared component-wise in order: major, minor, build, revision.
///
/// # Examples
///
/// ```rust
/// use dotresx::metadata::identity::AssemblyVersion;
///
/// let version = AssemblyVersion::new(1, 2, 3, 4);
/// assert_eq!(version.to_string(), "1.2.3.4");
///
/// let parsed = AssemblyVersion::parse("2.0.0.0")?;
/// assert!(parsed > version);
/// # Ok::<(), dotresx::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AssemblyVersion {
    /// Major version component.
    pub major: u16,
    /// Minor version component.
    pub minor: u16,
    /// Build version component.
    pub build: u16,
    /// Revision version component.
    pub revision: u16,
}

impl AssemblyIdentity {
    /// Create a new assembly identity with the specified components.
    ///
    /// # Arguments
    ///
    /// * `name` - Simple assembly name for identification
    /// * `version` - Four-part version number
    /// * `culture` - Optional culture for localized assemblies
    /// * `public_key_token` - Optional 8-byte public key token
    pub fn new(
        name: impl Into<String>,
        version: AssemblyVersion,
        culture: Option<String>,
        public_key_token: Option<[u8; 8]>,
    ) -> Self {
        Self {
            name: name.into(),
            version,
            culture,
            public_key_token,
        }
    }

    /// Parse an assembly identity from its display name.
    ///
    /// # Format
    ///
    /// ```text
    /// AssemblyName[, Version=Major.Minor.Build.Revision][, Culture=culture][, PublicKeyToken=token]
    /// ```
    ///
    /// Unknown components (e.g. `ProcessorArchitecture=MSIL`) are skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dotresx::metadata::identity::AssemblyIdentity;
    ///
    /// let mscorlib = AssemblyIdentity::parse(
    ///     "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
    /// )?;
    /// assert_eq!(mscorlib.name, "mscorlib");
    /// assert!(mscorlib.culture.is_none());
    /// # Ok::<(), dotresx::Error>(())
    /// ```
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the name is empty, or if the version or
    /// public key token components are invalid.
    pub fn parse(display_name: &str) -> Result<Self> {
        let mut parts = display_name.split(',').map(str::trim);

        let name = parts.next().unwrap_or_default().to_string();
        if name.is_empty() {
            return Err(malformed_error!("Assembly name cannot be empty"));
        }

        let mut version = AssemblyVersion::default();
        let mut culture = None;
        let mut public_key_token = None;

        for part in parts {
            if let Some(value) = part.strip_prefix("Version=") {
                version = AssemblyVersion::parse(value)?;
            } else if let Some(value) = part.strip_prefix("Culture=") {
                if !value.is_empty() && !value.eq_ignore_ascii_case("neutral") {
                    culture = Some(value.to_string());
                }
            } else if let Some(value) = part.strip_prefix("PublicKeyToken=") {
                if !value.is_empty() && !value.eq_ignore_ascii_case("null") {
                    let token_bytes = hex::decode(value).map_err(|e| {
                        malformed_error!("Invalid hex in PublicKeyToken '{}': {}", value, e)
                    })?;

                    let token: [u8; 8] = token_bytes.as_slice().try_into().map_err(|_| {
                        malformed_error!(
                            "PublicKeyToken must be exactly 8 bytes (16 hex characters), got {} bytes from '{}'",
                            token_bytes.len(),
                            value
                        )
                    })?;
                    public_key_token = Some(token);
                }
            }
        }

        Ok(Self {
            name,
            version,
            culture,
            public_key_token,
        })
    }

    /// Generate the display name string for this assembly identity.
    ///
    /// All four components are always present in the output, which is the form used
    /// in the assembly-qualified names of a resx document.
    #[must_use]
    pub fn display_name(&self) -> String {
        let culture = match self.culture.as_deref() {
            Some(culture) if !self.is_culture_neutral() => culture,
            _ => "neutral",
        };
        let token = self
            .public_key_token
            .map_or_else(|| "null".to_string(), hex::encode);

        format!(
            "{}, Version={}, Culture={}, PublicKeyToken={}",
            self.name, self.version, culture, token
        )
    }

    /// Check if this assembly is culture-neutral.
    ///
    /// An explicit `neutral` or empty culture counts as neutral as well.
    #[must_use]
    pub fn is_culture_neutral(&self) -> bool {
        match self.culture.as_deref() {
            None => true,
            Some(culture) => culture.is_empty() || culture.eq_ignore_ascii_case("neutral"),
        }
    }
}

impl AssemblyVersion {
    /// Create a new assembly version with the specified components.
    #[must_use]
    pub const fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Parse assembly version from string representation.
    ///
    /// Accepts one to four dot-separated components; missing components default to 0.
    ///
    /// # Errors
    /// Returns an error if the version string has an invalid format.
    pub fn parse(version_str: &str) -> Result<Self> {
        let parts: Vec<&str> = version_str.split('.').collect();

        if parts.len() > 4 {
            return Err(malformed_error!("Invalid version format: {}", version_str));
        }

        let mut components = [0u16; 4];

        for (i, part) in parts.iter().enumerate() {
            components[i] = part
                .parse::<u16>()
                .map_err(|_| malformed_error!("Invalid version component: {}", part))?;
        }

        Ok(Self::new(
            components[0],
            components[1],
            components[2],
            components[3],
        ))
    }
}

impl fmt::Display for AssemblyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl fmt::Display for AssemblyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl FromStr for AssemblyVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl FromStr for AssemblyIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MSCORLIB: &str =
        "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089";

    #[test]
    fn test_assembly_version_parse_full() {
        let version = AssemblyVersion::parse("4.0.0.0").unwrap();
        assert_eq!(version, AssemblyVersion::new(4, 0, 0, 0));
    }

    #[test]
    fn test_assembly_version_parse_partial() {
        assert_eq!(
            AssemblyVersion::parse("1.2").unwrap(),
            AssemblyVersion::new(1, 2, 0, 0)
        );
        assert_eq!(
            AssemblyVersion::parse("1").unwrap(),
            AssemblyVersion::new(1, 0, 0, 0)
        );
    }

    #[test]
    fn test_assembly_version_parse_invalid() {
        assert!(AssemblyVersion::parse("").is_err());
        assert!(AssemblyVersion::parse("1.2.3.4.5").is_err());
        assert!(AssemblyVersion::parse("1.2.abc.4").is_err());
        assert!(AssemblyVersion::parse("1.2.99999.4").is_err());
    }

    #[test]
    fn test_assembly_version_ordering() {
        let v1 = AssemblyVersion::new(1, 0, 0, 0);
        let v1_1 = AssemblyVersion::new(1, 1, 0, 0);
        let v2 = AssemblyVersion::new(2, 0, 0, 0);

        assert!(v1 < v1_1);
        assert!(v1_1 < v2);
    }

    #[test]
    fn test_parse_strong_named() {
        let identity = AssemblyIdentity::parse(MSCORLIB).unwrap();

        assert_eq!(identity.name, "mscorlib");
        assert_eq!(identity.version, AssemblyVersion::new(4, 0, 0, 0));
        assert!(identity.culture.is_none());
        assert_eq!(
            identity.public_key_token,
            Some([0xb7, 0x7a, 0x5c, 0x56, 0x19, 0x34, 0xe0, 0x89])
        );
    }

    #[test]
    fn test_parse_simple_name() {
        let identity = AssemblyIdentity::parse("LibA").unwrap();

        assert_eq!(identity.name, "LibA");
        assert_eq!(identity.version, AssemblyVersion::default());
        assert!(identity.public_key_token.is_none());
    }

    #[test]
    fn test_parse_culture_and_unknown_components() {
        let identity =
            AssemblyIdentity::parse("Lib.resources, Version=1.0.0.0, Culture=de-DE, ProcessorArchitecture=MSIL")
                .unwrap();

        assert_eq!(identity.culture.as_deref(), Some("de-DE"));
        assert!(!identity.is_culture_neutral());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(AssemblyIdentity::parse("").is_err());
        assert!(AssemblyIdentity::parse(", Version=1.0.0.0").is_err());
        assert!(AssemblyIdentity::parse("A, PublicKeyToken=zz").is_err());
        assert!(AssemblyIdentity::parse("A, PublicKeyToken=b77a5c56").is_err());
    }

    #[test]
    fn test_display_name_round_trip() {
        let identity = AssemblyIdentity::parse(MSCORLIB).unwrap();
        assert_eq!(identity.display_name(), MSCORLIB);
        assert_eq!(identity.to_string(), MSCORLIB);
    }

    #[test]
    fn test_display_name_defaults() {
        let identity = AssemblyIdentity::new("LibA", AssemblyVersion::new(1, 0, 0, 0), None, None);
        assert_eq!(
            identity.display_name(),
            "LibA, Version=1.0.0.0, Culture=neutral, PublicKeyToken=null"
        );
    }

    #[test]
    fn test_from_str() {
        let identity: AssemblyIdentity = MSCORLIB.parse().unwrap();
        assert_eq!(identity.name, "mscorlib");
    }
}
