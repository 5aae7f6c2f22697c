//! Assembly identity and identity comparison for .NET assemblies.
//!
//! Resource type names embedded in a resx document are assembly-qualified, so every
//! name the writer produces ends in an assembly display name such as
//! `mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089`.
//! This module models those identities and the comparison policies used to match
//! the identity of a type loaded by the exporting host against the references
//! declared by the module being exported.
//!
//! # ECMA-335 References
//!
//! - **Section II.6.3**: Referencing assemblies - defines assembly reference format
//! - **Section II.22.5**: AssemblyRef table - defines assembly reference structure
//! - **Section II.6.2.1.3**: PublicKeyToken - defines public key token format
//!
//! See: <https://ecma-international.org/publications-and-standards/standards/ecma-335/>
//!
//! # Key Components
//!
//! - [`AssemblyIdentity`] - Name, version, culture and public key token
//! - [`AssemblyVersion`] - Four-part version numbering with parsing and comparison
//! - [`AssemblyNameComparer`] - Configurable equality policy over identities
//! - [`AssemblyNameComparerFlags`] - The identity components a comparer looks at
//!
//! # Usage Examples
//!
//! ```rust
//! use dotresx::metadata::identity::{AssemblyIdentity, AssemblyNameComparer};
//!
//! let declared = AssemblyIdentity::parse("LibA, Version=1.0.0.0, Culture=neutral, PublicKeyToken=null")?;
//! let loaded = AssemblyIdentity::parse("LibA, Version=2.0.0.0, Culture=neutral, PublicKeyToken=null")?;
//!
//! assert!(AssemblyNameComparer::IGNORE_VERSION.equals(&declared, &loaded));
//! assert!(!AssemblyNameComparer::ALL.equals(&declared, &loaded));
//! # Ok::<(), dotresx::Error>(())
//! ```

pub use assembly::{AssemblyIdentity, AssemblyVersion};
pub use comparer::{AssemblyKey, AssemblyNameComparer, AssemblyNameComparerFlags};

mod assembly;
mod comparer;
